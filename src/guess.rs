//! Console number-guessing game.

use std::io::{self, BufRead, Write};

use rand::Rng;
use tracing::debug;

use crate::error::GuessError;

pub const MIN_GUESS: i64 = 1;
pub const MAX_GUESS: i64 = 100;

const INTRO: &str = "1から100までの数字を当ててください！";
const PROMPT: &str = "数字を入力してください: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    TooLow,
    TooHigh,
    Correct { attempts: u32 },
}

impl Verdict {
    pub fn message(&self) -> String {
        match self {
            Verdict::TooLow => "もっと大きい数字です".to_string(),
            Verdict::TooHigh => "もっと小さい数字です".to_string(),
            Verdict::Correct { attempts } => {
                format!("正解です！{}回目で当たりました！", attempts)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won { attempts: u32 },
    /// Input ended before the number was found.
    Abandoned { attempts: u32 },
}

#[derive(Debug)]
pub struct Game {
    target: i64,
    attempts: u32,
}

impl Game {
    pub fn with_target(target: i64) -> Result<Self, GuessError> {
        if !(MIN_GUESS..=MAX_GUESS).contains(&target) {
            return Err(GuessError::OutOfRange(target));
        }
        Ok(Game {
            target,
            attempts: 0,
        })
    }

    pub fn random() -> Self {
        Game {
            target: rand::thread_rng().gen_range(MIN_GUESS..=MAX_GUESS),
            attempts: 0,
        }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Judges one line of input. Any parsed integer counts as an attempt, even
    /// when it is out of range; unparsable input does not.
    pub fn guess(&mut self, input: &str) -> Result<Verdict, GuessError> {
        let value = parse_guess(input)?;
        self.attempts += 1;
        if !(MIN_GUESS..=MAX_GUESS).contains(&value) {
            return Err(GuessError::OutOfRange(value));
        }
        let verdict = match value.cmp(&self.target) {
            std::cmp::Ordering::Equal => Verdict::Correct {
                attempts: self.attempts,
            },
            std::cmp::Ordering::Less => Verdict::TooLow,
            std::cmp::Ordering::Greater => Verdict::TooHigh,
        };
        debug!(attempts = self.attempts, ?verdict, "guess judged");
        Ok(verdict)
    }
}

/// Parses a decimal integer. Surrounding whitespace, a leading sign, `_`
/// between digits and decimal digits of any script (`４２`, `٤٢`) are
/// accepted. Values too large for `i64` saturate, which the range check then
/// rejects.
pub fn parse_guess(input: &str) -> Result<i64, GuessError> {
    let not_a_number = || GuessError::NotANumber(input.trim().to_string());
    let trimmed = input.trim();
    let (negative, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    if body.is_empty() || body.starts_with('_') || body.ends_with('_') || body.contains("__") {
        return Err(not_a_number());
    }

    let mut value: i64 = 0;
    let mut overflowed = false;
    for c in body.chars() {
        if c == '_' {
            continue;
        }
        let digit = decimal_digit(c).ok_or_else(not_a_number)?;
        match value.checked_mul(10).and_then(|v| v.checked_add(digit)) {
            Some(next) => value = next,
            None => overflowed = true,
        }
    }

    Ok(match (overflowed, negative) {
        (true, true) => i64::MIN,
        (true, false) => i64::MAX,
        (false, true) => -value,
        (false, false) => value,
    })
}

/// Zero digit of every run of ten decimal digits (general category `Nd`).
static DECIMAL_ZEROS: &[u32] = &[
    0x0030, 0x0660, 0x06F0, 0x07C0, 0x0966, 0x09E6, 0x0A66, 0x0AE6, 0x0B66, 0x0BE6, 0x0C66,
    0x0CE6, 0x0D66, 0x0DE6, 0x0E50, 0x0ED0, 0x0F20, 0x1040, 0x1090, 0x17E0, 0x1810, 0x1946,
    0x19D0, 0x1A80, 0x1A90, 0x1B50, 0x1BB0, 0x1C40, 0x1C50, 0xA620, 0xA8D0, 0xA900, 0xA9D0,
    0xA9F0, 0xAA50, 0xABF0, 0xFF10, 0x104A0, 0x10D30, 0x11066, 0x110F0, 0x11136, 0x111D0,
    0x112F0, 0x11450, 0x114D0, 0x11650, 0x116C0, 0x11730, 0x118E0, 0x11950, 0x11C50, 0x11D50,
    0x11DA0, 0x11F50, 0x16A60, 0x16AC0, 0x16B50, 0x1D7CE, 0x1D7D8, 0x1D7E2, 0x1D7EC, 0x1D7F6,
    0x1E140, 0x1E2F0, 0x1E4F0, 0x1E950, 0x1FBF0,
];

fn decimal_digit(c: char) -> Option<i64> {
    let code = c as u32;
    DECIMAL_ZEROS
        .iter()
        .find(|&&zero| (zero..zero + 10).contains(&code))
        .map(|&zero| i64::from(code - zero))
}

/// Runs the prompt loop until the number is guessed or `input` is exhausted.
pub fn play<R, W>(game: &mut Game, mut input: R, output: &mut W) -> io::Result<Outcome>
where
    R: BufRead,
    W: Write,
{
    writeln!(output, "{}", INTRO)?;
    let mut buffer = Vec::new();
    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        buffer.clear();
        if input.read_until(b'\n', &mut buffer)? == 0 {
            writeln!(output)?;
            debug!(attempts = game.attempts(), "input closed before a correct guess");
            return Ok(Outcome::Abandoned {
                attempts: game.attempts(),
            });
        }

        // Undecodable input is rejected like any other non-number.
        let judged = match std::str::from_utf8(&buffer) {
            Ok(line) => game.guess(line),
            Err(err) => {
                debug!(error = %err, "guess input is not valid UTF-8");
                let lossy = String::from_utf8_lossy(&buffer);
                Err(GuessError::NotANumber(lossy.trim().to_string()))
            }
        };

        match judged {
            Ok(Verdict::Correct { attempts }) => {
                writeln!(output, "{}", Verdict::Correct { attempts }.message())?;
                return Ok(Outcome::Won { attempts });
            }
            Ok(verdict) => writeln!(output, "{}", verdict.message())?,
            Err(err) => writeln!(output, "{}", err)?,
        }
    }
}
