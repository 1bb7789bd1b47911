//! Character classification: whitespace, line breaks and the Japanese script blocks.

use std::ops::RangeInclusive;

/// Codepoint ranges counted by the script table: hiragana ぁ-ん, katakana ァ-ン
/// and the unified ideographs 一-龥.
pub static SCRIPT_RANGES: [RangeInclusive<char>; 3] = [
    '\u{3041}'..='\u{3093}',
    '\u{30A1}'..='\u{30F3}',
    '\u{4E00}'..='\u{9FA5}',
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScriptBlock {
    Hiragana,
    Katakana,
    Ideograph,
}

impl ScriptBlock {
    pub const ALL: [ScriptBlock; 3] = [
        ScriptBlock::Hiragana,
        ScriptBlock::Katakana,
        ScriptBlock::Ideograph,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ScriptBlock::Hiragana => "ひらがな",
            ScriptBlock::Katakana => "カタカナ",
            ScriptBlock::Ideograph => "漢字",
        }
    }

    fn range(self) -> &'static RangeInclusive<char> {
        match self {
            ScriptBlock::Hiragana => &SCRIPT_RANGES[0],
            ScriptBlock::Katakana => &SCRIPT_RANGES[1],
            ScriptBlock::Ideograph => &SCRIPT_RANGES[2],
        }
    }
}

/// Returns the script block `c` belongs to, if any.
pub fn classify(c: char) -> Option<ScriptBlock> {
    ScriptBlock::ALL
        .into_iter()
        .find(|block| block.range().contains(&c))
}

pub fn is_script_char(c: char) -> bool {
    SCRIPT_RANGES.iter().any(|range| range.contains(&c))
}

/// Unicode `White_Space` plus the information separators U+001C..=U+001F.
pub fn is_whitespace(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r'
            | '\u{0b}'
            | '\u{0c}'
            | '\u{1c}'
            | '\u{1d}'
            | '\u{1e}'
            | '\u{85}'
            | '\u{2028}'
            | '\u{2029}'
    )
}

/// Number of line-break-delimited segments. `\r\n` is one break, a trailing
/// break does not open an empty final line, and empty text has no lines.
pub fn count_lines(text: &str) -> usize {
    let mut lines = 0;
    let mut open_line = false;
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if is_line_break(c) {
            lines += 1;
            open_line = false;
            if c == '\r' && chars.peek() == Some(&'\n') {
                chars.next();
            }
        } else {
            open_line = true;
        }
    }
    if open_line {
        lines += 1;
    }
    lines
}

/// Number of whitespace-delimited tokens.
///
/// Text without spaces between words (most Japanese prose) counts as a single
/// token per run; this undercount is a known limitation.
pub fn count_words(text: &str) -> usize {
    text.split(is_whitespace)
        .filter(|token| !token.is_empty())
        .count()
}

/// Collapses `\r\n` and lone `\r` into `\n`, as text-mode file reads do.
pub fn translate_newlines(text: &str) -> String {
    if !text.contains('\r') {
        return text.to_string();
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}
