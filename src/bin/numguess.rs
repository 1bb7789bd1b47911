//! Console number-guessing game: find a number between 1 and 100.

use std::io;

use clap::Parser;
use tracing::debug;

use textstat::guess::{play, Game, MAX_GUESS, MIN_GUESS};
use textstat::logging;

#[derive(Parser, Debug)]
#[command(author, version, about = "Guess a number between 1 and 100")]
struct Args {
    /// Fix the secret number instead of drawing it at random.
    #[arg(long, hide = true, value_parser = clap::value_parser!(i64).range(MIN_GUESS..=MAX_GUESS))]
    target: Option<i64>,

    #[arg(short, long)]
    verbose: bool,
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    logging::init_tracing(args.verbose);

    let mut game = match args.target {
        Some(target) => Game::with_target(target)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?,
        None => Game::random(),
    };

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let outcome = play(&mut game, stdin.lock(), &mut stdout)?;
    debug!(?outcome, "game finished");
    Ok(())
}
