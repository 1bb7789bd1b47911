//! Text File Statistics Tool
//!
//! Reads one UTF-8 text file and prints its character, line and word counts
//! together with the most frequent characters overall, excluding whitespace,
//! and among hiragana, katakana and kanji.

use clap::Parser;
use std::env;
use std::ffi::OsString;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use colored::*;
use tracing::debug;

use textstat::report::{build_analysis_report, detect_bar_width, ReportOptions, DEFAULT_TOP_N};
use textstat::timing::measure_performance;
use textstat::{logging, Result, TextStatsEngine};

const SAMPLE_FILE_NAME: &str = "sample.txt";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Character and word statistics for a text file",
    long_about = "Counts characters, non-whitespace characters, lines and words of a UTF-8 text file and lists the most frequent characters, including a separate table for hiragana, katakana and kanji."
)]
struct Args {
    /// File to analyse. Defaults to sample.txt next to the executable.
    path: Option<PathBuf>,

    /// Number of entries shown per frequency table.
    #[arg(short, long, default_value_t = DEFAULT_TOP_N, value_parser = parse_top_n)]
    top: usize,

    /// NFC-normalize the text before counting.
    #[arg(short = 'N', long)]
    normalize: bool,

    #[arg(short, long)]
    verbose: bool,

    #[arg(long)]
    no_color: bool,
}

fn parse_top_n(value: &str) -> std::result::Result<usize, String> {
    let n: usize = value
        .parse()
        .map_err(|_| format!("'{value}' is not a positive number"))?;
    if n == 0 {
        return Err("must be at least 1".to_string());
    }
    Ok(n)
}

fn default_sample_path() -> io::Result<PathBuf> {
    let exe = env::current_exe()?;
    exe.parent()
        .map(|dir| dir.join(SAMPLE_FILE_NAME))
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no directory for executable {}", exe.display()),
            )
        })
}

fn analyze_text_file<W: Write>(
    path: &Path,
    normalize: bool,
    options: &ReportOptions,
    out: &mut W,
) -> Result<()> {
    let mut engine = TextStatsEngine::new().with_normalization(normalize);
    engine.load(path)?;
    let report = build_analysis_report(&engine, options);
    out.write_all(report.as_bytes())?;
    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    match run_with_args(env::args_os()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}: {}", "エラー".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}

fn run_with_args<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args = Args::parse_from(args);
    logging::init_tracing(args.verbose);
    if args.no_color {
        colored::control::set_override(false);
    }

    let path = match &args.path {
        Some(path) => path.clone(),
        None => default_sample_path()?,
    };
    debug!(path = %path.display(), top = args.top, "starting analysis");

    let options = ReportOptions {
        top_n: args.top,
        bar_width: detect_bar_width(),
    };
    measure_performance("analyze_text_file", || {
        let mut stdout = io::stdout().lock();
        analyze_text_file(&path, args.normalize, &options, &mut stdout)
    })
}
