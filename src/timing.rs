//! Wall-clock timing for the top-level analysis call.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use colored::*;

/// Reports elapsed milliseconds for `label` when dropped, so the report is
/// written on every exit path of the timed scope.
pub struct ScopedTimer {
    label: String,
    start_time: Instant,
    writer: Box<dyn Write + Send>,
    enabled: bool,
}

impl ScopedTimer {
    pub fn new(label: impl Into<String>) -> Self {
        ScopedTimer::with_writer(label, Box::new(io::stdout()), true)
    }

    pub fn with_writer(
        label: impl Into<String>,
        writer: Box<dyn Write + Send>,
        enabled: bool,
    ) -> Self {
        ScopedTimer {
            label: label.into(),
            start_time: Instant::now(),
            writer,
            enabled,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    fn print_elapsed(&mut self) {
        if !self.enabled {
            return;
        }
        let millis = elapsed_millis(self.elapsed());
        let writer = &mut self.writer;
        let _ = writeln!(
            writer,
            "{}の実行時間: {}ミリ秒",
            self.label,
            format!("{:.2}", millis).bright_yellow()
        );
        let _ = writer.flush();
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        self.print_elapsed();
    }
}

pub fn elapsed_millis(elapsed: Duration) -> f64 {
    elapsed.as_secs_f64() * 1000.0
}

/// Runs `operation` and prints how long it took to stdout.
pub fn measure_performance<T, F>(label: &str, operation: F) -> T
where
    F: FnOnce() -> T,
{
    let _timer = ScopedTimer::new(label);
    operation()
}

/// Like [`measure_performance`], reporting to `writer` instead of stdout.
pub fn measure_with_writer<T, F>(label: &str, writer: Box<dyn Write + Send>, operation: F) -> T
where
    F: FnOnce() -> T,
{
    let _timer = ScopedTimer::with_writer(label, writer, true);
    operation()
}
