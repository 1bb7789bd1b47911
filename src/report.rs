//! Text rendering of engine results: summary counts and top-N frequency listings.

use std::fmt::Write as FmtWrite;

use colored::*;
use terminal_size::{terminal_size, Width};
use unicode_width::UnicodeWidthStr;

use crate::engine::{FrequencyTable, SummaryStats, TextStatsEngine};
use crate::script::is_whitespace;

pub const DEFAULT_TOP_N: usize = 10;
const DEFAULT_COLUMNS: usize = 80;
// Terminal columns taken by the quoted label.
const LABEL_WIDTH: usize = 12;
// Label column plus right-aligned count.
const ROW_PREFIX_WIDTH: usize = 24;
const MAX_BAR_WIDTH: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    pub top_n: usize,
    /// Width of the histogram bar for the most frequent row; 0 disables bars.
    pub bar_width: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        ReportOptions {
            top_n: DEFAULT_TOP_N,
            bar_width: 0,
        }
    }
}

pub fn bar_width_for_columns(columns: usize) -> usize {
    columns.saturating_sub(ROW_PREFIX_WIDTH).min(MAX_BAR_WIDTH)
}

/// Bar width for the attached terminal, or for 80 columns when there is none.
pub fn detect_bar_width() -> usize {
    let columns = terminal_size()
        .map(|(Width(w), _)| w as usize)
        .unwrap_or(DEFAULT_COLUMNS);
    bar_width_for_columns(columns)
}

/// Printable label for a character. Whitespace and control characters get a
/// readable name instead of being printed raw.
pub fn char_label(c: char) -> String {
    match c {
        '\n' => "\\n".to_string(),
        '\t' => "\\t".to_string(),
        '\r' => "\\r".to_string(),
        ' ' => "空白".to_string(),
        '\u{3000}' => "全角空白".to_string(),
        c if is_whitespace(c) || c.is_control() => format!("U+{:04X}", c as u32),
        c => c.to_string(),
    }
}

fn histogram_bar(count: u64, max: u64, width: usize) -> String {
    if width == 0 || max == 0 {
        return String::new();
    }
    let scaled = (count as f64 / max as f64 * width as f64).round() as usize;
    "█".repeat(scaled.clamp(1, width))
}

fn format_frequency_row(c: char, count: u64, max: u64, bar_width: usize) -> String {
    let label = format!("'{}':", char_label(c));
    let padding = LABEL_WIDTH.saturating_sub(label.width());
    let mut row = format!(
        "{}{} {}",
        label,
        " ".repeat(padding),
        format!("{:>8}", count).bright_yellow()
    );
    let bar = histogram_bar(count, max, bar_width);
    if !bar.is_empty() {
        let _ = write!(row, "  {}", bar.cyan());
    }
    row
}

fn write_frequency_section(
    output: &mut String,
    title: &str,
    table: &FrequencyTable,
    options: &ReportOptions,
) {
    let heading = format!("=== {}（上位{}件）===", title, options.top_n);
    let _ = writeln!(output, "\n{}", heading.blue().bold());
    let top = table.top(options.top_n);
    let max = top.first().map(|&(_, n)| n).unwrap_or(0);
    for (c, count) in top {
        let _ = writeln!(
            output,
            "{}",
            format_frequency_row(c, count, max, options.bar_width)
        );
    }
}

fn write_summary_section(output: &mut String, stats: &SummaryStats) {
    let _ = writeln!(output, "\n{}", "=== テキスト統計 ===".blue().bold());
    let _ = writeln!(
        output,
        "総文字数: {}",
        stats.total_characters.to_string().bright_yellow()
    );
    let _ = writeln!(
        output,
        "空白を除いた文字数: {}",
        stats.non_whitespace_characters.to_string().bright_yellow()
    );
    let _ = writeln!(output, "行数: {}", stats.lines.to_string().bright_yellow());
    let _ = writeln!(output, "単語数: {}", stats.words.to_string().bright_yellow());
}

/// Full report for a loaded engine. The script section is left out when the
/// text contains no script characters.
pub fn build_analysis_report(engine: &TextStatsEngine, options: &ReportOptions) -> String {
    let mut output = String::new();
    let (Some(stats), Some(all), Some(visible), Some(script)) = (
        engine.summary_statistics(),
        engine.character_frequency(),
        engine.character_frequency_excluding_whitespace(),
        engine.script_character_frequency(),
    ) else {
        let _ = writeln!(output, "テキストが読み込まれていません。");
        return output;
    };

    write_summary_section(&mut output, &stats);
    write_frequency_section(&mut output, "文字カウント", &all, options);
    write_frequency_section(&mut output, "空白を除いた文字カウント", &visible, options);

    if !script.is_empty() {
        write_frequency_section(&mut output, "日本語文字カウント", &script, options);
        let breakdown: Vec<String> = engine
            .script_block_totals()
            .unwrap_or_default()
            .into_iter()
            .map(|(block, total)| format!("{}: {}", block.label(), total))
            .collect();
        let _ = writeln!(output, "内訳: {}", breakdown.join("  "));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use colored::control;

    fn plain_options(top_n: usize) -> ReportOptions {
        control::set_override(false);
        ReportOptions {
            top_n,
            bar_width: 0,
        }
    }

    #[test]
    fn test_char_label_names_whitespace() {
        assert_eq!(char_label('\n'), "\\n");
        assert_eq!(char_label('\t'), "\\t");
        assert_eq!(char_label(' '), "空白");
        assert_eq!(char_label('\u{3000}'), "全角空白");
        assert_eq!(char_label('\u{a0}'), "U+00A0");
        assert_eq!(char_label('\u{7}'), "U+0007");
        assert_eq!(char_label('字'), "字");
    }

    #[test]
    fn test_bar_width_for_columns() {
        assert_eq!(bar_width_for_columns(80), 40);
        assert_eq!(bar_width_for_columns(40), 16);
        assert_eq!(bar_width_for_columns(10), 0);
    }

    #[test]
    fn test_histogram_bar_scales_to_max() {
        assert_eq!(histogram_bar(10, 10, 20).chars().count(), 20);
        assert_eq!(histogram_bar(5, 10, 20).chars().count(), 10);
        assert_eq!(histogram_bar(1, 1000, 20).chars().count(), 1);
        assert!(histogram_bar(3, 10, 0).is_empty());
    }

    #[test]
    fn test_report_for_unloaded_engine() {
        let report = build_analysis_report(&TextStatsEngine::new(), &plain_options(10));
        assert_eq!(report, "テキストが読み込まれていません。\n");
    }

    #[test]
    fn test_report_contains_summary_counts() {
        let engine = TextStatsEngine::from_text("ab\ncd ef");
        let report = build_analysis_report(&engine, &plain_options(10));
        assert!(report.contains("=== テキスト統計 ==="), "{report}");
        assert!(report.contains("総文字数: 8"), "{report}");
        assert!(report.contains("空白を除いた文字数: 6"), "{report}");
        assert!(report.contains("行数: 2"), "{report}");
        assert!(report.contains("単語数: 3"), "{report}");
        assert!(report.contains("'\\n':"), "newline should be labelled: {report}");
        assert!(
            !report.contains("日本語文字カウント"),
            "ASCII text should not print a script section: {report}"
        );
    }

    #[test]
    fn test_report_truncates_to_top_n() {
        let engine = TextStatsEngine::from_text("aaaabbbccd");
        let report = build_analysis_report(&engine, &plain_options(2));
        let section = report
            .split("=== 空白を除いた文字カウント（上位2件）===")
            .nth(1)
            .expect("visible section present");
        let rows: Vec<&str> = section.lines().filter(|l| l.starts_with('\'')).collect();
        assert_eq!(rows.len(), 2, "{section}");
        assert!(rows[0].starts_with("'a':"), "{section}");
        assert!(rows[0].trim_end().ends_with('4'), "{section}");
        assert!(rows[1].starts_with("'b':"), "{section}");
    }

    #[test]
    fn test_report_script_section_and_breakdown() {
        let engine = TextStatsEngine::from_text("ねこネコ猫ねこ");
        let report = build_analysis_report(&engine, &plain_options(10));
        assert!(report.contains("=== 日本語文字カウント（上位10件）==="), "{report}");
        assert!(report.contains("内訳: ひらがな: 4  カタカナ: 2  漢字: 1"), "{report}");
    }

    #[test]
    fn test_report_rows_carry_bars() {
        control::set_override(false);
        let engine = TextStatsEngine::from_text("aab");
        let options = ReportOptions {
            top_n: 10,
            bar_width: 4,
        };
        let report = build_analysis_report(&engine, &options);
        assert!(report.contains("████"), "{report}");
        assert!(report.contains("██\n"), "{report}");
    }

    #[test]
    fn test_rows_align_across_wide_labels() {
        control::set_override(false);
        let rows = [
            format_frequency_row('a', 7, 7, 0),
            format_frequency_row('字', 7, 7, 0),
            format_frequency_row(' ', 7, 7, 0),
            format_frequency_row('\n', 7, 7, 0),
        ];
        for row in &rows {
            assert_eq!(row.width(), LABEL_WIDTH + 1 + 8, "misaligned row: {row:?}");
            assert!(row.ends_with("       7"), "{row:?}");
        }
    }
}
