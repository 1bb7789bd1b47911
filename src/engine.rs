//! The statistics engine: loads one text file and tabulates its characters.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use indexmap::IndexMap;
use tracing::debug;
use unicode_normalization::UnicodeNormalization;

use crate::error::{Result, TextStatsError};
use crate::script::{self, count_lines, count_words, is_script_char, is_whitespace, ScriptBlock};

/// Character occurrence counts, iterated in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: IndexMap<char, u64>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, c: char) {
        *self.counts.entry(c).or_insert(0) += 1;
    }

    pub fn get(&self, c: char) -> Option<u64> {
        self.counts.get(&c).copied()
    }

    /// Number of distinct characters.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, u64)> + '_ {
        self.counts.iter().map(|(&c, &n)| (c, n))
    }

    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.counts.keys().copied()
    }

    /// All entries by descending count. Equal counts keep first-appearance order.
    pub fn sorted_by_count(&self) -> Vec<(char, u64)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|(_, a), (_, b)| b.cmp(a));
        entries
    }

    /// The `n` most frequent entries, ties broken as in [`Self::sorted_by_count`].
    pub fn top(&self, n: usize) -> Vec<(char, u64)> {
        let mut entries = self.sorted_by_count();
        entries.truncate(n);
        entries
    }
}

impl FromIterator<char> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        let mut table = FrequencyTable::new();
        for c in iter {
            table.record(c);
        }
        table
    }
}

/// Aggregate counts over the loaded text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SummaryStats {
    pub total_characters: usize,
    pub non_whitespace_characters: usize,
    pub lines: usize,
    pub words: usize,
}

/// Holds at most one decoded text and answers frequency queries over it.
///
/// Every query returns `None` until a load succeeds. A failed load clears any
/// previously loaded text.
#[derive(Debug, Default)]
pub struct TextStatsEngine {
    text: Option<String>,
    normalize: bool,
}

impl TextStatsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// NFC-normalize text on load so decomposed kana count as one character.
    pub fn with_normalization(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// An engine already holding `text`, skipping file I/O.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            normalize: false,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.text.is_some()
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn load(&mut self, path: &Path) -> Result<()> {
        self.text = None;
        match read_text(path) {
            Ok(text) => {
                let text = if self.normalize {
                    text.as_str().nfc().collect()
                } else {
                    text
                };
                debug!(
                    path = %path.display(),
                    chars = text.chars().count(),
                    normalized = self.normalize,
                    "loaded text"
                );
                self.text = Some(text);
                Ok(())
            }
            Err(err) => {
                debug!(path = %path.display(), error = %err, "load failed");
                Err(err)
            }
        }
    }

    pub fn character_frequency(&self) -> Option<FrequencyTable> {
        self.text().map(|text| text.chars().collect())
    }

    pub fn character_frequency_excluding_whitespace(&self) -> Option<FrequencyTable> {
        self.text()
            .map(|text| text.chars().filter(|&c| !is_whitespace(c)).collect())
    }

    pub fn script_character_frequency(&self) -> Option<FrequencyTable> {
        self.text()
            .map(|text| text.chars().filter(|&c| is_script_char(c)).collect())
    }

    /// Per-block totals of the script table, in [`ScriptBlock::ALL`] order.
    pub fn script_block_totals(&self) -> Option<Vec<(ScriptBlock, u64)>> {
        let table = self.script_character_frequency()?;
        let totals = ScriptBlock::ALL
            .into_iter()
            .map(|block| {
                let sum = table
                    .iter()
                    .filter(|&(c, _)| script::classify(c) == Some(block))
                    .map(|(_, n)| n)
                    .sum::<u64>();
                (block, sum)
            })
            .collect();
        Some(totals)
    }

    pub fn summary_statistics(&self) -> Option<SummaryStats> {
        let text = self.text()?;
        Some(SummaryStats {
            total_characters: text.chars().count(),
            non_whitespace_characters: text.chars().filter(|&c| !is_whitespace(c)).count(),
            lines: count_lines(text),
            words: count_words(text),
        })
    }
}

/// Reads and decodes the whole file. The handle is dropped before returning on every path.
fn read_text(path: &Path) -> Result<String> {
    let read_error = |source: io::Error| TextStatsError::Read {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::open(path).map_err(|err| {
        if err.kind() == io::ErrorKind::NotFound {
            TextStatsError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            read_error(err)
        }
    })?;

    let capacity = file.metadata().map(|m| m.len() as usize).unwrap_or(0);
    let mut bytes = Vec::with_capacity(capacity);
    file.read_to_end(&mut bytes).map_err(read_error)?;

    let text = String::from_utf8(bytes)
        .map_err(|err| read_error(io::Error::new(io::ErrorKind::InvalidData, err)))?;
    Ok(script::translate_newlines(&text))
}
