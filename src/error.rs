//! Error types for the statistics engine and the guessing game.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures while loading or reporting on a text file.
#[derive(Debug, Error)]
pub enum TextStatsError {
    #[error("ファイル '{}' が見つかりません。", path.display())]
    FileNotFound { path: PathBuf },

    #[error("ファイル '{}' の読み込み中にエラーが発生しました: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("出力エラー: {0}")]
    Io(#[from] io::Error),
}

/// Rejected guesses. Both variants make the game re-prompt.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GuessError {
    #[error("正しい数字を入力してください")]
    NotANumber(String),

    #[error("1から100までの数字を入力してください")]
    OutOfRange(i64),
}

pub type Result<T> = std::result::Result<T, TextStatsError>;
