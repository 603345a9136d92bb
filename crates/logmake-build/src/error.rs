//! Error types for logmake-build.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for logmake-build operations.
pub type Result<T> = std::result::Result<T, BuildError>;

/// Errors that can occur while turning a build log into a CMakeLists.txt.
#[derive(Error, Debug)]
pub enum BuildError {
    /// The build log could not be opened or read.
    #[error("Failed to read build log {}: {source}", path.display())]
    ReadLog {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The generated document could not be written.
    #[error("Failed to write output file {}: {source}", path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read configuration file.
    #[error("Failed to read config file: {0}")]
    ReadConfig(#[from] std::io::Error),

    /// Failed to parse TOML configuration.
    #[error("Failed to parse TOML config: {0}")]
    ParseToml(#[from] toml::de::Error),

    /// A command line could not be split into shell words.
    #[error("Failed to tokenize command line: {0}")]
    Tokenize(#[from] TokenizeError),
}

/// Malformed quoting in a single command line.
///
/// The scanner recovers from these by skipping the offending line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenizeError {
    /// A quote was opened but never closed.
    #[error("unterminated {quote} quote starting at byte {offset}")]
    UnterminatedQuote { quote: char, offset: usize },

    /// The line ends in the middle of a backslash escape.
    #[error("trailing backslash at end of line")]
    TrailingEscape,
}
