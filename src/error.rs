//! Error types for Dakota.
//!
//! This module provides a unified error type [`DakotaError`] that covers
//! syntax errors in configuration text, stream faults, rejections raised by
//! a configuration consumer, and bitmap export failures.

use thiserror::Error;

/// Result type alias using [`DakotaError`].
pub type Result<T> = std::result::Result<T, DakotaError>;

/// Unified error type for all Dakota operations.
#[derive(Error, Debug)]
pub enum DakotaError {
    // ============ Syntax Errors ============
    /// A record is missing one or more of its fields
    #[error("line {line}: {record} requires {fields}")]
    MissingField {
        line: usize,
        record: &'static str,
        fields: &'static str,
    },

    /// `.comment` without any text
    #[error("line {line}: empty comment")]
    EmptyComment { line: usize },

    /// Top-level verb is not one of the known ones
    #[error("line {line}: unknown verb '{verb}'")]
    UnknownVerb { line: usize, verb: String },

    /// Tile body keyword is not one of the known ones
    #[error("line {line}: unknown tile record type '{keyword}'")]
    UnknownTileRecord { line: usize, keyword: String },

    /// BRAM block index is not a non-negative decimal number
    #[error("line {line}: invalid bram index '{token}'")]
    InvalidBramIndex { line: usize, token: String },

    /// BRAM data token is not a hexadecimal number
    #[error("line {line}: hex bram value required, got '{token}'")]
    InvalidBramValue { line: usize, token: String },

    /// Token bytes are not valid UTF-8
    #[error("line {line}: invalid UTF-8 in input")]
    InvalidText { line: usize },

    // ============ Consumer Errors ============
    /// A second `.device` entry
    #[error("device already set to '{current}', got '{name}'")]
    DuplicateDevice { current: String, name: String },

    /// A setting name repeated within its scope
    #[error("duplicate {scope} '{name}'")]
    DuplicateSetting { scope: String, name: String },

    /// A tile configured twice
    #[error("duplicate tile '{name}'")]
    DuplicateTile { name: String },

    /// A BRAM block initialised twice
    #[error("duplicate bram block {index}")]
    DuplicateBram { index: u32 },

    /// Body record or commit with no open tile or BRAM block
    #[error("{record} outside of a tile or bram block")]
    RecordOutsideBlock { record: &'static str },

    /// BRAM data delivered out of sequence
    #[error("bram block {index}: expected position {expected}, got {got}")]
    DataOutOfOrder {
        index: u32,
        expected: usize,
        got: usize,
    },

    /// Generic rejection from a consumer
    #[error("{message}")]
    Rejected { message: String },

    // ============ Bitmap Errors ============
    /// Bitmap planes do not match the declared geometry
    #[error("Invalid bitmap: {message}")]
    InvalidBitmap { message: String },

    // ============ I/O Errors ============
    /// Fault reported by the input stream
    #[error("{source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// Error opening a configuration file
    #[error("Failed to read config file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Error writing an output file
    #[error("Failed to write '{path}': {source}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl DakotaError {
    /// Create a missing field error
    pub fn missing(line: usize, record: &'static str, fields: &'static str) -> Self {
        Self::MissingField {
            line,
            record,
            fields,
        }
    }

    /// Create a consumer rejection
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    /// Create a duplicate setting error
    pub fn duplicate(scope: impl Into<String>, name: impl Into<String>) -> Self {
        Self::DuplicateSetting {
            scope: scope.into(),
            name: name.into(),
        }
    }

    /// Line of input the error refers to, for syntax errors.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::MissingField { line, .. }
            | Self::EmptyComment { line }
            | Self::UnknownVerb { line, .. }
            | Self::UnknownTileRecord { line, .. }
            | Self::InvalidBramIndex { line, .. }
            | Self::InvalidBramValue { line, .. }
            | Self::InvalidText { line } => Some(*line),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_message() {
        let err = DakotaError::missing(3, "sysconfig", "name and value");
        assert_eq!(err.to_string(), "line 3: sysconfig requires name and value");
        assert_eq!(err.line(), Some(3));
    }

    #[test]
    fn test_unknown_verb_keeps_full_token() {
        let verb = format!(".{}", "x".repeat(64));
        let err = DakotaError::UnknownVerb {
            line: 1,
            verb: verb.clone(),
        };
        assert!(err.to_string().contains(&verb));
    }

    #[test]
    fn test_io_error_uses_platform_description() {
        let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "stream closed");
        let err = DakotaError::from(io);
        assert_eq!(err.to_string(), "stream closed");
        assert_eq!(err.line(), None);
    }
}
