//! Reader for Trellis-style chip configuration text.
//!
//! The format is line-oriented. Each entry starts with a verb introduced by
//! `.`; tile and BRAM entries are blocks whose body runs until the next `.`
//! verb or end of input, with no explicit terminator.
//!
//! # Grammar Overview
//!
//! ```text
//! config      = { comment | entry }
//! comment     = '#' { any_char } newline
//! entry       = ".device" NAME
//!             | ".comment" TEXT
//!             | ".sysconfig" NAME VALUE
//!             | ".tile" NAME { tile_record }
//!             | ".tile_group" NAME { NAME } newline { tile_record }
//!             | ".bram_init" INDEX { HEX }
//! tile_record = "arc:" SINK SOURCE
//!             | "word:" NAME VALUE
//!             | "enum:" NAME VALUE
//!             | "unknown:" VALUE
//! ```
//!
//! Fields of an entry header or tile record must be on the same line as
//! their verb or keyword. BRAM values may be spread over any number of
//! lines.
//!
//! Between entries a `#` starts a comment wherever it appears. Inside a
//! block body a comment must start its own line: `arc: A B # note` is an
//! error, because `#` is read as the next record keyword.
//!
//! # Example
//!
//! ```text
//! .device LFE5U-25F
//! .sysconfig MCCLK_FREQ 38.8
//!
//! .tile CIB_R10C3:CIB_EBR
//! arc: JCE0 H02E0101
//! enum: CIB.JCE0MUX CE0
//!
//! .bram_init 0
//! 000 0ff 1a4 000
//! ```
//!
//! Parsing reports to a [`ConfigAction`]; see [`crate::chip::ChipBuilder`]
//! for the consumer that builds a [`crate::chip::ChipConfig`].

mod action;
mod parser;
mod scanner;

pub use action::{ConfigAction, Event};
pub use parser::{parse_hex, Parser};
pub use scanner::Scanner;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{DakotaError, Result};

/// Parse configuration text from a buffered reader, reporting to `action`.
pub fn read_config<R: BufRead, A: ConfigAction>(input: R, action: A) -> Result<()> {
    Parser::new(input, action).parse()
}

/// Parse a configuration string.
pub fn parse_str<A: ConfigAction>(input: &str, action: A) -> Result<()> {
    read_config(input.as_bytes(), action)
}

/// Parse a configuration file.
pub fn parse_file<A: ConfigAction>(path: &Path, action: A) -> Result<()> {
    let file = File::open(path).map_err(|e| DakotaError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    read_config(BufReader::new(file), action)
}

/// Parse a configuration string into its event sequence.
pub fn events(input: &str) -> Result<Vec<Event>> {
    let mut log = Vec::new();
    parse_str(input, &mut log)?;
    Ok(log)
}
