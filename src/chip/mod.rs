//! In-memory chip configuration model.
//!
//! A [`ChipConfig`] holds everything a configuration file describes: the
//! device, global settings, per-tile records and initial BRAM contents.
//! It is built by feeding parse events into a [`ChipBuilder`].

mod builder;
mod types;

pub use builder::ChipBuilder;
pub use types::*;

use std::io::BufRead;
use std::path::Path;

use crate::conf;
use crate::error::Result;

impl ChipConfig {
    /// Build a configuration from a buffered reader.
    pub fn from_reader<R: BufRead>(input: R) -> Result<Self> {
        let mut builder = ChipBuilder::new();
        conf::read_config(input, &mut builder)?;
        builder.finish()
    }

    /// Build a configuration from text.
    pub fn from_str_config(input: &str) -> Result<Self> {
        Self::from_reader(input.as_bytes())
    }

    /// Build a configuration from a file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let mut builder = ChipBuilder::new();
        conf::parse_file(path, &mut builder)?;
        builder.finish()
    }
}
