//! Core types for the chip configuration model.

use std::collections::BTreeMap;
use std::fmt;

/// A directed routing connection inside a tile.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArcDef {
    /// Wire being driven
    pub sink: String,
    /// Wire driving it
    pub source: String,
}

impl fmt::Display for ArcDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <- {}", self.sink, self.source)
    }
}

/// Configuration records of a single tile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TileConfig {
    /// Tile name, e.g. `R2C2:PLC2`
    pub name: String,
    /// Enabled routing arcs, in input order
    pub arcs: Vec<ArcDef>,
    /// Multi-bit words by name
    pub words: BTreeMap<String, String>,
    /// Enumerated settings by name
    pub enums: BTreeMap<String, String>,
    /// Bits not covered by the tile database
    pub unknowns: Vec<String>,
}

impl TileConfig {
    /// Create an empty tile configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Check if the tile carries no records.
    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
            && self.words.is_empty()
            && self.enums.is_empty()
            && self.unknowns.is_empty()
    }

    /// Look up the source driving `sink`.
    pub fn source_of(&self, sink: &str) -> Option<&str> {
        self.arcs
            .iter()
            .find(|arc| arc.sink == sink)
            .map(|arc| arc.source.as_str())
    }
}

/// Complete configuration of a chip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChipConfig {
    /// Device name from `.device`
    pub device: Option<String>,
    /// Free-form `.comment` lines
    pub comments: Vec<String>,
    /// Global settings from `.sysconfig`
    pub sysconfig: BTreeMap<String, String>,
    /// Tiles in the order they were committed
    pub tiles: Vec<TileConfig>,
    /// Initial BRAM contents by block index
    pub brams: BTreeMap<u32, Vec<u32>>,
}

impl ChipConfig {
    /// Create a new empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a tile by name.
    pub fn tile(&self, name: &str) -> Option<&TileConfig> {
        self.tiles.iter().find(|tile| tile.name == name)
    }

    /// Initial contents of BRAM block `index`.
    pub fn bram(&self, index: u32) -> Option<&[u32]> {
        self.brams.get(&index).map(Vec::as_slice)
    }

    /// Total number of arcs over all tiles.
    pub fn arc_count(&self) -> usize {
        self.tiles.iter().map(|tile| tile.arcs.len()).sum()
    }
}
