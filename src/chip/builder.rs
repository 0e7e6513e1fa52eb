//! Consumer that accumulates parse events into a [`ChipConfig`].

use std::collections::HashSet;
use std::mem;

use super::types::{ArcDef, ChipConfig, TileConfig};
use crate::conf::ConfigAction;
use crate::error::{DakotaError, Result};

/// Block currently receiving body records.
#[derive(Debug)]
enum Block {
    /// Tiles sharing one body (a `.tile` has a single name)
    Tiles { names: Vec<String>, body: TileConfig },
    /// BRAM initial contents
    Bram { index: u32, data: Vec<u32> },
}

/// Builds a [`ChipConfig`] from parse events.
#[derive(Debug, Default)]
pub struct ChipBuilder {
    chip: ChipConfig,
    tile_names: HashSet<String>,
    block: Option<Block>,
}

impl ChipBuilder {
    /// Create a builder for an empty chip.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration built so far.
    pub fn chip(&self) -> &ChipConfig {
        &self.chip
    }

    /// Finish building. Fails if a block was opened but never committed.
    pub fn finish(self) -> Result<ChipConfig> {
        match self.block {
            None => Ok(self.chip),
            Some(Block::Tiles { names, .. }) => Err(DakotaError::rejected(format!(
                "tile '{}' was never committed",
                names.join(" ")
            ))),
            Some(Block::Bram { index, .. }) => Err(DakotaError::rejected(format!(
                "bram block {} was never committed",
                index
            ))),
        }
    }

    /// Take the configuration built so far, leaving an empty builder.
    pub fn take(&mut self) -> ChipConfig {
        self.tile_names.clear();
        self.block = None;
        mem::take(&mut self.chip)
    }

    fn tile_body(&mut self, record: &'static str) -> Result<&mut TileConfig> {
        match &mut self.block {
            Some(Block::Tiles { body, .. }) => Ok(body),
            _ => Err(DakotaError::RecordOutsideBlock { record }),
        }
    }
}

impl ConfigAction for ChipBuilder {
    fn on_device(&mut self, name: &str) -> Result<()> {
        if let Some(current) = &self.chip.device {
            return Err(DakotaError::DuplicateDevice {
                current: current.clone(),
                name: name.to_string(),
            });
        }
        self.chip.device = Some(name.to_string());
        Ok(())
    }

    fn on_comment(&mut self, text: &str) -> Result<()> {
        self.chip.comments.push(text.to_string());
        Ok(())
    }

    fn on_sysconfig(&mut self, name: &str, value: &str) -> Result<()> {
        if self.chip.sysconfig.contains_key(name) {
            return Err(DakotaError::duplicate("sysconfig", name));
        }
        self.chip
            .sysconfig
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn on_tile(&mut self, name: &str) -> Result<()> {
        if self.tile_names.contains(name) {
            return Err(DakotaError::DuplicateTile {
                name: name.to_string(),
            });
        }

        let block = self.block.get_or_insert_with(|| Block::Tiles {
            names: Vec::new(),
            body: TileConfig::default(),
        });
        match block {
            Block::Tiles { names, body } if body.is_empty() => names.push(name.to_string()),
            _ => {
                return Err(DakotaError::rejected(format!(
                    "tile '{}' declared inside an open block",
                    name
                )))
            }
        }

        self.tile_names.insert(name.to_string());
        Ok(())
    }

    fn on_arc(&mut self, sink: &str, source: &str) -> Result<()> {
        self.tile_body("arc")?.arcs.push(ArcDef {
            sink: sink.to_string(),
            source: source.to_string(),
        });
        Ok(())
    }

    fn on_word(&mut self, name: &str, value: &str) -> Result<()> {
        let body = self.tile_body("word")?;
        if body.words.contains_key(name) {
            return Err(DakotaError::duplicate("word", name));
        }
        body.words.insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn on_enum(&mut self, name: &str, value: &str) -> Result<()> {
        let body = self.tile_body("enum")?;
        if body.enums.contains_key(name) {
            return Err(DakotaError::duplicate("enum", name));
        }
        body.enums.insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn on_unknown(&mut self, value: &str) -> Result<()> {
        self.tile_body("unknown")?.unknowns.push(value.to_string());
        Ok(())
    }

    fn on_bram(&mut self, index: u32) -> Result<()> {
        if self.block.is_some() {
            return Err(DakotaError::rejected(format!(
                "bram block {} declared inside an open block",
                index
            )));
        }
        if self.chip.brams.contains_key(&index) {
            return Err(DakotaError::DuplicateBram { index });
        }
        self.block = Some(Block::Bram {
            index,
            data: Vec::new(),
        });
        Ok(())
    }

    fn on_data(&mut self, index: u32, position: usize, value: u32) -> Result<()> {
        let Some(Block::Bram { index: open, data }) = &mut self.block else {
            return Err(DakotaError::RecordOutsideBlock { record: "bram data" });
        };
        if *open != index || position != data.len() {
            return Err(DakotaError::DataOutOfOrder {
                index,
                expected: data.len(),
                got: position,
            });
        }
        data.push(value);
        Ok(())
    }

    fn on_commit(&mut self) -> Result<()> {
        match self.block.take() {
            Some(Block::Tiles { names, body }) => {
                log::debug!("committed tile block {}", names.join(" "));
                for name in names {
                    self.chip.tiles.push(TileConfig {
                        name,
                        ..body.clone()
                    });
                }
                Ok(())
            }
            Some(Block::Bram { index, data }) => {
                log::debug!("committed bram block {} ({} values)", index, data.len());
                self.chip.brams.insert(index, data);
                Ok(())
            }
            None => Err(DakotaError::RecordOutsideBlock { record: "commit" }),
        }
    }
}
