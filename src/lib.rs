//! # Dakota Core
//!
//! Reader and in-memory model for Trellis-style FPGA chip configuration
//! text.
//!
//! This library provides:
//! - An event-driven parser for the `.device` / `.tile` / `.bram_init`
//!   configuration format
//! - A chip model built from parse events
//! - Export of chip bitmaps as PBM images
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`conf`] - Parser for the configuration text and the [`ConfigAction`] event interface
//! - [`chip`] - Chip configuration model and the [`ChipBuilder`] consumer
//! - [`bitmap`] - Monochrome bitmaps and PBM export
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! dakota design.config
//! dakota --events design.config
//! ```
//!
//! ### Library
//!
//! ```
//! use dakota_core::ChipConfig;
//!
//! let chip = ChipConfig::from_str_config(".device LFE5U-25F\n.tile R1C1:PLC2\narc: A0 B0\n")?;
//! assert_eq!(chip.tile("R1C1:PLC2").unwrap().source_of("A0"), Some("B0"));
//! # Ok::<(), dakota_core::DakotaError>(())
//! ```
//!
//! ## Parsing Model
//!
//! Parsing is fail-fast and single pass. Each parsed unit is reported to a
//! [`ConfigAction`] as soon as it is read; the first syntax error, stream
//! fault or consumer rejection ends the parse and is returned as a
//! [`DakotaError`]. Events delivered before the failure stay delivered.

pub mod bitmap;
pub mod chip;
pub mod conf;
pub mod error;

// Re-export main types for convenience
pub use bitmap::Bitmap;
pub use chip::{ChipBuilder, ChipConfig};
pub use conf::{ConfigAction, Event};
pub use error::{DakotaError, Result};
