//! Monochrome bitmaps and PBM export.
//!
//! Pixel `x` of row `y` is stored in byte `y * pitch + x / 8` at bit `x % 8`
//! (least significant bit first). PBM stores the leftmost pixel in the most
//! significant bit, so every byte is bit-reversed on export.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::{DakotaError, Result};

/// A rectangular bit image with a mask plane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: usize,
    height: usize,
    pitch: usize,
    bits: Vec<u8>,
    /// Pixels to export; cleared mask bits export as white
    mask: Vec<u8>,
}

impl Bitmap {
    /// Create a blank bitmap with every pixel unmasked.
    pub fn new(width: usize, height: usize) -> Self {
        let pitch = width.div_ceil(8);
        Self {
            width,
            height,
            pitch,
            bits: vec![0; pitch * height],
            mask: vec![0xff; pitch * height],
        }
    }

    /// Create a bitmap from existing data and mask planes.
    pub fn from_planes(
        width: usize,
        height: usize,
        pitch: usize,
        bits: Vec<u8>,
        mask: Vec<u8>,
    ) -> Result<Self> {
        let bitmap = Self {
            width,
            height,
            pitch,
            bits,
            mask,
        };
        bitmap.check()?;
        Ok(bitmap)
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Bytes per row.
    pub fn pitch(&self) -> usize {
        self.pitch
    }

    /// Pixel data plane.
    pub fn bits(&self) -> &[u8] {
        &self.bits
    }

    /// Mask plane.
    pub fn mask(&self) -> &[u8] {
        &self.mask
    }

    /// Verify that both planes cover `pitch * height` bytes.
    fn check(&self) -> Result<()> {
        if self.pitch < self.width.div_ceil(8) {
            return Err(DakotaError::InvalidBitmap {
                message: format!("pitch {} too small for width {}", self.pitch, self.width),
            });
        }
        let size = self.pitch * self.height;
        if self.bits.len() < size || self.mask.len() < size {
            return Err(DakotaError::InvalidBitmap {
                message: format!(
                    "planes of {} and {} bytes, need {}",
                    self.bits.len(),
                    self.mask.len(),
                    size
                ),
            });
        }
        Ok(())
    }

    fn locate(&self, x: usize, y: usize) -> (usize, u8) {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of range");
        (y * self.pitch + (x >> 3), 1 << (x & 7))
    }

    /// Read a pixel.
    pub fn get(&self, x: usize, y: usize) -> bool {
        let (i, bit) = self.locate(x, y);
        self.bits[i] & bit != 0
    }

    /// Set or clear a pixel.
    pub fn set(&mut self, x: usize, y: usize, on: bool) {
        let (i, bit) = self.locate(x, y);
        if on {
            self.bits[i] |= bit;
        } else {
            self.bits[i] &= !bit;
        }
    }

    /// Include or exclude a pixel from export.
    pub fn set_mask(&mut self, x: usize, y: usize, on: bool) {
        let (i, bit) = self.locate(x, y);
        if on {
            self.mask[i] |= bit;
        } else {
            self.mask[i] &= !bit;
        }
    }

    /// Write the bitmap as a binary PBM (`P4`) image.
    ///
    /// Nothing is written if the planes do not match the geometry.
    pub fn write_pbm<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if let Err(e) = self.check() {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, e.to_string()));
        }

        write!(out, "P4\n{} {}\n", self.width, self.height)?;

        let row_bytes = self.width.div_ceil(8);
        let mut row = Vec::with_capacity(row_bytes);
        for y in 0..self.height {
            row.clear();
            let start = y * self.pitch;
            for i in start..start + row_bytes {
                row.push(sample_msb(self.bits[i] & self.mask[i]));
            }
            out.write_all(&row)?;
        }

        Ok(())
    }

    /// Export the bitmap to a PBM file.
    ///
    /// A partially written file is removed on failure.
    pub fn export_pbm(&self, path: &Path) -> Result<()> {
        self.check()?;

        let write_error = |source| DakotaError::FileWriteError {
            path: path.display().to_string(),
            source,
        };

        let file = File::create(path).map_err(write_error)?;
        let mut out = BufWriter::new(file);

        let result = self
            .write_pbm(&mut out)
            .and_then(|()| out.flush())
            .and_then(|()| out.get_ref().sync_all());

        if let Err(e) = result {
            drop(out);
            if let Err(rm) = fs::remove_file(path) {
                log::warn!("failed to remove partial {}: {}", path.display(), rm);
            }
            return Err(write_error(e));
        }

        log::debug!("exported {}x{} bitmap to {}", self.width, self.height, path.display());
        Ok(())
    }
}

/// Reverse the bit order of a byte.
fn sample_msb(b: u8) -> u8 {
    (((b as u64).wrapping_mul(0x8020_0802) & 0x08_8442_2110).wrapping_mul(0x01_0101_0101) >> 32) as u8
}
