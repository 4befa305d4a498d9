//! The full-grid buffer of iteration counts, row-major, one per run.

use crate::errors::{MandelError, Result};
use crate::planes::Pixel;

/// Allocate `len` zeroed samples, reporting failure instead of
/// aborting.
pub(crate) fn allocate(len: usize) -> Result<Vec<u32>> {
    let mut samples: Vec<u32> = Vec::new();
    samples
        .try_reserve_exact(len)
        .map_err(|_| MandelError::Resource { samples: len })?;
    samples.resize(len, 0);
    Ok(samples)
}

/// A dense square grid of iteration counts.  Row 0 is the top of the
/// image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridBuffer {
    size: usize,
    samples: Vec<u32>,
}

impl GridBuffer {
    /// An all-zero grid `size` samples on a side.
    pub fn zeroed(size: usize) -> Result<GridBuffer> {
        let len = size
            .checked_mul(size)
            .ok_or(MandelError::Resource { samples: usize::MAX })?;
        Ok(GridBuffer {
            size,
            samples: allocate(len)?,
        })
    }

    /// Wrap an existing row-major buffer.  The buffer must hold exactly
    /// `size * size` samples.
    pub fn from_samples(size: usize, samples: Vec<u32>) -> Result<GridBuffer> {
        let expected = size.checked_mul(size);
        if expected != Some(samples.len()) {
            return Err(MandelError::GridSize {
                side: size,
                expected: expected.unwrap_or(usize::MAX),
                actual: samples.len(),
            });
        }
        Ok(GridBuffer { size, samples })
    }

    /// The side length of the grid.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The count at a given pixel.
    pub fn get(&self, pixel: Pixel) -> Option<u32> {
        if pixel.0 >= self.size || pixel.1 >= self.size {
            return None;
        }
        Some(self.samples[pixel.1 * self.size + pixel.0])
    }

    /// The rows of the grid, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        // A size of zero would make chunks() panic; there are no rows then.
        self.samples.chunks(self.size.max(1))
    }

    /// All samples, row-major.
    pub fn samples(&self) -> &[u32] {
        &self.samples
    }

    pub(crate) fn samples_mut(&mut self) -> &mut [u32] {
        &mut self.samples
    }
}
