//! Writes a grid of iteration counts as a binary graymap (PGM, `P5`).
//!
//! The header carries the iteration cutoff as the maximum gray value,
//! so a viewer scales the image by the cutoff.  Samples are single
//! bytes: each count is truncated to its low eight bits, which means a
//! cutoff above 255 gives a lossy image.  That is the format's
//! documented behaviour, not something to correct here.

use image::GrayImage;
use log::info;
use num::Complex;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::errors::{MandelError, Result};
use crate::grid::GridBuffer;

/// The name a run's image is saved under.  Every parameter of the run
/// is part of the name, so an image can be reproduced from its name
/// alone.
pub fn output_filename(
    size: usize,
    center: Complex<f64>,
    zoom: f64,
    cutoff: u32,
    variant: Option<&str>,
) -> String {
    let suffix = match variant {
        Some(v) => format!("_{}", v),
        None => String::new(),
    };
    format!(
        "mandel_{}_{:.3}_{:.3}_{:.3}_{}{}.pgm",
        size, center.re, center.im, zoom, cutoff, suffix
    )
}

/// Truncate every count in the grid to one byte.
pub fn to_gray(grid: &GridBuffer) -> Result<GrayImage> {
    let side = grid.size() as u32;
    let pixels: Vec<u8> = grid.samples().iter().map(|s| *s as u8).collect();
    let len = pixels.len();
    GrayImage::from_raw(side, side, pixels).ok_or(MandelError::GridSize {
        side: grid.size(),
        expected: grid.size() * grid.size(),
        actual: len,
    })
}

/// Write `grid` to `out` as a binary PGM whose maximum gray value is
/// `maxval`.
pub fn write_pgm<W: Write>(out: &mut W, grid: &GridBuffer, maxval: u32) -> std::io::Result<()> {
    let gray = grid_to_gray_io(grid)?;
    write!(out, "P5\n{} {}\n{}\n", grid.size(), grid.size(), maxval)?;
    out.write_all(gray.as_raw())?;
    out.flush()
}

fn grid_to_gray_io(grid: &GridBuffer) -> std::io::Result<GrayImage> {
    to_gray(grid).map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
}

/// Create `path` and write `grid` to it.
pub fn save_pgm(path: &Path, grid: &GridBuffer, maxval: u32) -> Result<()> {
    let io_error = |cause| MandelError::Io {
        path: path.display().to_string(),
        cause,
    };
    let file = File::create(path).map_err(io_error)?;
    let mut out = BufWriter::new(file);
    write_pgm(&mut out, grid, maxval).map_err(io_error)?;
    info!("wrote {}", path.display());
    Ok(())
}
