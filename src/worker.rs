//! One worker's share of the grid: a band of rows computed into a
//! buffer the worker owns outright.

use itertools::iproduct;
use log::trace;

use crate::errors::Result;
use crate::escape::escape;
use crate::grid::allocate;
use crate::partition::RowRange;
use crate::planes::{Pixel, PlaneMapper};

/// The rows a worker computed, tagged with the worker's index so the
/// coordinator can find their place in the grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalBuffer {
    /// The worker that produced these rows.
    pub worker: usize,
    /// `count * width` iteration counts, row-major from the band's
    /// first row.
    pub samples: Vec<u32>,
}

/// Fill `out` with the escape counts of the rows in `range`, row-major.
/// `out` must hold exactly `range.count * plane.size()` samples.
pub(crate) fn fill_range(plane: &PlaneMapper, cutoff: u32, range: RowRange, out: &mut [u32]) {
    debug_assert_eq!(out.len(), range.samples(plane.size()));
    let pixels = iproduct!(range.start..range.end(), 0..plane.size());
    for (sample, (row, column)) in out.iter_mut().zip(pixels) {
        *sample = escape(plane.pixel_to_point(&Pixel(column, row)), cutoff);
    }
}

/// Compute the band `range` for `worker`.
pub fn compute_range(
    plane: &PlaneMapper,
    cutoff: u32,
    worker: usize,
    range: RowRange,
) -> Result<LocalBuffer> {
    trace!(
        "worker {} computing rows {}..{}",
        worker,
        range.start,
        range.end()
    );
    let mut samples = allocate(range.samples(plane.size()))?;
    fill_range(plane, cutoff, range, &mut samples);
    trace!("worker {} finished", worker);
    Ok(LocalBuffer { worker, samples })
}
