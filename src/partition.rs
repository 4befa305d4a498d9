// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Splits the rows of the grid into contiguous bands, one per worker.
//!
//! Workers are numbered from 1.  Index 0 is the coordinator, which
//! only assembles the image and owns no rows.  With `N` rows and `W`
//! workers every worker gets `N / W` rows, and the first `N % W`
//! workers, in index order, get one more.  Bands are laid out in
//! worker order with no gaps, so band `i` starts where band `i - 1`
//! ends.

use crate::errors::{MandelError, Result};

/// The coordinator's index.  It never appears in a partition.
pub const COORDINATOR: usize = 0;

/// A contiguous band of rows.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RowRange {
    /// The first row of the band.
    pub start: usize,
    /// How many rows the band holds.  May be zero.
    pub count: usize,
}

impl RowRange {
    /// One past the last row of the band.
    pub fn end(&self) -> usize {
        self.start + self.count
    }

    /// The number of samples in this band for a grid of the given width.
    pub fn samples(&self, width: usize) -> usize {
        self.count * width
    }

    /// Whether `row` falls inside this band.
    pub fn contains(&self, row: usize) -> bool {
        row >= self.start && row < self.end()
    }
}

/// The row layout for one run.  Computed once, read-only afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Partition {
    rows: usize,
    ranges: Vec<RowRange>,
}

impl Partition {
    /// Lay out `rows` rows over `workers` workers.  Fewer rows than
    /// workers is fine; the surplus high-numbered workers get empty
    /// bands.
    pub fn new(rows: usize, workers: usize) -> Result<Partition> {
        if workers == 0 {
            return Err(MandelError::config(
                "at least one worker is needed to compute the grid",
            ));
        }

        let base = rows / workers;
        let extra = rows % workers;
        let ranges = (1..=workers)
            .map(|worker| RowRange {
                start: (worker - 1) * base + usize::min(worker - 1, extra),
                count: base + if worker <= extra { 1 } else { 0 },
            })
            .collect();

        Ok(Partition { rows, ranges })
    }

    /// The number of workers the rows are spread over.
    pub fn workers(&self) -> usize {
        self.ranges.len()
    }

    /// The total number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// The band assigned to `worker`, or `None` for the coordinator and
    /// for indices past the last worker.
    pub fn range(&self, worker: usize) -> Option<RowRange> {
        if worker == COORDINATOR {
            return None;
        }
        self.ranges.get(worker - 1).copied()
    }

    /// Every worker with its band, in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, RowRange)> + '_ {
        self.ranges
            .iter()
            .enumerate()
            .map(|(i, range)| (i + 1, *range))
    }

    /// The worker that owns `row`.
    pub fn owner_of(&self, row: usize) -> Option<usize> {
        self.iter()
            .find(|(_, range)| range.contains(row))
            .map(|(worker, _)| worker)
    }
}
