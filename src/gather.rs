// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Assembles the workers' bands into the run's one full grid.
//!
//! Each band is copied, unchanged and in order, to row offset
//! `start * width` of the grid.  The partition guarantees that no two
//! bands overlap and that together they cover every row, so once every
//! worker has contributed, every sample has been written exactly once.
//! Any disagreement between a contribution and the partition is a bug
//! somewhere upstream and fails the run.

use log::debug;

use crate::errors::{MandelError, Result};
use crate::grid::GridBuffer;
use crate::partition::Partition;
use crate::worker::LocalBuffer;

/// Merge the workers' buffers into the full grid.  The grid is square,
/// so its width is the partition's row count.  Buffers may be handed
/// over in any order, but there must be exactly one from each worker in
/// the partition.
pub fn gather(partition: &Partition, buffers: Vec<LocalBuffer>) -> Result<GridBuffer> {
    let width = partition.rows();
    let mut grid = GridBuffer::zeroed(width)?;
    let mut seen = vec![false; partition.workers()];

    for buffer in buffers {
        let range = partition
            .range(buffer.worker)
            .ok_or(MandelError::UnexpectedContribution {
                worker: buffer.worker,
            })?;
        if seen[buffer.worker - 1] {
            return Err(MandelError::UnexpectedContribution {
                worker: buffer.worker,
            });
        }
        let expected = range.samples(width);
        if buffer.samples.len() != expected {
            return Err(MandelError::BufferSize {
                worker: buffer.worker,
                expected,
                actual: buffer.samples.len(),
            });
        }

        let offset = range.start * width;
        grid.samples_mut()[offset..offset + expected].copy_from_slice(&buffer.samples);
        seen[buffer.worker - 1] = true;
        debug!(
            "placed {} rows from worker {} at row {}",
            range.count, buffer.worker, range.start
        );
    }

    if let Some(missing) = seen.iter().position(|s| !s) {
        return Err(MandelError::MissingContribution {
            worker: missing + 1,
        });
    }
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use rand::seq::SliceRandom;
    use rand::Rng;

    /// Every worker fills its band with its own index.
    fn sentinel_buffers(partition: &Partition, width: usize) -> Vec<LocalBuffer> {
        partition
            .iter()
            .map(|(worker, range)| LocalBuffer {
                worker,
                samples: vec![worker as u32; range.samples(width)],
            })
            .collect()
    }

    #[test]
    fn rows_hold_their_owners_sentinel() {
        let partition = Partition::new(10, 3).unwrap();
        let grid = gather(&partition, sentinel_buffers(&partition, 10)).unwrap();
        let expected = [1, 1, 1, 1, 2, 2, 2, 3, 3, 3];
        for (row, owner) in grid.rows().zip(expected.iter()) {
            assert!(row.iter().all(|s| s == owner));
        }
    }

    #[test]
    fn arrival_order_does_not_matter() {
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            let rows = rng.gen_range(1..40);
            let workers = rng.gen_range(1..12);
            let partition = Partition::new(rows, workers).unwrap();
            let mut buffers = sentinel_buffers(&partition, rows);
            buffers.shuffle(&mut rng);
            let grid = gather(&partition, buffers).unwrap();
            for (y, row) in grid.rows().enumerate() {
                let owner = partition.owner_of(y).unwrap() as u32;
                assert!(row.iter().all(|s| *s == owner));
            }
        }
    }

    #[test]
    fn keeps_row_order_inside_a_band() {
        let partition = Partition::new(4, 2).unwrap();
        let buffers = vec![
            LocalBuffer {
                worker: 2,
                samples: vec![20, 21, 22, 23, 30, 31, 32, 33],
            },
            LocalBuffer {
                worker: 1,
                samples: vec![0, 1, 2, 3, 10, 11, 12, 13],
            },
        ];
        let grid = gather(&partition, buffers).unwrap();
        assert_eq!(
            grid.samples(),
            &[0, 1, 2, 3, 10, 11, 12, 13, 20, 21, 22, 23, 30, 31, 32, 33]
        );
    }

    #[test]
    fn short_buffer_is_rejected() {
        let partition = Partition::new(10, 3).unwrap();
        let mut buffers = sentinel_buffers(&partition, 10);
        buffers[1].samples.pop();
        let e = gather(&partition, buffers).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::InvariantViolation);
        match e {
            MandelError::BufferSize {
                worker,
                expected,
                actual,
            } => {
                assert_eq!(worker, 2);
                assert_eq!(expected, 30);
                assert_eq!(actual, 29);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn bands_sized_for_another_width_are_rejected() {
        // Ten rows means a grid ten samples wide; bands five wide cannot fit.
        let partition = Partition::new(10, 3).unwrap();
        let buffers = partition
            .iter()
            .map(|(worker, range)| LocalBuffer {
                worker,
                samples: vec![0; range.samples(5)],
            })
            .collect();
        match gather(&partition, buffers).unwrap_err() {
            MandelError::BufferSize {
                worker,
                expected,
                actual,
            } => assert_eq!((worker, expected, actual), (1, 40, 20)),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn long_buffer_is_rejected() {
        let partition = Partition::new(10, 3).unwrap();
        let mut buffers = sentinel_buffers(&partition, 10);
        buffers[0].samples.push(1);
        assert!(gather(&partition, buffers).is_err());
    }

    #[test]
    fn missing_worker_is_rejected() {
        let partition = Partition::new(10, 3).unwrap();
        let mut buffers = sentinel_buffers(&partition, 10);
        buffers.remove(2);
        match gather(&partition, buffers).unwrap_err() {
            MandelError::MissingContribution { worker } => assert_eq!(worker, 3),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn duplicate_and_unknown_workers_are_rejected() {
        let partition = Partition::new(10, 3).unwrap();
        let mut buffers = sentinel_buffers(&partition, 10);
        let again = buffers[0].clone();
        buffers.push(again);
        assert!(gather(&partition, buffers).is_err());

        let mut buffers = sentinel_buffers(&partition, 10);
        buffers.push(LocalBuffer {
            worker: 0,
            samples: vec![],
        });
        match gather(&partition, buffers).unwrap_err() {
            MandelError::UnexpectedContribution { worker } => assert_eq!(worker, 0),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn empty_bands_contribute_nothing() {
        let partition = Partition::new(2, 4).unwrap();
        let grid = gather(&partition, sentinel_buffers(&partition, 2)).unwrap();
        assert_eq!(grid.samples(), &[1, 1, 2, 2]);
    }
}
