// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot renderer
//!
//! The Mandelbrot set is the set of points `c` on the complex plane
//! for which repeatedly squaring `z` and adding `c` never carries `z`
//! off to infinity.  For every sample point we count how many steps it
//! takes for the orbit to get further than two from the origin; that
//! "velocity" is the number used to render the image.  Points inside
//! the set never get that far, and are reported at the cutoff.
//!
//! There are two ways to run a render.  The serial renderer walks the
//! whole grid on the calling thread, and is the reference the parallel
//! renderer is checked against.  The parallel renderer splits the rows
//! into bands, hands one band to each worker thread, and waits on the
//! calling thread, which computes nothing, for every band to come back
//! before assembling the grid.

use crossbeam::channel;
use log::{debug, error, info};

use crate::errors::Result;
use crate::gather::gather;
use crate::grid::GridBuffer;
use crate::partition::{Partition, RowRange};
use crate::planes::PlaneMapper;
use crate::worker::{compute_range, fill_range, LocalBuffer};

/// Takes a plane and a cutoff (the maximum number of iterations to
/// conduct per point) and renders the escape counts of the plane.
#[derive(Copy, Clone, Debug)]
pub struct MandelbrotRenderer {
    plane: PlaneMapper,
    cutoff: u32,
}

impl MandelbrotRenderer {
    /// Requires the plane to sample and the number of iterations after
    /// which a point is presumed never to escape.
    pub fn new(plane: PlaneMapper, cutoff: u32) -> Self {
        MandelbrotRenderer { plane, cutoff }
    }

    /// The reference renderer: the whole grid, on the calling thread.
    pub fn render_serial(&self) -> Result<GridBuffer> {
        info!(
            "rendering {}x{} serially, cutoff {}",
            self.plane.size(),
            self.plane.size(),
            self.cutoff
        );
        let mut grid = GridBuffer::zeroed(self.plane.size())?;
        let everything = RowRange {
            start: 0,
            count: self.plane.size(),
        };
        fill_range(&self.plane, self.cutoff, everything, grid.samples_mut());
        Ok(grid)
    }

    /// The parallel renderer.  Spawns `workers` threads, each of which
    /// computes one band of rows into its own buffer and sends it back
    /// over a channel.  The grid is only assembled once every worker
    /// has finished.
    pub fn render_parallel(&self, workers: usize) -> Result<GridBuffer> {
        let partition = Partition::new(self.plane.size(), workers)?;
        info!(
            "rendering {}x{} over {} workers, cutoff {}",
            self.plane.size(),
            self.plane.size(),
            workers,
            self.cutoff
        );
        for (worker, range) in partition.iter() {
            debug!("worker {} owns rows {}..{}", worker, range.start, range.end());
        }

        let plane = &self.plane;
        let cutoff = self.cutoff;
        run_workers(&partition, |worker, range| {
            compute_range(plane, cutoff, worker, range)
        })
    }
}

/// Run `compute` for every band of `partition` on its own scoped
/// thread, collect the bands over a channel, and gather them once every
/// worker is done.  A worker that panics never sends its band, so the
/// run fails with that worker's contribution missing.
fn run_workers<F>(partition: &Partition, compute: F) -> Result<GridBuffer>
where
    F: Fn(usize, RowRange) -> Result<LocalBuffer> + Sync,
{
    let compute = &compute;
    let (sender, receiver) = channel::unbounded::<Result<LocalBuffer>>();
    let mut received = Vec::with_capacity(partition.workers());

    let outcome = crossbeam::scope(|spawner| {
        for (worker, range) in partition.iter() {
            let sender = sender.clone();
            spawner.spawn(move |_| {
                // The receiver outlives every worker, so this cannot fail.
                let _ = sender.send(compute(worker, range));
            });
        }
        drop(sender);
        received.extend(receiver.iter());
    });
    if outcome.is_err() {
        error!("a worker panicked before delivering its rows");
    }

    let buffers = received.into_iter().collect::<Result<Vec<LocalBuffer>>>()?;
    gather(partition, buffers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{ErrorKind, MandelError};
    use crate::planes::Pixel;
    use num::Complex;

    fn renderer(size: usize, cutoff: u32) -> MandelbrotRenderer {
        let plane = PlaneMapper::new(size, Complex::new(-0.75, 0.0), 6.5).unwrap();
        MandelbrotRenderer::new(plane, cutoff)
    }

    #[test]
    fn parallel_matches_serial() {
        let r = renderer(37, 200);
        let serial = r.render_serial().unwrap();
        for workers in &[1, 2, 3, 5, 8, 37, 50] {
            let parallel = r.render_parallel(*workers).unwrap();
            assert_eq!(parallel, serial, "{} workers", workers);
        }
    }

    #[test]
    fn single_pixel_grid() {
        let r = MandelbrotRenderer::new(
            PlaneMapper::new(1, Complex::new(0.0, 0.0), 0.0).unwrap(),
            42,
        );
        let grid = r.render_parallel(4).unwrap();
        assert_eq!(grid.samples(), &[42]);
        assert_eq!(r.render_serial().unwrap(), grid);
    }

    #[test]
    fn zero_cutoff_renders_all_zeros() {
        let r = renderer(16, 0);
        assert!(r.render_serial().unwrap().samples().iter().all(|s| *s == 0));
        assert!(r.render_parallel(3).unwrap().samples().iter().all(|s| *s == 0));
    }

    #[test]
    fn zero_workers_is_refused() {
        let e = renderer(8, 10).render_parallel(0).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn row_zero_is_the_top_of_the_plane() {
        // Rows run from 1.5i down to 0; column 2 sits on the imaginary axis.
        let plane = PlaneMapper::new(4, Complex::new(0.0, 0.5), 1.0).unwrap();
        let grid = MandelbrotRenderer::new(plane, 30).render_parallel(2).unwrap();
        assert_eq!(plane.pixel_to_point(&Pixel(2, 0)), Complex::new(0.0, 1.5));
        assert_eq!(grid.get(Pixel(2, 0)), Some(2));
        assert_eq!(grid.get(Pixel(2, 3)), Some(30));
    }

    #[test]
    fn panicking_worker_fails_the_run() {
        let partition = Partition::new(9, 3).unwrap();
        let result = run_workers(&partition, |worker, range| {
            if worker == 2 {
                panic!("worker 2 gave up");
            }
            Ok(LocalBuffer {
                worker,
                samples: vec![worker as u32; range.samples(9)],
            })
        });
        match result.unwrap_err() {
            MandelError::MissingContribution { worker } => assert_eq!(worker, 2),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn failing_worker_fails_the_run() {
        let partition = Partition::new(9, 3).unwrap();
        let result = run_workers(&partition, |worker, range| {
            if worker == 3 {
                return Err(MandelError::Resource {
                    samples: range.samples(9),
                });
            }
            Ok(LocalBuffer {
                worker,
                samples: vec![0; range.samples(9)],
            })
        });
        assert_eq!(result.unwrap_err().kind(), ErrorKind::Resource);
    }
}
