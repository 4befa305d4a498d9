#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot renderer
//!
//! Computes the escape-iteration count of every point on a square grid
//! laid over the complex plane, and writes the counts out as a
//! grayscale PGM.
//!
//! The grid can be rendered serially, or split into contiguous bands
//! of rows that are computed by independent workers and then gathered,
//! in order, into the one full grid.  Both paths produce identical
//! grids.

pub mod cli;
pub mod errors;
pub mod escape;
pub mod gather;
pub mod grid;
pub mod partition;
pub mod pgm;
pub mod planes;
pub mod render;
pub mod worker;

pub use errors::{ErrorKind, MandelError};
pub use escape::escape;
pub use gather::gather;
pub use grid::GridBuffer;
pub use partition::{Partition, RowRange};
pub use pgm::{output_filename, save_pgm, write_pgm};
pub use planes::{Pixel, PlaneMapper};
pub use render::MandelbrotRenderer;
pub use worker::{compute_range, LocalBuffer};
