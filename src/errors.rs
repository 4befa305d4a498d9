// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Everything that can go wrong during a run.  There is no recovery
//! path for any of these: the renderer is a batch pipeline, and every
//! failure ends the run before an image is written.

use failure::Fail;
use std::io;

/// The broad class an error falls into.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad arguments, or a worker count of zero.
    Configuration,
    /// A buffer could not be allocated.
    Resource,
    /// A contribution disagrees with the partition it was computed
    /// against.  Indicates a partitioning or transport bug.
    InvariantViolation,
    /// The output file could not be written.
    Io,
}

/// The crate's error type.
#[derive(Debug, Fail)]
pub enum MandelError {
    /// The run was configured in a way that cannot be rendered.
    #[fail(display = "configuration error: {}", _0)]
    Configuration(String),

    /// Allocating a buffer of the given number of samples failed, or
    /// the sample count itself does not fit in memory.
    #[fail(display = "could not allocate a buffer of {} samples", samples)]
    Resource {
        /// How many samples were requested.
        samples: usize,
    },

    /// A worker handed back a buffer whose length is not
    /// `rows * width` for the rows it was assigned.
    #[fail(
        display = "worker {} returned {} samples, but its rows hold {}",
        worker, actual, expected
    )]
    BufferSize {
        /// The worker index.
        worker: usize,
        /// `row_count * width` for that worker.
        expected: usize,
        /// What actually arrived.
        actual: usize,
    },

    /// A full-grid buffer does not hold `side * side` samples.
    #[fail(
        display = "a grid {} samples wide holds {} samples, not {}",
        side, expected, actual
    )]
    GridSize {
        /// The side length of the grid.
        side: usize,
        /// `side * side`.
        expected: usize,
        /// What the buffer actually holds.
        actual: usize,
    },

    /// A contribution came from a worker the partition does not know
    /// about, or the same worker contributed twice.
    #[fail(display = "unexpected contribution from worker {}", worker)]
    UnexpectedContribution {
        /// The worker index.
        worker: usize,
    },

    /// A worker never delivered its rows.
    #[fail(display = "worker {} did not deliver its rows", worker)]
    MissingContribution {
        /// The worker index.
        worker: usize,
    },

    /// The image file could not be created or written.
    #[fail(display = "could not write {}: {}", path, cause)]
    Io {
        /// The file we were writing.
        path: String,
        /// The underlying failure.
        #[fail(cause)]
        cause: io::Error,
    },
}

impl MandelError {
    /// Shorthand for a configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        MandelError::Configuration(message.into())
    }

    /// Which part of the error taxonomy this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            MandelError::Configuration(_) => ErrorKind::Configuration,
            MandelError::Resource { .. } => ErrorKind::Resource,
            MandelError::BufferSize { .. }
            | MandelError::GridSize { .. }
            | MandelError::UnexpectedContribution { .. }
            | MandelError::MissingContribution { .. } => ErrorKind::InvariantViolation,
            MandelError::Io { .. } => ErrorKind::Io,
        }
    }
}

/// Results whose error is a [`MandelError`].
pub type Result<T> = std::result::Result<T, MandelError>;
