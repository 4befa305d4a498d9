//! Contains the PlaneMapper struct, which describes a relationship
//! between a square integral plane with an origin at 0,0 in the upper
//! left, and a square window on the complex plane described by its
//! center and a zoom level.
//!
//! Row 0 of the integral plane is the *top* of the image, so the
//! imaginary axis is flipped: walking down the rows walks down from
//! `y_max`.
use crate::errors::{MandelError, Result};
use num::Complex;

/// Describes the x, y (column, row) of a point in the grid.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// The immutable description of a run's window on the complex plane.
/// Every stage of the renderer gets one of these rather than sharing
/// global state.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlaneMapper {
    /// Width and height of the square grid, in samples.
    size: usize,
    /// The leftmost real coordinate.
    x_min: f64,
    /// The topmost imaginary coordinate.
    y_max: f64,
    /// The distance between neighbouring samples, `2^-zoom`.
    spacing: f64,
}

impl PlaneMapper {
    /// Constructor.  Takes the side length of the grid, the center of
    /// the window on the complex plane, and a zoom level; each step of
    /// zoom halves the distance between samples.
    pub fn new(size: usize, center: Complex<f64>, zoom: f64) -> Result<PlaneMapper> {
        if size == 0 {
            return Err(MandelError::config("the grid must be at least one sample wide"));
        }
        if size.checked_mul(size).is_none() {
            return Err(MandelError::Resource {
                samples: usize::MAX,
            });
        }

        let spacing = 2f64.powf(-zoom);
        let length = spacing * (size as f64);
        Ok(PlaneMapper {
            size,
            x_min: center.re - (length / 2.0),
            y_max: center.im + (length / 2.0),
            spacing,
        })
    }

    /// The side length of the grid.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The real coordinate of column 0.
    pub fn x_min(&self) -> f64 {
        self.x_min
    }

    /// The imaginary coordinate of row 0.
    pub fn y_max(&self) -> f64 {
        self.y_max
    }

    /// The distance between neighbouring samples.
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Given a pixel on the integral cartesian plane, return the sample
    /// point it stands for on the complex plane.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        Complex::new(
            (pixel.0 as f64) * self.spacing + self.x_min,
            self.y_max - (pixel.1 as f64) * self.spacing,
        )
    }
}
