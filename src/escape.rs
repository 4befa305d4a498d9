//! The escape-time kernel.
//!
//! Starting from `z = 0`, repeatedly apply `z = z * z + c` and count the
//! steps until `|z|` exceeds 2 or the count reaches the cutoff.  A point
//! that escapes on the last permitted step and a point that never
//! escapes both come back as `cutoff`.
//!
//! The kernel does not validate its input.  Callers are responsible for
//! handing it finite coordinates; a NaN orbit fails the bound test and
//! stops counting wherever it becomes NaN.

use num::Complex;

/// The escape radius.  Orbits whose magnitude exceeds this are gone.
pub const ESCAPE_RADIUS: f64 = 2.0;

/// Count the iterations it takes for `c` to leave the disc of radius
/// two, capped at `cutoff`.
#[inline]
pub fn escape(c: Complex<f64>, cutoff: u32) -> u32 {
    let mut z: Complex<f64> = Complex { re: 0.0, im: 0.0 };
    let mut iterations = 0;
    while z.norm() <= ESCAPE_RADIUS && iterations < cutoff {
        z = z * z + c;
        iterations += 1;
    }
    iterations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_never_escapes() {
        for cutoff in &[0, 1, 2, 17, 255, 256, 10_000] {
            assert_eq!(escape(Complex::new(0.0, 0.0), *cutoff), *cutoff);
        }
    }

    #[test]
    fn zero_cutoff_is_always_zero() {
        assert_eq!(escape(Complex::new(5.0, 5.0), 0), 0);
        assert_eq!(escape(Complex::new(-0.75, 0.1), 0), 0);
    }

    #[test]
    fn far_points_escape_after_one_step() {
        // z1 = c, which is already outside the radius.
        assert_eq!(escape(Complex::new(3.0, 0.0), 100), 1);
        assert_eq!(escape(Complex::new(0.0, -2.5), 100), 1);
    }

    #[test]
    fn known_escape_counts() {
        // c = 1: 0 -> 1 -> 2 -> 5, escapes on the third step.
        assert_eq!(escape(Complex::new(1.0, 0.0), 100), 3);
        // c = -2 sits on the boundary and stays at |z| = 2 forever.
        assert_eq!(escape(Complex::new(-2.0, 0.0), 50), 50);
        // c = i cycles between -1 + i and -i.
        assert_eq!(escape(Complex::new(0.0, 1.0), 64), 64);
    }

    #[test]
    fn escape_is_deterministic() {
        let c = Complex::new(-0.743_643_887, 0.131_825_904);
        let first = escape(c, 5000);
        for _ in 0..10 {
            assert_eq!(escape(c, 5000), first);
        }
    }

    #[test]
    fn cutoff_caps_the_count() {
        let c = Complex::new(0.26, 0.0);
        let uncapped = escape(c, 100_000);
        assert!(uncapped > 10);
        assert_eq!(escape(c, 10), 10);
    }

    #[test]
    fn nan_input_stops_counting() {
        let c = Complex::new(std::f64::NAN, 0.0);
        assert_eq!(escape(c, 100), 1);
    }
}
