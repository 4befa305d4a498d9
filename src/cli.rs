//! The command line shared by the serial and parallel binaries.
//!
//! Both take the same five positional arguments, in order: the grid
//! size, the real and imaginary parts of the window's center, the zoom
//! level (sample spacing is `2^-zoom`), and the iteration cutoff.
//! Anything missing or extra is refused before any work is done.

use clap::{App, AppSettings, Arg, ArgMatches};
use num::Complex;
use std::ffi::OsString;
use std::path::PathBuf;
use std::str::FromStr;

use crate::errors::{MandelError, Result};
use crate::planes::PlaneMapper;

const SIZE: &str = "N";
const X_CENTER: &str = "X_CENTER";
const Y_CENTER: &str = "Y_CENTER";
const ZOOM: &str = "ZOOM";
const CUTOFF: &str = "CUTOFF";
const WORKERS: &str = "workers";
const OUTPUT_DIR: &str = "output-dir";

/// Which binary is parsing; the parallel one also takes a worker count.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    /// The single-threaded reference renderer.
    Serial,
    /// The partitioned, multi-worker renderer.
    Parallel,
}

/// A run, as described on the command line.
#[derive(Clone, Debug, PartialEq)]
pub struct RunArgs {
    /// Side length of the square grid.
    pub size: usize,
    /// Center of the window on the complex plane.
    pub center: Complex<f64>,
    /// Zoom level.
    pub zoom: f64,
    /// Maximum iterations per point.
    pub cutoff: u32,
    /// Number of workers; always 1 for the serial renderer.
    pub workers: usize,
    /// Where the image is written.
    pub output_dir: PathBuf,
}

impl RunArgs {
    /// The plane these arguments describe.
    pub fn plane(&self) -> Result<PlaneMapper> {
        PlaneMapper::new(self.size, self.center, self.zoom)
    }
}

fn validate_parse<T: FromStr>(s: &str, err: &str) -> std::result::Result<(), String> {
    match T::from_str(s) {
        Ok(_) => Ok(()),
        Err(_) => Err(format!("{}: {}", err, s)),
    }
}

fn validate_finite(s: &str, err: &str) -> std::result::Result<(), String> {
    match f64::from_str(s) {
        Ok(f) if f.is_finite() => Ok(()),
        _ => Err(format!("{}: {}", err, s)),
    }
}

fn validate_positive(s: &str, err: &str) -> std::result::Result<(), String> {
    match usize::from_str(s) {
        Ok(i) if i >= 1 => Ok(()),
        _ => Err(format!("{}: {}", err, s)),
    }
}

fn app<'a, 'b>(mode: Mode, default_workers: &'a str) -> App<'a, 'b> {
    let name = match mode {
        Mode::Serial => "mandel_serial",
        Mode::Parallel => "mandel",
    };
    let app = App::new(name)
        .version(env!("CARGO_PKG_VERSION"))
        .about("Mandelbrot escape-time renderer, writing a binary PGM")
        .setting(AppSettings::AllowNegativeNumbers)
        .arg(
            Arg::with_name(SIZE)
                .required(true)
                .index(1)
                .validator(|s| validate_positive(&s, "Grid size must be a positive integer"))
                .help("Width and height of the image, in pixels"),
        )
        .arg(
            Arg::with_name(X_CENTER)
                .required(true)
                .index(2)
                .validator(|s| validate_finite(&s, "Could not parse the real part of the center"))
                .help("Real coordinate of the image center"),
        )
        .arg(
            Arg::with_name(Y_CENTER)
                .required(true)
                .index(3)
                .validator(|s| {
                    validate_finite(&s, "Could not parse the imaginary part of the center")
                })
                .help("Imaginary coordinate of the image center"),
        )
        .arg(
            Arg::with_name(ZOOM)
                .required(true)
                .index(4)
                .validator(|s| validate_finite(&s, "Could not parse the zoom level"))
                .help("Zoom level; pixels are 2^-ZOOM apart"),
        )
        .arg(
            Arg::with_name(CUTOFF)
                .required(true)
                .index(5)
                .validator(|s| validate_parse::<u32>(&s, "Could not parse the iteration cutoff"))
                .help("Maximum number of iterations per pixel"),
        )
        .arg(
            Arg::with_name(OUTPUT_DIR)
                .long(OUTPUT_DIR)
                .short("o")
                .takes_value(true)
                .default_value(".")
                .help("Directory the image is written to"),
        );

    match mode {
        Mode::Serial => app,
        Mode::Parallel => app.arg(
            Arg::with_name(WORKERS)
                .long(WORKERS)
                .short("w")
                .takes_value(true)
                .default_value(default_workers)
                .validator(|s| validate_positive(&s, "Worker count must be at least 1"))
                .help("Number of worker threads computing rows"),
        ),
    }
}

fn value<T: FromStr>(matches: &ArgMatches, name: &str) -> Result<T> {
    matches
        .value_of(name)
        .and_then(|s| T::from_str(s).ok())
        .ok_or_else(|| MandelError::config(format!("missing or malformed {}", name)))
}

fn from_matches(mode: Mode, matches: &ArgMatches) -> Result<RunArgs> {
    Ok(RunArgs {
        size: value(matches, SIZE)?,
        center: Complex::new(value(matches, X_CENTER)?, value(matches, Y_CENTER)?),
        zoom: value(matches, ZOOM)?,
        cutoff: value(matches, CUTOFF)?,
        workers: match mode {
            Mode::Serial => 1,
            Mode::Parallel => value(matches, WORKERS)?,
        },
        output_dir: PathBuf::from(matches.value_of(OUTPUT_DIR).unwrap_or(".")),
    })
}

/// Parse an argument list (including the program name).  Any problem,
/// including `--help`, comes back as a configuration error carrying
/// clap's message.
pub fn parse_from<I, T>(mode: Mode, args: I) -> Result<RunArgs>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let default_workers = num_cpus::get().to_string();
    let matches = app(mode, &default_workers)
        .get_matches_from_safe(args)
        .map_err(|e| MandelError::config(e.message))?;
    from_matches(mode, &matches)
}

/// Parse the process's own arguments, printing usage and exiting on
/// failure the way clap always does.
pub fn parse(mode: Mode) -> Result<RunArgs> {
    let default_workers = num_cpus::get().to_string();
    let matches = app(mode, &default_workers).get_matches();
    from_matches(mode, &matches)
}
