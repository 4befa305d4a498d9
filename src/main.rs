//! `mandel`: the parallel renderer.  The rows of the image are split
//! into one band per worker thread, and the finished bands are
//! gathered into a single image on the main thread.

use log::error;
use std::process;

use mandel::cli::{self, Mode, RunArgs};
use mandel::{output_filename, save_pgm, MandelError, MandelbrotRenderer};

fn run(args: &RunArgs) -> Result<(), MandelError> {
    let renderer = MandelbrotRenderer::new(args.plane()?, args.cutoff);
    let grid = renderer.render_parallel(args.workers)?;
    let name = output_filename(
        args.size,
        args.center,
        args.zoom,
        args.cutoff,
        Some("parallel"),
    );
    save_pgm(&args.output_dir.join(name), &grid, args.cutoff)
}

fn main() {
    env_logger::init();
    let args = match cli::parse(Mode::Parallel) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run(&args) {
        error!("render failed: {:?}", e.kind());
        eprintln!("error: {}", e);
        process::exit(1);
    }
}
