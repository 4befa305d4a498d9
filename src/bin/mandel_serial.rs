//! `mandel_serial`: the single-threaded reference renderer.  Produces
//! the same image as `mandel`, under a name without a variant suffix.

use log::error;
use std::process;

use mandel::cli::{self, Mode, RunArgs};
use mandel::{output_filename, save_pgm, MandelError, MandelbrotRenderer};

fn run(args: &RunArgs) -> Result<(), MandelError> {
    let renderer = MandelbrotRenderer::new(args.plane()?, args.cutoff);
    let grid = renderer.render_serial()?;
    let name = output_filename(args.size, args.center, args.zoom, args.cutoff, None);
    save_pgm(&args.output_dir.join(name), &grid, args.cutoff)
}

fn main() {
    env_logger::init();
    let args = match cli::parse(Mode::Serial) {
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
