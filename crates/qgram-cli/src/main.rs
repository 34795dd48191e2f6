#![forbid(unsafe_code)]

//! `qgram` — generate a dodecagonal golden-ratio interference image.

use qgram_cli::pipeline::{self, PipelineError};
use qgram_cli::{cli, report};
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();

    let opts = cli::Opts::parse();
    match pipeline::run(&opts) {
        Ok(run) => {
            if let Some(path) = &opts.report_jsonl
                && let Err(err) = report::append_jsonl(path, &run)
            {
                eprintln!("qgram: cannot write report {}: {err}", path.display());
                process::exit(1);
            }
            println!(
                "wrote {} ({}x{}, {} directions, carrier {})",
                run.output, run.image_width, run.image_height, run.directions, run.carrier
            );
        }
        Err(PipelineError::Config(errors)) => {
            eprintln!("qgram: invalid configuration:");
            for err in &errors {
                eprintln!("  {err}");
            }
            process::exit(2);
        }
        Err(err) => {
            eprintln!("qgram: {err}");
            process::exit(1);
        }
    }
}
