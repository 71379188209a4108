//! heredity: exact pedigree inference CLI.

use clap::Parser;
use hd_core::cli::{run, Cli};
use hd_core::logging::init_logging;

fn main() {
    let cli = Cli::parse();
    if !init_logging(cli.verbose, cli.log_json) {
        tracing::warn!("a tracing subscriber was already installed; keeping it");
    }
    let code = run(&cli);
    std::process::exit(code.as_i32());
}
