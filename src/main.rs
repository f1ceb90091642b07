use clap::Parser;
use navgen::cli::{self, Cli};

fn main() {
    cli::init_tracing();
    let args = Cli::parse();

    let status = cli::report_outcome(cli::run(args));
    if status != 0 {
        std::process::exit(status);
    }
}
