use clap::Parser;
use trendsignal::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
