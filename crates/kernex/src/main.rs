use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    cli::init_tracing();
    cli::run(cli::App::parse())
}
