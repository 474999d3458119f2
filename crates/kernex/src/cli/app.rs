use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use kernex_extract::{Catalog, SevenZip};

use crate::cli::report::ConsoleProgress;

#[derive(Clone, Debug, Parser)]
#[command(name="kernex",version=env!("CARGO_PKG_VERSION"),about="Extract Windows kernel executables from installation ISOs",long_about=None)]
pub struct App {
    /// Directory containing the source ISOs
    #[arg(short = 'd', long = "iso-dir")]
    pub iso_dir: PathBuf,

    /// Directory that receives the extracted kernels
    #[arg(short = 'o', long = "output-dir", default_value = ".")]
    pub output_dir: PathBuf,

    /// TOML catalog overriding the built-in ISO table
    #[arg(long)]
    pub catalog: Option<PathBuf>,
}

pub fn run(app: App) -> Result<()> {
    let sevenz = SevenZip::locate().context("7z is required on PATH")?;

    let catalog = match &app.catalog {
        Some(path) => Catalog::load(path)
            .with_context(|| format!("failed to load catalog '{}'", path.display()))?,
        None => Catalog::builtin(),
    };

    let mut progress = ConsoleProgress;
    kernex_extract::run(
        &sevenz,
        &catalog,
        &app.iso_dir,
        &app.output_dir,
        &mut progress,
    )?;

    Ok(())
}

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}
