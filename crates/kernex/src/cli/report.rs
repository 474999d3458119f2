use console::style;
use kernex_extract::{CatalogEntry, Outcome, Progress};

/// One status line per entry, glyph first.
pub struct ConsoleProgress;

impl Progress for ConsoleProgress {
    fn begin(&mut self, entry: &CatalogEntry) {
        println!(
            "[-] Extracting {} from {}...",
            entry.target_name(),
            entry.source
        );
    }

    fn outcome(&mut self, entry: &CatalogEntry, outcome: &Outcome) {
        match outcome {
            Outcome::Extracted { .. } => println!(
                "[{}] Successfully extracted {} from {}",
                style("✓").green(),
                entry.target_name(),
                entry.source
            ),
            Outcome::SourceMissing => println!(
                "[{}] {} does not exist. Skipping...",
                style("✗").red(),
                entry.source
            ),
            Outcome::ContainerFailed { diagnostic } => println!(
                "[{}] Failed to extract {} from {}: \"{}\"",
                style("✗").red(),
                entry.container,
                entry.source,
                diagnostic.trim_end()
            ),
            Outcome::TargetFailed { diagnostic } => println!(
                "[{}] Failed to extract {} from {}: \"{}\"",
                style("✗").red(),
                entry.target_name(),
                entry.container_name(),
                diagnostic.trim_end()
            ),
        }
    }
}
