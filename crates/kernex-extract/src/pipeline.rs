use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::CatalogEntry;
use crate::error::{Error, Result};
use crate::sevenz::Extractor;
use crate::workspace::ScopedWorkspace;

/// What became of one catalog entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Both hops succeeded; the renamed artifact is in the output directory.
    Extracted { artifact: PathBuf },
    /// The source archive was not present in the input directory.
    SourceMissing,
    /// Hop 1 failed: the tool wrote diagnostic text while pulling the
    /// intermediate container out of the source archive.
    ContainerFailed { diagnostic: String },
    /// Hop 2 failed: non-zero exit status while pulling the target out of
    /// the container, or the target never materialized.
    TargetFailed { diagnostic: String },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Extracted { .. })
    }
}

/// Run both extraction hops for one catalog entry.
///
/// Hop 1 is judged by its stderr alone: 7z reports some disc-image read
/// failures with a zero exit status. Hop 2 is judged by its exit status
/// alone, with the stderr carried into the outcome for reporting. The
/// workspace is removed on every branch; `Err` is reserved for faults
/// outside the two-hop contract (workspace creation, subprocess spawn,
/// artifact move) and is downgraded to a skip by the driver.
pub fn extract_entry<E: Extractor>(
    extractor: &E,
    entry: &CatalogEntry,
    source: &Path,
    output_dir: &Path,
) -> Result<Outcome> {
    let workspace = ScopedWorkspace::acquire()?;

    // Hop 1: the intermediate container out of the source archive.
    let hop = extractor.extract(source, &[&entry.container], workspace.path())?;
    if !hop.diagnostic.is_empty() {
        workspace.release();
        return Ok(Outcome::ContainerFailed {
            diagnostic: hop.diagnostic,
        });
    }

    // Hop 2: the target out of the container, now flattened into the
    // workspace under its base name.
    let container = workspace.join(entry.container_name());
    let hop = extractor.extract(&container, &[&entry.target], workspace.path())?;
    if !hop.exited_ok() {
        workspace.release();
        return Ok(Outcome::TargetFailed {
            diagnostic: hop.diagnostic,
        });
    }

    // A quiet tool is not proof the member exists.
    let extracted = workspace.join(entry.target_name());
    if !extracted.is_file() {
        workspace.release();
        return Ok(Outcome::TargetFailed {
            diagnostic: format!("'{}' missing after extraction", entry.target_name()),
        });
    }

    let artifact = output_dir.join(entry.artifact_name());
    let moved = move_file(&extracted, &artifact);
    workspace.release();
    moved?;

    Ok(Outcome::Extracted { artifact })
}

/// `rename`, falling back to a copy when the workspace and the output
/// directory sit on different filesystems. The workspace copy is swept
/// with the rest of the workspace.
fn move_file(from: &Path, to: &Path) -> Result<()> {
    if fs::rename(from, to).is_ok() {
        return Ok(());
    }
    fs::copy(from, to)
        .map(|_| ())
        .map_err(|source| Error::MoveFailed {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
            source,
        })
}
