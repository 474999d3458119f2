use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::{Error, Result};

/// Result of one invocation of the external archive tool.
///
/// Exit status and stderr are independent signals. Some failure modes
/// surface only as diagnostic text with a zero exit status, so a caller
/// may treat either one as grounds for failure, and a zero status alone
/// does not prove the requested member was produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Extraction {
    /// Subprocess exit code; `None` when the tool was killed by a signal.
    pub status: Option<i32>,
    /// Captured stderr, verbatim.
    pub diagnostic: String,
}

impl Extraction {
    pub fn exited_ok(&self) -> bool {
        self.status == Some(0)
    }
}

/// Seam over the external tool so the pipeline and driver can run against
/// a fake in tests.
pub trait Extractor {
    /// Extract the named members of `archive` into `dest`, flattened
    /// (internal directory structure is not preserved).
    fn extract(&self, archive: &Path, members: &[&str], dest: &Path) -> Result<Extraction>;
}

/// 7-Zip driven as a subprocess. `7z e` writes the requested members
/// straight into the working directory, which is pointed at `dest`.
#[derive(Debug)]
pub struct SevenZip(PathBuf);

impl SevenZip {
    /// Find `7z` on `PATH`. Its absence is fatal for the whole run, not a
    /// per-entry condition.
    pub fn locate() -> Result<Self> {
        let path = which::which("7z").map_err(|source| Error::ToolNotFound { source })?;
        Ok(SevenZip(path))
    }

    /// Use an explicit binary instead of searching `PATH`.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        SevenZip(program.into())
    }

    pub fn program(&self) -> &Path {
        &self.0
    }
}

impl Extractor for SevenZip {
    fn extract(&self, archive: &Path, members: &[&str], dest: &Path) -> Result<Extraction> {
        let output = Command::new(&self.0)
            .arg("e")
            .arg(archive)
            .args(members)
            .current_dir(dest)
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| Error::CommandFailed {
                cmd: self.0.display().to_string(),
                source,
            })?;

        Ok(Extraction {
            status: output.status.code(),
            diagnostic: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
