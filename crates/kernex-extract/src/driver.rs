use std::path::{Path, PathBuf};

use crate::catalog::{Catalog, CatalogEntry};
use crate::error::{Error, Result};
use crate::pipeline::{self, Outcome};
use crate::sevenz::Extractor;

/// Observer for per-entry lifecycle, so a frontend can report while the
/// run advances. `begin` fires only for entries whose source archive is
/// actually present.
pub trait Progress {
    fn begin(&mut self, entry: &CatalogEntry);
    fn outcome(&mut self, entry: &CatalogEntry, outcome: &Outcome);
}

/// Progress sink that reports nothing.
pub struct Silent;

impl Progress for Silent {
    fn begin(&mut self, _: &CatalogEntry) {}
    fn outcome(&mut self, _: &CatalogEntry, _: &Outcome) {}
}

#[derive(Clone, Debug)]
pub struct EntryReport {
    pub entry: CatalogEntry,
    pub outcome: Outcome,
}

/// Attempt every catalog entry in order.
///
/// Directory preconditions are fatal and checked before any entry is
/// touched. After that nothing stops the loop: absent sources are skipped
/// without invoking the extractor, and entry-level faults of any kind are
/// folded into that entry's outcome.
pub fn run<E: Extractor>(
    extractor: &E,
    catalog: &Catalog,
    input_dir: &Path,
    output_dir: &Path,
    progress: &mut dyn Progress,
) -> Result<Vec<EntryReport>> {
    let input_dir = canonical_dir(input_dir, DirRole::Input)?;
    let output_dir = canonical_dir(output_dir, DirRole::Output)?;

    let mut reports = Vec::with_capacity(catalog.len());
    for entry in catalog.iter() {
        let source = input_dir.join(&entry.source);
        let outcome = if !source.is_file() {
            Outcome::SourceMissing
        } else {
            progress.begin(entry);
            match pipeline::extract_entry(extractor, entry, &source, &output_dir) {
                Ok(outcome) => outcome,
                // entry-level faults must not stop the run
                Err(e) => Outcome::TargetFailed {
                    diagnostic: e.to_string(),
                },
            }
        };
        progress.outcome(entry, &outcome);
        reports.push(EntryReport {
            entry: entry.clone(),
            outcome,
        });
    }
    Ok(reports)
}

enum DirRole {
    Input,
    Output,
}

fn canonical_dir(path: &Path, role: DirRole) -> Result<PathBuf> {
    let invalid = || match role {
        DirRole::Input => Error::InvalidInputDir {
            path: path.to_path_buf(),
        },
        DirRole::Output => Error::InvalidOutputDir {
            path: path.to_path_buf(),
        },
    };
    if !path.is_dir() {
        return Err(invalid());
    }
    path.canonicalize().map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::fs;

    use crate::sevenz::Extraction;

    /// Succeeds for every source except those listed in `refuse`, for
    /// which hop 2 exits non-zero. Records every destination directory it
    /// was pointed at.
    struct FakeExtractor {
        refuse: Vec<&'static str>,
        calls: RefCell<usize>,
        workspaces: RefCell<Vec<PathBuf>>,
    }

    impl FakeExtractor {
        fn new() -> Self {
            Self::refusing(Vec::new())
        }

        fn refusing(refuse: Vec<&'static str>) -> Self {
            Self {
                refuse,
                calls: RefCell::new(0),
                workspaces: RefCell::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            *self.calls.borrow()
        }

        fn leaked_workspaces(&self) -> Vec<PathBuf> {
            self.workspaces
                .borrow()
                .iter()
                .filter(|w| w.exists())
                .cloned()
                .collect()
        }
    }

    impl Extractor for FakeExtractor {
        fn extract(&self, archive: &Path, members: &[&str], dest: &Path) -> Result<Extraction> {
            *self.calls.borrow_mut() += 1;
            self.workspaces.borrow_mut().push(dest.to_path_buf());

            let name = archive.file_name().unwrap().to_string_lossy();
            if self.refuse.iter().any(|r| name.starts_with(r)) {
                return Ok(Extraction {
                    status: Some(2),
                    diagnostic: "Unsupported method".into(),
                });
            }
            for member in members {
                let base = member.rsplit('/').next().unwrap();
                fs::write(dest.join(base), b"payload").unwrap();
            }
            Ok(Extraction {
                status: Some(0),
                diagnostic: String::new(),
            })
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![
            CatalogEntry::new("a.iso", "sources/install.wim", "Windows/System32/ntoskrnl.exe"),
            CatalogEntry::new("b.iso", "I386/NTOSKRNL.EX_", "ntoskrnl.exe"),
        ])
    }

    #[test]
    fn nonexistent_input_dir_is_fatal_before_any_entry() {
        let out = tempfile::tempdir().unwrap();
        let fake = FakeExtractor::new();

        let result = run(
            &fake,
            &catalog(),
            Path::new("/no/such/dir"),
            out.path(),
            &mut Silent,
        );
        assert!(matches!(result, Err(Error::InvalidInputDir { .. })));
        assert_eq!(fake.calls(), 0);
    }

    #[test]
    fn nonexistent_output_dir_is_fatal() {
        let input = tempfile::tempdir().unwrap();
        let fake = FakeExtractor::new();

        let result = run(
            &fake,
            &catalog(),
            input.path(),
            Path::new("/no/such/dir"),
            &mut Silent,
        );
        assert!(matches!(result, Err(Error::InvalidOutputDir { .. })));
        assert_eq!(fake.calls(), 0);
    }

    #[test]
    fn a_file_is_not_a_valid_directory() {
        let input = tempfile::tempdir().unwrap();
        let file = input.path().join("not-a-dir");
        fs::write(&file, b"").unwrap();

        let result = run(
            &FakeExtractor::new(),
            &catalog(),
            &file,
            input.path(),
            &mut Silent,
        );
        assert!(matches!(result, Err(Error::InvalidInputDir { .. })));
    }

    #[test]
    fn absent_source_skips_without_invoking_the_extractor() {
        let input = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let fake = FakeExtractor::new();

        let reports = run(&fake, &catalog(), input.path(), out.path(), &mut Silent).unwrap();

        assert_eq!(reports.len(), 2);
        assert!(
            reports
                .iter()
                .all(|r| r.outcome == Outcome::SourceMissing)
        );
        assert_eq!(fake.calls(), 0);
    }

    #[test]
    fn present_and_absent_sources_mix() {
        let input = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        fs::write(input.path().join("a.iso"), b"iso").unwrap();
        let fake = FakeExtractor::new();

        let reports = run(&fake, &catalog(), input.path(), out.path(), &mut Silent).unwrap();

        assert_eq!(
            reports[0].outcome,
            Outcome::Extracted {
                artifact: out.path().canonicalize().unwrap().join("a_ntoskrnl.exe")
            }
        );
        assert_eq!(reports[1].outcome, Outcome::SourceMissing);
        assert!(out.path().join("a_ntoskrnl.exe").is_file());
        assert_eq!(fs::read_dir(out.path()).unwrap().count(), 1);
        assert!(fake.leaked_workspaces().is_empty());
    }

    #[test]
    fn a_failing_entry_does_not_stop_the_run() {
        let input = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        fs::write(input.path().join("a.iso"), b"iso").unwrap();
        fs::write(input.path().join("b.iso"), b"iso").unwrap();
        let fake = FakeExtractor::refusing(vec!["NTOSKRNL.EX_"]);

        let reports = run(&fake, &catalog(), input.path(), out.path(), &mut Silent).unwrap();

        assert!(reports[0].outcome.is_success());
        assert_eq!(
            reports[1].outcome,
            Outcome::TargetFailed {
                diagnostic: "Unsupported method".into()
            }
        );
        assert_eq!(fs::read_dir(out.path()).unwrap().count(), 1);
        assert!(fake.leaked_workspaces().is_empty());
    }

    #[test]
    fn two_runs_produce_the_same_artifacts() {
        let input = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        fs::write(input.path().join("a.iso"), b"iso").unwrap();
        let fake = FakeExtractor::new();

        for _ in 0..2 {
            let reports = run(&fake, &catalog(), input.path(), out.path(), &mut Silent).unwrap();
            assert!(reports[0].outcome.is_success());
        }
        assert_eq!(fs::read_dir(out.path()).unwrap().count(), 1);
        assert!(fake.leaked_workspaces().is_empty());
    }

    #[test]
    fn progress_begin_fires_only_for_present_sources() {
        struct Recorder(Vec<String>);
        impl Progress for Recorder {
            fn begin(&mut self, entry: &CatalogEntry) {
                self.0.push(format!("begin {}", entry.source));
            }
            fn outcome(&mut self, entry: &CatalogEntry, _: &Outcome) {
                self.0.push(format!("outcome {}", entry.source));
            }
        }

        let input = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        fs::write(input.path().join("a.iso"), b"iso").unwrap();

        let mut recorder = Recorder(Vec::new());
        run(
            &FakeExtractor::new(),
            &catalog(),
            input.path(),
            out.path(),
            &mut recorder,
        )
        .unwrap();

        assert_eq!(
            recorder.0,
            ["begin a.iso", "outcome a.iso", "outcome b.iso"]
        );
    }
}
