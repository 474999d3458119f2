//! Nested archive extraction: pull a known file out of a container that is
//! itself stored inside a disc image, one external-tool hop per layer.
//!
//! # Architecture
//!
//! - `catalog.rs` - table mapping source archives to the nested paths inside
//! - `sevenz.rs` - external tool subprocess primitive
//! - `workspace.rs` - per-attempt scratch directory
//! - `pipeline.rs` - two-hop orchestrator with entry-level fault isolation
//! - `driver.rs` - catalog loop

pub use catalog::{Catalog, CatalogEntry};
pub use driver::{EntryReport, Progress, Silent, run};
pub use error::{Error, Result};
pub use pipeline::{Outcome, extract_entry};
pub use sevenz::{Extraction, Extractor, SevenZip};
pub use workspace::ScopedWorkspace;

pub mod catalog;
pub mod driver;
mod error;
pub mod pipeline;
pub mod sevenz;
mod workspace;
