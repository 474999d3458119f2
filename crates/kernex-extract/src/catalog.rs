use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;

/// One record mapping a known source archive to the nested paths needed to
/// reach the target file inside it.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct CatalogEntry {
    /// File name of the source archive, as it appears in the input directory.
    pub source: String,
    /// Path of the intermediate container inside the source archive,
    /// `/`-separated.
    pub container: String,
    /// Path of the target file inside the intermediate container,
    /// `/`-separated.
    pub target: String,
}

impl CatalogEntry {
    pub fn new(
        source: impl Into<String>,
        container: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            container: container.into(),
            target: target.into(),
        }
    }

    /// Source archive identifier without its extension.
    pub fn source_stem(&self) -> &str {
        Path::new(&self.source)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.source)
    }

    /// Final path segment of the intermediate container, the name it gets
    /// when extracted flattened.
    pub fn container_name(&self) -> &str {
        base_name(&self.container)
    }

    /// Base name of the target file.
    pub fn target_name(&self) -> &str {
        base_name(&self.target)
    }

    /// Name of the artifact this entry produces in the output directory.
    pub fn artifact_name(&self) -> String {
        format!("{}_{}", self.source_stem(), self.target_name())
    }
}

fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Ordered, immutable set of catalog entries. Built in, or loaded from a
/// TOML file of `[[entry]]` tables.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct Catalog {
    #[serde(rename = "entry", default)]
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// The supported Windows installation ISOs and where `ntoskrnl.exe`
    /// hides inside each of them. XP ships the kernel in a compressed
    /// `.EX_` on the disc itself; everything later buries it in
    /// `install.wim`.
    pub fn builtin() -> Self {
        Self::new(vec![
            CatalogEntry::new(
                "en_windows_xp_professional_with_service_pack_3_x86_cd_x14-80428.iso",
                "I386/NTOSKRNL.EX_",
                "ntoskrnl.exe",
            ),
            CatalogEntry::new(
                "en_windows_7_enterprise_with_sp1_x64_dvd_u_677651.iso",
                "sources/install.wim",
                "Windows/System32/ntoskrnl.exe",
            ),
            CatalogEntry::new(
                "en_windows_8_1_enterprise_x64_dvd_2971902.iso",
                "sources/install.wim",
                "Windows/System32/ntoskrnl.exe",
            ),
            CatalogEntry::new(
                "en_windows_10_enterprise_version_1703_updated_march_2017_x64_dvd_10189290.iso",
                "sources/install.wim",
                "Windows/System32/ntoskrnl.exe",
            ),
        ])
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_toml_str(&fs::read_to_string(path)?)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
