//! Catalog sources: the ingestion boundary.
//!
//! A [`CatalogSource`] hands the core a finished record set. How the records
//! were produced (static lists, crawled gallery pages, probed registry
//! endpoints) is the source's business; the catalog store only requires
//! unique ids.
//!
//! | Source | Produces records from |
//! |--------|-----------------------|
//! | [`RegistryFileSource`] | A serialized `complete-registry.json` file |
//! | [`StaticSource`] | An in-memory list |

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use origin_ui_core::{ComponentRecord, RegistryFile, SnapshotInfo};

/// Output of one [`CatalogSource::scan`].
#[derive(Debug, Clone, Default)]
pub struct CatalogBatch {
    pub records: Vec<ComponentRecord>,
    pub info: SnapshotInfo,
}

/// Something that can produce a complete component record set.
pub trait CatalogSource: Send + Sync {
    /// Short identifier used in logs (e.g. `"registry-file"`).
    fn name(&self) -> &str;

    /// Human-readable description of where records come from.
    fn describe(&self) -> String;

    /// Produce the full record set.
    fn scan(&self) -> Result<CatalogBatch>;
}

/// Reads the registry JSON from the first candidate path that exists.
pub struct RegistryFileSource {
    candidates: Vec<PathBuf>,
}

impl RegistryFileSource {
    pub fn new(candidates: Vec<PathBuf>) -> Self {
        Self { candidates }
    }

    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::new(vec![path.into()])
    }

    /// First candidate that exists on disk.
    pub fn resolve(&self) -> Option<&Path> {
        self.candidates
            .iter()
            .map(PathBuf::as_path)
            .find(|p| p.is_file())
    }
}

impl CatalogSource for RegistryFileSource {
    fn name(&self) -> &str {
        "registry-file"
    }

    fn describe(&self) -> String {
        match self.resolve() {
            Some(path) => format!("registry file {}", path.display()),
            None => format!(
                "registry file (not found; tried {})",
                self.candidates
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
    }

    fn scan(&self) -> Result<CatalogBatch> {
        let path = self.resolve().with_context(|| {
            format!(
                "Could not find the component registry in any expected location: {}",
                self.candidates
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        })?;

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read registry file: {}", path.display()))?;
        let file: RegistryFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse registry file: {}", path.display()))?;

        if let Some(declared) = file.total_components {
            if declared != file.components.len() {
                tracing::warn!(
                    path = %path.display(),
                    declared,
                    actual = file.components.len(),
                    "registry totalComponents disagrees with component list"
                );
            }
        }

        let (records, info) = file.into_parts();
        tracing::debug!(path = %path.display(), records = records.len(), "registry file read");
        Ok(CatalogBatch { records, info })
    }
}

/// A fixed, in-memory record list.
pub struct StaticSource {
    records: Vec<ComponentRecord>,
    info: SnapshotInfo,
}

impl StaticSource {
    pub fn new(records: Vec<ComponentRecord>) -> Self {
        Self {
            records,
            info: SnapshotInfo::default(),
        }
    }

    pub fn with_info(mut self, info: SnapshotInfo) -> Self {
        self.info = info;
        self
    }
}

impl CatalogSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    fn describe(&self) -> String {
        format!("static list of {} components", self.records.len())
    }

    fn scan(&self) -> Result<CatalogBatch> {
        Ok(CatalogBatch {
            records: self.records.clone(),
            info: self.info.clone(),
        })
    }
}
