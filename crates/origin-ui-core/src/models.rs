//! Component records and the serialized registry format.
//!
//! The JSON shape matches the registry file produced by the gallery
//! crawler (`complete-registry.json`): camelCase keys, one object per
//! component under `components`.

use serde::{Deserialize, Serialize};

/// One entry in the component catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentRecord {
    /// Unique primary key (e.g. `"comp-163"`).
    pub id: String,
    /// Human-readable display name.
    pub name: String,
    /// Single classification facet (e.g. `"button"`, `"input"`).
    pub category: String,
    /// Free-text labels used for exact and substring matching.
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub description: String,
    /// Opaque locator handed to the installer; never dereferenced here.
    #[serde(rename = "installUrl", alias = "installReference")]
    pub install_reference: String,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub registry_dependencies: Vec<String>,
    /// Registry item type, e.g. `registry:component`.
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
    #[serde(default)]
    pub styling: Styling,
    #[serde(default)]
    pub metadata: Provenance,
    /// Rendered preview image, when the crawler captured one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
}

fn default_kind() -> String {
    "registry:component".to_string()
}

/// Styling flags. Informational only, never a search key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Styling {
    pub framework: String,
    #[serde(default)]
    pub dark_mode: bool,
    #[serde(default)]
    pub responsive: bool,
    #[serde(default)]
    pub customizable: bool,
}

impl Default for Styling {
    fn default() -> Self {
        Self {
            framework: "tailwind".to_string(),
            dark_mode: false,
            responsive: false,
            customizable: false,
        }
    }
}

/// Where a record was discovered and when. Informational only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provenance {
    #[serde(default)]
    pub discovered_from: String,
    #[serde(default)]
    pub last_updated: String,
    #[serde(default)]
    pub verified: bool,
}

/// Registry-level facts carried alongside a snapshot for statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotInfo {
    pub version: Option<String>,
    pub last_updated: Option<String>,
}

/// The serialized registry file.
///
/// `total_components`, `categories` and `tags` are written by the crawler
/// for convenience; the store recomputes all three from `components`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryFile {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub last_updated: Option<String>,
    #[serde(default)]
    pub total_components: Option<usize>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub components: Vec<ComponentRecord>,
}

impl RegistryFile {
    /// Split the file into its records and the registry-level facts.
    pub fn into_parts(self) -> (Vec<ComponentRecord>, SnapshotInfo) {
        let info = SnapshotInfo {
            version: self.version,
            last_updated: self.last_updated,
        };
        (self.components, info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_registry_component() {
        let json = r#"{
            "version": "1.0.0",
            "lastUpdated": "2025-01-15T10:00:00.000Z",
            "totalComponents": 1,
            "categories": ["button"],
            "tags": ["button"],
            "components": [{
                "id": "comp-1",
                "name": "Primary Button",
                "category": "button",
                "tags": ["button", "primary"],
                "description": "A primary button",
                "installUrl": "https://originui.com/r/comp-1.json",
                "dependencies": [],
                "registryDependencies": ["button"],
                "type": "registry:component",
                "styling": { "framework": "tailwind", "darkMode": true, "responsive": true, "customizable": true },
                "metadata": { "discoveredFrom": "https://originui.com/button", "lastUpdated": "2025-01-15", "verified": true }
            }]
        }"#;

        let file: RegistryFile = serde_json::from_str(json).unwrap();
        let (records, info) = file.into_parts();
        assert_eq!(info.version.as_deref(), Some("1.0.0"));
        assert_eq!(records.len(), 1);
        let rec = &records[0];
        assert_eq!(rec.install_reference, "https://originui.com/r/comp-1.json");
        assert_eq!(rec.registry_dependencies, vec!["button"]);
        assert!(rec.styling.dark_mode);
        assert!(rec.metadata.verified);
        assert!(rec.preview_url.is_none());
    }

    #[test]
    fn test_minimal_component_uses_defaults() {
        let json = r#"{
            "id": "comp-2",
            "name": "Bare",
            "category": "input",
            "installUrl": "https://originui.com/r/comp-2.json"
        }"#;
        let rec: ComponentRecord = serde_json::from_str(json).unwrap();
        assert!(rec.tags.is_empty());
        assert_eq!(rec.kind, "registry:component");
        assert_eq!(rec.styling.framework, "tailwind");
        assert!(!rec.metadata.verified);
    }
}
