//! The generated `pack.mcmeta` manifest.

use serde::{Deserialize, Serialize, Serializer};

/// File name of the manifest inside every artifact.
pub const MANIFEST_FILE: &str = "pack.mcmeta";

/// Top-level manifest document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackMeta {
    /// The mandatory `pack` section.
    pub pack: PackSection,
    /// Custom languages shipped by the pack, keyed by language code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<LanguageSection>,
}

/// The `language` section: entries in the order the configuration lists
/// them, written as a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageSection(Vec<(String, LanguageEntry)>);

impl LanguageSection {
    /// Create an empty section.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, replacing an earlier one with the same code in place.
    pub fn insert(&mut self, code: impl Into<String>, entry: LanguageEntry) {
        let code = code.into();
        match self.0.iter_mut().find(|(c, _)| *c == code) {
            Some((_, existing)) => *existing = entry,
            None => self.0.push((code, entry)),
        }
    }

    /// Entry for `code`, if present.
    pub fn get(&self, code: &str) -> Option<&LanguageEntry> {
        self.0.iter().find(|(c, _)| c == code).map(|(_, e)| e)
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &LanguageEntry)> {
        self.0.iter().map(|(c, e)| (c.as_str(), e))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the section has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for LanguageSection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries())
    }
}

/// The `pack` section of a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackSection {
    /// Format identifier; `0` when the target version is unknown.
    pub pack_format: u32,
    /// Compiled description text.
    pub description: String,
}

/// Display metadata for one custom language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageEntry {
    /// Human-readable language name.
    pub name: String,
    /// Region shown next to the name in the language menu.
    pub region: String,
}

impl PackMeta {
    /// Render the manifest as tab-indented JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        crate::json::to_tab_pretty(self)
    }
}
