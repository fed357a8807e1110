//! The `.rpkr.json` project configuration.
//!
//! JSON keys follow the file format used since config version 2
//! (`packver`, `mcver`, `mcsnap`, `files`, ...). Keys this crate does not
//! know about are kept in [`Config::extra`] so they survive a round trip and
//! can be used as description placeholders.

use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// File name of the project configuration, relative to the project root.
pub const CONFIG_FILE: &str = ".rpkr.json";

/// Schema version written into freshly initialised configuration files.
pub const CONFIG_VERSION: u32 = 2;

/// Pack version used when a configuration does not name one.
pub const DEFAULT_PACK_VERSION: &str = "v1";

/// Minecraft version targeted by a freshly initialised configuration.
pub const DEFAULT_TARGET_VERSION: &str = "1.16.5";

/// Description template written into freshly initialised configuration files.
pub const DEFAULT_DESCRIPTION: &str = "Default resource pack configuration, which creates an automatic pack.mcmeta file when packing.";

/// Name used when the project directory has no usable file name (e.g. `/`).
pub const FALLBACK_NAME: &str = "resourcepack";

/// Built-in file selectors: pack icon and manifest, textures, models,
/// localisation, texts, sounds and shaders.
pub const DEFAULT_SELECTORS: &[&str] = &[
    "pack.png",
    "pack.mcmeta",
    "assets/**/*.png",
    "assets/**/*.mcmeta",
    "assets/**/*.json",
    "assets/**/lang/**/*.lang",
    "assets/**/texts/**/*.txt",
    "assets/**/sounds/**/*.ogg",
    "assets/**/shaders/**/*.fsh",
    "assets/**/shaders/**/*.bin",
];

fn default_config_version() -> u32 {
    CONFIG_VERSION
}

fn default_pack_version() -> String {
    DEFAULT_PACK_VERSION.to_string()
}

fn default_target_version() -> String {
    DEFAULT_TARGET_VERSION.to_string()
}

/// An explicit `null` reads the same as a missing key.
fn null_or<'de, D, T>(deserializer: D, fallback: impl FnOnce() -> T) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_else(fallback))
}

fn nullable_config_version<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    null_or(d, default_config_version)
}

fn nullable_pack_version<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    null_or(d, default_pack_version)
}

fn nullable_target_version<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    null_or(d, default_target_version)
}

fn nullable_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    null_or(d, T::default)
}

/// Declarative project configuration persisted as `.rpkr.json`.
///
/// Field order matters: it is the serialization order of the file and the
/// order in which [`Config::template_fields`] exposes fields to description
/// templating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Schema version. Informational only; no migrations exist.
    #[serde(
        rename = "configver",
        default = "default_config_version",
        deserialize_with = "nullable_config_version"
    )]
    pub config_version: u32,
    /// Display name of the pack. Empty means "name it after the root".
    #[serde(default, deserialize_with = "nullable_default")]
    pub name: String,
    /// Free-form version of the pack itself (e.g. `v1`).
    #[serde(
        rename = "packver",
        default = "default_pack_version",
        deserialize_with = "nullable_pack_version"
    )]
    pub pack_version: String,
    /// Dotted Minecraft version the pack targets (e.g. `1.16.5`).
    #[serde(
        rename = "mcver",
        default = "default_target_version",
        deserialize_with = "nullable_target_version"
    )]
    pub target_version: String,
    /// Optional snapshot id, pre-release or release-candidate qualifier.
    #[serde(rename = "mcsnap", default)]
    pub snapshot_label: Option<String>,
    /// Description template. `None` disables manifest generation.
    #[serde(default)]
    pub description: Option<String>,
    /// Language code to `"Name (Region)"` entries, in file order.
    #[serde(default)]
    pub languages: Option<Map<String, Value>>,
    /// Glob patterns selecting the files that enter the artifact.
    #[serde(rename = "files", default, deserialize_with = "nullable_default")]
    pub file_selectors: Vec<String>,
    /// Unrecognised keys, in file order.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Config {
    /// Build the default configuration for a project named `name`.
    ///
    /// A new value is constructed on every call; callers are free to mutate
    /// their copy.
    pub fn new_default(name: impl Into<String>) -> Self {
        Self {
            config_version: CONFIG_VERSION,
            name: name.into(),
            pack_version: default_pack_version(),
            target_version: default_target_version(),
            snapshot_label: None,
            description: Some(DEFAULT_DESCRIPTION.to_string()),
            languages: None,
            file_selectors: DEFAULT_SELECTORS.iter().map(ToString::to_string).collect(),
            extra: Map::new(),
        }
    }

    /// Build the default configuration for the project rooted at `root`,
    /// named after the root directory.
    pub fn default_for_root(root: &Path) -> Self {
        Self::new_default(project_name(root))
    }

    /// Parse a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if `content` is not a JSON object matching the
    /// configuration schema.
    pub fn parse(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    /// Render the configuration as tab-indented JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        crate::json::to_tab_pretty(self)
    }

    /// The effective file selectors. Falls back to [`DEFAULT_SELECTORS`] so
    /// the list is never empty.
    pub fn selectors(&self) -> Vec<String> {
        if self.file_selectors.is_empty() {
            DEFAULT_SELECTORS.iter().map(ToString::to_string).collect()
        } else {
            self.file_selectors.clone()
        }
    }

    /// Every configuration field as `(json key, value)` pairs.
    ///
    /// Declared fields come first in declaration order, followed by
    /// [`Config::extra`] in file order. Absent optional fields are `null`.
    pub fn template_fields(&self) -> Vec<(String, Value)> {
        let languages = self
            .languages
            .as_ref()
            .map_or(Value::Null, |langs| Value::Object(langs.clone()));

        let mut fields = vec![
            ("configver".to_string(), Value::from(self.config_version)),
            ("name".to_string(), Value::from(self.name.as_str())),
            ("packver".to_string(), Value::from(self.pack_version.as_str())),
            ("mcver".to_string(), Value::from(self.target_version.as_str())),
            (
                "mcsnap".to_string(),
                self.snapshot_label.as_deref().map_or(Value::Null, Value::from),
            ),
            (
                "description".to_string(),
                self.description.as_deref().map_or(Value::Null, Value::from),
            ),
            ("languages".to_string(), languages),
            ("files".to_string(), Value::from(self.file_selectors.clone())),
        ];
        fields.extend(self.extra.iter().map(|(k, v)| (k.clone(), v.clone())));
        fields
    }
}

/// Name of the project rooted at `root`: its final path component.
pub fn project_name(root: &Path) -> String {
    root.file_name().map_or_else(
        || FALLBACK_NAME.to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}
