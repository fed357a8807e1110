//! Building the `pack.mcmeta` manifest from a configuration.

use rpkr_schema::{Config, LanguageSection, PackMeta, PackSection};
use serde_json::Value;
use tracing::debug;

use crate::description::compile_description;
use crate::error::ManifestError;
use crate::format::{FormatTable, resolve_format};
use crate::language::parse_language;

/// Build the manifest for `config`, or `None` when the configuration has no
/// description (manifest generation disabled). An empty description counts
/// as none.
///
/// # Errors
///
/// Fails if any `languages` entry is malformed; a manifest with a missing
/// language is never produced.
pub fn build_manifest(
    config: &Config,
    version_label: &str,
    formats: &dyn FormatTable,
) -> Result<Option<PackMeta>, ManifestError> {
    let Some(template) = config.description.as_deref().filter(|d| !d.is_empty()) else {
        return Ok(None);
    };

    let pack_format = resolve_format(formats, version_label, &config.target_version);
    debug!(version_label, pack_format, "resolved pack format");

    let description = compile_description(template, &config.template_fields())?;

    let language = match &config.languages {
        Some(langs) => {
            let mut section = LanguageSection::new();
            for (code, entry) in langs {
                let parsed = match entry {
                    Value::String(text) => parse_language(code, text)?,
                    other => {
                        return Err(ManifestError::MalformedLanguageEntry {
                            code: code.clone(),
                            entry: other.to_string(),
                        });
                    }
                };
                section.insert(code.as_str(), parsed);
            }
            Some(section)
        }
        None => None,
    };

    Ok(Some(PackMeta {
        pack: PackSection {
            pack_format,
            description,
        },
        language,
    }))
}
