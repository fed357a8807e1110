//! Parsing of `languages` entries (`"Name (Region)"`).

use std::sync::LazyLock;

use regex::Regex;
use rpkr_schema::LanguageEntry;

use crate::error::ManifestError;

static LANGUAGE_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(.*?)\s*\((.*?)\)").expect("language entry regex is valid")
});

/// Parse a `"Display Name (Region)"` entry for language `code`.
///
/// Whitespace around the name is trimmed. The region is the shortest text
/// inside the first pair of parentheses; anything after the closing
/// parenthesis is ignored.
///
/// # Errors
///
/// Returns [`ManifestError::MalformedLanguageEntry`] if the entry has no
/// parenthesised region.
pub fn parse_language(code: &str, entry: &str) -> Result<LanguageEntry, ManifestError> {
    let caps = LANGUAGE_ENTRY
        .captures(entry)
        .ok_or_else(|| ManifestError::MalformedLanguageEntry {
            code: code.to_string(),
            entry: entry.to_string(),
        })?;

    Ok(LanguageEntry {
        name: caps[1].to_string(),
        region: caps[2].to_string(),
    })
}
