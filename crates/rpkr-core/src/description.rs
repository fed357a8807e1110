//! Description templating for `pack.mcmeta`.
//!
//! Two rewrites share one left-to-right pass over the template:
//!
//! - `&` followed by a formatting code (`0-9`, `a-f`, `k-o`, `r`) becomes the
//!   section-sign escape the game's text renderer understands (`&a` -> `§a`).
//! - `<field>` becomes the stringified value of that configuration field.
//!
//! Replacement text is never scanned again, so a value containing `&a` or
//! another `<field>` is inserted verbatim.

use regex::{Captures, Regex};
use serde_json::Value;

use crate::error::ManifestError;

const FORMAT_CODE: &str = "&([0-9a-fk-or])";

/// Prefix of the game's formatting escape sequences.
pub const SECTION_SIGN: char = '§';

/// Expand formatting codes and field placeholders in `template`.
///
/// `fields` is an ordered list of `(name, value)` pairs, usually
/// [`Config::template_fields`](rpkr_schema::Config::template_fields). Names
/// match literally.
///
/// # Errors
///
/// Returns [`ManifestError::Template`] if the placeholder pattern cannot be
/// built (only possible for pathologically large field sets).
pub fn compile_description(
    template: &str,
    fields: &[(String, Value)],
) -> Result<String, ManifestError> {
    let pattern = if fields.is_empty() {
        FORMAT_CODE.to_string()
    } else {
        let names: Vec<String> = fields.iter().map(|(name, _)| regex::escape(name)).collect();
        format!("{FORMAT_CODE}|<({})>", names.join("|"))
    };
    let re = Regex::new(&pattern)?;

    let compiled = re.replace_all(template, |caps: &Captures<'_>| {
        if let Some(code) = caps.get(1) {
            return format!("{SECTION_SIGN}{}", code.as_str());
        }
        let name = caps.get(2).map_or("", |m| m.as_str());
        fields
            .iter()
            .find(|(field, _)| field == name)
            .map_or_else(String::new, |(_, value)| template_value(value))
    });

    Ok(compiled.into_owned())
}

/// Stringify a configuration value for substitution.
///
/// Strings are inserted as-is, `null` as the word `null`, arrays as their
/// elements joined by `,`, everything else as compact JSON.
pub fn template_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => template_value(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}
