//! Human-readable version labels.

use std::sync::LazyLock;

use regex::Regex;

/// Dated snapshot ids such as `20w14a`.
static SNAPSHOT_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}w\d{2}[A-Za-z]$").expect("snapshot regex is valid"));

/// Short pre-release / release-candidate tags such as `rc1` or `pre3`.
static SHORT_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\w+\d+$").expect("short tag regex is valid"));

/// Combine the target version with an optional snapshot qualifier.
///
/// | snapshot          | result                  |
/// |-------------------|-------------------------|
/// | none              | `1.16.5`                |
/// | `20w14a`          | `20w14a`                |
/// | `rc1`             | `1.16.5-rc1`            |
/// | `Pre-Release 3`   | `1.16.5 Pre-Release 3`  |
///
/// A dated snapshot id replaces the target version outright; the two
/// qualifier forms never apply to it.
pub fn version_label(target_version: &str, snapshot: Option<&str>) -> String {
    match snapshot.filter(|s| !s.is_empty()) {
        None => target_version.to_string(),
        Some(snap) if SNAPSHOT_ID.is_match(snap) => snap.to_string(),
        Some(snap) if SHORT_TAG.is_match(snap) => format!("{target_version}-{snap}"),
        Some(snap) => format!("{target_version} {snap}"),
    }
}
