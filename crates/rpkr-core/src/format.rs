//! Resource pack format lookup.
//!
//! The mapping from game versions to `pack_format` numbers changes with every
//! game release, so it sits behind the [`FormatTable`] trait. The engine only
//! depends on [`resolve_format`]; [`BuiltinFormatTable`] ships the versions
//! known when this crate was released.

use std::collections::{BTreeMap, HashMap};

/// Maps a version string to a `pack_format` number.
pub trait FormatTable: Send + Sync {
    /// Look up the format for `version`, or `None` if it is unknown.
    fn lookup(&self, version: &str) -> Option<u32>;
}

impl<T: FormatTable + ?Sized> FormatTable for std::sync::Arc<T> {
    fn lookup(&self, version: &str) -> Option<u32> {
        (**self).lookup(version)
    }
}

impl FormatTable for BTreeMap<String, u32> {
    fn lookup(&self, version: &str) -> Option<u32> {
        self.get(version).copied()
    }
}

impl FormatTable for HashMap<String, u32> {
    fn lookup(&self, version: &str) -> Option<u32> {
        self.get(version).copied()
    }
}

/// Resolve the format for a pack, trying the version label first and the
/// bare target version second. Returns `0` when neither is known.
pub fn resolve_format(table: &dyn FormatTable, version_label: &str, target_version: &str) -> u32 {
    table
        .lookup(version_label)
        .or_else(|| table.lookup(target_version))
        .unwrap_or(0)
}

/// Inclusive release ranges, `(first, last, pack_format)`.
const RELEASES: &[((u32, u32, u32), (u32, u32, u32), u32)] = &[
    ((1, 6, 1), (1, 8, 9), 1),
    ((1, 9, 0), (1, 10, 2), 2),
    ((1, 11, 0), (1, 12, 2), 3),
    ((1, 13, 0), (1, 14, 4), 4),
    ((1, 15, 0), (1, 16, 1), 5),
    ((1, 16, 2), (1, 16, 5), 6),
    ((1, 17, 0), (1, 17, 1), 7),
    ((1, 18, 0), (1, 18, 2), 8),
    ((1, 19, 0), (1, 19, 2), 9),
    ((1, 19, 3), (1, 19, 3), 12),
    ((1, 19, 4), (1, 19, 4), 13),
    ((1, 20, 0), (1, 20, 1), 15),
    ((1, 20, 2), (1, 20, 2), 18),
    ((1, 20, 3), (1, 20, 4), 22),
    ((1, 20, 5), (1, 20, 6), 32),
    ((1, 21, 0), (1, 21, 1), 34),
    ((1, 21, 2), (1, 21, 3), 42),
    ((1, 21, 4), (1, 21, 4), 46),
    ((1, 21, 5), (1, 21, 5), 55),
    ((1, 21, 6), (1, 21, 6), 63),
    ((1, 21, 7), (1, 21, 8), 64),
];

/// Inclusive dated-snapshot ranges by `(year, week)`, `(first, last, pack_format)`.
///
/// Snapshots after the 1.19.3 cycle changed format almost weekly and are
/// left to fall back to the target version.
const SNAPSHOTS: &[((u32, u32), (u32, u32), u32)] = &[
    ((13, 24), (15, 31), 1),
    ((15, 32), (16, 32), 2),
    ((16, 33), (17, 47), 3),
    ((17, 48), (19, 38), 4),
    ((19, 39), (20, 44), 5),
    ((20, 45), (21, 36), 7),
    ((21, 37), (22, 10), 8),
    ((22, 11), (22, 41), 9),
    ((22, 42), (22, 46), 11),
];

/// Format table for released game versions and dated snapshots.
///
/// Accepts `1.16`, `1.16.5` and `20w14a`-style ids. Qualified labels such as
/// `1.16.5-rc1` are not resolved.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinFormatTable;

impl FormatTable for BuiltinFormatTable {
    fn lookup(&self, version: &str) -> Option<u32> {
        if let Some(release) = parse_release(version) {
            return RELEASES
                .iter()
                .find(|(first, last, _)| (*first..=*last).contains(&release))
                .map(|(_, _, format)| *format);
        }
        let week = parse_snapshot(version)?;
        SNAPSHOTS
            .iter()
            .find(|(first, last, _)| (*first..=*last).contains(&week))
            .map(|(_, _, format)| *format)
    }
}

/// Parse `major.minor[.patch]`.
fn parse_release(version: &str) -> Option<(u32, u32, u32)> {
    let mut parts = version.split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts.next()?.parse().ok()?;
    let patch = match parts.next() {
        Some(p) => p.parse().ok()?,
        None => 0,
    };
    if parts.next().is_some() {
        return None;
    }
    Some((major, minor, patch))
}

/// Parse `YYwWWx` into `(year, week)`.
fn parse_snapshot(version: &str) -> Option<(u32, u32)> {
    let bytes = version.as_bytes();
    if bytes.len() != 6 || bytes[2] != b'w' || !bytes[5].is_ascii_alphabetic() {
        return None;
    }
    let year = version.get(0..2)?.parse().ok()?;
    let week = version.get(3..5)?.parse().ok()?;
    Some((year, week))
}
