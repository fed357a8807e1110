//! JSON rendering shared by the config and manifest files.
//!
//! Both files are written tab-indented so they diff cleanly against configs
//! produced by earlier releases.

use serde::Serialize;
use serde::ser::Error as _;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Serialize `value` as pretty JSON indented with a single tab per level.
///
/// # Errors
///
/// Returns an error if `value` cannot be represented as JSON.
pub fn to_tab_pretty<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    let mut buf = Vec::with_capacity(256);
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"\t"));
    value.serialize(&mut ser)?;
    String::from_utf8(buf).map_err(serde_json::Error::custom)
}
