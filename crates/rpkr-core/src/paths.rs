//! Selector localisation and artifact path helpers.
//!
//! Selectors are plain strings until the archive step expands them, so
//! localisation is a string rewrite with no filesystem access.

use std::path::{Component, Path, PathBuf};

/// Whether `input` names the project root itself (`.`, `./` or empty).
pub fn is_current_dir(input: &str) -> bool {
    input.is_empty() || input.trim_end_matches('/') == "."
}

/// Root every selector at `input`.
///
/// `assets/**/*.png` with input `src/` becomes `src/assets/**/*.png`.
/// Selectors pass through unchanged when `input` is the current directory.
/// Order is preserved.
pub fn localize(selectors: &[String], input: &str) -> Vec<String> {
    if is_current_dir(input) {
        return selectors.to_vec();
    }
    let base = input.trim_end_matches('/');
    selectors
        .iter()
        .map(|selector| format!("{base}/{selector}"))
        .collect()
}

/// Keep only the normal components of `path`.
///
/// This is where a path lands when it is reproduced underneath an output
/// directory: `./src` -> `src`, `/abs/in` -> `abs/in`, `../x` -> `x`.
pub fn mirror_path(path: &Path) -> PathBuf {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part),
            _ => None,
        })
        .collect()
}

/// The directory `input` occupies relative to the project `root`.
///
/// An absolute input inside `root` is made relative to it first so it lines
/// up with the root-relative paths selectors match. Anything else is
/// mirrored as is: `.` -> empty, `./src` -> `src`.
pub fn input_dir(root: &Path, input: &str) -> PathBuf {
    let input = Path::new(input);
    let relative = if input.is_absolute() {
        input.strip_prefix(root).unwrap_or(input)
    } else {
        input
    };
    mirror_path(relative)
}

/// Archive entry name for a relative path, always `/`-separated.
pub fn entry_name(path: &Path) -> String {
    mirror_path(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Strip leading `./` segments so a selector can be appended to a base path.
pub(crate) fn strip_dot_prefix(selector: &str) -> &str {
    let mut s = selector;
    while let Some(rest) = s.strip_prefix("./") {
        s = rest;
    }
    s
}
