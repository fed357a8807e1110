//! Version command

use crate::ui::Output;

/// Print the current version.
pub fn version() {
    Output::new().info(&format!(
        "The current version of resourcepacker is {}",
        env!("CARGO_PKG_VERSION")
    ));
}
