use std::path::Path;

use anyhow::{Context, Result};
use isoshim_core::options;
use serde_json::Value;
use tracing::info;

/// Parse an archive command line rooted at `root` into a JSON value.
///
/// The parsed options serialize field by field; the textual representation
/// of the options structure is never re-parsed.
pub fn execute(root: &str, args: &[String]) -> Result<Value> {
    info!(
        "Parsing archive command line with {} flags rooted at {}",
        args.len(),
        root
    );

    let opts = options::parse_archive_command_line(args, Path::new(root))
        .with_context(|| format!("Failed to parse archive command line rooted at {root}"))?;

    serde_json::to_value(&opts).context("Failed to serialize archive options")
}
