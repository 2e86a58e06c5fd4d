//! Response document persistence

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Serializer, Value};
use std::fs;
use std::path::Path;

/// Render a document the way the pipeline's consumers read it: 4-space
/// indentation, no trailing newline.
pub fn to_pretty(value: &Value) -> Result<String> {
    let mut buf = Vec::with_capacity(256);
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer).context("failed serializing document")?;
    String::from_utf8(buf).context("serializer produced invalid UTF-8")
}

/// Overwrite `path` with the rendered document.
///
/// The write is in place, not via a temporary file: the step either rewrites
/// the document whole or aborts, and a crash mid-write can leave it truncated.
pub fn write_pretty(path: &Path, value: &Value) -> Result<()> {
    let rendered = to_pretty(value)?;
    fs::write(path, rendered).with_context(|| format!("failed writing {}", path.display()))?;
    Ok(())
}
