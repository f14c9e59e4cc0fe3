//! JSON build descriptor.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::Registry;

#[derive(Serialize)]
struct Document<'a> {
    fingerprint: String,
    #[serde(flatten)]
    registry: &'a Registry,
}

/// Render the registry as pretty-printed JSON with a trailing newline.
pub fn render(registry: &Registry) -> Result<String> {
    let document = Document {
        fingerprint: registry.fingerprint(),
        registry,
    };
    let mut out =
        serde_json::to_string_pretty(&document).context("failed to serialize registry")?;
    out.push('\n');
    Ok(out)
}
