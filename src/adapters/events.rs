//! Traversal-event stream loader: reads a recorded event sequence from JSON.
//!
//! The traversal engine itself lives outside this crate; a recorded stream is
//! how its callbacks reach the session in batch runs and in tests.

use anyhow::{Context as _, Result};
use std::path::Path;

use crate::domain::decl::TraversalEvent;

pub fn load_events(path: &Path) -> Result<Vec<TraversalEvent>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read event stream: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse event stream: {}", path.display()))
}
