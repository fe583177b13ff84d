use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::{debug, warn};

use crate::ingest::RawBatch;
use crate::models::SignalFile;

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("Reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Decoding JSON {}", path.display()))
}

/// Strict read of a `{"signals": [...]}` document.
pub fn load_signals(path: &Path) -> Result<SignalFile> {
    let file: SignalFile = read_json(path)?;
    debug!("Signals loaded - path={}, signals={}", path.display(), file.signals.len());
    Ok(file)
}

/// Like [`load_signals`], but a missing or malformed file yields an empty set.
pub fn load_signals_or_default(path: &Path) -> SignalFile {
    if !path.exists() {
        warn!("Signals file missing - path={}, using empty set", path.display());
        return SignalFile::default();
    }
    load_signals(path).unwrap_or_else(|e| {
        warn!("Signals file unreadable - path={}, error={:#}, using empty set", path.display(), e);
        SignalFile::default()
    })
}

pub fn load_batch(path: &Path) -> Result<RawBatch> {
    let batch: RawBatch = read_json(path)?;
    debug!(
        "Raw batch loaded - path={}, trends={}, videos={}, posts={}",
        path.display(),
        batch.trends.len(),
        batch.videos.len(),
        batch.posts.len()
    );
    Ok(batch)
}
