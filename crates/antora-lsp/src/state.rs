//! Persisted workspace state.
//!
//! The opt-in flags live in a small JSON object on disk, rewritten on
//! every change.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use antora_lsp_core::error::{AntoraError, Result};
use antora_lsp_core::opt_in::StateStore;

/// Default state file location, relative to the workspace root.
pub const DEFAULT_STATE_FILE: &str = ".antora-assist/state.json";

/// A [`StateStore`] backed by a JSON file.
#[derive(Debug)]
pub struct JsonStateStore {
    path: PathBuf,
    flags: Mutex<BTreeMap<String, bool>>,
}

impl JsonStateStore {
    /// Open the store at `path`. A missing or unreadable file starts empty.
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let flags = match tokio::fs::read_to_string(&path).await {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring malformed state file");
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        };
        Self {
            path,
            flags: Mutex::new(flags),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, flags: &BTreeMap<String, bool>) -> Result<()> {
        let state_error = |message: String| AntoraError::State {
            path: self.path.clone(),
            message,
        };
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AntoraError::io(parent, e))?;
        }
        let text = serde_json::to_string_pretty(flags).map_err(|e| state_error(e.to_string()))?;
        tokio::fs::write(&self.path, text)
            .await
            .map_err(|e| AntoraError::io(&self.path, e))
    }
}

#[async_trait]
impl StateStore for JsonStateStore {
    async fn get_flag(&self, key: &str) -> Option<bool> {
        self.flags.lock().await.get(key).copied()
    }

    async fn set_flag(&self, key: &str, value: Option<bool>) -> Result<()> {
        let mut flags = self.flags.lock().await;
        match value {
            Some(value) => flags.insert(key.to_string(), value),
            None => flags.remove(key),
        };
        self.persist(&flags).await
    }
}
