//! Knowledge store: a single JSON document on local disk
//!
//! The canonical on-disk schema is `{"data": ["<chunk>", ...]}`. Earlier
//! revisions of the product wrote `{"data": "<string>"}` or a bare list of
//! `{"chunk": "<string>"}` objects; `read` accepts all three shapes and
//! normalizes to a chunk list.
//!
//! Single-writer, last-write-wins. There is no locking: concurrent uploads
//! can race and one will clobber the other.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Error, Result};

#[derive(Serialize)]
struct Envelope<'a> {
    data: &'a [String],
}

/// Persisted text corpus used as chat context.
#[derive(Debug, Clone)]
pub struct KnowledgeStore {
    path: PathBuf,
}

impl KnowledgeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read all stored chunks. An absent file or corrupt content yields an
    /// empty list, never an error.
    pub fn read(&self) -> Vec<String> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(_) => return Vec::new(),
        };

        match Self::parse(&content) {
            Some(chunks) => chunks,
            None => {
                warn!(path = %self.path.display(), "knowledge store content is corrupt, treating as empty");
                Vec::new()
            }
        }
    }

    /// Overwrite the store with the given chunks.
    pub fn write(&self, chunks: &[String]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(&Envelope { data: chunks })?;
        fs::write(&self.path, json)
            .map_err(|e| Error::StoreError(format!("failed to write {}: {}", self.path.display(), e)))?;

        debug!(path = %self.path.display(), chunks = chunks.len(), "knowledge store written");
        Ok(())
    }

    /// Append chunks to the store, keeping existing content.
    pub fn append(&self, chunks: &[String]) -> Result<()> {
        let mut existing = self.read();
        existing.extend_from_slice(chunks);
        self.write(&existing)
    }

    /// Delete the backing file. Missing file is not an error.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::StoreError(format!(
                "failed to clear {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    /// True when no usable chunks are stored.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Parse any of the supported on-disk shapes into a chunk list.
    /// Empty-text entries are dropped.
    fn parse(content: &str) -> Option<Vec<String>> {
        let value: Value = serde_json::from_str(content).ok()?;

        let chunks = match value {
            Value::Object(map) => match map.get("data")? {
                Value::String(text) => vec![text.clone()],
                Value::Array(items) => items
                    .iter()
                    .filter_map(|item| item.as_str().map(str::to_string))
                    .collect(),
                _ => return None,
            },
            // Legacy shape: [{"chunk": "..."}, ...]
            Value::Array(items) => items
                .iter()
                .filter_map(|item| item.get("chunk")?.as_str().map(str::to_string))
                .collect(),
            _ => return None,
        };

        Some(chunks.into_iter().filter(|c| !c.trim().is_empty()).collect())
    }
}
