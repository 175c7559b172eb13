//! Upload command: extract a knowledge file into the store

use std::path::Path;

use tracing::info;

use crate::config::Config;
use crate::extract::extract_text;
use crate::knowledge::{Chunker, KnowledgeStore};
use crate::{Error, Result};

/// Extract, chunk and persist an uploaded file. Developer action.
pub fn run(config: &Config, file: &Path, append: bool, password: &str) -> Result<()> {
    if !config.check_dev_password(password) {
        return Err(Error::AuthorizationRequired);
    }

    let text = extract_text(file)?;

    let source = file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload");
    let chunker = Chunker::new(config.chunk_size, config.chunk_overlap);
    let chunks = chunker.chunk_texts(&text, source);

    if chunks.is_empty() {
        println!("No text found in {}", file.display());
        return Ok(());
    }

    let store = KnowledgeStore::new(&config.store_path);
    if append {
        store.append(&chunks)?;
    } else {
        store.write(&chunks)?;
    }

    let total = store.read().len();
    info!(file = %file.display(), added = chunks.len(), total, "knowledge uploaded");
    println!(
        "Stored {} chunks from {} ({} total in {})",
        chunks.len(),
        file.display(),
        total,
        store.path().display()
    );

    Ok(())
}
