//! Show command: knowledge store diagnostics

use chrono::{DateTime, Local};

use crate::config::Config;
use crate::knowledge::KnowledgeStore;
use crate::Result;

/// Print what the store currently holds.
pub fn run(config: &Config) -> Result<()> {
    let store = KnowledgeStore::new(&config.store_path);
    let chunks = store.read();

    println!("Store:  {}", store.path().display());
    println!("Chunks: {}", chunks.len());

    let bytes: usize = chunks.iter().map(|c| c.len()).sum();
    println!("Text:   {} bytes", bytes);

    if let Ok(metadata) = std::fs::metadata(store.path()) {
        if let Ok(modified) = metadata.modified() {
            let local: DateTime<Local> = modified.into();
            println!("Updated: {}", local.format("%Y-%m-%d %H:%M:%S"));
        }
    } else {
        println!("The store file does not exist yet.");
    }

    Ok(())
}
