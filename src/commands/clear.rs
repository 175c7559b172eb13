//! Clear command: delete the knowledge store

use tracing::info;

use crate::config::Config;
use crate::knowledge::KnowledgeStore;
use crate::{Error, Result};

/// Delete the backing file. Developer action.
pub fn run(config: &Config, password: &str) -> Result<()> {
    if !config.check_dev_password(password) {
        return Err(Error::AuthorizationRequired);
    }

    let store = KnowledgeStore::new(&config.store_path);
    store.clear()?;

    info!(path = %store.path().display(), "knowledge store cleared");
    println!("Knowledge store cleared.");
    Ok(())
}
