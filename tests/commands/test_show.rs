//! Tests for show command

use fraoula_chatbot::commands::show;
use fraoula_chatbot::{Config, KnowledgeStore};
use tempfile::tempdir;

#[test]
fn test_show_runs_on_empty_store() {
    let dir = tempdir().unwrap();
    let mut config = Config::default();
    config.store_path = dir.path().join("kb.json");

    assert!(show::run(&config).is_ok());
}

#[test]
fn test_show_runs_on_populated_store() {
    let dir = tempdir().unwrap();
    let mut config = Config::default();
    config.store_path = dir.path().join("kb.json");

    let store = KnowledgeStore::new(&config.store_path);
    store
        .write(&["first chunk".to_string(), "second chunk".to_string()])
        .unwrap();

    assert!(show::run(&config).is_ok());
}
