//! Tests for clear command

use fraoula_chatbot::commands::clear;
use fraoula_chatbot::{Config, Error, KnowledgeStore};
use tempfile::tempdir;

#[test]
fn test_clear_deletes_store() {
    let dir = tempdir().unwrap();
    let mut config = Config::default();
    config.store_path = dir.path().join("kb.json");
    config.dev_password = "letmein".to_string();

    let store = KnowledgeStore::new(&config.store_path);
    store.write(&["data".to_string()]).unwrap();

    clear::run(&config, "letmein").unwrap();
    assert!(store.read().is_empty());
}

#[test]
fn test_clear_requires_developer_password() {
    let dir = tempdir().unwrap();
    let mut config = Config::default();
    config.store_path = dir.path().join("kb.json");
    config.dev_password = "letmein".to_string();

    let err = clear::run(&config, "guess").unwrap_err();
    assert!(matches!(err, Error::AuthorizationRequired));
}

#[test]
fn test_clear_with_disabled_password_always_fails() {
    let dir = tempdir().unwrap();
    let mut config = Config::default();
    config.store_path = dir.path().join("kb.json");
    config.dev_password = String::new();

    let err = clear::run(&config, "").unwrap_err();
    assert!(matches!(err, Error::AuthorizationRequired));
}
