//! Tests for upload command

use fraoula_chatbot::commands::upload;
use fraoula_chatbot::{Config, Error, KnowledgeStore};
use tempfile::tempdir;

fn config_with_store(dir: &tempfile::TempDir) -> Config {
    let mut config = Config::default();
    config.store_path = dir.path().join("kb.json");
    config.chunk_size = 8;
    config.chunk_overlap = 0;
    config.dev_password = "letmein".to_string();
    config
}

#[test]
fn test_upload_csv_file() {
    let dir = tempdir().unwrap();
    let config = config_with_store(&dir);

    let file = dir.path().join("faq.csv");
    std::fs::write(&file, "question,answer\nShipping time?,Three days\n").unwrap();

    upload::run(&config, &file, false, "letmein").unwrap();

    let store = KnowledgeStore::new(&config.store_path);
    let text = store.read().join(" ");
    assert!(text.contains("Shipping time?"));
    assert!(text.contains("Three days"));
}

#[test]
fn test_upload_json_file() {
    let dir = tempdir().unwrap();
    let config = config_with_store(&dir);

    let file = dir.path().join("company.json");
    std::fs::write(&file, r#"{"name": "Fraoula", "industry": "software"}"#).unwrap();

    upload::run(&config, &file, false, "letmein").unwrap();

    let store = KnowledgeStore::new(&config.store_path);
    assert!(store.read().join(" ").contains("Fraoula"));
}

#[test]
fn test_upload_overwrites_by_default() {
    let dir = tempdir().unwrap();
    let config = config_with_store(&dir);

    let store = KnowledgeStore::new(&config.store_path);
    store.write(&["old knowledge".to_string()]).unwrap();

    let file = dir.path().join("new.txt");
    std::fs::write(&file, "replacement knowledge").unwrap();

    upload::run(&config, &file, false, "letmein").unwrap();

    let chunks = store.read();
    assert!(!chunks.iter().any(|c| c.contains("old knowledge")));
}

#[test]
fn test_upload_without_password_fails() {
    let dir = tempdir().unwrap();
    let config = config_with_store(&dir);

    let file = dir.path().join("doc.txt");
    std::fs::write(&file, "content").unwrap();

    let err = upload::run(&config, &file, false, "").unwrap_err();
    assert!(matches!(err, Error::AuthorizationRequired));
}

#[test]
fn test_upload_missing_file_fails() {
    let dir = tempdir().unwrap();
    let config = config_with_store(&dir);

    let result = upload::run(&config, &dir.path().join("missing.txt"), false, "letmein");
    assert!(result.is_err());
}
