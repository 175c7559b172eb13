//! Configuration for the OpenRouter API and the knowledge store
//!
//! Loads configuration from config.yml file

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::selector::SelectionMode;

/// Default constants (fallback if config.yml not found)
pub const STORE_FILE: &str = "knowledge_data.json";
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_MODEL: &str = "mistralai/mistral-7b-instruct";
pub const DEFAULT_MAX_TOKENS: u32 = 500;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CHUNK_SIZE: usize = 64;
pub const DEFAULT_TOP_K: usize = 3;

/// YAML config structures
#[derive(Debug, Deserialize)]
struct YamlConfig {
    openrouter: Option<OpenRouterConfig>,
    knowledge: Option<KnowledgeConfig>,
    dev: Option<DevConfig>,
}

#[derive(Debug, Deserialize)]
struct OpenRouterConfig {
    api_key: Option<String>,
    base_url: Option<String>,
    model: Option<String>,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
    top_p: Option<f32>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct KnowledgeConfig {
    store_path: Option<String>,
    chunk_size: Option<usize>,
    chunk_overlap: Option<usize>,
    top_k: Option<usize>,
    mode: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DevConfig {
    password: Option<String>,
}

/// Main configuration struct
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: Option<f32>,
    pub timeout_secs: u64,
    pub store_path: PathBuf,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub top_k: usize,
    pub mode: SelectionMode,
    pub dev_password: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Load configuration from config.yml or use defaults
    /// Environment variables take precedence over config.yml values
    pub fn new() -> Self {
        Self::load_from_file("config.yml")
            .or_else(|_| Self::load_from_file("../config.yml"))
            .unwrap_or_else(|_| Self::defaults())
    }

    /// Resolve a value: prefer env var if config value looks like ${VAR}
    fn resolve_env_string(value: Option<String>, env_key: &str) -> String {
        // If value from YAML looks like ${...}, try env var
        if let Some(ref v) = value {
            if v.starts_with("${") && v.ends_with('}') {
                // Extract var name from ${VAR_NAME}
                let var_name = &v[2..v.len() - 1];
                if let Ok(env_val) = std::env::var(var_name) {
                    return env_val;
                }
            } else {
                return v.clone();
            }
        }
        // Also check explicit env_key as fallback
        if let Ok(env_val) = std::env::var(env_key) {
            return env_val;
        }
        value
            .filter(|v| !(v.starts_with("${") && v.ends_with('}')))
            .unwrap_or_default()
    }

    /// Load .env file into environment variables using dotenvy
    fn load_dotenv() {
        // Try to load from current directory first, then parent
        if dotenvy::dotenv().is_err() {
            let _ = dotenvy::from_filename("../.env");
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        // Load .env file first
        Self::load_dotenv();

        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        let yaml: YamlConfig = serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse config file: {}", e))?;

        let openrouter = yaml.openrouter.unwrap_or(OpenRouterConfig {
            api_key: None,
            base_url: None,
            model: None,
            max_tokens: None,
            temperature: None,
            top_p: None,
            timeout_secs: None,
        });

        let knowledge = yaml.knowledge.unwrap_or(KnowledgeConfig {
            store_path: None,
            chunk_size: None,
            chunk_overlap: None,
            top_k: None,
            mode: None,
        });

        let dev = yaml.dev.unwrap_or(DevConfig { password: None });

        // Resolve values with env var precedence
        let api_key = Self::resolve_env_string(openrouter.api_key, "OPENROUTER_API_KEY");
        let dev_password = Self::resolve_env_string(dev.password, "DEV_PASSWORD");

        let store_path = std::env::var("KNOWLEDGE_STORE")
            .ok()
            .or(knowledge.store_path)
            .unwrap_or_else(|| STORE_FILE.to_string());

        let mode = knowledge
            .mode
            .as_deref()
            .map(SelectionMode::parse)
            .unwrap_or(SelectionMode::Keyword);

        Ok(Self {
            api_key,
            base_url: openrouter
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: openrouter.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            max_tokens: openrouter.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            temperature: openrouter.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            top_p: openrouter.top_p,
            timeout_secs: openrouter.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            store_path: PathBuf::from(store_path),
            chunk_size: knowledge.chunk_size.unwrap_or(DEFAULT_CHUNK_SIZE),
            chunk_overlap: knowledge.chunk_overlap.unwrap_or(0),
            top_k: knowledge.top_k.unwrap_or(DEFAULT_TOP_K),
            mode,
            dev_password,
        })
    }

    /// Create config with empty defaults (fallback)
    /// User MUST provide config.yml or env vars with actual credentials
    fn defaults() -> Self {
        Self {
            api_key: std::env::var("OPENROUTER_API_KEY").unwrap_or_default(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            top_p: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            store_path: PathBuf::from(STORE_FILE),
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: 0,
            top_k: DEFAULT_TOP_K,
            mode: SelectionMode::Keyword,
            dev_password: std::env::var("DEV_PASSWORD").unwrap_or_default(),
        }
    }

    /// Check the developer password against the configured one.
    /// An empty configured password disables developer actions.
    pub fn check_dev_password(&self, candidate: &str) -> bool {
        !self.dev_password.is_empty() && self.dev_password == candidate
    }
}
