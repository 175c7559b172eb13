//! Knowledge-grounded chatbot library
//!
//! This library provides tools to:
//! - Extract text from uploaded knowledge files (CSV/JSON/TXT/XLSX)
//! - Persist the flattened text as chunks in a single JSON store
//! - Select relevant context for a question (whole store or keyword top-K)
//! - Assemble chat-completions prompts from context and session transcripts
//! - Call the OpenRouter chat-completions API

pub mod config;
pub mod error;
pub mod extract;
pub mod integrations;
pub mod knowledge;
pub mod prompts;
pub mod selector;
pub mod session;
pub mod transcript;

// Re-export common types
pub use config::Config;
pub use error::{Error, Result};
pub use integrations::{CompletionParams, OpenRouterClient};
pub use knowledge::{Chunk, Chunker, KnowledgeStore};
pub use prompts::{load_prompt, Prompt};
pub use selector::{ContextSelector, SelectionMode};
pub use session::ChatSession;
pub use transcript::{ChatMessage, PromptAssembler, Transcript};

// Commands module uses re-exported types, so it must be declared after the re-exports
pub mod commands;
