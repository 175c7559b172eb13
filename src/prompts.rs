//! System prompt loader.
//!
//! Prompts live as Markdown files in the `prompts/` directory at the project
//! root. Each prompt has a built-in fallback so a missing file never breaks
//! the chat path.

use std::path::PathBuf;

use crate::{Error, Result};

/// Default system prompt when knowledge context is available.
/// `{context}` is replaced with the selected chunks.
pub const DEFAULT_KNOWLEDGE_PROMPT: &str = "You are a helpful assistant. \
Answer the user's questions using the following knowledge base:\n\n{context}";

/// Default system prompt when the knowledge store is empty.
pub const DEFAULT_GENERAL_PROMPT: &str =
    "You are a helpful assistant. Answer the user's questions concisely.";

/// Available prompts.
#[derive(Debug, Clone, Copy)]
pub enum Prompt {
    /// Assistant grounded in the uploaded knowledge base.
    KnowledgeAssistant,
    /// Generic assistant used when no knowledge is stored.
    GeneralAssistant,
}

impl Prompt {
    /// Prompt file name (Markdown).
    pub fn filename(&self) -> &'static str {
        match self {
            Prompt::KnowledgeAssistant => "knowledge_assistant.md",
            Prompt::GeneralAssistant => "general_assistant.md",
        }
    }

    /// Built-in fallback text.
    pub fn default_text(&self) -> &'static str {
        match self {
            Prompt::KnowledgeAssistant => DEFAULT_KNOWLEDGE_PROMPT,
            Prompt::GeneralAssistant => DEFAULT_GENERAL_PROMPT,
        }
    }

    /// Load the prompt from file.
    pub fn load(&self) -> Result<String> {
        load_prompt(self.filename())
    }

    /// Load the prompt from file, falling back to the built-in text.
    pub fn load_or_default(&self) -> String {
        self.load().unwrap_or_else(|_| self.default_text().to_string())
    }
}

/// Load a prompt by file name.
pub fn load_prompt(filename: &str) -> Result<String> {
    let path = prompts_dir().join(filename);
    std::fs::read_to_string(&path)
        .map_err(|e| Error::InvalidArgument(format!("Failed to load prompt {}: {}", filename, e)))
}

/// Path to the prompts directory.
pub fn prompts_dir() -> PathBuf {
    let candidates = [
        PathBuf::from("prompts"),
        PathBuf::from("../prompts"),
        PathBuf::from("../../prompts"),
    ];

    for path in candidates {
        if path.exists() {
            return path;
        }
    }

    // Fallback
    PathBuf::from("prompts")
}

/// List of all available prompts.
pub fn list_prompts() -> Vec<Prompt> {
    vec![Prompt::KnowledgeAssistant, Prompt::GeneralAssistant]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_filenames() {
        assert_eq!(Prompt::KnowledgeAssistant.filename(), "knowledge_assistant.md");
        assert_eq!(Prompt::GeneralAssistant.filename(), "general_assistant.md");
    }

    #[test]
    fn test_all_prompt_filenames_are_md() {
        for prompt in list_prompts() {
            assert!(
                prompt.filename().ends_with(".md"),
                "Prompt {:?} should have .md extension",
                prompt
            );
        }
    }

    #[test]
    fn test_knowledge_prompt_has_context_placeholder() {
        assert!(Prompt::KnowledgeAssistant.default_text().contains("{context}"));
    }

    #[test]
    fn test_general_prompt_has_no_placeholder() {
        assert!(!Prompt::GeneralAssistant.default_text().contains("{context}"));
    }

    #[test]
    fn test_load_prompt_nonexistent_file() {
        let result = load_prompt("nonexistent_file_12345.md");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_or_default_never_fails() {
        let mut prompt = Prompt::GeneralAssistant;
        let text = prompt.load_or_default();
        assert!(!text.is_empty());

        prompt = Prompt::KnowledgeAssistant;
        let text = prompt.load_or_default();
        assert!(!text.is_empty());
    }

    #[test]
    fn test_prompts_dir_returns_path() {
        let dir = prompts_dir();
        assert!(!dir.as_os_str().is_empty());
    }

    #[test]
    fn test_list_prompts() {
        assert_eq!(list_prompts().len(), 2);
    }
}
