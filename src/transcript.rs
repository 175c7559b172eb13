//! Chat transcript and outbound prompt assembly
//!
//! The transcript is owned by the active session, grows monotonically and is
//! never persisted. The assembled payload always starts with exactly one
//! synthesized system message and ends with the current user message.

use serde::{Deserialize, Serialize};

use crate::prompts::Prompt;

pub const ROLE_SYSTEM: &str = "system";
pub const ROLE_USER: &str = "user";
pub const ROLE_ASSISTANT: &str = "assistant";

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ROLE_SYSTEM.to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ROLE_USER.to_string(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ROLE_ASSISTANT.to_string(),
            content: content.into(),
        }
    }
}

/// Ordered user/assistant message history for one session.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::user(content));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::assistant(content));
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Builds the outbound message list from context, history and the current
/// question. Long transcripts are sent as-is: truncation is not implemented.
#[derive(Debug, Clone)]
pub struct PromptAssembler {
    knowledge_template: String,
    fallback_instruction: String,
}

impl Default for PromptAssembler {
    fn default() -> Self {
        Self {
            knowledge_template: Prompt::KnowledgeAssistant.load_or_default(),
            fallback_instruction: Prompt::GeneralAssistant.load_or_default(),
        }
    }
}

impl PromptAssembler {
    pub fn new(knowledge_template: impl Into<String>, fallback: impl Into<String>) -> Self {
        Self {
            knowledge_template: knowledge_template.into(),
            fallback_instruction: fallback.into(),
        }
    }

    /// Assemble the full outbound message list.
    pub fn assemble(
        &self,
        context: &[String],
        transcript: &Transcript,
        user_message: &str,
    ) -> Vec<ChatMessage> {
        let system_text = if context.is_empty() {
            self.fallback_instruction.clone()
        } else {
            self.knowledge_template
                .replace("{context}", &context.join("\n\n"))
        };

        let mut messages = Vec::with_capacity(transcript.len() + 2);
        messages.push(ChatMessage::system(system_text));
        messages.extend_from_slice(transcript.messages());
        messages.push(ChatMessage::user(user_message));
        messages
    }
}
