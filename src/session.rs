//! Per-session chat state and request orchestration
//!
//! Session state (transcript, developer authentication) is passed explicitly
//! rather than held in ambient globals. The knowledge store is re-read on
//! every request so uploads from another process are picked up immediately.

use tracing::{info, warn};

use crate::config::Config;
use crate::integrations::{CompletionParams, OpenRouterClient};
use crate::knowledge::KnowledgeStore;
use crate::selector::ContextSelector;
use crate::transcript::{PromptAssembler, Transcript};
use crate::Result;

/// One end user's chat session.
#[derive(Debug, Clone)]
pub struct ChatSession {
    transcript: Transcript,
    dev_authenticated: bool,
    selector: ContextSelector,
    assembler: PromptAssembler,
    params: CompletionParams,
}

impl ChatSession {
    pub fn new(config: &Config) -> Self {
        Self::with_parts(
            ContextSelector::new(config.mode, config.top_k),
            PromptAssembler::default(),
            CompletionParams::from_config(config),
        )
    }

    pub fn with_parts(
        selector: ContextSelector,
        assembler: PromptAssembler,
        params: CompletionParams,
    ) -> Self {
        Self {
            transcript: Transcript::new(),
            dev_authenticated: false,
            selector,
            assembler,
            params,
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Start a fresh transcript, keeping authentication.
    pub fn reset(&mut self) {
        self.transcript = Transcript::new();
    }

    /// Check the developer password and remember the result for this session.
    pub fn authenticate(&mut self, config: &Config, password: &str) -> bool {
        self.dev_authenticated = config.check_dev_password(password);
        if !self.dev_authenticated {
            warn!("developer authentication failed");
        }
        self.dev_authenticated
    }

    pub fn is_developer(&self) -> bool {
        self.dev_authenticated
    }

    /// Answer one question: store read, context selection, prompt assembly,
    /// API call, transcript append. On failure the transcript is left
    /// unchanged and the error is surfaced to the caller for display.
    pub async fn ask(
        &mut self,
        client: &OpenRouterClient,
        store: &KnowledgeStore,
        question: &str,
    ) -> Result<String> {
        let chunks = store.read();
        let context = self.selector.select(&chunks, question);

        info!(
            stored_chunks = chunks.len(),
            selected = context.len(),
            "answering question"
        );

        let messages = self.assembler.assemble(&context, &self.transcript, question);
        let reply = client.chat_completion(messages, &self.params).await?;

        self.transcript.push_user(question);
        self.transcript.push_assistant(&reply);

        Ok(reply)
    }
}
