//! Context selection: decides which stored knowledge goes into the prompt

use std::cmp::Reverse;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

static PUNCTUATION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s]").unwrap());

/// Selection strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    /// Send the entire stored text verbatim, unconditionally
    Whole,
    /// Rank chunks by keyword overlap with the query, keep the top-K
    Keyword,
}

impl SelectionMode {
    /// Parse a mode name from config. Unknown names fall back to keyword
    /// ranking, which is the safer default for large stores.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "whole" | "all" | "blob" => SelectionMode::Whole,
            _ => SelectionMode::Keyword,
        }
    }
}

/// Selects the knowledge subset injected into the outbound prompt.
#[derive(Debug, Clone)]
pub struct ContextSelector {
    mode: SelectionMode,
    top_k: usize,
}

impl ContextSelector {
    pub fn new(mode: SelectionMode, top_k: usize) -> Self {
        Self { mode, top_k }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Select context chunks for a query, preserving store order within the
    /// result set where scores tie.
    pub fn select(&self, chunks: &[String], query: &str) -> Vec<String> {
        match self.mode {
            SelectionMode::Whole => chunks.to_vec(),
            SelectionMode::Keyword => self.select_by_keywords(chunks, query),
        }
    }

    /// Lowercase query words, punctuation stripped.
    fn query_words(query: &str) -> Vec<String> {
        let lowercased = query.to_lowercase();
        let cleaned = PUNCTUATION.replace_all(&lowercased, " ");
        cleaned.split_whitespace().map(str::to_string).collect()
    }

    /// Score a chunk by the count of query words it contains.
    /// Substring match against the lowercased chunk, not tokenized.
    fn score(chunk_lower: &str, words: &[String]) -> usize {
        words.iter().filter(|w| chunk_lower.contains(w.as_str())).count()
    }

    fn select_by_keywords(&self, chunks: &[String], query: &str) -> Vec<String> {
        let words = Self::query_words(query);
        if words.is_empty() || chunks.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(usize, &String)> = chunks
            .iter()
            .map(|chunk| (Self::score(&chunk.to_lowercase(), &words), chunk))
            .filter(|(score, _)| *score > 0)
            .collect();

        // Stable sort keeps ties in original store order
        scored.sort_by_key(|(score, _)| Reverse(*score));
        scored.truncate(self.top_k);

        debug!(
            selected = scored.len(),
            total = chunks.len(),
            "keyword selection done"
        );

        scored.into_iter().map(|(_, chunk)| chunk.clone()).collect()
    }
}
