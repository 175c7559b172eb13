//! Ask command: one-shot question against the knowledge store

use crate::config::Config;
use crate::integrations::OpenRouterClient;
use crate::knowledge::KnowledgeStore;
use crate::session::ChatSession;
use crate::Result;

/// Answer a single question and print the reply.
pub async fn run(config: &Config, question: &str) -> Result<()> {
    let client = OpenRouterClient::from_config(config)?;
    let store = KnowledgeStore::new(&config.store_path);
    let mut session = ChatSession::new(config);

    let reply = session.ask(&client, &store, question).await?;
    println!("{}", reply);

    Ok(())
}
