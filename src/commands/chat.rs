//! Chat command: interactive REPL with a session transcript
//!
//! Developer commands (/upload, /clear) are gated behind /login with the
//! configured developer password, mirroring the product's developer panel.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use tracing::error;

use crate::commands::{clear, upload};
use crate::config::Config;
use crate::integrations::OpenRouterClient;
use crate::knowledge::KnowledgeStore;
use crate::session::ChatSession;
use crate::Result;

const HELP: &str = "Commands:
  /login <password>        unlock developer commands
  /upload <file> [--append]  load a knowledge file (developer)
  /clear                   delete the knowledge store (developer)
  /reset                   start a fresh transcript
  /help                    show this help
  /quit                    exit";

/// Run the interactive chat loop on stdin/stdout.
pub async fn run(config: &Config) -> Result<()> {
    // Missing credential halts here, before the prompt loop starts
    let client = OpenRouterClient::from_config(config)?;
    let store = KnowledgeStore::new(&config.store_path);
    let mut session = ChatSession::new(config);

    let stored = store.read().len();
    println!("Fraoula chatbot ready ({} knowledge chunks). /help for commands.", stored);

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => break, // EOF (Ctrl+D)
        };

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        if let Some(command) = input.strip_prefix('/') {
            if !handle_command(command, config, &mut session) {
                break;
            }
            continue;
        }

        match session.ask(&client, &store, input).await {
            Ok(reply) => println!("\n{}\n", reply),
            Err(e) => {
                error!("chat request failed: {}", e);
                println!("\nSorry, something went wrong: {}\n", e);
            }
        }
    }

    Ok(())
}

/// Handle a slash command. Returns false when the loop should exit.
fn handle_command(command: &str, config: &Config, session: &mut ChatSession) -> bool {
    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default();

    match name {
        "quit" | "exit" => return false,
        "help" => println!("{}", HELP),
        "reset" => {
            session.reset();
            println!("Transcript cleared.");
        }
        "login" => {
            let password = parts.next().unwrap_or_default();
            if session.authenticate(config, password) {
                println!("Developer mode enabled.");
            } else {
                println!("Wrong password.");
            }
        }
        "upload" => {
            if !session.is_developer() {
                println!("Developer login required (/login <password>).");
                return true;
            }
            let mut append = false;
            let mut file = None;
            for arg in parts {
                if arg == "--append" {
                    append = true;
                } else {
                    file = Some(PathBuf::from(arg));
                }
            }
            match file {
                Some(path) => {
                    if let Err(e) = upload::run(config, &path, append, &config.dev_password) {
                        println!("Upload failed: {}", e);
                    }
                }
                None => println!("Usage: /upload <file> [--append]"),
            }
        }
        "clear" => {
            if !session.is_developer() {
                println!("Developer login required (/login <password>).");
                return true;
            }
            if let Err(e) = clear::run(config, &config.dev_password) {
                println!("Clear failed: {}", e);
            }
        }
        other => println!("Unknown command: /{} (try /help)", other),
    }

    true
}
