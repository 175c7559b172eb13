//! Fraoula chatbot CLI - main entry point
//!
//! This is the unified CLI interface for uploading knowledge and chatting.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use fraoula_chatbot::{commands, Config};

#[derive(Parser)]
#[command(name = "fraoula_chatbot")]
#[command(about = "Knowledge-grounded chatbot with file upload", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the knowledge store file (overrides config.yml)
    #[arg(long, env = "KNOWLEDGE_STORE")]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a knowledge file (CSV/JSON/TXT/XLSX) into the store
    Upload {
        /// File to upload
        file: PathBuf,

        /// Append to the store instead of overwriting it
        #[arg(long, default_value_t = false)]
        append: bool,

        /// Developer password
        #[arg(short, long, env = "DEV_PASSWORD", default_value = "")]
        password: String,
    },

    /// Ask a single question against the stored knowledge
    Ask {
        /// The question to answer
        question: String,
    },

    /// Interactive chat session
    Chat,

    /// Show knowledge store diagnostics
    Show,

    /// Delete the knowledge store
    Clear {
        /// Developer password
        #[arg(short, long, env = "DEV_PASSWORD", default_value = "")]
        password: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut config = Config::new();
    if let Some(store) = cli.store {
        config.store_path = store;
    }

    match cli.command {
        Commands::Upload {
            file,
            append,
            password,
        } => commands::upload::run(&config, &file, append, &password)?,
        Commands::Ask { question } => commands::ask::run(&config, &question).await?,
        Commands::Chat => commands::chat::run(&config).await?,
        Commands::Show => commands::show::run(&config)?,
        Commands::Clear { password } => commands::clear::run(&config, &password)?,
    }

    Ok(())
}
