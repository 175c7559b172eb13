//! Command implementations
//!
//! Each module corresponds to a subcommand in the CLI.

pub mod ask;
pub mod chat;
pub mod clear;
pub mod show;
pub mod upload;

// Re-export commonly used entry points
pub use ask::run as ask_run;
pub use chat::run as chat_run;
pub use clear::run as clear_run;
pub use show::run as show_run;
pub use upload::run as upload_run;
