//! Knowledge base: persistence and chunking of uploaded documents

pub mod chunker;
pub mod store;

pub use chunker::{Chunk, Chunker};
pub use store::KnowledgeStore;
