pub mod chunk;
pub mod config;
pub mod error;

pub use chunk::DocumentChunk;
pub use config::Config;
pub use error::*;
