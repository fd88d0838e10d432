pub mod config;
pub mod error;
pub mod llm;
pub mod query;
pub mod search;
pub mod server;

pub use error::{Error, Result};
