mod generator;
mod types;

pub use generator::{LlmQueryGenerator, QueryGenerator};
pub use types::*;
