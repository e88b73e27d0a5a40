//! Prompt domain
//!
//! System instruction and fallback texts used by the query pipeline.

mod template;

pub use template::PromptTemplate;
