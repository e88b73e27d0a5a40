//! Model session domain.
//!
//! - [`response::LlmResponse`]: structured model reply (text and/or function calls)

pub mod response;

pub use response::{ContentBlock, LlmResponse, StopReason};
