//! Gemini adapter
//!
//! Implements LlmGateway for the Gemini `generateContent` REST API with
//! function declarations.

pub mod error;
pub mod gateway;
pub mod protocol;
pub mod session;
