//! Presentation layer for finquery
//!
//! This crate contains the axum HTTP surface and the CLI definitions.

pub mod cli;
pub mod http;

// Re-export commonly used types
pub use cli::commands::{Cli, Command};
pub use http::{ApiError, AppState, router, serve};
