//! Mock infrastructure for testing external services
//!
//! This module provides mock servers for external dependencies:
//! - Chat-completions provider (OpenAI-compatible)
//! - YouTube Data API (video search)

pub mod provider;
pub mod youtube;

pub use provider::*;
pub use youtube::*;
