//! Video search module
//!
//! Keyed video search proxy. Independent of the chat gateway; it only shares
//! the process and the HTTP client.

pub mod youtube;

pub use youtube::{VideoResult, YouTubeClient};
