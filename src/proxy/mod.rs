//! Proxy module
//!
//! Handles request forwarding to upstream AI providers.

pub mod headers;
pub mod logging;
pub mod openai;
pub mod provider;

pub use openai::OpenAICompatibleTransport;
pub use provider::{
    CompletionPayload, ProviderConfig, ProviderKind, ProviderTransport, TransportFailure,
    UpstreamResponse,
};
