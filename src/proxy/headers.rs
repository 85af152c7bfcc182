//! Header utilities for AI provider proxying
//!
//! Outbound requests carry only the headers built here. Client headers are
//! never forwarded, so the provider credential is the only authorization the
//! upstream ever sees.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};

use crate::config::Credential;

/// Build the headers for a provider request
///
/// Returns `None` if the credential contains bytes that cannot appear in a
/// header value.
pub fn build_default_headers(credential: &Credential) -> Option<HeaderMap> {
    let mut headers = HeaderMap::new();

    let mut auth = HeaderValue::from_str(&format!("Bearer {}", credential.expose())).ok()?;
    auth.set_sensitive(true);

    headers.insert(AUTHORIZATION, auth);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    Some(headers)
}
