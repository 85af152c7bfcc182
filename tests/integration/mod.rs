//! Integration tests for Chatgate
//!
//! These tests drive the real router through `axum-test`, with wiremock
//! servers standing in for the model provider and YouTube.

mod prompt;
