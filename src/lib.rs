//! curlbridge library interface
//!
//! Moves HTTP request descriptions into and out of curl command form, with
//! `{{variable}}` substitution from layered collection/environment scopes.
//!
//! # Module Organization
//!
//! - [`curl`] - Tokenizer, validator, parser and generators
//! - [`models`] - The request model shared by all of the above
//! - [`variables`] - Layered scopes, secret stores and the async resolver
//! - [`errors`] - Error types (CurlbridgeError, Result)
//! - [`status`] - Exit status codes (ExitStatus)
//! - [`core`] - CLI execution logic

pub mod cli;
pub mod config;
pub mod core;
pub mod curl;
pub mod errors;
pub mod models;
pub mod status;
pub mod variables;

pub use errors::{CurlbridgeError, Result};
pub use models::RequestModel;
