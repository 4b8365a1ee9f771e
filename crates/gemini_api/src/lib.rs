//! Transport-only Gemini API client primitives.
//!
//! This crate owns request/response building/parsing behavior for the
//! generative-language `generateContent` endpoint only. It intentionally
//! contains no session lifecycle code and no front-end coupling.
//!
//! Authentication follows the endpoint's convention: the API key travels as
//! a `key` query parameter on the request URL, never as a header.

pub mod client;
pub mod config;
pub mod error;
pub mod payload;
pub mod url;

pub use client::{GeminiApiClient, GEMINI_PROVIDER_ID};
pub use config::GeminiApiConfig;
pub use error::parse_error_message;
pub use payload::{reply_text, GenerateContentRequest, GenerateContentResponse, GenerationConfig};
pub use url::{completion_url, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL};
