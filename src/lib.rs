//! Chat session core for the Gemini `generateContent` API.
//!
//! ## Provider bootstrap
//!
//! The REPL binary selects its completion provider through
//! `GEMINI_CHAT_PROVIDER`:
//!
//! - `gemini` (default) for the live generative-language transport; the API
//!   key is supplied interactively with `/key` or restored from storage
//! - `mock` for deterministic canned replies in local runs and tests
//!
//! `GEMINI_CHAT_MODEL` overrides the model id for the live transport.
//! `GEMINI_CHAT_HOME` overrides the base directory holding the
//! `.gemini_chat/` storage root.
//!
//! ## Session contract
//!
//! [`session::ChatSession`] owns the conversation log and the credential
//! store; front ends mutate both only through it and observe changes through
//! [`frontend::SessionFrontend`] callbacks. At most one completion request
//! is in flight at a time; empty and concurrent submissions are ignored
//! rather than rejected. Text submitted before a credential exists is
//! dropped, not buffered; the user resubmits once a key is set.

pub mod commands;
pub mod credentials;
pub mod frontend;
pub mod providers;
pub mod session;
