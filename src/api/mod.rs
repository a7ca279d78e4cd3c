//! Variant API module for talking to the mutation service.
//!
//! The service exposes plain JSON over HTTP. The UI is the only client and
//! issues one GET per search.

pub mod client;
pub mod protocol;

pub use client::ApiClient;
pub use protocol::*;
