//! External content-discovery adapters.
//!
//! Two stateless query functions — hosted-video search and generic web
//! search — each proxying a single external HTTP API call with response
//! shaping and error mapping. No retries, no pagination beyond the one
//! requested page, no caching.

pub mod error;
pub mod video;
pub mod web;

pub use error::{Error, Result};
pub use video::{VideoHit, VideoSearch};
pub use web::{WebHit, WebSearch};
