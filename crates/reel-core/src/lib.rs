//! Core types and trait definitions for the Reel media library.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod account;
pub mod classify;
pub mod entry;
pub mod error;
pub mod idle;
pub mod message;
pub mod store;

pub use error::{Error, Result};
