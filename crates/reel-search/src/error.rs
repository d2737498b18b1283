//! Error types for the content-discovery adapters.
//!
//! Underlying transport and provider errors are logged where they occur
//! and collapse into [`Error::Upstream`]; provider error bodies never
//! cross this boundary.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The caller supplied an empty (or whitespace-only) query.
  #[error("search query is required")]
  EmptyQuery,

  /// A required API credential is not configured.
  #[error("search credentials are not configured")]
  MissingCredentials,

  /// The provider returned zero results.
  #[error("no results found")]
  NoResults,

  /// The external call failed: transport error, non-success status, or an
  /// undecodable response body.
  #[error("upstream search failure: {0}")]
  Upstream(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
