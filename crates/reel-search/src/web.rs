//! Generic web search over the Google Custom Search API.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{Error, Result};

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/customsearch/v1";

/// One web result, projected down to a title and URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebHit {
  pub title: String,
  pub url:   String,
}

// ─── Provider response shapes ────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct SearchResponse {
  /// Absent entirely when the query matched nothing.
  items: Option<Vec<SearchItem>>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
  title: String,
  link:  String,
}

// ─── Adapter ─────────────────────────────────────────────────────────────────

/// Web-search adapter. Stateless and single-shot: one GET per query.
///
/// Both the API key and the engine identifier must be configured; a missing
/// credential is a configuration error, not an upstream one.
#[derive(Debug, Clone)]
pub struct WebSearch {
  client:    reqwest::Client,
  base_url:  String,
  api_key:   Option<String>,
  engine_id: Option<String>,
}

impl WebSearch {
  pub fn new(api_key: Option<String>, engine_id: Option<String>) -> Self {
    Self::with_base_url(DEFAULT_BASE_URL.to_owned(), api_key, engine_id)
  }

  pub fn with_base_url(
    base_url: String,
    api_key: Option<String>,
    engine_id: Option<String>,
  ) -> Self {
    Self {
      client: reqwest::Client::new(),
      base_url,
      api_key,
      engine_id,
    }
  }

  /// Search the web by keyword, returning `{title, url}` pairs.
  pub async fn search(&self, query: &str) -> Result<Vec<WebHit>> {
    let query = query.trim();
    if query.is_empty() {
      return Err(Error::EmptyQuery);
    }

    let (Some(key), Some(cx)) = (&self.api_key, &self.engine_id) else {
      return Err(Error::MissingCredentials);
    };

    let response = self
      .client
      .get(&self.base_url)
      .query(&[("key", key.as_str()), ("cx", cx.as_str()), ("q", query)])
      .send()
      .await
      .map_err(|e| {
        warn!(error = %e, "web search request failed");
        Error::Upstream("web search request failed".into())
      })?;

    let status = response.status();
    if !status.is_success() {
      warn!(%status, "web search returned non-success status");
      return Err(Error::Upstream(format!("web search returned {status}")));
    }

    let body: SearchResponse = response.json().await.map_err(|e| {
      warn!(error = %e, "web search response could not be decoded");
      Error::Upstream("web search response could not be decoded".into())
    })?;

    let hits = project(body.items.unwrap_or_default());
    if hits.is_empty() {
      return Err(Error::NoResults);
    }
    Ok(hits)
  }
}

fn project(items: Vec<SearchItem>) -> Vec<WebHit> {
  items
    .into_iter()
    .map(|item| WebHit {
      title: item.title,
      url:   item.link,
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn empty_query_is_rejected() {
    let search = WebSearch::new(Some("key".into()), Some("cx".into()));
    assert!(matches!(search.search("").await, Err(Error::EmptyQuery)));
  }

  #[tokio::test]
  async fn missing_credentials_is_a_config_error() {
    let no_key = WebSearch::new(None, Some("cx".into()));
    assert!(matches!(
      no_key.search("rust").await,
      Err(Error::MissingCredentials)
    ));

    let no_engine = WebSearch::new(Some("key".into()), None);
    assert!(matches!(
      no_engine.search("rust").await,
      Err(Error::MissingCredentials)
    ));
  }

  #[test]
  fn projection_maps_link_to_url() {
    let raw = r#"{
      "items": [
        { "title": "The Rust Programming Language", "link": "https://www.rust-lang.org/" },
        { "title": "Rust (fungus)", "link": "https://en.wikipedia.org/wiki/Rust_(fungus)" }
      ]
    }"#;
    let body: SearchResponse = serde_json::from_str(raw).unwrap();
    let hits = project(body.items.unwrap());

    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].title, "The Rust Programming Language");
    assert_eq!(hits[0].url, "https://www.rust-lang.org/");
  }

  #[test]
  fn absent_items_field_decodes_to_none() {
    let body: SearchResponse = serde_json::from_str("{}").unwrap();
    assert!(body.items.is_none());
  }
}
