//! Hosted-video search over the YouTube Data API v3.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{Error, Result};

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Bounds applied to the caller-supplied result count.
pub const MIN_RESULTS: u32 = 5;
pub const MAX_RESULTS: u32 = 50;
pub const DEFAULT_RESULTS: u32 = 10;

/// Clamp a requested result count into `[MIN_RESULTS, MAX_RESULTS]`,
/// defaulting when absent.
pub fn clamp_max_results(requested: Option<u32>) -> u32 {
  requested
    .unwrap_or(DEFAULT_RESULTS)
    .clamp(MIN_RESULTS, MAX_RESULTS)
}

/// One video result, with HTML entities in the title and description
/// already decoded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoHit {
  pub video_id:      String,
  pub title:         String,
  pub description:   String,
  pub thumbnail_url: Option<String>,
}

// ─── Provider response shapes ────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct SearchResponse {
  #[serde(default)]
  items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
  id:      ItemId,
  snippet: Snippet,
}

#[derive(Debug, Deserialize)]
struct ItemId {
  #[serde(rename = "videoId", default)]
  video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Snippet {
  title:       String,
  description: String,
  #[serde(default)]
  thumbnails:  Thumbnails,
}

#[derive(Debug, Default, Deserialize)]
struct Thumbnails {
  #[serde(default)]
  medium:  Option<Thumbnail>,
  #[serde(rename = "default")]
  fallback: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
  url: String,
}

// ─── Adapter ─────────────────────────────────────────────────────────────────

/// Video-search adapter. Stateless and single-shot: one GET per query.
#[derive(Debug, Clone)]
pub struct VideoSearch {
  client:   reqwest::Client,
  base_url: String,
  api_key:  String,
}

impl VideoSearch {
  pub fn new(api_key: String) -> Self {
    Self::with_base_url(DEFAULT_BASE_URL.to_owned(), api_key)
  }

  pub fn with_base_url(base_url: String, api_key: String) -> Self {
    Self {
      client: reqwest::Client::new(),
      base_url,
      api_key,
    }
  }

  /// Search videos by keyword.
  ///
  /// `max_results` is clamped to `[5, 50]` (default 10). An unset API key
  /// is not special-cased: the provider rejects the call and the failure
  /// surfaces as [`Error::Upstream`] like any other provider error.
  pub async fn search(
    &self,
    query: &str,
    max_results: Option<u32>,
  ) -> Result<Vec<VideoHit>> {
    let query = query.trim();
    if query.is_empty() {
      return Err(Error::EmptyQuery);
    }
    let count = clamp_max_results(max_results);

    let response = self
      .client
      .get(format!("{}/search", self.base_url))
      .query(&[
        ("part", "snippet"),
        ("type", "video"),
        ("q", query),
        ("maxResults", &count.to_string()),
        ("key", &self.api_key),
      ])
      .send()
      .await
      .map_err(|e| {
        warn!(error = %e, "video search request failed");
        Error::Upstream("video search request failed".into())
      })?;

    let status = response.status();
    if !status.is_success() {
      warn!(%status, "video search returned non-success status");
      return Err(Error::Upstream(format!("video search returned {status}")));
    }

    let body: SearchResponse = response.json().await.map_err(|e| {
      warn!(error = %e, "video search response could not be decoded");
      Error::Upstream("video search response could not be decoded".into())
    })?;

    Ok(project(body.items))
  }
}

/// Shape provider items into [`VideoHit`]s, decoding HTML entities in the
/// title and description.
fn project(items: Vec<SearchItem>) -> Vec<VideoHit> {
  items
    .into_iter()
    .filter_map(|item| {
      let video_id = item.id.video_id?;
      let thumbnail_url = item
        .snippet
        .thumbnails
        .medium
        .or(item.snippet.thumbnails.fallback)
        .map(|t| t.url);
      Some(VideoHit {
        video_id,
        title: html_escape::decode_html_entities(&item.snippet.title)
          .into_owned(),
        description: html_escape::decode_html_entities(
          &item.snippet.description,
        )
        .into_owned(),
        thumbnail_url,
      })
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn clamps_below_minimum() {
    assert_eq!(clamp_max_results(Some(3)), 5);
    assert_eq!(clamp_max_results(Some(0)), 5);
  }

  #[test]
  fn clamps_above_maximum() {
    assert_eq!(clamp_max_results(Some(1000)), 50);
  }

  #[test]
  fn defaults_when_absent() {
    assert_eq!(clamp_max_results(None), 10);
  }

  #[test]
  fn in_range_is_untouched() {
    assert_eq!(clamp_max_results(Some(25)), 25);
  }

  #[test]
  fn projection_decodes_entities() {
    let raw = r#"{
      "items": [
        {
          "id": { "videoId": "dQw4w9WgXcQ" },
          "snippet": {
            "title": "Tom &amp; Jerry &#39;85",
            "description": "&quot;classic&quot;",
            "thumbnails": {
              "medium": { "url": "https://img.example.com/m.jpg" },
              "default": { "url": "https://img.example.com/d.jpg" }
            }
          }
        }
      ]
    }"#;
    let body: SearchResponse = serde_json::from_str(raw).unwrap();
    let hits = project(body.items);

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].video_id, "dQw4w9WgXcQ");
    assert_eq!(hits[0].title, "Tom & Jerry '85");
    assert_eq!(hits[0].description, "\"classic\"");
    assert_eq!(
      hits[0].thumbnail_url.as_deref(),
      Some("https://img.example.com/m.jpg")
    );
  }

  #[test]
  fn projection_skips_items_without_video_id() {
    let raw = r#"{
      "items": [
        { "id": {}, "snippet": { "title": "a channel", "description": "" } }
      ]
    }"#;
    let body: SearchResponse = serde_json::from_str(raw).unwrap();
    assert!(project(body.items).is_empty());
  }

  #[test]
  fn projection_falls_back_to_default_thumbnail() {
    let raw = r#"{
      "items": [
        {
          "id": { "videoId": "abcdefghijk" },
          "snippet": {
            "title": "t",
            "description": "d",
            "thumbnails": { "default": { "url": "https://img.example.com/d.jpg" } }
          }
        }
      ]
    }"#;
    let body: SearchResponse = serde_json::from_str(raw).unwrap();
    let hits = project(body.items);
    assert_eq!(
      hits[0].thumbnail_url.as_deref(),
      Some("https://img.example.com/d.jpg")
    );
  }

  #[tokio::test]
  async fn empty_query_is_rejected_without_a_request() {
    let search = VideoSearch::new(String::new());
    assert!(matches!(
      search.search("", None).await,
      Err(Error::EmptyQuery)
    ));
    assert!(matches!(
      search.search("   ", None).await,
      Err(Error::EmptyQuery)
    ));
  }
}
