//! Handlers for `/search` endpoints — thin pass-throughs to the
//! content-discovery adapters.

use axum::{
  Json,
  extract::{Query, State},
};
use serde::{Deserialize, Serialize};

use reel_core::store::MediaStore;
use reel_search::{VideoHit, WebHit};

use crate::{AppState, error::ApiError};

// ─── Video ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct VideoParams {
  #[serde(default)]
  pub q:           Option<String>,
  #[serde(rename = "maxResults", default)]
  pub max_results: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct VideoResponse {
  pub items: Vec<VideoHit>,
}

/// `GET /search/video?q=...&maxResults=...`
pub async fn video<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<VideoParams>,
) -> Result<Json<VideoResponse>, ApiError>
where
  S: MediaStore + Clone + Send + Sync + 'static,
{
  let query = params.q.unwrap_or_default();
  let items = state.video_search.search(&query, params.max_results).await?;
  Ok(Json(VideoResponse { items }))
}

// ─── Web ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct WebBody {
  pub query: String,
}

#[derive(Debug, Serialize)]
pub struct WebResponse {
  pub results: Vec<WebHit>,
}

/// `POST /search/web` — body: `{"query":...}`
pub async fn web<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<WebBody>,
) -> Result<Json<WebResponse>, ApiError>
where
  S: MediaStore + Clone + Send + Sync + 'static,
{
  let results = state.web_search.search(&body.query).await?;
  Ok(Json(WebResponse { results }))
}
