//! JSON HTTP surface for the Reel media library.
//!
//! Exposes an axum [`Router`] backed by any [`reel_core::store::MediaStore`].
//! Every handler receives its session context through the
//! [`auth::Session`] extractor — there is no process-global auth state.

pub mod account;
pub mod auth;
pub mod contact;
pub mod error;
pub mod guard;
pub mod library;
pub mod mailer;
pub mod search;
pub mod session;

pub use error::ApiError;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, patch, post},
};
use reel_core::{idle::IdleConfig, store::MediaStore};
use reel_search::{VideoSearch, WebSearch};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use auth::AuthKeys;
use guard::SessionRegistry;
use mailer::Mailer;

// ─── Configuration ───────────────────────────────────────────────────────────

fn default_session_ttl() -> i64 { 720 }
fn default_idle_timeout() -> i64 { 400 }
fn default_idle_warning() -> i64 { 30 }

/// Runtime server configuration, deserialised from `config.toml` with
/// `REEL_`-prefixed environment overrides.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,

  /// HMAC secret for session tokens.
  pub session_secret:      String,
  #[serde(default = "default_session_ttl")]
  pub session_ttl_minutes: i64,

  /// The privileged identity allowed to review contact messages.
  pub admin_email: String,

  #[serde(default = "default_idle_timeout")]
  pub idle_timeout_minutes: i64,
  #[serde(default = "default_idle_warning")]
  pub idle_warning_seconds: i64,

  /// Video-search credential. An empty key is passed through; the
  /// provider rejects the call and the failure surfaces as an upstream
  /// error.
  #[serde(default)]
  pub youtube_api_key: String,
  #[serde(default)]
  pub search_api_key: Option<String>,
  #[serde(default)]
  pub search_engine_id: Option<String>,

  #[serde(default)]
  pub mail: Option<MailConfig>,
}

impl ServerConfig {
  pub fn idle_config(&self) -> IdleConfig {
    IdleConfig {
      idle_timeout:   chrono::Duration::minutes(self.idle_timeout_minutes),
      warning_window: chrono::Duration::seconds(self.idle_warning_seconds),
    }
  }
}

/// SMTP settings for the contact-notification mail. Optional: without
/// this section, submissions are persisted but no mail is sent.
#[derive(Debug, Clone, Deserialize)]
pub struct MailConfig {
  pub smtp_host:     String,
  pub smtp_port:     u16,
  pub smtp_username: String,
  pub smtp_password: String,
  pub from_address:  String,
  pub to_address:    String,
}

// ─── Application state ───────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: MediaStore> {
  pub store:        Arc<S>,
  pub config:       Arc<ServerConfig>,
  pub auth:         Arc<AuthKeys>,
  pub sessions:     Arc<SessionRegistry>,
  pub mailer:       Arc<Mailer>,
  pub video_search: Arc<VideoSearch>,
  pub web_search:   Arc<WebSearch>,
}

impl<S: MediaStore> AppState<S> {
  /// Build state from configuration: session keys, idle-guard registry,
  /// mail transport, and search adapters.
  pub fn new(store: S, config: ServerConfig) -> Result<Self, mailer::MailError> {
    let mailer = Mailer::from_config(config.mail.clone())?;
    let auth = AuthKeys::new(&config.session_secret, config.session_ttl_minutes);
    let sessions = SessionRegistry::new(config.idle_config());
    let video_search = VideoSearch::new(config.youtube_api_key.clone());
    let web_search = WebSearch::new(
      config.search_api_key.clone(),
      config.search_engine_id.clone(),
    );

    Ok(Self {
      store:        Arc::new(store),
      config:       Arc::new(config),
      auth:         Arc::new(auth),
      sessions:     Arc::new(sessions),
      mailer:       Arc::new(mailer),
      video_search: Arc::new(video_search),
      web_search:   Arc::new(web_search),
    })
  }
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build a fully-materialised router for `state`.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: MediaStore + Clone + Send + Sync + 'static,
{
  Router::new()
    // Identity
    .route("/auth/register", post(account::register::<S>))
    .route("/auth/login", post(account::login::<S>))
    .route("/auth/federated", post(account::federated::<S>))
    // Library
    .route(
      "/library",
      get(library::list::<S>)
        .post(library::add::<S>)
        .delete(library::remove::<S>),
    )
    // Contact
    .route(
      "/contact",
      post(contact::submit::<S>).get(contact::list::<S>),
    )
    .route("/contact/{id}", patch(contact::mark_done::<S>))
    // Content discovery
    .route("/search/video", get(search::video::<S>))
    .route("/search/web", post(search::web::<S>))
    // Session lifecycle
    .route("/session/activity", post(session::activity::<S>))
    .route("/session/playback", post(session::playback::<S>))
    .route("/session/confirm", post(session::confirm::<S>))
    .route("/session/logout", post(session::logout::<S>))
    .route("/session/status", get(session::status::<S>))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}
