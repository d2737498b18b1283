//! Per-session idle-guard registry and its polling driver.
//!
//! One [`IdleGuard`] per live session, keyed by the token's session
//! identifier. All timers live on a single polling task; handlers only
//! mutate guard state. A guard that reaches `LoggedOut` revokes its
//! session — the [`Session`](crate::auth::Session) extractor rejects
//! revoked identifiers, which is what actually signs the user out.

use std::{
  collections::{HashMap, HashSet},
  sync::{Arc, Mutex, MutexGuard},
  time::Duration,
};

use chrono::{DateTime, Utc};
use reel_core::idle::{IdleConfig, IdleEvent, IdleGuard, IdleState};
use uuid::Uuid;

pub struct SessionRegistry {
  config: IdleConfig,
  inner:  Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
  guards:  HashMap<Uuid, IdleGuard>,
  revoked: HashSet<Uuid>,
}

impl SessionRegistry {
  pub fn new(config: IdleConfig) -> Self {
    Self {
      config,
      inner: Mutex::new(Inner::default()),
    }
  }

  fn lock(&self) -> MutexGuard<'_, Inner> {
    // Guard state is plain data; a poisoned lock cannot leave it
    // inconsistent.
    self.inner.lock().unwrap_or_else(|e| e.into_inner())
  }

  /// Start tracking a freshly-issued session.
  pub fn register(&self, session_id: Uuid, now: DateTime<Utc>) {
    self
      .lock()
      .guards
      .insert(session_id, IdleGuard::new(self.config, now));
  }

  /// Insert a guard for `session_id` if none is tracked and the session
  /// is not revoked.
  pub fn ensure(&self, session_id: Uuid, now: DateTime<Utc>) {
    let mut inner = self.lock();
    if inner.revoked.contains(&session_id) {
      return;
    }
    inner
      .guards
      .entry(session_id)
      .or_insert_with(|| IdleGuard::new(self.config, now));
  }

  pub fn is_revoked(&self, session_id: Uuid) -> bool {
    self.lock().revoked.contains(&session_id)
  }

  pub fn record_activity(&self, session_id: Uuid, now: DateTime<Utc>) {
    if let Some(guard) = self.lock().guards.get_mut(&session_id) {
      guard.record_activity(now);
    }
  }

  pub fn set_media_playing(&self, session_id: Uuid, playing: bool) {
    if let Some(guard) = self.lock().guards.get_mut(&session_id) {
      guard.set_media_playing(playing);
    }
  }

  pub fn confirm(&self, session_id: Uuid, now: DateTime<Utc>) {
    if let Some(guard) = self.lock().guards.get_mut(&session_id) {
      guard.confirm(now);
    }
  }

  /// Manual sign-out: terminal for the session.
  pub fn logout(&self, session_id: Uuid) {
    let mut inner = self.lock();
    inner.guards.remove(&session_id);
    inner.revoked.insert(session_id);
  }

  /// Current guard state and seconds until forced logout.
  pub fn status(
    &self,
    session_id: Uuid,
    now: DateTime<Utc>,
  ) -> Option<(IdleState, i64)> {
    self
      .lock()
      .guards
      .get(&session_id)
      .map(|guard| (guard.state(), guard.remaining_seconds(now)))
  }

  /// Advance every guard to `now`. Sessions that reached `LoggedOut` are
  /// revoked, dropped from the registry, and returned.
  pub fn poll(&self, now: DateTime<Utc>) -> Vec<Uuid> {
    let mut inner = self.lock();

    let mut expired = Vec::new();
    for (session_id, guard) in inner.guards.iter_mut() {
      if guard.poll(now) == Some(IdleEvent::LoggedOut) {
        expired.push(*session_id);
      }
    }
    for session_id in &expired {
      inner.guards.remove(session_id);
      inner.revoked.insert(*session_id);
    }
    expired
  }
}

/// Spawn the single polling task that drives all idle guards.
pub fn spawn_poller(
  registry: Arc<SessionRegistry>,
  interval: Duration,
) -> tokio::task::JoinHandle<()> {
  tokio::spawn(async move {
    let mut ticker = tokio::time::interval(interval);
    loop {
      ticker.tick().await;
      for session_id in registry.poll(Utc::now()) {
        tracing::info!(%session_id, "idle session logged out");
      }
    }
  })
}
