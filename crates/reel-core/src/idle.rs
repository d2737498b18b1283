//! Idle-session guard — the timer-driven state machine that warns and then
//! ends an inactive session, deferring while media is playing.
//!
//! The machine itself is pure: every method takes the current time
//! explicitly, so transitions are deterministic and testable without
//! timers. A driver (one per session, all on one task in `reel-server`)
//! polls it at a fixed interval.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// Timing parameters for the guard.
///
/// The warning appears after `idle_timeout - warning_window` without
/// qualifying activity; the session ends `warning_window` later unless the
/// user confirms.
#[derive(Debug, Clone, Copy)]
pub struct IdleConfig {
  pub idle_timeout:   Duration,
  pub warning_window: Duration,
}

impl IdleConfig {
  /// Idle time after which the warning is shown.
  fn warning_lead(&self) -> Duration {
    self.idle_timeout - self.warning_window
  }
}

/// Externally visible guard state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IdleState {
  Active,
  WarningShown,
  LoggedOut,
}

/// A transition produced by [`IdleGuard::poll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdleEvent {
  WarningShown,
  LoggedOut,
}

#[derive(Debug, Clone, Copy)]
enum Phase {
  Active { last_activity: DateTime<Utc> },
  Warning { since: DateTime<Utc> },
  LoggedOut,
}

/// Per-session idle guard.
#[derive(Debug, Clone)]
pub struct IdleGuard {
  config:        IdleConfig,
  phase:         Phase,
  media_playing: bool,
}

impl IdleGuard {
  pub fn new(config: IdleConfig, now: DateTime<Utc>) -> Self {
    Self {
      config,
      phase: Phase::Active { last_activity: now },
      media_playing: false,
    }
  }

  pub fn state(&self) -> IdleState {
    match self.phase {
      Phase::Active { .. } => IdleState::Active,
      Phase::Warning { .. } => IdleState::WarningShown,
      Phase::LoggedOut => IdleState::LoggedOut,
    }
  }

  /// A qualifying input event (pointer move, key press, scroll, click).
  ///
  /// Pushes the idle deadline out while active; cancels a pending warning.
  /// Has no effect once logged out — that state is terminal.
  pub fn record_activity(&mut self, now: DateTime<Utc>) {
    match self.phase {
      Phase::Active { .. } | Phase::Warning { .. } => {
        self.phase = Phase::Active { last_activity: now };
      }
      Phase::LoggedOut => {}
    }
  }

  /// Update the media playback flag. Its effect is applied at the next
  /// [`poll`](Self::poll).
  pub fn set_media_playing(&mut self, playing: bool) {
    self.media_playing = playing;
  }

  /// The user explicitly chose to stay signed in.
  pub fn confirm(&mut self, now: DateTime<Utc>) {
    if let Phase::Warning { .. } = self.phase {
      self.phase = Phase::Active { last_activity: now };
    }
  }

  /// End the session immediately (manual sign-out).
  pub fn logout(&mut self) {
    self.phase = Phase::LoggedOut;
  }

  /// Advance the machine to `now`, returning the transition taken, if any.
  ///
  /// While media is playing, the warning is deferred by treating the poll
  /// as activity, and an already-shown warning has its countdown held
  /// rather than run out — a long video never triggers an idle logout.
  pub fn poll(&mut self, now: DateTime<Utc>) -> Option<IdleEvent> {
    match self.phase {
      Phase::Active { last_activity } => {
        if now - last_activity < self.config.warning_lead() {
          return None;
        }
        if self.media_playing {
          self.phase = Phase::Active { last_activity: now };
          return None;
        }
        self.phase = Phase::Warning { since: now };
        Some(IdleEvent::WarningShown)
      }
      Phase::Warning { since } => {
        if self.media_playing {
          self.phase = Phase::Warning { since: now };
          return None;
        }
        if now - since < self.config.warning_window {
          return None;
        }
        self.phase = Phase::LoggedOut;
        Some(IdleEvent::LoggedOut)
      }
      Phase::LoggedOut => None,
    }
  }

  /// Seconds until the session would be logged out with no further
  /// activity, from `now`. Zero once logged out.
  pub fn remaining_seconds(&self, now: DateTime<Utc>) -> i64 {
    let deadline = match self.phase {
      Phase::Active { last_activity } => last_activity + self.config.idle_timeout,
      Phase::Warning { since } => since + self.config.warning_window,
      Phase::LoggedOut => return 0,
    };
    (deadline - now).num_seconds().max(0)
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  fn config() -> IdleConfig {
    IdleConfig {
      idle_timeout:   Duration::minutes(10),
      warning_window: Duration::seconds(30),
    }
  }

  fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
  }

  #[test]
  fn stays_active_before_deadline() {
    let mut g = IdleGuard::new(config(), t0());
    assert_eq!(g.poll(t0() + Duration::minutes(5)), None);
    assert_eq!(g.state(), IdleState::Active);
  }

  #[test]
  fn warns_after_idle_period() {
    let mut g = IdleGuard::new(config(), t0());
    // warning lead = 10 min - 30 s
    let fire = t0() + Duration::minutes(10) - Duration::seconds(30);
    assert_eq!(g.poll(fire), Some(IdleEvent::WarningShown));
    assert_eq!(g.state(), IdleState::WarningShown);
  }

  #[test]
  fn activity_pushes_deadline_out() {
    let mut g = IdleGuard::new(config(), t0());
    g.record_activity(t0() + Duration::minutes(9));
    let old_fire = t0() + Duration::minutes(10);
    assert_eq!(g.poll(old_fire), None);
    assert_eq!(g.state(), IdleState::Active);
  }

  #[test]
  fn playing_media_defers_warning() {
    let mut g = IdleGuard::new(config(), t0());
    g.set_media_playing(true);
    let fire = t0() + Duration::minutes(20);
    // Deferred and retried: the deadline keeps moving while media plays.
    assert_eq!(g.poll(fire), None);
    assert_eq!(g.state(), IdleState::Active);

    // Once playback stops, the full idle period applies from the last poll.
    g.set_media_playing(false);
    assert_eq!(g.poll(fire + Duration::minutes(1)), None);
    assert_eq!(
      g.poll(fire + Duration::minutes(10)),
      Some(IdleEvent::WarningShown)
    );
  }

  #[test]
  fn warning_elapses_to_logout() {
    let mut g = IdleGuard::new(config(), t0());
    let warn = t0() + Duration::minutes(10);
    g.poll(warn);
    assert_eq!(g.poll(warn + Duration::seconds(29)), None);
    assert_eq!(
      g.poll(warn + Duration::seconds(30)),
      Some(IdleEvent::LoggedOut)
    );
    assert_eq!(g.state(), IdleState::LoggedOut);
  }

  #[test]
  fn confirm_cancels_warning() {
    let mut g = IdleGuard::new(config(), t0());
    let warn = t0() + Duration::minutes(10);
    g.poll(warn);
    g.confirm(warn + Duration::seconds(10));
    assert_eq!(g.state(), IdleState::Active);
    // Countdown no longer applies.
    assert_eq!(g.poll(warn + Duration::seconds(40)), None);
  }

  #[test]
  fn activity_cancels_warning() {
    let mut g = IdleGuard::new(config(), t0());
    let warn = t0() + Duration::minutes(10);
    g.poll(warn);
    g.record_activity(warn + Duration::seconds(5));
    assert_eq!(g.state(), IdleState::Active);
  }

  #[test]
  fn playing_media_holds_warning_countdown() {
    let mut g = IdleGuard::new(config(), t0());
    let warn = t0() + Duration::minutes(10);
    g.poll(warn);
    g.set_media_playing(true);
    // Countdown is held while playing, however long that lasts.
    assert_eq!(g.poll(warn + Duration::minutes(5)), None);
    assert_eq!(g.state(), IdleState::WarningShown);

    // The full warning window restarts once playback stops.
    let stopped = warn + Duration::minutes(5);
    g.set_media_playing(false);
    assert_eq!(g.poll(stopped + Duration::seconds(10)), None);
    assert_eq!(
      g.poll(stopped + Duration::seconds(40)),
      Some(IdleEvent::LoggedOut)
    );
  }

  #[test]
  fn logged_out_is_terminal() {
    let mut g = IdleGuard::new(config(), t0());
    g.logout();
    g.record_activity(t0() + Duration::seconds(1));
    g.confirm(t0() + Duration::seconds(2));
    assert_eq!(g.poll(t0() + Duration::hours(1)), None);
    assert_eq!(g.state(), IdleState::LoggedOut);
    assert_eq!(g.remaining_seconds(t0()), 0);
  }

  #[test]
  fn remaining_seconds_counts_down() {
    let mut g = IdleGuard::new(config(), t0());
    assert_eq!(g.remaining_seconds(t0()), 600);
    assert_eq!(g.remaining_seconds(t0() + Duration::minutes(9)), 60);

    let warn = t0() + Duration::minutes(10);
    g.poll(warn);
    assert_eq!(g.remaining_seconds(warn + Duration::seconds(10)), 20);
  }
}
