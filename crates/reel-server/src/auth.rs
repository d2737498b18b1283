//! Session identity: argon2 password hashing, signed session tokens, and
//! the request extractor that turns a Bearer token into explicit session
//! context.

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
  password_hash::SaltString,
};
use axum::{
  extract::FromRequestParts,
  http::{header, request::Parts},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{
  Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
};
use rand_core::OsRng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use reel_core::{account::Account, store::MediaStore};

use crate::{AppState, ServerConfig, error::ApiError};

// ─── Keys ────────────────────────────────────────────────────────────────────

/// Signing material and lifetime for session tokens.
pub struct AuthKeys {
  encoding: EncodingKey,
  decoding: DecodingKey,
  ttl:      Duration,
}

impl AuthKeys {
  pub fn new(secret: &str, ttl_minutes: i64) -> Self {
    Self {
      encoding: EncodingKey::from_secret(secret.as_bytes()),
      decoding: DecodingKey::from_secret(secret.as_bytes()),
      ttl:      Duration::minutes(ttl_minutes),
    }
  }
}

// ─── Passwords ───────────────────────────────────────────────────────────────

/// Hash a password into an argon2 PHC string.
pub fn hash_password(password: &str) -> Result<String, ApiError> {
  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map(|hash| hash.to_string())
    .map_err(|e| ApiError::Internal(format!("password hashing failed: {e}")))
}

/// Verify a password against a stored PHC string. An unparseable hash
/// verifies as false rather than erroring.
pub fn verify_password(password: &str, phc: &str) -> bool {
  let Ok(parsed) = PasswordHash::new(phc) else {
    return false;
  };
  Argon2::default()
    .verify_password(password.as_bytes(), &parsed)
    .is_ok()
}

// ─── Tokens ──────────────────────────────────────────────────────────────────

/// Claims carried by a session token.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
  /// Account identifier.
  pub sub:   String,
  pub name:  String,
  pub email: String,
  /// Session identifier; the idle guard revokes by this.
  pub jti:   String,
  pub iat:   i64,
  pub exp:   i64,
}

/// The authenticated session context passed into handlers: the current
/// account identity, or a 401 before the handler runs.
#[derive(Debug, Clone)]
pub struct Session {
  pub account_id: Uuid,
  pub session_id: Uuid,
  pub name:       String,
  pub email:      String,
}

/// Issue a signed session token for `account`, returning the token and
/// the session identifier embedded in it.
pub fn issue_token(
  keys: &AuthKeys,
  account: &Account,
) -> Result<(String, Uuid), ApiError> {
  let session_id = Uuid::new_v4();
  let now = Utc::now();
  let claims = SessionClaims {
    sub:   account.account_id.to_string(),
    name:  account.name.clone(),
    email: account.email.clone(),
    jti:   session_id.to_string(),
    iat:   now.timestamp(),
    exp:   (now + keys.ttl).timestamp(),
  };

  let token = encode(&Header::default(), &claims, &keys.encoding)
    .map_err(|e| ApiError::Internal(format!("token signing failed: {e}")))?;
  Ok((token, session_id))
}

fn decode_token(keys: &AuthKeys, token: &str) -> Result<SessionClaims, ApiError> {
  decode::<SessionClaims>(
    token,
    &keys.decoding,
    &Validation::new(Algorithm::HS256),
  )
  .map(|data| data.claims)
  .map_err(|_| ApiError::AuthRequired)
}

impl<S> FromRequestParts<AppState<S>> for Session
where
  S: MediaStore + Clone + Send + Sync + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let header_val = parts
      .headers
      .get(header::AUTHORIZATION)
      .and_then(|v| v.to_str().ok())
      .ok_or(ApiError::AuthRequired)?;

    let token = header_val
      .strip_prefix("Bearer ")
      .ok_or(ApiError::AuthRequired)?;

    let claims = decode_token(&state.auth, token)?;
    let account_id =
      Uuid::parse_str(&claims.sub).map_err(|_| ApiError::AuthRequired)?;
    let session_id =
      Uuid::parse_str(&claims.jti).map_err(|_| ApiError::AuthRequired)?;

    if state.sessions.is_revoked(session_id) {
      return Err(ApiError::AuthRequired);
    }
    // A valid token whose guard is gone (e.g. after a restart) gets a
    // fresh Active guard.
    state.sessions.ensure(session_id, Utc::now());

    Ok(Session {
      account_id,
      session_id,
      name: claims.name,
      email: claims.email,
    })
  }
}

/// Server-side authorization gate for contact-review operations: only the
/// configured admin identity passes.
pub fn require_admin(
  session: &Session,
  config: &ServerConfig,
) -> Result<(), ApiError> {
  if session.email == config.admin_email {
    Ok(())
  } else {
    Err(ApiError::AuthRequired)
  }
}
