//! Handlers for `/auth` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/auth/register`  | Credentials sign-up; 201 with a session token |
//! | `POST` | `/auth/login`     | Credentials sign-in |
//! | `POST` | `/auth/federated` | Find-or-create after external provider sign-in |

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use reel_core::{
  account::{Account, AuthProvider, NewAccount},
  store::MediaStore,
};

use crate::{
  AppState, auth,
  error::{ApiError, store_err},
};

/// A freshly-opened session: the signed token plus the account it
/// belongs to.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
  pub token:   String,
  pub account: Account,
}

fn required(value: &str, message: &str, errors: &mut Vec<String>) {
  if value.trim().is_empty() {
    errors.push(message.to_owned());
  }
}

fn open_session<S>(
  state: &AppState<S>,
  account: Account,
) -> Result<SessionResponse, ApiError>
where
  S: MediaStore + Clone + Send + Sync + 'static,
{
  let (token, session_id) = auth::issue_token(&state.auth, &account)?;
  state.sessions.register(session_id, Utc::now());
  Ok(SessionResponse { token, account })
}

// ─── Register ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RegisterBody {
  pub name:     String,
  pub email:    String,
  pub password: String,
}

/// `POST /auth/register`
pub async fn register<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<RegisterBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: MediaStore + Clone + Send + Sync + 'static,
{
  let mut errors = Vec::new();
  required(&body.name, "name is required", &mut errors);
  required(&body.email, "email is required", &mut errors);
  required(&body.password, "password is required", &mut errors);
  if !errors.is_empty() {
    return Err(ApiError::Validation(errors));
  }

  let password_hash = auth::hash_password(&body.password)?;
  let account = state
    .store
    .create_account(NewAccount {
      name:          body.name.trim().to_owned(),
      email:         body.email.trim().to_owned(),
      password_hash: Some(password_hash),
      provider:      AuthProvider::Credentials,
    })
    .await
    .map_err(store_err)?;

  let response = open_session(&state, account)?;
  Ok((StatusCode::CREATED, Json(response)))
}

// ─── Login ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct LoginBody {
  pub email:    String,
  pub password: String,
}

/// `POST /auth/login`
///
/// An unknown email, a wrong password, and a federated account (which has
/// no local credential) all fail the same way.
pub async fn login<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<LoginBody>,
) -> Result<Json<SessionResponse>, ApiError>
where
  S: MediaStore + Clone + Send + Sync + 'static,
{
  let account = state
    .store
    .find_account_by_email(body.email.trim())
    .await
    .map_err(store_err)?
    .ok_or(ApiError::AuthRequired)?;

  let Some(hash) = account.password_hash.as_deref() else {
    return Err(ApiError::AuthRequired);
  };
  if !auth::verify_password(&body.password, hash) {
    return Err(ApiError::AuthRequired);
  }

  Ok(Json(open_session(&state, account)?))
}

// ─── Federated ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct FederatedBody {
  pub name:  String,
  pub email: String,
}

/// `POST /auth/federated`
///
/// Called after the external identity provider has verified the user.
/// The account is created on first sign-in; later sign-ins resolve to the
/// existing account by email.
pub async fn federated<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<FederatedBody>,
) -> Result<Json<SessionResponse>, ApiError>
where
  S: MediaStore + Clone + Send + Sync + 'static,
{
  let mut errors = Vec::new();
  required(&body.name, "name is required", &mut errors);
  required(&body.email, "email is required", &mut errors);
  if !errors.is_empty() {
    return Err(ApiError::Validation(errors));
  }

  let existing = state
    .store
    .find_account_by_email(body.email.trim())
    .await
    .map_err(store_err)?;

  let account = match existing {
    Some(account) => account,
    None => state
      .store
      .create_account(NewAccount {
        name:          body.name.trim().to_owned(),
        email:         body.email.trim().to_owned(),
        password_hash: None,
        provider:      AuthProvider::Federated,
      })
      .await
      .map_err(store_err)?,
  };

  Ok(Json(open_session(&state, account)?))
}
