//! Shared HTTP plumbing for the hosted Supabase project.

use chrono::{DateTime, Duration, TimeZone, Utc};
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::auth::entities::{Session, User};
use crate::domain::auth::errors::GatewayError;
use crate::domain::auth::value_objects::{AccessToken, RefreshToken};

/// Authenticated access to one Supabase project
#[derive(Clone)]
pub struct SupabaseClient {
  http: Client,
  base_url: String,
  anon_key: String,
}

impl SupabaseClient {
  pub fn new(
    base_url: &str,
    anon_key: &str,
    timeout: std::time::Duration,
  ) -> Result<Self, reqwest::Error> {
    let http = Client::builder().timeout(timeout).build()?;
    Ok(Self {
      http,
      base_url: base_url.trim_end_matches('/').to_string(),
      anon_key: anon_key.to_string(),
    })
  }

  pub fn url(&self, path: &str) -> String {
    format!("{}{}", self.base_url, path)
  }

  /// GET with the project key and, when given, the user's token
  pub fn get(&self, path: &str, access_token: Option<&AccessToken>) -> RequestBuilder {
    self.authorize(self.http.get(self.url(path)), access_token)
  }

  pub fn post(&self, path: &str, access_token: Option<&AccessToken>) -> RequestBuilder {
    self.authorize(self.http.post(self.url(path)), access_token)
  }

  fn authorize(&self, request: RequestBuilder, access_token: Option<&AccessToken>) -> RequestBuilder {
    let bearer = access_token
      .map(AccessToken::as_str)
      .unwrap_or(self.anon_key.as_str());
    request
      .header("apikey", &self.anon_key)
      .bearer_auth(bearer)
  }
}

// ============================================================================
// Wire formats
// ============================================================================

#[derive(Debug, Deserialize)]
pub(crate) struct WireUser {
  pub id: Uuid,
  #[serde(default)]
  pub email: Option<String>,
  #[serde(default)]
  pub email_confirmed_at: Option<DateTime<Utc>>,
}

impl From<WireUser> for User {
  fn from(user: WireUser) -> Self {
    User {
      id: user.id,
      email: user.email.unwrap_or_default(),
      email_confirmed_at: user.email_confirmed_at,
    }
  }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
  pub access_token: String,
  pub refresh_token: String,
  #[serde(default)]
  pub expires_in: Option<i64>,
  /// Unix seconds
  #[serde(default)]
  pub expires_at: Option<i64>,
  pub user: WireUser,
}

impl TokenResponse {
  pub fn into_session(self, now: DateTime<Utc>) -> Session {
    let expires_at = self
      .expires_at
      .and_then(|seconds| Utc.timestamp_opt(seconds, 0).single())
      .unwrap_or_else(|| now + Duration::seconds(self.expires_in.unwrap_or(3600)));

    Session {
      access_token: AccessToken::new(self.access_token),
      refresh_token: RefreshToken::new(self.refresh_token),
      expires_at,
      user: self.user.into(),
    }
  }
}

/// Responses that carry a session when the account is already usable, and
/// only the user otherwise
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum SessionOrUser {
  Session(TokenResponse),
  Nested { user: WireUser },
  User(WireUser),
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
  msg: Option<String>,
  error_description: Option<String>,
  message: Option<String>,
  error: Option<String>,
}

/// Picks the human readable reason out of an error body
pub(crate) fn error_reason(body: &str) -> String {
  let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
  parsed
    .msg
    .or(parsed.error_description)
    .or(parsed.message)
    .or(parsed.error)
    .unwrap_or_default()
}

/// Turns a non-success response into `GatewayError::Rejected`
pub(crate) async fn ensure_success(response: Response) -> Result<Response, GatewayError> {
  let status = response.status();
  if status.is_success() {
    return Ok(response);
  }
  let body = response.text().await.unwrap_or_default();
  let message = error_reason(&body);
  tracing::debug!(status = status.as_u16(), "Auth service refused request: {}", message);
  Err(GatewayError::Rejected {
    status: status.as_u16(),
    message,
  })
}
