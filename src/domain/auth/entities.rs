use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use super::value_objects::{AccessToken, Email, Password, RefreshToken};

/// Identity of a signed-in user as reported by the auth service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  /// Unique identifier for the user
  pub id: Uuid,
  /// User's email address
  pub email: String,
  /// When the email address was confirmed, if it has been
  #[serde(default)]
  pub email_confirmed_at: Option<DateTime<Utc>>,
}

/// An established session: both tokens plus the resolved identity
///
/// Sessions are only ever replaced wholesale; nothing mutates one in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
  pub access_token: AccessToken,
  pub refresh_token: RefreshToken,
  pub expires_at: DateTime<Utc>,
  pub user: User,
}

impl Session {
  /// Leeway before expiry at which the access token is treated as stale
  pub const EXPIRY_MARGIN_SECONDS: i64 = 10;

  pub fn is_expired(&self) -> bool {
    self.is_expired_at(Utc::now())
  }

  pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
    self.expires_at - Duration::seconds(Self::EXPIRY_MARGIN_SECONDS) <= now
  }
}

/// Email and password for a single submit; never persisted
#[derive(Debug, Clone)]
pub struct Credentials {
  pub email: Email,
  pub password: Password,
}

/// Profile fields collected on signup and handed to the auth service once
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupProfile {
  pub first_name: String,
  pub last_name: String,
  pub email: String,
  /// `YYYY-MM-DD`, or empty when the birthday was not given
  pub birthday: String,
  pub current_state: Option<String>,
}

impl SignupProfile {
  /// User metadata attached to the new account
  pub fn metadata(&self) -> serde_json::Value {
    json!({
      "first_name": self.first_name,
      "last_name": self.last_name,
      "email": self.email,
      "birthday": self.birthday,
      "current_state": self.current_state,
    })
  }
}

/// Everything the auth service needs to create an account
#[derive(Debug, Clone)]
pub struct SignupRequest {
  pub credentials: Credentials,
  pub profile: SignupProfile,
  /// Where the confirmation link should land
  pub email_redirect_to: Option<String>,
}
