use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::Zeroize;

use super::errors::ValidationError;
use super::validation::{validate_email, validate_password};

// ============================================================================
// Email Value Object
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
  /// Creates a new Email after validation
  pub fn new(email: impl Into<String>) -> Result<Self, ValidationError> {
    let email = email.into();
    validate_email(&email)?;
    Ok(Self(email))
  }

  /// Returns the email as a string slice
  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Consumes self and returns the inner String
  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for Email {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl AsRef<str> for Email {
  fn as_ref(&self) -> &str {
    &self.0
  }
}

// ============================================================================
// Password Value Object (Plain Password - Never Stored)
// ============================================================================

#[derive(Clone)]
pub struct Password(String);

impl Password {
  /// Wraps a password without checking the strength rules (login path)
  pub fn new(password: impl Into<String>) -> Self {
    Self(password.into())
  }

  /// Wraps a password that must satisfy every strength rule (signup path)
  pub fn strong(password: impl Into<String>) -> Result<Self, Vec<ValidationError>> {
    let password = Self::new(password);
    let errors = validate_password(password.as_str());
    if errors.is_empty() {
      Ok(password)
    } else {
      Err(errors)
    }
  }

  /// Returns the password as a string slice (use with caution)
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Debug for Password {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("Password(***)")
  }
}

impl fmt::Display for Password {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("***")
  }
}

impl Drop for Password {
  fn drop(&mut self) {
    self.0.zeroize();
  }
}

// ============================================================================
// Session tokens (issued by the auth service, never logged)
// ============================================================================

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
  pub fn new(token: impl Into<String>) -> Self {
    Self(token.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Debug for AccessToken {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("AccessToken(***)")
  }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RefreshToken(String);

impl RefreshToken {
  pub fn new(token: impl Into<String>) -> Self {
    Self(token.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Debug for RefreshToken {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("RefreshToken(***)")
  }
}

// ============================================================================
// Confirmation link parameters
// ============================================================================

pub const DEFAULT_NEXT: &str = "/dashboard";

/// Query parameters carried by an email confirmation link
///
/// `token_hash` and `confirmation_type` stay optional here; their absence is
/// a terminal outcome of the confirmation flow, not a parse failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationParams {
  token_hash: Option<String>,
  confirmation_type: Option<String>,
  next: String,
}

impl ConfirmationParams {
  pub fn new(
    token_hash: Option<String>,
    confirmation_type: Option<String>,
    next: Option<String>,
    default_next: &str,
  ) -> Self {
    let next = next
      .filter(|path| is_local_path(path))
      .unwrap_or_else(|| default_next.to_string());

    Self {
      token_hash: token_hash.filter(|value| !value.is_empty()),
      confirmation_type: confirmation_type.filter(|value| !value.is_empty()),
      next,
    }
  }

  /// Both verification inputs, or `None` when either is missing
  pub fn verification(&self) -> Option<(&str, &str)> {
    match (&self.token_hash, &self.confirmation_type) {
      (Some(token_hash), Some(confirmation_type)) => Some((token_hash, confirmation_type)),
      _ => None,
    }
  }

  pub fn next(&self) -> &str {
    &self.next
  }
}

/// Only same-origin absolute paths are accepted as post-confirmation targets
fn is_local_path(path: &str) -> bool {
  path.starts_with('/')
    && !path.starts_with("//")
    && !path.contains('\\')
    && !path.chars().any(char::is_control)
}
