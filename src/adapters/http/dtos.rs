use serde::Deserialize;

use crate::application::auth::{ConfirmEmailCommand, LoginUserCommand, RegisterUserCommand};
use crate::application::profile::UpdateSettingsCommand;

/// Login form submission
#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
  #[serde(default)]
  pub email: String,
  #[serde(default)]
  pub password: String,
}

impl From<LoginForm> for LoginUserCommand {
  fn from(form: LoginForm) -> Self {
    LoginUserCommand {
      email: form.email,
      password: form.password,
    }
  }
}

/// Signup form submission
///
/// Also posted to `/auth/validate/{field}` for inline re-validation, which
/// only reads the field it is asked about.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SignupForm {
  pub email: String,
  pub password: String,
  pub first_name: String,
  pub last_name: String,
  pub birth_month: String,
  pub birth_day: String,
  pub birth_year: String,
  pub current_state: String,
  /// Set by the form after the first submit
  pub attempted: Option<String>,
}

impl SignupForm {
  pub fn attempted(&self) -> bool {
    self.attempted.as_deref().is_some_and(|value| !value.is_empty())
  }
}

/// Empty or unparseable birthday parts count as not given
fn parse_part<T: std::str::FromStr>(value: &str) -> Option<T> {
  value.trim().parse().ok()
}

impl From<SignupForm> for RegisterUserCommand {
  fn from(form: SignupForm) -> Self {
    let current_state = form.current_state.trim();
    RegisterUserCommand {
      birth_month: parse_part(&form.birth_month),
      birth_day: parse_part(&form.birth_day),
      birth_year: parse_part(&form.birth_year),
      current_state: (!current_state.is_empty()).then(|| current_state.to_string()),
      email: form.email,
      password: form.password,
      first_name: form.first_name,
      last_name: form.last_name,
    }
  }
}

/// Profile settings submission; unchecked boxes are absent
#[derive(Debug, Clone, Deserialize)]
pub struct SettingsForm {
  #[serde(default)]
  pub weekly_goal: String,
  pub notifications_enabled: Option<String>,
  pub dark_mode: Option<String>,
}

impl From<SettingsForm> for UpdateSettingsCommand {
  fn from(form: SettingsForm) -> Self {
    UpdateSettingsCommand {
      weekly_goal: form.weekly_goal,
      notifications_enabled: form.notifications_enabled.is_some(),
      dark_mode: form.dark_mode.is_some(),
    }
  }
}

/// Query string of a confirmation link
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfirmQuery {
  pub token_hash: Option<String>,
  #[serde(rename = "type")]
  pub confirmation_type: Option<String>,
  pub next: Option<String>,
}

impl From<ConfirmQuery> for ConfirmEmailCommand {
  fn from(query: ConfirmQuery) -> Self {
    ConfirmEmailCommand {
      token_hash: query.token_hash,
      confirmation_type: query.confirmation_type,
      next: query.next,
    }
  }
}
