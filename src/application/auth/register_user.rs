use thiserror::Error;
use validator::Validate;

use crate::domain::auth::entities::{Credentials, Session, SignupProfile, SignupRequest};
use crate::domain::auth::errors::ValidationError;
use crate::domain::auth::ports::SessionClient;
use crate::domain::auth::validation::{format_birthday, is_us_state};
use crate::domain::auth::value_objects::{Email, Password};

pub const UNEXPECTED_SIGNUP_ERROR: &str = "An unexpected error occurred. Please try again.";

/// Profile fields in the order their messages are reported
const PROFILE_FIELDS: [&str; 6] = [
  "first_name",
  "last_name",
  "birth_month",
  "birth_day",
  "birth_year",
  "current_state",
];

fn validate_state(code: &str) -> Result<(), validator::ValidationError> {
  if is_us_state(code) {
    Ok(())
  } else {
    Err(validator::ValidationError::new("us_state").with_message("Please select a valid state".into()))
  }
}

/// Command for registering a new user
///
/// Email and password are checked first by `execute`; the derived rules
/// cover the profile fields.
#[derive(Debug, Clone, Validate)]
pub struct RegisterUserCommand {
  pub email: String,
  pub password: String,
  #[validate(length(min = 1, max = 100, message = "First name is required (max 100 characters)"))]
  pub first_name: String,
  #[validate(length(min = 1, max = 100, message = "Last name is required (max 100 characters)"))]
  pub last_name: String,
  #[validate(range(min = 1, max = 12, message = "Please enter a valid birth month"))]
  pub birth_month: Option<u32>,
  #[validate(range(min = 1, max = 31, message = "Please enter a valid birth day"))]
  pub birth_day: Option<u32>,
  #[validate(range(min = 1900, max = 2100, message = "Please enter a valid birth year"))]
  pub birth_year: Option<i32>,
  /// Two-letter code, `None` when not selected
  #[validate(custom(function = "validate_state"))]
  pub current_state: Option<String>,
}

impl RegisterUserCommand {
  /// Runs the profile rules; messages come back in form order
  fn profile_messages(&self) -> Vec<String> {
    let mut messages = Vec::new();

    if let Err(errors) = self.validate() {
      let field_errors = errors.field_errors();
      for field in PROFILE_FIELDS {
        if let Some(errors) = field_errors.get(field) {
          messages.extend(errors.iter().map(|error| {
            error
              .message
              .as_ref()
              .map(|m| m.to_string())
              .unwrap_or_else(|| format!("Invalid field: {}", field))
          }));
        }
      }
    }

    if messages.is_empty() {
      if let Err(e) = format_birthday(self.birth_month, self.birth_day, self.birth_year) {
        messages.push(e.to_string());
      }
    }

    messages
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterUserResponse {
  /// Account created; the user has to follow the emailed link
  ConfirmationSent { email: String },
  /// The auth service confirmed the account immediately
  SignedIn(Session),
}

/// Where a refused signup should be reported on the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupFailure {
  /// Shown next to the email field
  EmailTaken,
  /// Shown in the password message list
  Password(String),
  /// Shown in the general message list
  General(String),
}

impl SignupFailure {
  /// Sorts an upstream failure text into a form location
  ///
  /// Upstream wording is not a stable contract. Anything mentioning `email`
  /// is read as a duplicate account.
  pub fn classify(reason: &str) -> Self {
    if reason.is_empty() {
      SignupFailure::General(UNEXPECTED_SIGNUP_ERROR.to_string())
    } else if reason.contains("email") {
      SignupFailure::EmailTaken
    } else if reason.contains("password") {
      SignupFailure::Password(reason.to_string())
    } else {
      SignupFailure::General(reason.to_string())
    }
  }

  pub fn message(&self) -> &str {
    match self {
      SignupFailure::EmailTaken => "This email is already registered",
      SignupFailure::Password(message) | SignupFailure::General(message) => message,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegisterError {
  #[error(transparent)]
  InvalidEmail(ValidationError),

  /// Every unmet password rule, in rule order
  #[error("Password does not meet the requirements")]
  WeakPassword(Vec<ValidationError>),

  /// Messages for the profile fields, in form order
  #[error("{}", .0.join(", "))]
  InvalidProfile(Vec<String>),

  #[error("{}", .0.message())]
  Rejected(SignupFailure),
}

/// Use case for registering a new user
pub struct RegisterUserUseCase {
  email_redirect_to: Option<String>,
}

impl RegisterUserUseCase {
  /// `email_redirect_to` is where the confirmation link should land
  pub fn new(email_redirect_to: Option<String>) -> Self {
    Self { email_redirect_to }
  }

  /// Validates email, then password, then the profile fields, stopping at
  /// the first group that fails; only then creates the account
  pub async fn execute<C>(
    &self,
    client: &mut C,
    command: RegisterUserCommand,
  ) -> Result<RegisterUserResponse, RegisterError>
  where
    C: SessionClient + ?Sized,
  {
    let email = Email::new(command.email.as_str()).map_err(RegisterError::InvalidEmail)?;
    let password =
      Password::strong(command.password.as_str()).map_err(RegisterError::WeakPassword)?;

    let profile_messages = command.profile_messages();
    if !profile_messages.is_empty() {
      return Err(RegisterError::InvalidProfile(profile_messages));
    }
    let birthday = format_birthday(command.birth_month, command.birth_day, command.birth_year)
      .unwrap_or_default();

    let request = SignupRequest {
      profile: SignupProfile {
        first_name: command.first_name.trim().to_string(),
        last_name: command.last_name.trim().to_string(),
        email: email.as_str().to_string(),
        birthday,
        current_state: command.current_state,
      },
      credentials: Credentials { email, password },
      email_redirect_to: self.email_redirect_to.clone(),
    };
    let address = request.profile.email.clone();

    match client.sign_up(request).await {
      Ok(Some(session)) => {
        tracing::info!(user_id = %session.user.id, "Signup confirmed immediately");
        Ok(RegisterUserResponse::SignedIn(session))
      }
      Ok(None) => Ok(RegisterUserResponse::ConfirmationSent { email: address }),
      Err(e) => {
        tracing::info!("Signup rejected: {}", e);
        Err(RegisterError::Rejected(SignupFailure::classify(&e.reason())))
      }
    }
  }
}
