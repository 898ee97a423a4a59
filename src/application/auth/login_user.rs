use thiserror::Error;

use crate::domain::auth::entities::{Credentials, Session};
use crate::domain::auth::errors::ValidationError;
use crate::domain::auth::ports::SessionClient;
use crate::domain::auth::value_objects::{Email, Password};

/// Command for logging in a user
#[derive(Debug, Clone)]
pub struct LoginUserCommand {
  /// Email address exactly as typed
  pub email: String,
  /// Forwarded to the auth service without local checks
  pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginError {
  /// Rejected locally; the auth service was not contacted
  #[error(transparent)]
  InvalidEmail(ValidationError),

  /// Any refusal by the auth service, deliberately not more specific
  #[error("Invalid email or password")]
  InvalidCredentials,
}

/// Use case for logging in a user
#[derive(Debug, Default)]
pub struct LoginUserUseCase;

impl LoginUserUseCase {
  pub fn new() -> Self {
    Self
  }

  /// Validates the email, then signs in through `client`
  ///
  /// # Errors
  /// `InvalidEmail` without touching the client, or `InvalidCredentials`
  /// for every gateway failure.
  pub async fn execute<C>(&self, client: &mut C, command: LoginUserCommand) -> Result<Session, LoginError>
  where
    C: SessionClient + ?Sized,
  {
    let email = Email::new(command.email).map_err(LoginError::InvalidEmail)?;
    let credentials = Credentials {
      email,
      password: Password::new(command.password),
    };

    match client.sign_in(credentials).await {
      Ok(session) => {
        tracing::info!(user_id = %session.user.id, "User logged in");
        Ok(session)
      }
      Err(e) => {
        tracing::info!("Login rejected: {}", e);
        Err(LoginError::InvalidCredentials)
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::application::auth::fakes::FakeSessionClient;

  #[tokio::test]
  async fn test_invalid_email_short_circuits() {
    let mut client = FakeSessionClient::default();
    let result = LoginUserUseCase::new()
      .execute(
        &mut client,
        LoginUserCommand {
          email: "not-an-email".to_string(),
          password: "whatever".to_string(),
        },
      )
      .await;

    assert_eq!(
      result,
      Err(LoginError::InvalidEmail(ValidationError::InvalidEmail))
    );
    assert!(client.calls.is_empty());
  }

  #[tokio::test]
  async fn test_gateway_failure_is_generic() {
    let mut client = FakeSessionClient::rejecting("Email not confirmed");
    let error = LoginUserUseCase::new()
      .execute(
        &mut client,
        LoginUserCommand {
          email: "jane@example.com".to_string(),
          password: "weak".to_string(),
        },
      )
      .await
      .unwrap_err();

    assert_eq!(error.to_string(), "Invalid email or password");
    assert_eq!(client.calls, vec!["sign_in"]);
  }

  #[tokio::test]
  async fn test_password_is_not_validated_locally() {
    let mut client = FakeSessionClient::default();
    let session = LoginUserUseCase::new()
      .execute(
        &mut client,
        LoginUserCommand {
          email: "jane@example.com".to_string(),
          password: "x".to_string(),
        },
      )
      .await
      .unwrap();

    assert_eq!(session.user.email, "jane@example.com");
  }
}
