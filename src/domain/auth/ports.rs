use async_trait::async_trait;

use super::entities::{Credentials, Session, SignupRequest, User};
use super::errors::GatewayError;
use super::value_objects::{AccessToken, Email, Password, RefreshToken};

/// Result of creating an account at the auth service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignUpOutcome {
  /// A confirmation email was sent; no session yet
  ConfirmationSent(User),
  /// The service confirmed the account immediately
  SignedIn(Session),
}

/// Stateless remote API of the hosted authentication service
#[async_trait]
pub trait AuthGateway: Send + Sync {
  /// Creates an account and triggers the confirmation email
  async fn sign_up(&self, request: &SignupRequest) -> Result<SignUpOutcome, GatewayError>;

  /// Exchanges email and password for a session
  async fn sign_in_with_password(
    &self,
    email: &Email,
    password: &Password,
  ) -> Result<Session, GatewayError>;

  /// Revokes the session that issued `access_token`
  async fn sign_out(&self, access_token: &AccessToken) -> Result<(), GatewayError>;

  /// Verifies an emailed token hash; may or may not return a session
  async fn verify_otp(
    &self,
    token_hash: &str,
    confirmation_type: &str,
  ) -> Result<Option<Session>, GatewayError>;

  /// Exchanges a refresh token for a new session
  async fn refresh_session(&self, refresh_token: &RefreshToken) -> Result<Session, GatewayError>;
}

/// Session-holding client: the capability set pages and flows consume
///
/// Implementations own the current session and replace it wholesale on every
/// successful response.
#[async_trait]
pub trait SessionClient: Send {
  /// Returns the new session when the account was confirmed immediately
  async fn sign_up(&mut self, request: SignupRequest) -> Result<Option<Session>, GatewayError>;

  async fn sign_in(&mut self, credentials: Credentials) -> Result<Session, GatewayError>;

  async fn sign_out(&mut self) -> Result<(), GatewayError>;

  async fn verify_confirmation_token(
    &mut self,
    token_hash: &str,
    confirmation_type: &str,
  ) -> Result<(), GatewayError>;

  async fn get_session(&mut self) -> Result<Option<Session>, GatewayError>;

  async fn refresh_session(&mut self) -> Result<(), GatewayError>;
}
