//! Hand-written `SessionClient` double for use case tests.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::auth::entities::{Credentials, Session, SignupRequest, User};
use crate::domain::auth::errors::GatewayError;
use crate::domain::auth::ports::SessionClient;
use crate::domain::auth::value_objects::{AccessToken, RefreshToken};

#[derive(Default)]
pub struct FakeSessionClient {
  /// When set every call fails with this rejection text
  pub rejection: Option<String>,
  /// Sign-up returns a session right away
  pub auto_confirm: bool,
  pub session: Option<Session>,
  pub last_signup: Option<SignupRequest>,
  pub calls: Vec<&'static str>,
}

impl FakeSessionClient {
  pub fn rejecting(message: &str) -> Self {
    Self {
      rejection: Some(message.to_string()),
      ..Default::default()
    }
  }

  pub fn signed_in() -> Self {
    Self {
      session: Some(session_for("jane@example.com")),
      ..Default::default()
    }
  }

  fn outcome(&self) -> Result<(), GatewayError> {
    match &self.rejection {
      Some(message) => Err(GatewayError::Rejected {
        status: 400,
        message: message.clone(),
      }),
      None => Ok(()),
    }
  }
}

pub fn session_for(email: &str) -> Session {
  Session {
    access_token: AccessToken::new("access"),
    refresh_token: RefreshToken::new("refresh"),
    expires_at: Utc::now() + Duration::hours(1),
    user: User {
      id: Uuid::new_v4(),
      email: email.to_string(),
      email_confirmed_at: Some(Utc::now()),
    },
  }
}

#[async_trait]
impl SessionClient for FakeSessionClient {
  async fn sign_up(&mut self, request: SignupRequest) -> Result<Option<Session>, GatewayError> {
    self.calls.push("sign_up");
    self.outcome()?;
    let email = request.credentials.email.as_str().to_string();
    self.last_signup = Some(request);
    if self.auto_confirm {
      self.session = Some(session_for(&email));
    }
    Ok(self.session.clone())
  }

  async fn sign_in(&mut self, credentials: Credentials) -> Result<Session, GatewayError> {
    self.calls.push("sign_in");
    self.outcome()?;
    let session = session_for(credentials.email.as_str());
    self.session = Some(session.clone());
    Ok(session)
  }

  async fn sign_out(&mut self) -> Result<(), GatewayError> {
    self.calls.push("sign_out");
    self.session = None;
    self.outcome()
  }

  async fn verify_confirmation_token(
    &mut self,
    _token_hash: &str,
    _confirmation_type: &str,
  ) -> Result<(), GatewayError> {
    self.calls.push("verify");
    self.outcome()?;
    self.session = Some(session_for("jane@example.com"));
    Ok(())
  }

  async fn get_session(&mut self) -> Result<Option<Session>, GatewayError> {
    self.calls.push("get_session");
    Ok(self.session.clone())
  }

  async fn refresh_session(&mut self) -> Result<(), GatewayError> {
    self.calls.push("refresh");
    self.outcome()
  }
}
