//! Per-visitor auth state.
//!
//! An `AuthContext` is created from whatever session the browser presented,
//! hydrated once (the `loading` phase), and then driven by the page that owns
//! it. Every gateway response replaces the held session wholesale; sign-out
//! tears it down. Callers check [`AuthContext::changed`] to know whether the
//! stored copy has to be rewritten.

use async_trait::async_trait;
use std::sync::Arc;

use super::entities::{Credentials, Session, SignupRequest, User};
use super::errors::GatewayError;
use super::ports::{AuthGateway, SessionClient, SignUpOutcome};

/// What the route guard observes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSnapshot {
  pub user: Option<User>,
  pub loading: bool,
}

pub struct AuthContext {
  gateway: Arc<dyn AuthGateway>,
  session: Option<Session>,
  loading: bool,
  changed: bool,
}

impl AuthContext {
  /// Creates a context in the loading phase with no session
  pub fn new(gateway: Arc<dyn AuthGateway>) -> Self {
    Self {
      gateway,
      session: None,
      loading: true,
      changed: false,
    }
  }

  /// Creates an already settled, signed-out context
  pub fn signed_out(gateway: Arc<dyn AuthGateway>) -> Self {
    Self {
      loading: false,
      ..Self::new(gateway)
    }
  }

  /// Adopts a previously stored session and ends the loading phase
  ///
  /// A stale access token is refreshed once; if that fails the context
  /// settles signed out.
  pub async fn hydrate(&mut self, stored: Option<Session>) {
    self.session = stored;
    self.changed = false;

    if self.session.as_ref().is_some_and(Session::is_expired) {
      tracing::debug!("Stored session expired, refreshing");
      if let Err(e) = self.refresh().await {
        tracing::info!("Dropping stored session after failed refresh: {}", e);
        self.replace(None);
      }
    }

    self.loading = false;
  }

  pub fn snapshot(&self) -> AuthSnapshot {
    AuthSnapshot {
      user: self.user().cloned(),
      loading: self.loading,
    }
  }

  pub fn session(&self) -> Option<&Session> {
    self.session.as_ref()
  }

  pub fn user(&self) -> Option<&User> {
    self.session.as_ref().map(|session| &session.user)
  }

  pub fn is_loading(&self) -> bool {
    self.loading
  }

  /// Whether the held session differs from the one passed to `hydrate`
  pub fn changed(&self) -> bool {
    self.changed
  }

  fn replace(&mut self, session: Option<Session>) {
    self.session = session;
    self.changed = true;
  }

  async fn refresh(&mut self) -> Result<(), GatewayError> {
    let refresh_token = self
      .session
      .as_ref()
      .map(|session| session.refresh_token.clone())
      .ok_or(GatewayError::SessionMissing)?;

    let session = self.gateway.refresh_session(&refresh_token).await?;
    tracing::debug!(user_id = %session.user.id, "Session refreshed");
    self.replace(Some(session));
    Ok(())
  }
}

#[async_trait]
impl SessionClient for AuthContext {
  async fn sign_up(&mut self, request: SignupRequest) -> Result<Option<Session>, GatewayError> {
    match self.gateway.sign_up(&request).await? {
      SignUpOutcome::ConfirmationSent(user) => {
        tracing::info!(user_id = %user.id, "Signup pending email confirmation");
        Ok(None)
      }
      SignUpOutcome::SignedIn(session) => {
        self.replace(Some(session.clone()));
        Ok(Some(session))
      }
    }
  }

  async fn sign_in(&mut self, credentials: Credentials) -> Result<Session, GatewayError> {
    let session = self
      .gateway
      .sign_in_with_password(&credentials.email, &credentials.password)
      .await?;
    self.replace(Some(session.clone()));
    Ok(session)
  }

  async fn sign_out(&mut self) -> Result<(), GatewayError> {
    let result = match self.session.as_ref() {
      Some(session) => self.gateway.sign_out(&session.access_token).await,
      None => Ok(()),
    };
    // The local session goes away even when the remote revoke failed
    self.replace(None);
    result
  }

  async fn verify_confirmation_token(
    &mut self,
    token_hash: &str,
    confirmation_type: &str,
  ) -> Result<(), GatewayError> {
    if let Some(session) = self.gateway.verify_otp(token_hash, confirmation_type).await? {
      self.replace(Some(session));
    }
    Ok(())
  }

  async fn get_session(&mut self) -> Result<Option<Session>, GatewayError> {
    if self.session.as_ref().is_some_and(Session::is_expired) {
      if let Err(e) = self.refresh().await {
        self.replace(None);
        return Err(e);
      }
    }
    Ok(self.session.clone())
  }

  async fn refresh_session(&mut self) -> Result<(), GatewayError> {
    self.refresh().await
  }
}
