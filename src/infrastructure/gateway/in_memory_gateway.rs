//! In-process stand-in for the hosted auth service.
//!
//! Used when `gateway.mode = "memory"` so the whole app runs without a
//! Supabase project. Confirmation emails are not sent; the link is logged.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::RepositoryError;
use crate::domain::auth::entities::{Session, SignupProfile, SignupRequest, User};
use crate::domain::auth::errors::GatewayError;
use crate::domain::auth::ports::{AuthGateway, SignUpOutcome};
use crate::domain::auth::value_objects::{AccessToken, Email, Password, RefreshToken};
use crate::domain::profile::{Profile, ProfileRepository};

struct Account {
  user: User,
  password: String,
  profile: SignupProfile,
}

#[derive(Default)]
struct State {
  /// Keyed by email address
  accounts: HashMap<String, Account>,
  /// token_hash -> email
  pending: HashMap<String, String>,
  /// access token -> user id
  access_tokens: HashMap<String, Uuid>,
  /// refresh token -> email
  refresh_tokens: HashMap<String, String>,
}

pub struct InMemoryAuthGateway {
  state: RwLock<State>,
  session_ttl: Duration,
}

fn rejected(status: u16, message: &str) -> GatewayError {
  GatewayError::Rejected {
    status,
    message: message.to_string(),
  }
}

impl InMemoryAuthGateway {
  pub fn new(session_ttl: Duration) -> Self {
    Self {
      state: RwLock::new(State::default()),
      session_ttl,
    }
  }

  fn issue_session(&self, state: &mut State, email: &str, user: User) -> Session {
    let access_token = format!("mem-access-{}", Uuid::new_v4().simple());
    let refresh_token = format!("mem-refresh-{}", Uuid::new_v4().simple());
    state.access_tokens.insert(access_token.clone(), user.id);
    state
      .refresh_tokens
      .insert(refresh_token.clone(), email.to_string());

    Session {
      access_token: AccessToken::new(access_token),
      refresh_token: RefreshToken::new(refresh_token),
      expires_at: Utc::now() + self.session_ttl,
      user,
    }
  }

  #[cfg(test)]
  pub(crate) async fn pending_token_for(&self, email: &str) -> Option<String> {
    let state = self.state.read().await;
    state
      .pending
      .iter()
      .find(|(_, pending_email)| pending_email.as_str() == email)
      .map(|(token_hash, _)| token_hash.clone())
  }
}

impl Default for InMemoryAuthGateway {
  fn default() -> Self {
    Self::new(Duration::hours(1))
  }
}

#[async_trait]
impl AuthGateway for InMemoryAuthGateway {
  async fn sign_up(&self, request: &SignupRequest) -> Result<SignUpOutcome, GatewayError> {
    let email = request.credentials.email.as_str().to_string();
    let mut state = self.state.write().await;

    if state.accounts.contains_key(&email) {
      return Err(rejected(
        422,
        "A user with this email address has already been registered",
      ));
    }

    let user = User {
      id: Uuid::new_v4(),
      email: email.clone(),
      email_confirmed_at: None,
    };
    let token_hash = Uuid::new_v4().simple().to_string();
    state.accounts.insert(
      email.clone(),
      Account {
        user: user.clone(),
        password: request.credentials.password.as_str().to_string(),
        profile: request.profile.clone(),
      },
    );
    state.pending.insert(token_hash.clone(), email);

    let target = request.email_redirect_to.as_deref().unwrap_or("/auth/confirm");
    tracing::info!(
      user_id = %user.id,
      "Confirmation link (not emailed): {}?token_hash={}&type=signup",
      target,
      token_hash
    );

    Ok(SignUpOutcome::ConfirmationSent(user))
  }

  async fn sign_in_with_password(
    &self,
    email: &Email,
    password: &Password,
  ) -> Result<Session, GatewayError> {
    let mut state = self.state.write().await;

    let user = match state.accounts.get(email.as_str()) {
      Some(account) if account.password == password.as_str() => account.user.clone(),
      _ => return Err(rejected(400, "Invalid login credentials")),
    };
    if user.email_confirmed_at.is_none() {
      return Err(rejected(400, "Email not confirmed"));
    }

    Ok(self.issue_session(&mut state, email.as_str(), user))
  }

  async fn sign_out(&self, access_token: &AccessToken) -> Result<(), GatewayError> {
    let mut state = self.state.write().await;
    let Some(user_id) = state.access_tokens.remove(access_token.as_str()) else {
      return Err(rejected(401, "Invalid token"));
    };

    let email = state
      .accounts
      .values()
      .find(|account| account.user.id == user_id)
      .map(|account| account.user.email.clone());
    if let Some(email) = email {
      state.refresh_tokens.retain(|_, owner| *owner != email);
    }
    Ok(())
  }

  async fn verify_otp(
    &self,
    token_hash: &str,
    confirmation_type: &str,
  ) -> Result<Option<Session>, GatewayError> {
    if !matches!(confirmation_type, "signup" | "email") {
      return Err(rejected(403, "Token has expired or is invalid"));
    }

    let mut state = self.state.write().await;
    let Some(email) = state.pending.remove(token_hash) else {
      return Err(rejected(403, "Token has expired or is invalid"));
    };
    let Some(account) = state.accounts.get_mut(&email) else {
      return Err(rejected(404, "User not found"));
    };
    account.user.email_confirmed_at = Some(Utc::now());
    let user = account.user.clone();

    Ok(Some(self.issue_session(&mut state, &email, user)))
  }

  async fn refresh_session(&self, refresh_token: &RefreshToken) -> Result<Session, GatewayError> {
    let mut state = self.state.write().await;
    let Some(email) = state.refresh_tokens.remove(refresh_token.as_str()) else {
      return Err(rejected(
        400,
        "Invalid Refresh Token: Refresh Token Not Found",
      ));
    };
    let Some(user) = state.accounts.get(&email).map(|account| account.user.clone()) else {
      return Err(rejected(404, "User not found"));
    };

    Ok(self.issue_session(&mut state, &email, user))
  }
}

/// Profiles come from the metadata captured at signup
#[async_trait]
impl ProfileRepository for InMemoryAuthGateway {
  async fn find_by_user_id(
    &self,
    user_id: Uuid,
    access_token: &AccessToken,
  ) -> Result<Option<Profile>, RepositoryError> {
    let state = self.state.read().await;
    if state.access_tokens.get(access_token.as_str()) != Some(&user_id) {
      return Err(RepositoryError::Unauthorized);
    }

    Ok(
      state
        .accounts
        .values()
        .find(|account| account.user.id == user_id)
        .map(|account| Profile {
          id: user_id,
          first_name: Some(account.profile.first_name.clone()),
          last_name: Some(account.profile.last_name.clone()),
          email: Some(account.profile.email.clone()),
          birthday: Some(account.profile.birthday.clone()).filter(|day| !day.is_empty()),
        }),
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::auth::entities::Credentials;

  fn signup_request(email: &str) -> SignupRequest {
    SignupRequest {
      credentials: Credentials {
        email: Email::new(email).unwrap(),
        password: Password::new("Abcdef1!"),
      },
      profile: SignupProfile {
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
        email: email.to_string(),
        birthday: String::new(),
        current_state: None,
      },
      email_redirect_to: None,
    }
  }

  async fn confirmed_session(gateway: &InMemoryAuthGateway, email: &str) -> Session {
    gateway.sign_up(&signup_request(email)).await.unwrap();
    let token_hash = gateway.pending_token_for(email).await.unwrap();
    gateway
      .verify_otp(&token_hash, "signup")
      .await
      .unwrap()
      .unwrap()
  }

  #[tokio::test]
  async fn test_signup_requires_confirmation() {
    let gateway = InMemoryAuthGateway::default();
    let outcome = gateway
      .sign_up(&signup_request("jane@example.com"))
      .await
      .unwrap();
    assert!(matches!(outcome, SignUpOutcome::ConfirmationSent(_)));

    let error = gateway
      .sign_in_with_password(
        &Email::new("jane@example.com").unwrap(),
        &Password::new("Abcdef1!"),
      )
      .await
      .unwrap_err();
    assert_eq!(error.reason(), "Email not confirmed");
  }

  #[tokio::test]
  async fn test_duplicate_signup_mentions_email() {
    let gateway = InMemoryAuthGateway::default();
    gateway
      .sign_up(&signup_request("jane@example.com"))
      .await
      .unwrap();
    let error = gateway
      .sign_up(&signup_request("jane@example.com"))
      .await
      .unwrap_err();
    assert!(error.reason().contains("email"));
  }

  #[tokio::test]
  async fn test_confirmation_token_is_single_use() {
    let gateway = InMemoryAuthGateway::default();
    gateway
      .sign_up(&signup_request("jane@example.com"))
      .await
      .unwrap();
    let token_hash = gateway.pending_token_for("jane@example.com").await.unwrap();

    assert!(gateway.verify_otp(&token_hash, "signup").await.is_ok());
    assert_eq!(
      gateway.verify_otp(&token_hash, "signup").await.unwrap_err().reason(),
      "Token has expired or is invalid"
    );
  }

  #[tokio::test]
  async fn test_login_refresh_logout() {
    let gateway = InMemoryAuthGateway::default();
    confirmed_session(&gateway, "jane@example.com").await;

    let session = gateway
      .sign_in_with_password(
        &Email::new("jane@example.com").unwrap(),
        &Password::new("Abcdef1!"),
      )
      .await
      .unwrap();
    let refreshed = gateway
      .refresh_session(&session.refresh_token)
      .await
      .unwrap();
    assert_ne!(refreshed.access_token, session.access_token);
    // Refresh tokens rotate
    assert!(gateway.refresh_session(&session.refresh_token).await.is_err());

    gateway.sign_out(&refreshed.access_token).await.unwrap();
    assert!(gateway.refresh_session(&refreshed.refresh_token).await.is_err());
  }

  #[tokio::test]
  async fn test_wrong_password() {
    let gateway = InMemoryAuthGateway::default();
    confirmed_session(&gateway, "jane@example.com").await;

    let error = gateway
      .sign_in_with_password(
        &Email::new("jane@example.com").unwrap(),
        &Password::new("nope"),
      )
      .await
      .unwrap_err();
    assert_eq!(error.reason(), "Invalid login credentials");
  }

  #[tokio::test]
  async fn test_profile_requires_owner_token() {
    let gateway = InMemoryAuthGateway::default();
    let session = confirmed_session(&gateway, "jane@example.com").await;

    let profile = gateway
      .find_by_user_id(session.user.id, &session.access_token)
      .await
      .unwrap()
      .unwrap();
    assert_eq!(profile.first_name.as_deref(), Some("Jane"));
    assert_eq!(profile.birthday, None);

    assert_eq!(
      gateway
        .find_by_user_id(Uuid::new_v4(), &session.access_token)
        .await,
      Err(RepositoryError::Unauthorized)
    );
  }
}
