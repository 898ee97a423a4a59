use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;

use super::supabase_client::{SessionOrUser, SupabaseClient, TokenResponse, ensure_success};
use crate::domain::auth::entities::{Session, SignupRequest};
use crate::domain::auth::errors::GatewayError;
use crate::domain::auth::ports::{AuthGateway, SignUpOutcome};
use crate::domain::auth::value_objects::{AccessToken, Email, Password, RefreshToken};

/// `AuthGateway` over the GoTrue REST API of a Supabase project
pub struct SupabaseAuthGateway {
  client: SupabaseClient,
}

impl SupabaseAuthGateway {
  pub fn new(client: SupabaseClient) -> Self {
    Self { client }
  }

  async fn token_grant(
    &self,
    grant_type: &str,
    body: serde_json::Value,
  ) -> Result<Session, GatewayError> {
    let response = self
      .client
      .post(&format!("/auth/v1/token?grant_type={}", grant_type), None)
      .json(&body)
      .send()
      .await?;
    let token: TokenResponse = ensure_success(response).await?.json().await?;
    Ok(token.into_session(Utc::now()))
  }
}

#[async_trait]
impl AuthGateway for SupabaseAuthGateway {
  async fn sign_up(&self, request: &SignupRequest) -> Result<SignUpOutcome, GatewayError> {
    let mut builder = self.client.post("/auth/v1/signup", None);
    if let Some(redirect_to) = &request.email_redirect_to {
      builder = builder.query(&[("redirect_to", redirect_to)]);
    }

    let response = builder
      .json(&json!({
        "email": request.credentials.email.as_str(),
        "password": request.credentials.password.as_str(),
        "data": request.profile.metadata(),
      }))
      .send()
      .await?;

    let outcome = match ensure_success(response).await?.json::<SessionOrUser>().await? {
      SessionOrUser::Session(token) => SignUpOutcome::SignedIn(token.into_session(Utc::now())),
      SessionOrUser::Nested { user } | SessionOrUser::User(user) => {
        SignUpOutcome::ConfirmationSent(user.into())
      }
    };
    Ok(outcome)
  }

  async fn sign_in_with_password(
    &self,
    email: &Email,
    password: &Password,
  ) -> Result<Session, GatewayError> {
    self
      .token_grant(
        "password",
        json!({ "email": email.as_str(), "password": password.as_str() }),
      )
      .await
  }

  async fn sign_out(&self, access_token: &AccessToken) -> Result<(), GatewayError> {
    let response = self
      .client
      .post("/auth/v1/logout", Some(access_token))
      .send()
      .await?;
    ensure_success(response).await?;
    Ok(())
  }

  async fn verify_otp(
    &self,
    token_hash: &str,
    confirmation_type: &str,
  ) -> Result<Option<Session>, GatewayError> {
    let response = self
      .client
      .post("/auth/v1/verify", None)
      .json(&json!({ "token_hash": token_hash, "type": confirmation_type }))
      .send()
      .await?;

    match ensure_success(response).await?.json::<SessionOrUser>().await? {
      SessionOrUser::Session(token) => Ok(Some(token.into_session(Utc::now()))),
      SessionOrUser::Nested { .. } | SessionOrUser::User(_) => Ok(None),
    }
  }

  async fn refresh_session(&self, refresh_token: &RefreshToken) -> Result<Session, GatewayError> {
    self
      .token_grant(
        "refresh_token",
        json!({ "refresh_token": refresh_token.as_str() }),
      )
      .await
  }
}
