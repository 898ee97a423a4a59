//! Email confirmation callback as an explicit state machine.
//!
//! `Start -> Verifying -> SessionCheck -> (Success | Refreshing)`, where
//! `Refreshing` ends in `Success` or `Failed`. Any gateway failure moves
//! straight to `Failed`. Both terminal states are sticky.

use super::errors::AuthError;
use super::ports::SessionClient;
use super::value_objects::ConfirmationParams;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationState {
  Start,
  Verifying,
  SessionCheck,
  Refreshing,
  /// Confirmed; the caller navigates to `next`
  Success { next: String },
  /// Terminal failure; the caller shows `reason` and falls back to login
  Failed { reason: AuthError },
}

impl ConfirmationState {
  pub fn is_terminal(&self) -> bool {
    matches!(self, Self::Success { .. } | Self::Failed { .. })
  }

  fn name(&self) -> &'static str {
    match self {
      Self::Start => "start",
      Self::Verifying => "verifying",
      Self::SessionCheck => "session_check",
      Self::Refreshing => "refreshing",
      Self::Success { .. } => "success",
      Self::Failed { .. } => "failed",
    }
  }
}

pub struct ConfirmationFlow {
  params: ConfirmationParams,
  state: ConfirmationState,
}

impl ConfirmationFlow {
  pub fn new(params: ConfirmationParams) -> Self {
    Self {
      params,
      state: ConfirmationState::Start,
    }
  }

  pub fn state(&self) -> &ConfirmationState {
    &self.state
  }

  /// Drives the flow to a terminal state
  ///
  /// Once settled, further calls return the settled outcome without touching
  /// the client.
  pub async fn run<C>(&mut self, client: &mut C) -> &ConfirmationState
  where
    C: SessionClient + ?Sized,
  {
    while !self.state.is_terminal() {
      let next = self.step(client).await;
      tracing::debug!(from = self.state.name(), to = next.name(), "Confirmation transition");
      if let ConfirmationState::Failed { reason } = &next {
        tracing::warn!("Email confirmation failed: {}", reason);
      }
      self.state = next;
    }
    &self.state
  }

  async fn step<C>(&self, client: &mut C) -> ConfirmationState
  where
    C: SessionClient + ?Sized,
  {
    match &self.state {
      ConfirmationState::Start => match self.params.verification() {
        Some(_) => ConfirmationState::Verifying,
        None => failed(AuthError::MissingConfirmationParameters),
      },
      ConfirmationState::Verifying => {
        // Start only advances here when both values are present
        let Some((token_hash, confirmation_type)) = self.params.verification() else {
          return failed(AuthError::MissingConfirmationParameters);
        };
        match client
          .verify_confirmation_token(token_hash, confirmation_type)
          .await
        {
          Ok(()) => ConfirmationState::SessionCheck,
          Err(e) => failed(e.into()),
        }
      }
      ConfirmationState::SessionCheck => match client.get_session().await {
        Ok(Some(_)) => self.success(),
        Ok(None) => ConfirmationState::Refreshing,
        Err(e) => failed(e.into()),
      },
      ConfirmationState::Refreshing => {
        if let Err(e) = client.refresh_session().await {
          return failed(e.into());
        }
        match client.get_session().await {
          Ok(Some(_)) => self.success(),
          Ok(None) | Err(_) => failed(AuthError::SessionNotEstablished),
        }
      }
      settled => settled.clone(),
    }
  }

  fn success(&self) -> ConfirmationState {
    ConfirmationState::Success {
      next: self.params.next().to_string(),
    }
  }
}

fn failed(reason: AuthError) -> ConfirmationState {
  ConfirmationState::Failed { reason }
}
