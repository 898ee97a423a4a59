use crate::domain::auth::confirmation::{ConfirmationFlow, ConfirmationState};
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::ports::SessionClient;
use crate::domain::auth::value_objects::ConfirmationParams;

/// Raw query parameters of a confirmation link
#[derive(Debug, Clone, Default)]
pub struct ConfirmEmailCommand {
  pub token_hash: Option<String>,
  pub confirmation_type: Option<String>,
  pub next: Option<String>,
}

/// Use case for handling the email confirmation callback
pub struct ConfirmEmailUseCase {
  default_next: String,
}

impl ConfirmEmailUseCase {
  pub fn new(default_next: impl Into<String>) -> Self {
    Self {
      default_next: default_next.into(),
    }
  }

  /// Runs the confirmation flow to completion
  ///
  /// # Returns
  /// The path to continue to on success
  pub async fn execute<C>(&self, client: &mut C, command: ConfirmEmailCommand) -> Result<String, AuthError>
  where
    C: SessionClient + ?Sized,
  {
    let params = ConfirmationParams::new(
      command.token_hash,
      command.confirmation_type,
      command.next,
      &self.default_next,
    );
    let mut flow = ConfirmationFlow::new(params);

    match flow.run(client).await {
      ConfirmationState::Success { next } => Ok(next.clone()),
      ConfirmationState::Failed { reason } => Err(reason.clone()),
      // run only returns terminal states
      _ => Err(AuthError::SessionNotEstablished),
    }
  }
}
