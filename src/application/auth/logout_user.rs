use crate::domain::auth::errors::GatewayError;
use crate::domain::auth::ports::SessionClient;

/// Use case for logging out a user
#[derive(Debug, Default)]
pub struct LogoutUserUseCase;

impl LogoutUserUseCase {
  pub fn new() -> Self {
    Self
  }

  /// Signs out at the auth service and drops the local session
  ///
  /// The local session is cleared even when the remote call fails; the
  /// failure is returned so the caller can log it.
  pub async fn execute<C>(&self, client: &mut C) -> Result<(), GatewayError>
  where
    C: SessionClient + ?Sized,
  {
    let result = client.sign_out().await;
    match &result {
      Ok(()) => tracing::info!("User logged out"),
      Err(e) => tracing::warn!("Remote sign-out failed, local session cleared: {}", e),
    }
    result
  }
}
