use async_trait::async_trait;
use uuid::Uuid;

use super::entities::{Profile, UserSettings};
use crate::domain::RepositoryError;
use crate::domain::auth::AccessToken;

/// Read access to the hosted `profiles` table
#[async_trait]
pub trait ProfileRepository: Send + Sync {
  /// Row-level security means the caller's own token is required
  async fn find_by_user_id(
    &self,
    user_id: Uuid,
    access_token: &AccessToken,
  ) -> Result<Option<Profile>, RepositoryError>;
}

#[async_trait]
pub trait SettingsRepository: Send + Sync {
  /// Returns the defaults when nothing was saved yet
  async fn get(&self, user_id: Uuid) -> Result<UserSettings, RepositoryError>;
  async fn save(&self, user_id: Uuid, settings: UserSettings) -> Result<(), RepositoryError>;
}
