use serde::Serialize;
use std::sync::Arc;

use crate::domain::auth::entities::Session;
use crate::domain::profile::{Profile, ProfileError, ProfileRepository, SettingsRepository, UserSettings};

#[derive(Debug, Clone, Serialize)]
pub struct ProfileView {
  /// `None` when no profile row exists for the user
  pub profile: Option<Profile>,
  pub email: String,
  pub settings: UserSettings,
}

/// Use case for the profile page
pub struct GetProfileUseCase {
  profiles: Arc<dyn ProfileRepository>,
  settings: Arc<dyn SettingsRepository>,
}

impl GetProfileUseCase {
  pub fn new(profiles: Arc<dyn ProfileRepository>, settings: Arc<dyn SettingsRepository>) -> Self {
    Self { profiles, settings }
  }

  pub async fn execute(&self, session: &Session) -> Result<ProfileView, ProfileError> {
    let user = &session.user;
    let profile = self
      .profiles
      .find_by_user_id(user.id, &session.access_token)
      .await?;
    let settings = self.settings.get(user.id).await?;

    Ok(ProfileView {
      profile,
      email: user.email.clone(),
      settings,
    })
  }
}
