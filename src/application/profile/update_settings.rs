use std::sync::Arc;
use uuid::Uuid;

use crate::domain::profile::{ProfileError, SettingsRepository, UserSettings, WeeklyGoal};

/// Settings form as submitted
#[derive(Debug, Clone)]
pub struct UpdateSettingsCommand {
  /// Raw input; must be a whole number of dollars
  pub weekly_goal: String,
  pub notifications_enabled: bool,
  pub dark_mode: bool,
}

/// Use case for saving the profile settings form
pub struct UpdateSettingsUseCase {
  settings: Arc<dyn SettingsRepository>,
}

impl UpdateSettingsUseCase {
  pub fn new(settings: Arc<dyn SettingsRepository>) -> Self {
    Self { settings }
  }

  pub async fn execute(
    &self,
    user_id: Uuid,
    command: UpdateSettingsCommand,
  ) -> Result<UserSettings, ProfileError> {
    let settings = UserSettings {
      weekly_goal: WeeklyGoal::parse(&command.weekly_goal)?,
      notifications_enabled: command.notifications_enabled,
      dark_mode: command.dark_mode,
    };

    self.settings.save(user_id, settings.clone()).await?;
    tracing::info!(%user_id, "Settings updated");
    Ok(settings)
  }
}
