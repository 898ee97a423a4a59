use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::RepositoryError;
use crate::domain::profile::{SettingsRepository, UserSettings};

/// Process-local settings store; contents are lost on restart
#[derive(Default)]
pub struct InMemorySettingsRepository {
  settings: RwLock<HashMap<Uuid, UserSettings>>,
}

impl InMemorySettingsRepository {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl SettingsRepository for InMemorySettingsRepository {
  async fn get(&self, user_id: Uuid) -> Result<UserSettings, RepositoryError> {
    Ok(
      self
        .settings
        .read()
        .await
        .get(&user_id)
        .cloned()
        .unwrap_or_default(),
    )
  }

  async fn save(&self, user_id: Uuid, settings: UserSettings) -> Result<(), RepositoryError> {
    self.settings.write().await.insert(user_id, settings);
    Ok(())
  }
}
