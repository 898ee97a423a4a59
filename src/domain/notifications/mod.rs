use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::RepositoryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
  Alert,
  Bonus,
  Earnings,
}

impl NotificationKind {
  pub fn label(&self) -> &'static str {
    match self {
      NotificationKind::Alert => "Alert",
      NotificationKind::Bonus => "Bonus",
      NotificationKind::Earnings => "Earnings",
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
  pub id: u32,
  pub title: String,
  pub message: String,
  /// Relative time as displayed, e.g. "2 hours ago"
  pub timestamp: String,
  pub kind: NotificationKind,
}

#[async_trait]
pub trait NotificationRepository: Send + Sync {
  /// Newest first
  async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<Notification>, RepositoryError>;
}
