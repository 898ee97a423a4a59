use std::sync::Arc;
use uuid::Uuid;

use crate::domain::RepositoryError;
use crate::domain::notifications::{Notification, NotificationRepository};

/// Use case for the notifications page
pub struct ListNotificationsUseCase {
  notifications: Arc<dyn NotificationRepository>,
}

impl ListNotificationsUseCase {
  pub fn new(notifications: Arc<dyn NotificationRepository>) -> Self {
    Self { notifications }
  }

  pub async fn execute(&self, user_id: Uuid) -> Result<Vec<Notification>, RepositoryError> {
    self.notifications.find_by_user_id(user_id).await
  }
}
