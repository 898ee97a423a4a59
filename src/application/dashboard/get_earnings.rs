use std::sync::Arc;
use uuid::Uuid;

use crate::domain::RepositoryError;
use crate::domain::earnings::ports::EarningsRepository;
use crate::domain::earnings::services::EarningsReport;

/// Use case for the earnings page
pub struct GetEarningsUseCase {
  earnings: Arc<dyn EarningsRepository>,
}

impl GetEarningsUseCase {
  pub fn new(earnings: Arc<dyn EarningsRepository>) -> Self {
    Self { earnings }
  }

  pub async fn execute(&self, user_id: Uuid) -> Result<EarningsReport, RepositoryError> {
    let records = self.earnings.find_by_user_id(user_id).await?;
    tracing::debug!(%user_id, count = records.len(), "Loaded earning records");
    Ok(EarningsReport::build(records))
  }
}
