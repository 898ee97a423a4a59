use async_trait::async_trait;
use uuid::Uuid;

use super::entities::{ActivityItem, DemandPoint, EarningRecord, GigStats, SurveyRates, SurveyStats};
use crate::domain::RepositoryError;

#[async_trait]
pub trait EarningsRepository: Send + Sync {
  async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<EarningRecord>, RepositoryError>;
}

/// Live gig figures for the dashboard
#[async_trait]
pub trait GigActivityFeed: Send + Sync {
  async fn gig_stats(&self, user_id: Uuid) -> Result<GigStats, RepositoryError>;
  async fn recent_activity(&self, user_id: Uuid) -> Result<Vec<ActivityItem>, RepositoryError>;
  async fn survey_demand(&self) -> Result<Vec<DemandPoint>, RepositoryError>;
  async fn survey_rates(&self) -> Result<SurveyRates, RepositoryError>;
  async fn survey_stats(&self, user_id: Uuid) -> Result<SurveyStats, RepositoryError>;
}
