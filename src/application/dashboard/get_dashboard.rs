use serde::Serialize;
use std::sync::Arc;

use crate::domain::RepositoryError;
use crate::domain::auth::entities::Session;
use crate::domain::earnings::entities::{
  ActivityItem, DemandPoint, GigStats, SurveyRates, SurveyStats,
};
use crate::domain::earnings::ports::GigActivityFeed;
use crate::domain::profile::ports::ProfileRepository;

/// Everything the home page shows
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
  /// First name from the profile, or the email address
  pub greeting_name: String,
  pub stats: GigStats,
  pub activity: Vec<ActivityItem>,
  pub demand: Vec<DemandPoint>,
  pub rates: SurveyRates,
  pub survey_stats: SurveyStats,
}

/// Use case for assembling the dashboard
pub struct GetDashboardUseCase {
  profiles: Arc<dyn ProfileRepository>,
  feed: Arc<dyn GigActivityFeed>,
}

impl GetDashboardUseCase {
  pub fn new(profiles: Arc<dyn ProfileRepository>, feed: Arc<dyn GigActivityFeed>) -> Self {
    Self { profiles, feed }
  }

  /// A missing or unreadable profile only degrades the greeting
  pub async fn execute(&self, session: &Session) -> Result<DashboardView, RepositoryError> {
    let user = &session.user;

    let profile = match self
      .profiles
      .find_by_user_id(user.id, &session.access_token)
      .await
    {
      Ok(profile) => profile,
      Err(e) => {
        tracing::warn!(user_id = %user.id, "Profile lookup failed: {}", e);
        None
      }
    };
    let mailbox = user.email.split('@').next().unwrap_or(&user.email);
    let greeting_name = profile
      .as_ref()
      .map(|profile| profile.display_name(mailbox))
      .unwrap_or(mailbox)
      .to_string();

    Ok(DashboardView {
      greeting_name,
      stats: self.feed.gig_stats(user.id).await?,
      activity: self.feed.recent_activity(user.id).await?,
      demand: self.feed.survey_demand().await?,
      rates: self.feed.survey_rates().await?,
      survey_stats: self.feed.survey_stats(user.id).await?,
    })
  }
}
