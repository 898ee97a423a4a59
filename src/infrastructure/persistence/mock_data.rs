//! Fixed sample data behind the earnings, activity and notification ports.
//!
//! Every user sees the same figures.

use async_trait::async_trait;
use chrono::{NaiveTime, TimeZone, Utc};
use rust_decimal_macros::dec;
use uuid::Uuid;

use crate::domain::RepositoryError;
use crate::domain::earnings::{
  ActivityItem, DemandPoint, EarningKind, EarningRecord, EarningsRepository, GigActivityFeed,
  GigStats, SurveyRates, SurveyStats,
};
use crate::domain::notifications::{Notification, NotificationKind, NotificationRepository};

#[derive(Debug, Default, Clone)]
pub struct MockDataSource;

impl MockDataSource {
  pub fn new() -> Self {
    Self
  }
}

fn time(hour: u32, minute: u32) -> Result<NaiveTime, RepositoryError> {
  NaiveTime::from_hms_opt(hour, minute, 0)
    .ok_or_else(|| RepositoryError::Decode(format!("invalid time {hour}:{minute}")))
}

fn record(
  id: u32,
  amount: rust_decimal::Decimal,
  kind: EarningKind,
  duration: Option<&str>,
  (day, hour, minute): (u32, u32, u32),
) -> Result<EarningRecord, RepositoryError> {
  let created_at = Utc
    .with_ymd_and_hms(2024, 3, day, hour, minute, 0)
    .single()
    .ok_or_else(|| RepositoryError::Decode(format!("invalid timestamp for record {id}")))?;

  Ok(EarningRecord {
    id,
    amount,
    kind,
    duration: duration.map(str::to_string),
    created_at,
  })
}

#[async_trait]
impl EarningsRepository for MockDataSource {
  async fn find_by_user_id(&self, _user_id: Uuid) -> Result<Vec<EarningRecord>, RepositoryError> {
    use EarningKind::{Call, Text};

    Ok(vec![
      record(1, dec!(2.50), Text, None, (10, 14, 30))?,
      record(2, dec!(5.00), Call, Some("5 minutes"), (10, 15, 0))?,
      record(3, dec!(2.50), Text, None, (10, 16, 15))?,
      record(4, dec!(7.50), Call, Some("7.5 minutes"), (11, 10, 0))?,
      record(5, dec!(2.50), Text, None, (11, 11, 30))?,
      record(6, dec!(10.00), Call, Some("10 minutes"), (11, 14, 0))?,
    ])
  }
}

#[async_trait]
impl GigActivityFeed for MockDataSource {
  async fn gig_stats(&self, _user_id: Uuid) -> Result<GigStats, RepositoryError> {
    Ok(GigStats {
      earnings: dec!(54.20),
      jobs_completed: 8,
      time_online: "3h 22m".to_string(),
    })
  }

  async fn recent_activity(&self, _user_id: Uuid) -> Result<Vec<ActivityItem>, RepositoryError> {
    Ok(vec![
      ActivityItem {
        id: 1234,
        completed_at: time(14, 30)?,
        earnings: dec!(12.50),
      },
      ActivityItem {
        id: 1233,
        completed_at: time(13, 15)?,
        earnings: dec!(15.75),
      },
      ActivityItem {
        id: 1232,
        completed_at: time(12, 0)?,
        earnings: dec!(25.95),
      },
    ])
  }

  async fn survey_demand(&self) -> Result<Vec<DemandPoint>, RepositoryError> {
    Ok(
      [("9AM", 20), ("12PM", 45), ("3PM", 30), ("6PM", 60), ("9PM", 40)]
        .into_iter()
        .map(|(hour, demand)| DemandPoint {
          hour: hour.to_string(),
          demand,
        })
        .collect(),
    )
  }

  async fn survey_rates(&self) -> Result<SurveyRates, RepositoryError> {
    Ok(SurveyRates {
      text_survey: dec!(0.25),
      phone_call: dec!(1.00),
      surge_pricing: true,
    })
  }

  async fn survey_stats(&self, _user_id: Uuid) -> Result<SurveyStats, RepositoryError> {
    Ok(SurveyStats {
      weekly_goal: dec!(100),
      weekly_earnings: dec!(0),
      today_earnings: dec!(0),
      surveys_completed: 0,
    })
  }
}

#[async_trait]
impl NotificationRepository for MockDataSource {
  async fn find_by_user_id(&self, _user_id: Uuid) -> Result<Vec<Notification>, RepositoryError> {
    let notification = |id, title: &str, message: &str, timestamp: &str, kind| Notification {
      id,
      title: title.to_string(),
      message: message.to_string(),
      timestamp: timestamp.to_string(),
      kind,
    };

    Ok(vec![
      notification(
        1,
        "High Demand Alert",
        "Survey demand is high right now! Go online to earn more.",
        "2 hours ago",
        NotificationKind::Alert,
      ),
      notification(
        2,
        "Bonus Opportunity",
        "Complete 5 surveys today to earn a $5 bonus!",
        "5 hours ago",
        NotificationKind::Bonus,
      ),
      notification(
        3,
        "Survey Completed",
        "You earned $2.50 for completing a text survey",
        "Yesterday",
        NotificationKind::Earnings,
      ),
    ])
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_notifications_newest_first() {
    let notifications = NotificationRepository::find_by_user_id(&MockDataSource::new(), Uuid::new_v4())
      .await
      .unwrap();
    let kinds: Vec<_> = notifications.iter().map(|n| n.kind).collect();
    assert_eq!(
      kinds,
      vec![
        NotificationKind::Alert,
        NotificationKind::Bonus,
        NotificationKind::Earnings
      ]
    );
  }

  #[tokio::test]
  async fn test_demand_points() {
    let demand = MockDataSource::new().survey_demand().await.unwrap();
    assert_eq!(demand[3].hour, "6PM");
    assert_eq!(demand[3].demand, 60);
  }
}
