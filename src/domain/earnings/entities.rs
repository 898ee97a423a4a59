use chrono::{DateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ============================================================================
// Earnings history
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EarningKind {
  Text,
  Call,
}

impl EarningKind {
  pub const ALL: [EarningKind; 2] = [EarningKind::Text, EarningKind::Call];

  /// Heading used when earnings are grouped by kind
  pub fn label(&self) -> &'static str {
    match self {
      EarningKind::Text => "Text Surveys",
      EarningKind::Call => "Phone Calls",
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarningRecord {
  pub id: u32,
  pub amount: Decimal,
  pub kind: EarningKind,
  /// Call length as shown to the user; text surveys have none
  pub duration: Option<String>,
  pub created_at: DateTime<Utc>,
}

// ============================================================================
// Gig dashboard
// ============================================================================

/// Today's headline numbers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GigStats {
  pub earnings: Decimal,
  pub jobs_completed: u32,
  pub time_online: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityItem {
  pub id: u32,
  pub completed_at: NaiveTime,
  pub earnings: Decimal,
}

/// Relative survey demand (0-100) for an hour of the day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DemandPoint {
  pub hour: String,
  pub demand: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SurveyRates {
  pub text_survey: Decimal,
  pub phone_call: Decimal,
  pub surge_pricing: bool,
}

/// Weekly survey progress shown next to the rates
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SurveyStats {
  pub weekly_goal: Decimal,
  pub weekly_earnings: Decimal,
  pub today_earnings: Decimal,
  pub surveys_completed: u32,
}
