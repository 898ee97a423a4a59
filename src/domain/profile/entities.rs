use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::ProfileError;

/// Row of the `profiles` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
  pub id: Uuid,
  #[serde(default)]
  pub first_name: Option<String>,
  #[serde(default)]
  pub last_name: Option<String>,
  #[serde(default)]
  pub email: Option<String>,
  #[serde(default)]
  pub birthday: Option<String>,
}

impl Profile {
  /// Name used in greetings; falls back to `fallback` when no first name is stored
  pub fn display_name<'a>(&'a self, fallback: &'a str) -> &'a str {
    self
      .first_name
      .as_deref()
      .map(str::trim)
      .filter(|name| !name.is_empty())
      .unwrap_or(fallback)
  }
}

// ============================================================================
// Settings
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeklyGoal(u32);

impl WeeklyGoal {
  pub const MAX: u32 = 100_000;
  pub const DEFAULT: u32 = 100;

  pub fn new(dollars: u32) -> Result<Self, ProfileError> {
    if dollars > Self::MAX {
      return Err(ProfileError::InvalidWeeklyGoal);
    }
    Ok(Self(dollars))
  }

  /// Parses raw form input: a whole, non-negative number of dollars
  pub fn parse(input: &str) -> Result<Self, ProfileError> {
    let input = input.trim();
    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
      return Err(ProfileError::InvalidWeeklyGoal);
    }
    let dollars = input
      .parse::<u32>()
      .map_err(|_| ProfileError::InvalidWeeklyGoal)?;
    Self::new(dollars)
  }

  pub fn dollars(&self) -> u32 {
    self.0
  }
}

impl Default for WeeklyGoal {
  fn default() -> Self {
    Self(Self::DEFAULT)
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSettings {
  pub weekly_goal: WeeklyGoal,
  pub notifications_enabled: bool,
  pub dark_mode: bool,
}

impl Default for UserSettings {
  fn default() -> Self {
    Self {
      weekly_goal: WeeklyGoal::default(),
      notifications_enabled: true,
      dark_mode: false,
    }
  }
}
