use thiserror::Error;

use crate::domain::RepositoryError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
  #[error("Weekly goal must be a whole number between 0 and 100000")]
  InvalidWeeklyGoal,

  #[error(transparent)]
  Repository(#[from] RepositoryError),
}
