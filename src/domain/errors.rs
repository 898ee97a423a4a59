use thiserror::Error;

/// Errors raised by data sources behind the domain ports
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
  #[error("Data source unavailable: {0}")]
  Unavailable(String),

  #[error("Query execution failed: {0}")]
  QueryFailed(String),

  #[error("Unexpected data format: {0}")]
  Decode(String),

  #[error("Not authorized to read this record")]
  Unauthorized,
}

impl From<reqwest::Error> for RepositoryError {
  fn from(error: reqwest::Error) -> Self {
    if error.is_decode() {
      RepositoryError::Decode(error.to_string())
    } else if error.is_timeout() || error.is_connect() {
      RepositoryError::Unavailable(error.to_string())
    } else {
      RepositoryError::QueryFailed(error.to_string())
    }
  }
}
