use actix_web::{
  HttpResponse,
  error::ResponseError,
  http::{StatusCode, header::ContentType},
};
use std::fmt;

use crate::domain::RepositoryError;
use crate::domain::profile::ProfileError;
use crate::infrastructure::security::SessionCipherError;

/// Failure of a page handler that is not shown inline on a form
#[derive(Debug)]
pub enum WebError {
  /// Handler reached without the session the route guard provides
  Unauthorized,

  /// A template failed to render
  Template(String),

  /// Anything else that ends the request
  Internal(String),
}

impl fmt::Display for WebError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      WebError::Unauthorized => write!(f, "Not signed in"),
      WebError::Template(msg) => write!(f, "Template error: {}", msg),
      WebError::Internal(msg) => write!(f, "Internal error: {}", msg),
    }
  }
}

impl ResponseError for WebError {
  fn status_code(&self) -> StatusCode {
    match self {
      WebError::Unauthorized => StatusCode::UNAUTHORIZED,
      WebError::Template(_) | WebError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let message = match self {
      WebError::Unauthorized => "Please sign in to continue.",
      WebError::Template(msg) | WebError::Internal(msg) => {
        // Details stay in the log
        tracing::error!("Request failed: {}", msg);
        "Something went wrong. Please try again."
      }
    };

    HttpResponse::build(self.status_code())
      .content_type(ContentType::html())
      .body(format!(
        "<!DOCTYPE html><html><body><p>{}</p><p><a href=\"/login\">Back to sign in</a></p></body></html>",
        message
      ))
  }
}

impl From<tera::Error> for WebError {
  fn from(error: tera::Error) -> Self {
    WebError::Template(format!("{:?}", error))
  }
}

impl From<RepositoryError> for WebError {
  fn from(error: RepositoryError) -> Self {
    match error {
      RepositoryError::Unauthorized => WebError::Unauthorized,
      other => WebError::Internal(other.to_string()),
    }
  }
}

impl From<ProfileError> for WebError {
  fn from(error: ProfileError) -> Self {
    match error {
      ProfileError::Repository(e) => e.into(),
      other => WebError::Internal(other.to_string()),
    }
  }
}

impl From<SessionCipherError> for WebError {
  fn from(error: SessionCipherError) -> Self {
    WebError::Internal(error.to_string())
  }
}
