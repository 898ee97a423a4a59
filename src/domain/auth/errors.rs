use thiserror::Error;

/// Input validation errors
///
/// The `Display` output of each variant is the message shown next to the
/// offending form field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("Please enter valid email")]
  InvalidEmail,

  #[error("Password must be at least {min} characters long")]
  PasswordTooShort { min: usize },

  #[error("Password must contain at least one uppercase letter")]
  PasswordMissingUppercase,

  #[error("Password must contain at least one lowercase letter")]
  PasswordMissingLowercase,

  #[error("Password must contain at least one number")]
  PasswordMissingDigit,

  #[error("Password must contain at least one special character")]
  PasswordMissingSpecial,

  #[error("{field} is required")]
  MissingField { field: String },

  #[error("Please enter a valid {field}")]
  InvalidField { field: String },
}

/// Failures reported by the hosted authentication service
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
  /// The service answered and refused the request
  #[error("{message}")]
  Rejected { status: u16, message: String },

  /// An operation needed a session but none is held
  #[error("Auth session missing!")]
  SessionMissing,

  #[error("Could not reach the authentication service: {0}")]
  Transport(String),

  #[error("Unexpected response from the authentication service: {0}")]
  Decode(String),
}

impl GatewayError {
  /// Text suitable for showing to the user
  pub fn reason(&self) -> String {
    self.to_string()
  }
}

impl From<reqwest::Error> for GatewayError {
  fn from(error: reqwest::Error) -> Self {
    if error.is_decode() {
      GatewayError::Decode(error.to_string())
    } else {
      GatewayError::Transport(error.to_string())
    }
  }
}

/// Main authentication error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
  #[error("Missing confirmation parameters")]
  MissingConfirmationParameters,

  #[error("Could not establish session after verification")]
  SessionNotEstablished,

  #[error(transparent)]
  Gateway(#[from] GatewayError),

  #[error(transparent)]
  Validation(#[from] ValidationError),
}
