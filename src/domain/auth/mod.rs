pub mod confirmation;
pub mod context;
pub mod entities;
pub mod errors;
pub mod guard;
pub mod ports;
pub mod validation;
pub mod value_objects;

// Re-export commonly used types
pub use confirmation::{ConfirmationFlow, ConfirmationState};
pub use context::{AuthContext, AuthSnapshot};
pub use entities::{Credentials, Session, SignupProfile, SignupRequest, User};
pub use errors::{AuthError, GatewayError, ValidationError};
pub use guard::{GuardDecision, LOGIN_PATH, guard};
pub use ports::{AuthGateway, SessionClient, SignUpOutcome};
pub use value_objects::{
  AccessToken, ConfirmationParams, DEFAULT_NEXT, Email, Password, RefreshToken,
};
