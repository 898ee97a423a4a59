//! Authentication use cases
//!
//! Each use case drives a `SessionClient` owned by the caller, so the same
//! code runs against the per-request auth context and against test doubles.

mod confirm_email;
mod login_user;
mod logout_user;
mod register_user;

#[cfg(test)]
pub(crate) mod fakes;

pub use confirm_email::{ConfirmEmailCommand, ConfirmEmailUseCase};
pub use login_user::{LoginError, LoginUserCommand, LoginUserUseCase};
pub use logout_user::LogoutUserUseCase;
pub use register_user::{
  RegisterError, RegisterUserCommand, RegisterUserResponse, RegisterUserUseCase, SignupFailure,
  UNEXPECTED_SIGNUP_ERROR,
};
