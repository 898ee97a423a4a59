use super::context::AuthSnapshot;

pub const LOGIN_PATH: &str = "/login";

/// What a protected page does for a given auth snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
  /// Auth state still loading; render nothing yet
  Wait,
  /// No user; send the visitor to the given path and render nothing
  Redirect(&'static str),
  Render,
}

pub fn guard(snapshot: &AuthSnapshot) -> GuardDecision {
  if snapshot.loading {
    GuardDecision::Wait
  } else if snapshot.user.is_none() {
    GuardDecision::Redirect(LOGIN_PATH)
  } else {
    GuardDecision::Render
  }
}
