use actix_web::{
  HttpRequest,
  cookie::{Cookie, SameSite, time::Duration},
};

use crate::domain::auth::{AuthContext, Session};
use crate::infrastructure::config::SessionConfig;
use crate::infrastructure::security::{SessionCipher, SessionCipherError};

/// Session found on an incoming request
#[derive(Debug, Clone, Default)]
pub struct StoredSession {
  pub session: Option<Session>,
  /// A session cookie was sent, readable or not
  pub cookie_present: bool,
}

/// Reads and writes the sealed session cookie
#[derive(Clone)]
pub struct SessionCookies {
  cipher: SessionCipher,
  name: String,
  secure: bool,
  max_age_seconds: i64,
}

impl SessionCookies {
  pub fn new(cipher: SessionCipher, config: &SessionConfig) -> Self {
    Self {
      cipher,
      name: config.cookie_name.clone(),
      secure: config.secure_cookie,
      max_age_seconds: config.max_age_seconds,
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  /// Opens the session cookie on `req`, if any
  ///
  /// A cookie that fails to open (rotated key, tampering) counts as present
  /// but empty, so the caller clears it.
  pub fn stored_session(&self, req: &HttpRequest) -> StoredSession {
    let Some(cookie) = req.cookie(&self.name) else {
      return StoredSession::default();
    };

    let session = match self.cipher.open(cookie.value()) {
      Ok(session) => Some(session),
      Err(e) => {
        tracing::debug!("Ignoring unreadable session cookie: {}", e);
        None
      }
    };

    StoredSession {
      session,
      cookie_present: true,
    }
  }

  pub fn build(&self, session: &Session) -> Result<Cookie<'static>, SessionCipherError> {
    let sealed = self.cipher.seal(session)?;

    Ok(
      Cookie::build(self.name.clone(), sealed)
        .path("/")
        .http_only(true)
        .secure(self.secure)
        .same_site(SameSite::Lax)
        .max_age(Duration::seconds(self.max_age_seconds))
        .finish(),
    )
  }

  pub fn removal(&self) -> Cookie<'static> {
    Cookie::build(self.name.clone(), "")
      .path("/")
      .http_only(true)
      .secure(self.secure)
      .same_site(SameSite::Lax)
      .max_age(Duration::seconds(0))
      .finish()
  }

  /// Cookie to send back once `context` has been driven, if the stored copy
  /// is out of date
  pub fn write_back(
    &self,
    context: &AuthContext,
    stored: &StoredSession,
  ) -> Result<Option<Cookie<'static>>, SessionCipherError> {
    match context.session() {
      Some(session) if context.changed() => self.build(session).map(Some),
      Some(_) => Ok(None),
      None if stored.cookie_present => Ok(Some(self.removal())),
      None => Ok(None),
    }
  }
}
