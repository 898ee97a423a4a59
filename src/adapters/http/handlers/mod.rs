pub mod pages;
pub mod profile_web;
pub mod web_auth;

use actix_web::{HttpMessage, HttpRequest, HttpResponse, cookie::Cookie};
use std::sync::Arc;

use crate::adapters::http::errors::WebError;
use crate::adapters::http::session_cookie::{SessionCookies, StoredSession};
use crate::domain::auth::{AuthContext, AuthGateway, Session};

/// Session placed in request extensions by the route guard
pub(crate) fn current_session(req: &HttpRequest) -> Result<Session, WebError> {
  req
    .extensions()
    .get::<Session>()
    .cloned()
    .ok_or(WebError::Unauthorized)
}

/// Hydrated auth context for a public page or form post
pub(crate) async fn visitor_context(
  req: &HttpRequest,
  gateway: &Arc<dyn AuthGateway>,
  cookies: &SessionCookies,
) -> (AuthContext, StoredSession) {
  let stored = cookies.stored_session(req);
  let mut context = AuthContext::new(gateway.clone());
  context.hydrate(stored.session.clone()).await;
  (context, stored)
}

pub(crate) fn html(body: String) -> HttpResponse {
  HttpResponse::Ok()
    .content_type("text/html; charset=utf-8")
    .body(body)
}

pub(crate) fn with_cookie(
  mut response: HttpResponse,
  cookie: Option<Cookie<'static>>,
) -> Result<HttpResponse, WebError> {
  if let Some(cookie) = cookie {
    response
      .add_cookie(&cookie)
      .map_err(|e| WebError::Internal(e.to_string()))?;
  }
  Ok(response)
}

/// Writes the context's final session back to the response
pub(crate) fn sync_cookie(
  response: HttpResponse,
  cookies: &SessionCookies,
  context: &AuthContext,
  stored: &StoredSession,
) -> Result<HttpResponse, WebError> {
  let cookie = cookies.write_back(context, stored)?;
  with_cookie(response, cookie)
}
