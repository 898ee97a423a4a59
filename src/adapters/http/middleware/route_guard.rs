use actix_web::{
  Error, HttpMessage, HttpResponse,
  body::EitherBody,
  dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures_util::future::LocalBoxFuture;
use std::{future::ready, rc::Rc, sync::Arc};

use crate::adapters::http::redirect::redirect;
use crate::adapters::http::session_cookie::SessionCookies;
use crate::domain::auth::{AuthContext, AuthGateway, GuardDecision, guard};

/// Gate for signed-in pages
///
/// Rebuilds the visitor's auth context from the session cookie, refreshing
/// a stale access token, and only lets the request through when a user is
/// present. The session is then available to handlers through request
/// extensions. Anyone else is sent to the login page and nothing of the page
/// is rendered.
pub struct RouteGuard {
  gateway: Arc<dyn AuthGateway>,
  cookies: SessionCookies,
}

impl RouteGuard {
  pub fn new(gateway: Arc<dyn AuthGateway>, cookies: SessionCookies) -> Self {
    Self { gateway, cookies }
  }
}

impl<S, B> Transform<S, ServiceRequest> for RouteGuard
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type InitError = ();
  type Transform = RouteGuardService<S>;
  type Future = std::future::Ready<Result<Self::Transform, Self::InitError>>;

  fn new_transform(&self, service: S) -> Self::Future {
    ready(Ok(RouteGuardService {
      service: Rc::new(service),
      gateway: self.gateway.clone(),
      cookies: self.cookies.clone(),
    }))
  }
}

pub struct RouteGuardService<S> {
  service: Rc<S>,
  gateway: Arc<dyn AuthGateway>,
  cookies: SessionCookies,
}

impl<S, B> Service<ServiceRequest> for RouteGuardService<S>
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

  forward_ready!(service);

  fn call(&self, req: ServiceRequest) -> Self::Future {
    let stored = self.cookies.stored_session(req.request());
    let gateway = self.gateway.clone();
    let cookies = self.cookies.clone();
    let service = Rc::clone(&self.service);

    Box::pin(async move {
      let mut context = AuthContext::new(gateway);
      context.hydrate(stored.session.clone()).await;

      let write_back = match cookies.write_back(&context, &stored) {
        Ok(cookie) => cookie,
        Err(e) => {
          tracing::error!("Failed to reseal session cookie: {}", e);
          None
        }
      };

      match guard(&context.snapshot()) {
        GuardDecision::Render => {
          if let Some(session) = context.session() {
            req.extensions_mut().insert(session.clone());
          }
          let mut res = service.call(req).await?;
          if let Some(cookie) = write_back {
            res.response_mut().add_cookie(&cookie)?;
          }
          Ok(res.map_into_left_body())
        }
        GuardDecision::Redirect(location) => {
          tracing::debug!(path = %req.path(), "No signed-in user, redirecting to {}", location);
          let mut response = redirect(req.headers(), location);
          if let Some(cookie) = write_back {
            response.add_cookie(&cookie)?;
          }
          Ok(req.into_response(response).map_into_right_body())
        }
        // Not reachable after hydrate; render nothing
        GuardDecision::Wait => {
          Ok(req.into_response(HttpResponse::NoContent().finish()).map_into_right_body())
        }
      }
    })
  }
}
