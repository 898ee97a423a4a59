use actix_governor::{
  Governor, GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor,
  governor::middleware::NoOpMiddleware,
};
use actix_web::{Scope, web};
use std::sync::Arc;

use crate::application::auth::{
  ConfirmEmailUseCase, LoginUserUseCase, LogoutUserUseCase, RegisterUserUseCase,
};
use crate::application::dashboard::{
  GetDashboardUseCase, GetEarningsUseCase, ListNotificationsUseCase,
};
use crate::application::profile::{GetProfileUseCase, UpdateSettingsUseCase};
use crate::domain::auth::AuthGateway;
use crate::infrastructure::config::{AuthConfig, RateLimitConfig};

use super::handlers::{pages, profile_web, web_auth};
use super::middleware::RouteGuard;
use super::session_cookie::SessionCookies;
use super::templates::TemplateEngine;

/// Per-IP limiter for the `/auth` form posts
///
/// Clones share one limiter state, so a single instance built in `main`
/// enforces the burst across every worker.
pub type AuthRateLimiter = GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware>;

/// Builds the `/auth` limiter, or `None` when disabled or misconfigured
pub fn auth_rate_limiter(config: &RateLimitConfig) -> Option<AuthRateLimiter> {
  if !config.enabled {
    return None;
  }

  let limiter = GovernorConfigBuilder::default()
    .seconds_per_request(config.seconds_per_request)
    .burst_size(config.burst_size)
    .finish();
  if limiter.is_none() {
    tracing::warn!("Invalid rate limit settings, /auth forms are not rate limited");
  }
  limiter
}

/// Everything the web routes need, built once in `main`
#[derive(Clone)]
pub struct WebRouteDependencies {
  pub templates: TemplateEngine,
  pub gateway: Arc<dyn AuthGateway>,
  pub cookies: SessionCookies,
  pub auth: AuthConfig,
  pub rate_limiter: Option<AuthRateLimiter>,
  pub login_use_case: Arc<LoginUserUseCase>,
  pub register_use_case: Arc<RegisterUserUseCase>,
  pub logout_use_case: Arc<LogoutUserUseCase>,
  pub confirm_email_use_case: Arc<ConfirmEmailUseCase>,
  pub dashboard_use_case: Arc<GetDashboardUseCase>,
  pub earnings_use_case: Arc<GetEarningsUseCase>,
  pub notifications_use_case: Arc<ListNotificationsUseCase>,
  pub profile_use_case: Arc<GetProfileUseCase>,
  pub update_settings_use_case: Arc<UpdateSettingsUseCase>,
}

/// Form posts under `/auth`
fn auth_form_routes() -> Scope {
  web::scope("/auth")
    .route("/login", web::post().to(web_auth::login_submit))
    .route("/signup", web::post().to(web_auth::signup_submit))
    .route("/logout", web::post().to(web_auth::logout))
    .route(
      "/validate/{field}",
      web::post().to(web_auth::validate_field),
    )
}

/// Configure the HTML routes
///
/// # Routes
///
/// Public:
/// - GET / - Redirect to the dashboard
/// - GET /login, GET /signup - Auth pages
/// - GET /auth/confirm - Email confirmation callback
/// - POST /auth/login, /auth/signup, /auth/logout, /auth/validate/{field}
/// - GET /health - Liveness check
///
/// Behind the route guard:
/// - GET /dashboard, /earnings, /notifications, /profile
/// - POST /profile/settings
pub fn configure_web_routes(cfg: &mut web::ServiceConfig, deps: WebRouteDependencies) {
  let guard = || RouteGuard::new(deps.gateway.clone(), deps.cookies.clone());

  cfg
    .app_data(web::Data::new(deps.templates.clone()))
    .app_data(web::Data::new(deps.gateway.clone()))
    .app_data(web::Data::new(deps.cookies.clone()))
    .app_data(web::Data::new(deps.auth.clone()))
    .app_data(web::Data::new(deps.login_use_case.clone()))
    .app_data(web::Data::new(deps.register_use_case.clone()))
    .app_data(web::Data::new(deps.logout_use_case.clone()))
    .app_data(web::Data::new(deps.confirm_email_use_case.clone()))
    .app_data(web::Data::new(deps.dashboard_use_case.clone()))
    .app_data(web::Data::new(deps.earnings_use_case.clone()))
    .app_data(web::Data::new(deps.notifications_use_case.clone()))
    .app_data(web::Data::new(deps.profile_use_case.clone()))
    .app_data(web::Data::new(deps.update_settings_use_case.clone()))
    .route("/", web::get().to(pages::root))
    .route("/health", web::get().to(pages::health))
    .route("/login", web::get().to(pages::login_page))
    .route("/signup", web::get().to(pages::signup_page))
    .route("/auth/confirm", web::get().to(web_auth::confirm));

  match &deps.rate_limiter {
    Some(limiter) => cfg.service(auth_form_routes().wrap(Governor::new(limiter))),
    None => cfg.service(auth_form_routes()),
  };

  cfg
    .service(
      web::scope("/dashboard")
        .wrap(guard())
        .route("", web::get().to(pages::dashboard_page)),
    )
    .service(
      web::scope("/earnings")
        .wrap(guard())
        .route("", web::get().to(pages::earnings_page)),
    )
    .service(
      web::scope("/notifications")
        .wrap(guard())
        .route("", web::get().to(pages::notifications_page)),
    )
    .service(
      web::scope("/profile")
        .wrap(guard())
        .route("", web::get().to(pages::profile_page))
        .route("/settings", web::post().to(profile_web::settings_submit)),
    );
}
