use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;

use super::web_auth::{SignupErrors, login_context, signup_context};
use super::{current_session, html, sync_cookie, visitor_context};
use crate::adapters::http::dtos::SignupForm;
use crate::adapters::http::errors::WebError;
use crate::adapters::http::redirect::redirect;
use crate::adapters::http::session_cookie::SessionCookies;
use crate::adapters::http::templates::TemplateEngine;
use crate::application::dashboard::{
  GetDashboardUseCase, GetEarningsUseCase, ListNotificationsUseCase,
};
use crate::application::profile::{GetProfileUseCase, ProfileView};
use crate::domain::auth::AuthGateway;
use crate::domain::earnings::share_of;
use crate::domain::profile::UserSettings;

pub const HOME_PATH: &str = "/dashboard";

pub async fn root() -> HttpResponse {
  HttpResponse::Found()
    .insert_header(("Location", HOME_PATH))
    .finish()
}

pub async fn health() -> HttpResponse {
  HttpResponse::Ok().body("OK")
}

/// Login page; signed-in visitors go straight home
pub async fn login_page(
  req: HttpRequest,
  templates: web::Data<TemplateEngine>,
  gateway: web::Data<Arc<dyn AuthGateway>>,
  cookies: web::Data<SessionCookies>,
) -> Result<HttpResponse, WebError> {
  let (context, stored) = visitor_context(&req, &gateway, &cookies).await;

  let response = if context.user().is_some() {
    redirect(req.headers(), HOME_PATH)
  } else {
    let mut page = login_context("", None, None);
    page.insert("title", "Log In");
    html(templates.render("pages/login.html.tera", &page)?)
  };

  sync_cookie(response, &cookies, &context, &stored)
}

/// Signup page; signed-in visitors go straight home
pub async fn signup_page(
  req: HttpRequest,
  templates: web::Data<TemplateEngine>,
  gateway: web::Data<Arc<dyn AuthGateway>>,
  cookies: web::Data<SessionCookies>,
) -> Result<HttpResponse, WebError> {
  let (context, stored) = visitor_context(&req, &gateway, &cookies).await;

  let response = if context.user().is_some() {
    redirect(req.headers(), HOME_PATH)
  } else {
    let mut page = signup_context(&SignupForm::default(), &SignupErrors::default());
    page.insert("title", "Sign Up");
    html(templates.render("pages/signup.html.tera", &page)?)
  };

  sync_cookie(response, &cookies, &context, &stored)
}

pub async fn dashboard_page(
  req: HttpRequest,
  templates: web::Data<TemplateEngine>,
  use_case: web::Data<Arc<GetDashboardUseCase>>,
) -> Result<HttpResponse, WebError> {
  let session = current_session(&req)?;
  let view = use_case.execute(&session).await?;

  let mut context = tera::Context::new();
  context.insert("title", "Dashboard");
  context.insert("active", "dashboard");
  context.insert(
    "weekly_progress",
    &share_of(
      view.survey_stats.weekly_earnings,
      view.survey_stats.weekly_goal,
    ),
  );
  context.insert("view", &view);

  Ok(html(templates.render("pages/dashboard.html.tera", &context)?))
}

pub async fn earnings_page(
  req: HttpRequest,
  templates: web::Data<TemplateEngine>,
  use_case: web::Data<Arc<GetEarningsUseCase>>,
) -> Result<HttpResponse, WebError> {
  let session = current_session(&req)?;
  let report = use_case.execute(session.user.id).await?;

  let mut context = tera::Context::new();
  context.insert("title", "Earnings");
  context.insert("active", "earnings");
  context.insert("report", &report);

  Ok(html(templates.render("pages/earnings.html.tera", &context)?))
}

pub async fn notifications_page(
  req: HttpRequest,
  templates: web::Data<TemplateEngine>,
  use_case: web::Data<Arc<ListNotificationsUseCase>>,
) -> Result<HttpResponse, WebError> {
  let session = current_session(&req)?;
  let notifications = use_case.execute(session.user.id).await?;

  let mut context = tera::Context::new();
  context.insert("title", "Notifications");
  context.insert("active", "notifications");
  context.insert("notifications", &notifications);

  Ok(html(templates.render("pages/notifications.html.tera", &context)?))
}

pub async fn profile_page(
  req: HttpRequest,
  templates: web::Data<TemplateEngine>,
  use_case: web::Data<Arc<GetProfileUseCase>>,
) -> Result<HttpResponse, WebError> {
  let session = current_session(&req)?;
  let view = use_case.execute(&session).await?;
  let weekly_goal_input = view.settings.weekly_goal.dollars().to_string();
  let context = profile_context(&view, &view.settings, &weekly_goal_input, None);

  Ok(html(templates.render("pages/profile.html.tera", &context)?))
}

/// Profile page context, with the settings form showing `settings`
pub(super) fn profile_context(
  view: &ProfileView,
  settings: &UserSettings,
  weekly_goal_input: &str,
  settings_error: Option<String>,
) -> tera::Context {
  let mut context = tera::Context::new();
  context.insert("title", "Profile");
  context.insert("active", "profile");
  context.insert("profile", &view.profile);
  context.insert("email", &view.email);
  context.insert("settings", settings);
  context.insert("weekly_goal_input", weekly_goal_input);
  context.insert("settings_error", &settings_error);
  context.insert("settings_saved", &false);
  context
}
