use actix_web::{HttpRequest, HttpResponse, web};
use serde::Serialize;
use std::sync::Arc;

use super::pages::HOME_PATH;
use super::{html, sync_cookie, visitor_context, with_cookie};
use crate::adapters::http::dtos::{ConfirmQuery, LoginForm, SignupForm};
use crate::adapters::http::errors::WebError;
use crate::adapters::http::redirect::{is_htmx, redirect};
use crate::adapters::http::session_cookie::SessionCookies;
use crate::adapters::http::templates::TemplateEngine;
use crate::application::auth::{
  ConfirmEmailUseCase, LoginError, LoginUserUseCase, LogoutUserUseCase, RegisterError,
  RegisterUserResponse, RegisterUserUseCase, SignupFailure,
};
use crate::domain::auth::validation::{US_STATES, password_messages, validate_email};
use crate::domain::auth::{AuthContext, AuthGateway, LOGIN_PATH};
use crate::infrastructure::config::AuthConfig;

const MONTHS: [&str; 12] = [
  "January",
  "February",
  "March",
  "April",
  "May",
  "June",
  "July",
  "August",
  "September",
  "October",
  "November",
  "December",
];

/// Messages shown on the signup form
#[derive(Debug, Clone, Default, Serialize)]
pub struct SignupErrors {
  pub email: Option<String>,
  pub password: Vec<String>,
  pub general: Vec<String>,
}

impl From<RegisterError> for SignupErrors {
  fn from(error: RegisterError) -> Self {
    let mut errors = SignupErrors::default();
    match error {
      RegisterError::InvalidEmail(e) => errors.email = Some(e.to_string()),
      RegisterError::WeakPassword(rules) => {
        errors.password = rules.iter().map(ToString::to_string).collect();
      }
      RegisterError::InvalidProfile(messages) => errors.general = messages,
      RegisterError::Rejected(failure) => match failure {
        SignupFailure::EmailTaken => errors.email = Some(failure.message().to_string()),
        SignupFailure::Password(message) => errors.password = vec![message],
        SignupFailure::General(message) => errors.general = vec![message],
      },
    }
    errors
  }
}

pub(crate) fn login_context(
  email: &str,
  email_error: Option<&str>,
  form_error: Option<&str>,
) -> tera::Context {
  let mut context = tera::Context::new();
  context.insert("email", email);
  context.insert("email_error", &email_error);
  context.insert("form_error", &form_error);
  context.insert("attempted", &(email_error.is_some() || form_error.is_some()));
  context
}

/// Form values echo back everything except the password
pub(crate) fn signup_context(form: &SignupForm, errors: &SignupErrors) -> tera::Context {
  let mut context = tera::Context::new();
  context.insert(
    "form",
    &serde_json::json!({
      "email": form.email,
      "first_name": form.first_name,
      "last_name": form.last_name,
      "birth_month": form.birth_month,
      "birth_day": form.birth_day,
      "birth_year": form.birth_year,
      "current_state": form.current_state,
    }),
  );
  context.insert("errors", errors);
  context.insert("attempted", &form.attempted());
  context.insert("months", &MONTHS[..]);
  context.insert("us_states", &US_STATES[..]);
  context
}

/// Inline form for htmx swaps, the whole page otherwise
fn render_form(
  req: &HttpRequest,
  templates: &TemplateEngine,
  partial: &str,
  page: &str,
  context: &tera::Context,
) -> Result<HttpResponse, WebError> {
  let template = if is_htmx(req.headers()) { partial } else { page };
  let body = templates.render(template, context)?;

  Ok(
    HttpResponse::BadRequest()
      .content_type("text/html; charset=utf-8")
      .body(body),
  )
}

/// Handle login form submission
pub async fn login_submit(
  req: HttpRequest,
  form: web::Form<LoginForm>,
  use_case: web::Data<Arc<LoginUserUseCase>>,
  templates: web::Data<TemplateEngine>,
  gateway: web::Data<Arc<dyn AuthGateway>>,
  cookies: web::Data<SessionCookies>,
) -> Result<HttpResponse, WebError> {
  let form = form.into_inner();
  let email = form.email.clone();
  let mut context = AuthContext::signed_out(gateway.get_ref().clone());

  match use_case.execute(&mut context, form.into()).await {
    Ok(session) => {
      tracing::info!(user_id = %session.user.id, "Login successful");
      let cookie = cookies.build(&session)?;
      with_cookie(redirect(req.headers(), HOME_PATH), Some(cookie))
    }
    Err(error) => {
      let message = error.to_string();
      let page = match error {
        LoginError::InvalidEmail(_) => login_context(&email, Some(&message), None),
        LoginError::InvalidCredentials => login_context(&email, None, Some(&message)),
      };
      render_form(
        &req,
        &templates,
        "partials/login_form.html.tera",
        "pages/login.html.tera",
        &page,
      )
    }
  }
}

/// Handle signup form submission
pub async fn signup_submit(
  req: HttpRequest,
  form: web::Form<SignupForm>,
  use_case: web::Data<Arc<RegisterUserUseCase>>,
  templates: web::Data<TemplateEngine>,
  gateway: web::Data<Arc<dyn AuthGateway>>,
  cookies: web::Data<SessionCookies>,
) -> Result<HttpResponse, WebError> {
  let mut form = form.into_inner();
  form.attempted = Some("1".to_string());
  let mut context = AuthContext::signed_out(gateway.get_ref().clone());

  match use_case.execute(&mut context, form.clone().into()).await {
    Ok(RegisterUserResponse::ConfirmationSent { email }) => {
      let mut page = tera::Context::new();
      page.insert("title", "Check your email");
      page.insert("email", &email);
      let template = if is_htmx(req.headers()) {
        "partials/signup_sent.html.tera"
      } else {
        "pages/signup_sent.html.tera"
      };
      Ok(html(templates.render(template, &page)?))
    }
    Ok(RegisterUserResponse::SignedIn(session)) => {
      let cookie = cookies.build(&session)?;
      with_cookie(redirect(req.headers(), HOME_PATH), Some(cookie))
    }
    Err(error) => {
      let mut page = signup_context(&form, &SignupErrors::from(error));
      page.insert("title", "Sign Up");
      render_form(
        &req,
        &templates,
        "partials/signup_form.html.tera",
        "pages/signup.html.tera",
        &page,
      )
    }
  }
}

/// Re-validates one field after the first submit
///
/// Before the form has been submitted nothing is reported.
pub async fn validate_field(
  field: web::Path<String>,
  form: web::Form<SignupForm>,
  templates: web::Data<TemplateEngine>,
) -> Result<HttpResponse, WebError> {
  let messages = match field.as_str() {
    "email" => validate_email(&form.email)
      .err()
      .map(|e| vec![e.to_string()])
      .unwrap_or_default(),
    "password" => password_messages(&form.password),
    _ => return Ok(HttpResponse::NotFound().finish()),
  };
  let messages = if form.attempted() { messages } else { Vec::new() };

  let mut context = tera::Context::new();
  context.insert("messages", &messages);
  Ok(html(
    templates.render("partials/field_errors.html.tera", &context)?,
  ))
}

/// Target of the emailed confirmation link
pub async fn confirm(
  req: HttpRequest,
  query: web::Query<ConfirmQuery>,
  use_case: web::Data<Arc<ConfirmEmailUseCase>>,
  templates: web::Data<TemplateEngine>,
  gateway: web::Data<Arc<dyn AuthGateway>>,
  cookies: web::Data<SessionCookies>,
  auth_config: web::Data<AuthConfig>,
) -> Result<HttpResponse, WebError> {
  let (mut context, stored) = visitor_context(&req, &gateway, &cookies).await;

  let response = match use_case
    .execute(&mut context, query.into_inner().into())
    .await
  {
    Ok(next) => HttpResponse::Found()
      .insert_header(("Location", next))
      .finish(),
    Err(reason) => {
      let delay = auth_config.confirmation_redirect_delay_seconds;
      let mut page = tera::Context::new();
      page.insert("title", "Confirmation Failed");
      page.insert("reason", &reason.to_string());
      page.insert("delay", &delay);
      page.insert("login_path", LOGIN_PATH);
      let body = templates.render("pages/confirm_failed.html.tera", &page)?;

      HttpResponse::Ok()
        .insert_header(("Refresh", format!("{}; url={}", delay, LOGIN_PATH)))
        .content_type("text/html; charset=utf-8")
        .body(body)
    }
  };

  sync_cookie(response, &cookies, &context, &stored)
}

/// Handle logout
pub async fn logout(
  req: HttpRequest,
  use_case: web::Data<Arc<LogoutUserUseCase>>,
  gateway: web::Data<Arc<dyn AuthGateway>>,
  cookies: web::Data<SessionCookies>,
) -> Result<HttpResponse, WebError> {
  let (mut context, _) = visitor_context(&req, &gateway, &cookies).await;

  // Best effort; the use case logs a failed remote sign-out
  let _ = use_case.execute(&mut context).await;

  with_cookie(redirect(req.headers(), LOGIN_PATH), Some(cookies.removal()))
}

#[cfg(test)]
mod tests {
  use crate::adapters::http::test_support::{TestApp, body_text, confirmed_session};
  use crate::domain::auth::AuthGateway;
  use actix_web::{
    http::StatusCode,
    test::{self, TestRequest},
  };

  const SIGNUP: &str = "email=jane%40example.com&password=Abcdef1%21&first_name=Jane&last_name=Doe&birth_month=4&birth_day=7&birth_year=1990&current_state=CA";

  #[actix_web::test]
  async fn test_login_with_invalid_email_renders_inline_error() {
    let deps = TestApp::new();
    let app = test::init_service(deps.app()).await;

    let req = TestRequest::post()
      .uri("/auth/login")
      .insert_header(("HX-Request", "true"))
      .set_form([("email", "not-an-email"), ("password", "whatever")])
      .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_text(resp).await;
    assert!(body.contains("Please enter valid email"));
    assert!(!body.contains("<html"));
  }

  #[actix_web::test]
  async fn test_login_with_wrong_password_is_generic() {
    let deps = TestApp::new();
    confirmed_session(&deps.memory, "jane@example.com").await;
    let app = test::init_service(deps.app()).await;

    let req = TestRequest::post()
      .uri("/auth/login")
      .set_form([("email", "jane@example.com"), ("password", "Wrong123!")])
      .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_text(resp).await;
    assert!(body.contains("Invalid email or password"));
  }

  #[actix_web::test]
  async fn test_login_success_sets_cookie_and_redirects() {
    let deps = TestApp::new();
    confirmed_session(&deps.memory, "jane@example.com").await;
    let app = test::init_service(deps.app()).await;

    let req = TestRequest::post()
      .uri("/auth/login")
      .insert_header(("HX-Request", "true"))
      .set_form([("email", "jane@example.com"), ("password", "Abcdef1!")])
      .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.headers().get("HX-Redirect").unwrap(), "/dashboard");
    let cookie = resp
      .response()
      .cookies()
      .find(|cookie| cookie.name() == deps.cookies.name())
      .unwrap();
    assert!(!cookie.value().is_empty());
  }

  #[actix_web::test]
  async fn test_signup_then_confirm_then_dashboard() {
    let deps = TestApp::new();
    let app = test::init_service(deps.app()).await;

    let req = TestRequest::post()
      .uri("/auth/signup")
      .insert_header(("Content-Type", "application/x-www-form-urlencoded"))
      .set_payload(SIGNUP)
      .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains("Check your email"));
    assert!(body.contains("jane@example.com"));
    assert!(body.contains("Try again"));

    let token_hash = deps.memory.pending_token_for("jane@example.com").await.unwrap();
    let req = TestRequest::get()
      .uri(&format!("/auth/confirm?token_hash={token_hash}&type=signup&next=/profile"))
      .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(resp.headers().get("Location").unwrap(), "/profile");
    let cookie = resp
      .response()
      .cookies()
      .find(|cookie| cookie.name() == deps.cookies.name())
      .map(|cookie| cookie.into_owned())
      .unwrap();

    let req = TestRequest::get().uri("/dashboard").cookie(cookie).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("Welcome back, Jane!"));
  }

  #[actix_web::test]
  async fn test_confirm_with_control_characters_in_next_goes_home() {
    let deps = TestApp::new();
    let app = test::init_service(deps.app()).await;

    let req = TestRequest::post()
      .uri("/auth/signup")
      .insert_header(("Content-Type", "application/x-www-form-urlencoded"))
      .set_payload(SIGNUP)
      .to_request();
    test::call_service(&app, req).await;

    let token_hash = deps.memory.pending_token_for("jane@example.com").await.unwrap();
    let req = TestRequest::get()
      .uri(&format!(
        "/auth/confirm?token_hash={token_hash}&type=signup&next=/profile%0Ax"
      ))
      .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(resp.headers().get("Location").unwrap(), "/dashboard");
    assert!(
      resp
        .response()
        .cookies()
        .any(|cookie| cookie.name() == deps.cookies.name())
    );
  }

  #[actix_web::test]
  async fn test_duplicate_signup_flags_email() {
    let deps = TestApp::new();
    let app = test::init_service(deps.app()).await;

    for expected in [StatusCode::OK, StatusCode::BAD_REQUEST] {
      let req = TestRequest::post()
        .uri("/auth/signup")
        .insert_header(("Content-Type", "application/x-www-form-urlencoded"))
        .insert_header(("HX-Request", "true"))
        .set_payload(SIGNUP)
        .to_request();
      let resp = test::call_service(&app, req).await;
      assert_eq!(resp.status(), expected);
      if expected == StatusCode::BAD_REQUEST {
        assert!(body_text(resp).await.contains("This email is already registered"));
      }
    }
  }

  #[actix_web::test]
  async fn test_weak_password_lists_every_rule_and_skips_gateway() {
    let deps = TestApp::new();
    let app = test::init_service(deps.app()).await;

    let req = TestRequest::post()
      .uri("/auth/signup")
      .insert_header(("HX-Request", "true"))
      .set_form([
        ("email", "jane@example.com"),
        ("password", "abc"),
        ("first_name", "Jane"),
        ("last_name", "Doe"),
      ])
      .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_text(resp).await;
    assert!(body.contains("at least 8 characters"));
    assert!(body.contains("one uppercase letter"));
    assert!(body.contains("one number"));
    assert!(body.contains("one special character"));
    assert!(deps.memory.pending_token_for("jane@example.com").await.is_none());
  }

  #[actix_web::test]
  async fn test_validate_field_only_after_attempt() {
    let deps = TestApp::new();
    let app = test::init_service(deps.app()).await;

    let req = TestRequest::post()
      .uri("/auth/validate/password")
      .set_form([("password", "abc")])
      .to_request();
    let body = body_text(test::call_service(&app, req).await).await;
    assert!(!body.contains("uppercase"));

    let req = TestRequest::post()
      .uri("/auth/validate/password")
      .set_form([("password", "abc"), ("attempted", "1")])
      .to_request();
    let body = body_text(test::call_service(&app, req).await).await;
    assert!(body.contains("uppercase"));

    let req = TestRequest::post()
      .uri("/auth/validate/nickname")
      .set_form([("attempted", "1")])
      .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[actix_web::test]
  async fn test_confirm_without_parameters_shows_failure_page() {
    let deps = TestApp::new();
    let app = test::init_service(deps.app()).await;

    let resp = test::call_service(&app, TestRequest::get().uri("/auth/confirm").to_request()).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get("Refresh").unwrap(), "3; url=/login");
    let body = body_text(resp).await;
    assert!(body.contains("Confirmation Failed"));
    assert!(body.contains("Missing confirmation parameters"));
    assert!(body.contains("Redirecting you to login..."));
  }

  #[actix_web::test]
  async fn test_confirm_with_used_token_shows_gateway_reason() {
    let deps = TestApp::new();
    let app = test::init_service(deps.app()).await;

    let req = TestRequest::get()
      .uri("/auth/confirm?token_hash=unknown&type=signup")
      .to_request();
    let body = body_text(test::call_service(&app, req).await).await;
    assert!(body.contains("Token has expired or is invalid"));
  }

  #[actix_web::test]
  async fn test_logout_clears_cookie_and_revokes() {
    let deps = TestApp::new();
    let session = confirmed_session(&deps.memory, "jane@example.com").await;
    let app = test::init_service(deps.app()).await;

    let req = TestRequest::post()
      .uri("/auth/logout")
      .cookie(deps.cookies.build(&session).unwrap())
      .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(resp.headers().get("Location").unwrap(), "/login");
    let cleared = resp
      .response()
      .cookies()
      .find(|cookie| cookie.name() == deps.cookies.name())
      .unwrap();
    assert_eq!(cleared.value(), "");
    assert!(deps.memory.refresh_session(&session.refresh_token).await.is_err());
  }

  #[actix_web::test]
  async fn test_logout_without_session_still_redirects() {
    let deps = TestApp::new();
    let app = test::init_service(deps.app()).await;

    let resp = test::call_service(&app, TestRequest::post().uri("/auth/logout").to_request()).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(resp.headers().get("Location").unwrap(), "/login");
  }
}
