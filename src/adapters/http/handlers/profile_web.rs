use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;

use super::pages::profile_context;
use super::{current_session, html};
use crate::adapters::http::dtos::SettingsForm;
use crate::adapters::http::errors::WebError;
use crate::adapters::http::redirect::is_htmx;
use crate::adapters::http::templates::TemplateEngine;
use crate::application::profile::{GetProfileUseCase, UpdateSettingsUseCase};
use crate::domain::profile::{ProfileError, UserSettings};

/// Save the settings form on the profile page
pub async fn settings_submit(
  req: HttpRequest,
  form: web::Form<SettingsForm>,
  use_case: web::Data<Arc<UpdateSettingsUseCase>>,
  profile_use_case: web::Data<Arc<GetProfileUseCase>>,
  templates: web::Data<TemplateEngine>,
) -> Result<HttpResponse, WebError> {
  let session = current_session(&req)?;
  let form = form.into_inner();
  let submitted = UserSettings {
    weekly_goal: Default::default(),
    notifications_enabled: form.notifications_enabled.is_some(),
    dark_mode: form.dark_mode.is_some(),
  };
  let weekly_goal_input = form.weekly_goal.clone();

  match use_case.execute(session.user.id, form.into()).await {
    Ok(settings) => {
      if !is_htmx(req.headers()) {
        return Ok(
          HttpResponse::Found()
            .insert_header(("Location", "/profile"))
            .finish(),
        );
      }
      let mut context = tera::Context::new();
      context.insert("settings", &settings);
      context.insert("weekly_goal_input", &settings.weekly_goal.dollars().to_string());
      context.insert("settings_error", &None::<String>);
      context.insert("settings_saved", &true);
      Ok(html(
        templates.render("partials/settings_form.html.tera", &context)?,
      ))
    }
    Err(error @ ProfileError::InvalidWeeklyGoal) => {
      let body = if is_htmx(req.headers()) {
        let mut context = tera::Context::new();
        context.insert("settings", &submitted);
        context.insert("weekly_goal_input", &weekly_goal_input);
        context.insert("settings_error", &Some(error.to_string()));
        context.insert("settings_saved", &false);
        templates.render("partials/settings_form.html.tera", &context)?
      } else {
        let view = profile_use_case.execute(&session).await?;
        let context = profile_context(
          &view,
          &submitted,
          &weekly_goal_input,
          Some(error.to_string()),
        );
        templates.render("pages/profile.html.tera", &context)?
      };

      Ok(
        HttpResponse::BadRequest()
          .content_type("text/html; charset=utf-8")
          .body(body),
      )
    }
    Err(error) => Err(error.into()),
  }
}

#[cfg(test)]
mod tests {
  use crate::adapters::http::test_support::{TestApp, body_text, confirmed_session};
  use crate::domain::profile::SettingsRepository;
  use actix_web::{
    http::StatusCode,
    test::{self, TestRequest},
  };

  #[actix_web::test]
  async fn test_valid_settings_are_saved() {
    let deps = TestApp::new();
    let session = confirmed_session(&deps.memory, "jane@example.com").await;
    let app = test::init_service(deps.app()).await;

    let req = TestRequest::post()
      .uri("/profile/settings")
      .insert_header(("HX-Request", "true"))
      .cookie(deps.cookies.build(&session).unwrap())
      .set_form([("weekly_goal", "250"), ("dark_mode", "on")])
      .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("Settings saved"));
    let saved = deps.settings.get(session.user.id).await.unwrap();
    assert_eq!(saved.weekly_goal.dollars(), 250);
    assert!(saved.dark_mode);
    assert!(!saved.notifications_enabled);
  }

  #[actix_web::test]
  async fn test_invalid_weekly_goal_is_rejected() {
    let deps = TestApp::new();
    let session = confirmed_session(&deps.memory, "jane@example.com").await;
    let app = test::init_service(deps.app()).await;

    for goal in ["-5", "12.50", "100001", "lots"] {
      let req = TestRequest::post()
        .uri("/profile/settings")
        .insert_header(("HX-Request", "true"))
        .cookie(deps.cookies.build(&session).unwrap())
        .set_form([("weekly_goal", goal)])
        .to_request();
      let resp = test::call_service(&app, req).await;
      assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{goal}");
      assert!(body_text(resp).await.contains("Weekly goal must be"));
    }

    let saved = deps.settings.get(session.user.id).await.unwrap();
    assert_eq!(saved.weekly_goal.dollars(), 100);
  }

  #[actix_web::test]
  async fn test_invalid_weekly_goal_without_htmx_renders_full_page() {
    let deps = TestApp::new();
    let session = confirmed_session(&deps.memory, "jane@example.com").await;
    let app = test::init_service(deps.app()).await;

    let req = TestRequest::post()
      .uri("/profile/settings")
      .cookie(deps.cookies.build(&session).unwrap())
      .set_form([("weekly_goal", "lots"), ("dark_mode", "on")])
      .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_text(resp).await;
    assert!(body.contains("<html"));
    assert!(body.contains("jane@example.com"));
    assert!(body.contains("Weekly goal must be"));
    assert!(body.contains("value=\"lots\""));
  }

  #[actix_web::test]
  async fn test_settings_require_session() {
    let deps = TestApp::new();
    let app = test::init_service(deps.app()).await;

    let req = TestRequest::post()
      .uri("/profile/settings")
      .set_form([("weekly_goal", "250")])
      .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(resp.headers().get("Location").unwrap(), "/login");
  }
}
