//! Fully wired app over the in-memory gateway for handler tests

use actix_web::{
  App,
  body::MessageBody,
  dev::{ServiceFactory, ServiceRequest, ServiceResponse},
  test,
};
use std::sync::Arc;

use super::routes::{WebRouteDependencies, configure_web_routes};
use super::session_cookie::SessionCookies;
use super::templates::TemplateEngine;
use crate::application::auth::{
  ConfirmEmailUseCase, LoginUserUseCase, LogoutUserUseCase, RegisterUserUseCase,
};
use crate::application::dashboard::{
  GetDashboardUseCase, GetEarningsUseCase, ListNotificationsUseCase,
};
use crate::application::profile::{GetProfileUseCase, UpdateSettingsUseCase};
use crate::domain::auth::{
  AuthGateway, Credentials, Email, Password, Session, SignupProfile, SignupRequest,
};
use crate::infrastructure::config::{AuthConfig, SessionConfig};
use crate::infrastructure::gateway::InMemoryAuthGateway;
use crate::infrastructure::persistence::{InMemorySettingsRepository, MockDataSource};
use crate::infrastructure::security::SessionCipher;

const KEY: &str = "MDEyMzQ1Njc4OWFiY2RlZjAxMjM0NTY3ODlhYmNkZWY=";

pub(crate) struct TestApp {
  pub memory: Arc<InMemoryAuthGateway>,
  pub gateway: Arc<dyn AuthGateway>,
  pub cookies: SessionCookies,
  pub settings: Arc<InMemorySettingsRepository>,
  pub deps: WebRouteDependencies,
}

impl TestApp {
  pub fn new() -> Self {
    let memory = Arc::new(InMemoryAuthGateway::default());
    let gateway: Arc<dyn AuthGateway> = memory.clone();
    let settings = Arc::new(InMemorySettingsRepository::new());
    let mock_data = Arc::new(MockDataSource::new());

    let session_config = SessionConfig {
      cookie_name: "vv_session".to_string(),
      secure_cookie: false,
      max_age_seconds: 3600,
      encryption_key_base64: KEY.to_string(),
    };
    let cookies = SessionCookies::new(SessionCipher::new(KEY).unwrap(), &session_config);
    let auth = AuthConfig::default();

    let deps = WebRouteDependencies {
      templates: TemplateEngine::new("templates/**/*.html.tera").unwrap(),
      gateway: gateway.clone(),
      cookies: cookies.clone(),
      rate_limiter: None,
      login_use_case: Arc::new(LoginUserUseCase::new()),
      register_use_case: Arc::new(RegisterUserUseCase::new(Some(
        "http://localhost:8080/auth/confirm".to_string(),
      ))),
      logout_use_case: Arc::new(LogoutUserUseCase::new()),
      confirm_email_use_case: Arc::new(ConfirmEmailUseCase::new(auth.default_next.clone())),
      dashboard_use_case: Arc::new(GetDashboardUseCase::new(memory.clone(), mock_data.clone())),
      earnings_use_case: Arc::new(GetEarningsUseCase::new(mock_data.clone())),
      notifications_use_case: Arc::new(ListNotificationsUseCase::new(mock_data)),
      profile_use_case: Arc::new(GetProfileUseCase::new(memory.clone(), settings.clone())),
      update_settings_use_case: Arc::new(UpdateSettingsUseCase::new(settings.clone())),
      auth,
    };

    Self {
      memory,
      gateway,
      cookies,
      settings,
      deps,
    }
  }

  pub fn app(
    &self,
  ) -> App<
    impl ServiceFactory<
      ServiceRequest,
      Config = (),
      Response = ServiceResponse<impl MessageBody + use<>>,
      Error = actix_web::Error,
      InitError = (),
    > + use<>,
  > {
    let deps = self.deps.clone();
    App::new().configure(move |cfg| configure_web_routes(cfg, deps))
  }
}

/// Signs up and confirms `email` with password `Abcdef1!` and first name Jane
pub(crate) async fn confirmed_session(gateway: &InMemoryAuthGateway, email: &str) -> Session {
  let request = SignupRequest {
    credentials: Credentials {
      email: Email::new(email).unwrap(),
      password: Password::new("Abcdef1!"),
    },
    profile: SignupProfile {
      first_name: "Jane".to_string(),
      last_name: "Doe".to_string(),
      email: email.to_string(),
      birthday: "1990-04-07".to_string(),
      current_state: Some("CA".to_string()),
    },
    email_redirect_to: None,
  };
  gateway.sign_up(&request).await.unwrap();
  let token_hash = gateway.pending_token_for(email).await.unwrap();
  gateway
    .verify_otp(&token_hash, "signup")
    .await
    .unwrap()
    .unwrap()
}

pub(crate) async fn body_text<B: MessageBody>(resp: ServiceResponse<B>) -> String {
  String::from_utf8(test::read_body(resp).await.to_vec()).unwrap()
}
