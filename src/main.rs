use actix_files as fs;
use actix_web::{App, HttpServer, middleware::Logger};
use anyhow::Context;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use voicevault::{
  adapters::http::{
    RequestIdMiddleware, SessionCookies, TemplateEngine, WebRouteDependencies,
    auth_rate_limiter, configure_web_routes,
  },
  application::auth::{
    ConfirmEmailUseCase, LoginUserUseCase, LogoutUserUseCase, RegisterUserUseCase,
  },
  application::dashboard::{GetDashboardUseCase, GetEarningsUseCase, ListNotificationsUseCase},
  application::profile::{GetProfileUseCase, UpdateSettingsUseCase},
  domain::auth::AuthGateway,
  domain::profile::ProfileRepository,
  infrastructure::{
    config::{Config, GatewayMode},
    gateway::{InMemoryAuthGateway, SupabaseAuthGateway, SupabaseClient},
    persistence::{InMemorySettingsRepository, MockDataSource, SupabaseProfileRepository},
    security::SessionCipher,
  },
};

/// Auth gateway and profile store for the configured backend
fn build_backend(
  config: &Config,
) -> anyhow::Result<(Arc<dyn AuthGateway>, Arc<dyn ProfileRepository>)> {
  match config.gateway.mode {
    GatewayMode::Supabase => {
      tracing::info!("Using hosted auth service at {}", config.gateway.url);
      let client = SupabaseClient::new(
        &config.gateway.url,
        &config.gateway.anon_key,
        Duration::from_secs(config.gateway.request_timeout_seconds),
      )
      .context("Failed to build HTTP client for the auth service")?;

      let gateway: Arc<dyn AuthGateway> = Arc::new(SupabaseAuthGateway::new(client.clone()));
      let profiles: Arc<dyn ProfileRepository> = Arc::new(SupabaseProfileRepository::new(client));
      Ok((gateway, profiles))
    }
    GatewayMode::Memory => {
      tracing::warn!("Using in-memory auth gateway; accounts are lost on restart");
      let memory = Arc::new(InMemoryAuthGateway::default());
      let gateway: Arc<dyn AuthGateway> = memory.clone();
      let profiles: Arc<dyn ProfileRepository> = memory;
      Ok((gateway, profiles))
    }
  }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  // Initialize environment variables from .env file
  dotenvy::dotenv().ok();

  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "voicevault=debug,actix_web=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting VoiceVault");

  let config = Config::load().context("Failed to load configuration")?;
  tracing::info!("Configuration loaded successfully");

  if config.session.uses_development_key() {
    if config.gateway.mode == GatewayMode::Supabase {
      anyhow::bail!(
        "Refusing to start against the hosted auth service with the development session key; \
         set VOICEVAULT_SESSION__ENCRYPTION_KEY_BASE64"
      );
    }
    tracing::warn!("Using the development session key; cookies can be forged by anyone who has it");
  }

  let (gateway, profiles) = build_backend(&config)?;

  let cipher = SessionCipher::new(&config.session.encryption_key_base64)
    .context("Invalid session encryption key")?;
  let cookies = SessionCookies::new(cipher, &config.session);
  if !config.session.secure_cookie {
    tracing::warn!("Session cookie is not marked Secure; enable it behind HTTPS");
  }

  let templates =
    TemplateEngine::new(&config.templates.glob).context("Failed to load templates")?;
  tracing::info!("Templates loaded from {}", config.templates.glob);

  let mock_data = Arc::new(MockDataSource::new());
  let settings = Arc::new(InMemorySettingsRepository::new());

  let deps = WebRouteDependencies {
    templates,
    gateway,
    cookies,
    auth: config.auth.clone(),
    rate_limiter: auth_rate_limiter(&config.rate_limit),
    login_use_case: Arc::new(LoginUserUseCase::new()),
    register_use_case: Arc::new(RegisterUserUseCase::new(Some(config.confirmation_url()))),
    logout_use_case: Arc::new(LogoutUserUseCase::new()),
    confirm_email_use_case: Arc::new(ConfirmEmailUseCase::new(config.auth.default_next.clone())),
    dashboard_use_case: Arc::new(GetDashboardUseCase::new(
      profiles.clone(),
      mock_data.clone(),
    )),
    earnings_use_case: Arc::new(GetEarningsUseCase::new(mock_data.clone())),
    notifications_use_case: Arc::new(ListNotificationsUseCase::new(mock_data)),
    profile_use_case: Arc::new(GetProfileUseCase::new(profiles, settings.clone())),
    update_settings_use_case: Arc::new(UpdateSettingsUseCase::new(settings)),
  };

  let server_host = config.server.host.clone();
  let server_port = config.server.port;
  tracing::info!("Listening on http://{}:{}", server_host, server_port);

  HttpServer::new(move || {
    let deps = deps.clone();
    App::new()
      .wrap(Logger::default())
      .wrap(RequestIdMiddleware::new())
      .configure(move |cfg| configure_web_routes(cfg, deps))
      .service(fs::Files::new("/static", "./static"))
  })
  .bind((server_host.as_str(), server_port))?
  .run()
  .await?;

  Ok(())
}
