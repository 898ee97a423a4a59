use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

fn default_request_timeout() -> u64 {
  10
}

fn default_cookie_name() -> String {
  "vv_session".to_string()
}

fn default_session_max_age() -> i64 {
  60 * 60 * 24 * 30
}

fn default_redirect_delay() -> u64 {
  3
}

fn default_next() -> String {
  "/dashboard".to_string()
}

fn default_template_glob() -> String {
  "templates/**/*.html.tera".to_string()
}

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
  pub server: ServerConfig,
  pub gateway: GatewayConfig,
  pub session: SessionConfig,
  #[serde(default)]
  pub auth: AuthConfig,
  pub rate_limit: RateLimitConfig,
  #[serde(default)]
  pub templates: TemplatesConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  pub host: String,
  pub port: u16,
  /// Public origin, used to build the confirmation link target
  pub base_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GatewayMode {
  /// Hosted GoTrue + PostgREST project
  Supabase,
  /// In-process stand-in for local development
  Memory,
}

/// Hosted authentication service
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
  pub mode: GatewayMode,
  pub url: String,
  /// Public anon key sent as the `apikey` header
  #[serde(default)]
  pub anon_key: String,
  #[serde(default = "default_request_timeout")]
  pub request_timeout_seconds: u64,
}

/// Key shipped in `config/default.toml` for local development
pub const DEVELOPMENT_SESSION_KEY: &str = "ZGV2ZWxvcG1lbnQta2V5LWRvLW5vdC11c2UtaW4tcHI=";

/// Session cookie configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
  #[serde(default = "default_cookie_name")]
  pub cookie_name: String,
  #[serde(default)]
  pub secure_cookie: bool,
  #[serde(default = "default_session_max_age")]
  pub max_age_seconds: i64,
  /// Base64-encoded 32-byte key sealing the cookie
  /// Generate with: openssl rand -base64 32
  pub encryption_key_base64: String,
}

impl SessionConfig {
  /// True while the publicly known development key is configured
  pub fn uses_development_key(&self) -> bool {
    self.encryption_key_base64.trim() == DEVELOPMENT_SESSION_KEY
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
  /// How long the confirmation failure page waits before going to login
  #[serde(default = "default_redirect_delay")]
  pub confirmation_redirect_delay_seconds: u64,
  /// Landing page after a confirmation link without `next`
  #[serde(default = "default_next")]
  pub default_next: String,
}

impl Default for AuthConfig {
  fn default() -> Self {
    Self {
      confirmation_redirect_delay_seconds: default_redirect_delay(),
      default_next: default_next(),
    }
  }
}

/// Rate limiting for the `/auth` form endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
  pub enabled: bool,
  /// Seconds to replenish one request
  pub seconds_per_request: u64,
  pub burst_size: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TemplatesConfig {
  #[serde(default = "default_template_glob")]
  pub glob: String,
}

impl Default for TemplatesConfig {
  fn default() -> Self {
    Self {
      glob: default_template_glob(),
    }
  }
}

impl Config {
  /// Load configuration from files and environment variables
  ///
  /// Configuration is loaded in the following order (later sources override earlier ones):
  /// 1. config/default.toml
  /// 2. config/local.toml (if exists)
  /// 3. config/{RUN_MODE}.toml (if exists)
  /// 4. Environment variables with VOICEVAULT_ prefix
  ///
  /// # Environment Variables
  ///
  /// Sections and keys are separated by double underscores:
  /// - `VOICEVAULT_SERVER__PORT=8080`
  /// - `VOICEVAULT_GATEWAY__MODE=supabase`
  /// - `VOICEVAULT_GATEWAY__URL=https://project.supabase.co`
  /// - `VOICEVAULT_GATEWAY__ANON_KEY=...`
  /// - `VOICEVAULT_SESSION__ENCRYPTION_KEY_BASE64=...`
  /// - `VOICEVAULT_RATE_LIMIT__ENABLED=false`
  pub fn load() -> Result<Self, ConfigError> {
    let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

    let config = ConfigBuilder::builder()
      .add_source(File::with_name("config/default").required(true))
      .add_source(File::with_name("config/local").required(false))
      .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
      .add_source(
        Environment::with_prefix("VOICEVAULT")
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true),
      )
      .build()?;

    config.try_deserialize()
  }

  /// Where confirmation emails should send the user
  pub fn confirmation_url(&self) -> String {
    format!("{}/auth/confirm", self.server.base_url.trim_end_matches('/'))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_config_structure() {
    let toml = r#"
            [server]
            host = "127.0.0.1"
            port = 8080
            base_url = "http://localhost:8080/"

            [gateway]
            mode = "supabase"
            url = "https://project.supabase.co"
            anon_key = "anon"

            [session]
            encryption_key_base64 = "a2V5"

            [rate_limit]
            enabled = true
            seconds_per_request = 2
            burst_size = 10
        "#;

    let config: Config = toml::from_str(toml).expect("Failed to parse config");

    assert_eq!(config.server.port, 8080);
    assert_eq!(config.gateway.mode, GatewayMode::Supabase);
    assert_eq!(config.gateway.request_timeout_seconds, 10); // default
    assert_eq!(config.session.cookie_name, "vv_session"); // default
    assert!(!config.session.secure_cookie);
    assert_eq!(config.session.max_age_seconds, 2_592_000);
    assert_eq!(config.auth.confirmation_redirect_delay_seconds, 3);
    assert_eq!(config.auth.default_next, "/dashboard");
    assert_eq!(config.rate_limit.seconds_per_request, 2);
    assert_eq!(config.rate_limit.burst_size, 10);
    assert_eq!(config.templates.glob, "templates/**/*.html.tera");
    assert_eq!(
      config.confirmation_url(),
      "http://localhost:8080/auth/confirm"
    );
  }

  #[test]
  fn test_default_file_parses() {
    let toml = include_str!("../../config/default.toml");
    let config: Config = toml::from_str(toml).expect("Failed to parse config/default.toml");

    assert_eq!(config.gateway.mode, GatewayMode::Memory);
    assert_eq!(config.session.cookie_name, "vv_session");
    assert!(config.session.uses_development_key());
  }

  #[test]
  fn test_configured_key_is_not_development_key() {
    let toml = r#"
            [server]
            host = "127.0.0.1"
            port = 8080
            base_url = "https://voicevault.example"

            [gateway]
            mode = "supabase"
            url = "https://project.supabase.co"
            anon_key = "anon"

            [session]
            encryption_key_base64 = "MDEyMzQ1Njc4OWFiY2RlZjAxMjM0NTY3ODlhYmNkZWY="

            [rate_limit]
            enabled = true
            seconds_per_request = 2
            burst_size = 10
        "#;

    let config: Config = toml::from_str(toml).expect("Failed to parse config");
    assert!(!config.session.uses_development_key());
  }
}
