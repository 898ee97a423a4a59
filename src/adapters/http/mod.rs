pub mod dtos;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod redirect;
pub mod routes;
pub mod session_cookie;
pub mod templates;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use errors::WebError;
pub use middleware::{RequestId, RequestIdExt, RequestIdMiddleware, RouteGuard};
pub use routes::{AuthRateLimiter, WebRouteDependencies, auth_rate_limiter, configure_web_routes};
pub use session_cookie::{SessionCookies, StoredSession};
pub use templates::TemplateEngine;
