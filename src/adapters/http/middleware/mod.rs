pub mod request_id;
pub mod route_guard;

pub use request_id::{RequestId, RequestIdExt, RequestIdMiddleware};
pub use route_guard::RouteGuard;
