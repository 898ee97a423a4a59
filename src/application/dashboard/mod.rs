//! Read-only use cases behind the signed-in pages

mod get_dashboard;
mod get_earnings;
mod list_notifications;

pub use get_dashboard::{DashboardView, GetDashboardUseCase};
pub use get_earnings::GetEarningsUseCase;
pub use list_notifications::ListNotificationsUseCase;
