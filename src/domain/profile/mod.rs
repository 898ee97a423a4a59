pub mod entities;
pub mod errors;
pub mod ports;

pub use entities::{Profile, UserSettings, WeeklyGoal};
pub use errors::ProfileError;
pub use ports::{ProfileRepository, SettingsRepository};
