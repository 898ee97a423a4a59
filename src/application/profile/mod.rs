mod get_profile;
mod update_settings;

pub use get_profile::{GetProfileUseCase, ProfileView};
pub use update_settings::{UpdateSettingsCommand, UpdateSettingsUseCase};
