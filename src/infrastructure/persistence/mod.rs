mod mock_data;
mod settings_repository;
mod supabase_profile_repository;

pub use mock_data::MockDataSource;
pub use settings_repository::InMemorySettingsRepository;
pub use supabase_profile_repository::SupabaseProfileRepository;
