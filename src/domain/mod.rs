pub mod auth;
pub mod earnings;
pub mod errors;
pub mod notifications;
pub mod profile;

pub use errors::RepositoryError;
