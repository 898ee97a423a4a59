mod in_memory_gateway;
mod supabase_client;
mod supabase_gateway;

pub use in_memory_gateway::InMemoryAuthGateway;
pub use supabase_client::SupabaseClient;
pub use supabase_gateway::SupabaseAuthGateway;
