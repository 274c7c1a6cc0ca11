// Supabase PostgREST access
// https://postgrest.org/en/stable/references/api/tables_views.html

mod client;
mod store;

pub use client::{SupabaseClient, SupabaseConfig, SupabaseQuery};
pub use store::SupabaseDataStore;
