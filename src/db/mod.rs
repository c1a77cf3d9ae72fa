//! Database layer (hosted auth/database service).

pub mod supabase;

pub use supabase::{SignUpResponse, SupabaseDb};

/// Table names as constants.
pub mod tables {
    pub const PROFILES: &str = "profiles";
}
