//! geoquiz-backend: Identity and progress storage integrations.
//!
//! Implements the `IdentityService` and `ProgressStore` traits against a
//! Supabase-compatible REST API, plus an in-memory backend used by tests and
//! offline runs.

pub mod config;
pub mod error;
pub mod memory;
pub mod supabase;

pub use config::{create_backend, load_config, load_config_from, BackendConfig, GeoquizConfig};
pub use error::BackendError;
pub use memory::InMemoryBackend;
pub use supabase::SupabaseClient;
