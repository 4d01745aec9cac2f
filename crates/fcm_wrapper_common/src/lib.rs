// --- File: crates/fcm_wrapper_common/src/lib.rs ---

pub mod http; // HTTP client utilities
pub mod logging; // Logging utilities

pub use http::client::{create_client, client_for_config, HTTP_CLIENT};

pub use logging::{init, init_with_level, log_result};
