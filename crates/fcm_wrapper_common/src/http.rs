// --- File: crates/fcm_wrapper_common/src/http.rs ---

// Include the client module
pub mod client;

/// Media type of every FCM request body.
pub const APPLICATION_JSON: &str = "application/json";
