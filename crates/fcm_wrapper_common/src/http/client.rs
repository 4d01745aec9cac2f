// --- File: crates/fcm_wrapper_common/src/http/client.rs ---
use fcm_wrapper_config::{FcmConfig, DEFAULT_TIMEOUT_SECS};
use once_cell::sync::Lazy;
use reqwest::{Client, Error as ReqwestError};
use std::time::Duration;

/// A static HTTP client that can be reused for every send.
/// This client is configured with the default FCM timeout.
pub static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
        .build()
        .expect("Failed to create HTTP client")
});

/// Creates a new HTTP client with custom configuration.
///
/// # Arguments
///
/// * `timeout_secs` - The timeout in seconds for the client
/// * `follow_redirects` - Whether the client should follow redirects
///
/// # Returns
///
/// A new reqwest::Client instance with the specified configuration
pub fn create_client(timeout_secs: u64, follow_redirects: bool) -> Result<Client, ReqwestError> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .redirect(if follow_redirects {
            reqwest::redirect::Policy::default()
        } else {
            reqwest::redirect::Policy::none()
        })
        .build()
}

/// Returns a client honouring `config.timeout_secs`.
///
/// The shared [`HTTP_CLIENT`] is handed out when the timeout matches the default,
/// so callers that never touch the setting do not build a client per send.
pub fn client_for_config(config: &FcmConfig) -> Result<Client, ReqwestError> {
    if config.timeout_secs == DEFAULT_TIMEOUT_SECS {
        Ok(HTTP_CLIENT.clone())
    } else {
        create_client(config.timeout_secs, true)
    }
}
