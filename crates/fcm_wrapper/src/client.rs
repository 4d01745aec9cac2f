//! Request preparation for the FCM HTTP v1 `messages:send` endpoint
//!
//! Nothing in this module performs the send. The functions return a
//! [`reqwest::RequestBuilder`] carrying the URL, headers and validated body;
//! the caller decides when and how to send it, and reads the reply with
//! [`SendResponse::from_json`](crate::message::SendResponse::from_json).

use crate::auth::{attach_auth, obtain_access_token_from_config, AccessToken};
use crate::error::FcmError;
use crate::message::Message;
use fcm_wrapper_common::client_for_config;
use fcm_wrapper_config::{FcmConfig, DEFAULT_API_BASE_URL};
use reqwest::{Client, RequestBuilder};
use tracing::debug;

/// The `messages:send` URL of a project on the public FCM endpoint.
pub fn send_url(project_id: &str) -> String {
    format!(
        "{}/v1/projects/{}/messages:send",
        DEFAULT_API_BASE_URL, project_id
    )
}

/// Builds the POST request that sends `message` with `token`.
///
/// # Errors
///
/// * [`FcmError::Config`] if `config.project_id` is missing
/// * [`FcmError::Message`] if the message fails validation
///
/// # Example
///
/// ```rust,no_run
/// use fcm_wrapper::auth::obtain_access_token;
/// use fcm_wrapper::client::prepare_send;
/// use fcm_wrapper::message::{Message, Notification, SendResponse, TargetType};
/// use fcm_wrapper_config::FcmConfig;
///
/// async fn send(document: &str) -> Result<(), Box<dyn std::error::Error>> {
///     let config = FcmConfig::for_project("my-project-id");
///     let message = Message::default()
///         .with_notification(Notification::new("Hello", "World"))
///         .set_target(TargetType::Topic, "news");
///
///     let token = obtain_access_token(document).await?;
///     let response = prepare_send(&reqwest::Client::new(), &config, &message, &token)?
///         .send()
///         .await?;
///
///     let sent = SendResponse::from_json(&response.text().await?)?;
///     println!("Message sent with ID: {}", sent.name);
///     Ok(())
/// }
/// ```
pub fn prepare_send(
    client: &Client,
    config: &FcmConfig,
    message: &Message,
    token: &AccessToken,
) -> Result<RequestBuilder, FcmError> {
    let url = config.send_url().ok_or_else(|| {
        FcmError::Config("Missing project_id in FcmConfig".to_string())
    })?;
    let body = message.to_request_body()?;
    debug!(%url, "Prepared FCM send request");

    Ok(attach_auth(client.post(url), token).body(body))
}

/// Obtains a token from `config.key_path` and builds the send request on a
/// client honouring `config.timeout_secs`.
pub async fn prepare_send_with_credentials(
    config: &FcmConfig,
    message: &Message,
) -> Result<RequestBuilder, FcmError> {
    // reject invalid messages before spending a network round-trip on a token
    message.validate()?;
    let token = obtain_access_token_from_config(config).await?;
    let client = client_for_config(config)?;
    prepare_send(&client, config, message, &token)
}
