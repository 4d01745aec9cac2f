//! Typed Firebase Cloud Messaging payloads and service account authentication
//!
//! This crate prepares requests for the Firebase Cloud Messaging (FCM)
//! HTTP v1 API. It does not send them: the caller owns the HTTP transport.
//!
//! # Features
//!
//! - A [`Message`](message::Message) model covering the notification, data,
//!   Android, Web push and APNs blocks of the send API
//! - Exactly one target per message (device token, topic or condition),
//!   selected with a non-mutating [`set_target`](message::Message::set_target)
//! - Validating export to the `{"message": {...}}` request body
//! - Exchange of a service account document for a short-lived bearer token
//! - Helpers that attach the token and body to a `reqwest` request
//!
//! # Example
//!
//! ```rust,no_run
//! use fcm_wrapper::auth::{attach_auth, obtain_access_token};
//! use fcm_wrapper::client::send_url;
//! use fcm_wrapper::message::{Message, Notification, TargetType};
//!
//! async fn notify(service_account_json: &str) -> Result<(), Box<dyn std::error::Error>> {
//!     let base = Message::default().with_notification(Notification::new("Hello", "World"));
//!
//!     let token = obtain_access_token(service_account_json).await?;
//!     for device in ["device-a", "device-b"] {
//!         let message = base.set_target(TargetType::Token, device);
//!         attach_auth(reqwest::Client::new().post(send_url("my-project")), &token)
//!             .body(message.to_request_body()?)
//!             .send()
//!             .await?;
//!     }
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod error;
pub mod message;
#[cfg(test)]
mod message_proptest;

pub use auth::{attach_auth, obtain_access_token, AccessToken};
pub use error::{CredentialError, FcmError, MessageError};
pub use message::{Message, Target, TargetType};
