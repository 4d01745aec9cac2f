//! Authentication module for Firebase Cloud Messaging
//!
//! This module exchanges a service account document for a short-lived OAuth2
//! access token scoped to FCM. Tokens expire after about an hour and are not
//! cached here: obtain a fresh one for every send.
//!
//! Each call performs exactly one round-trip to the `token_uri` named in the
//! document. Failures are logged and returned as [`CredentialError`] so the
//! caller can tell a bad document from an unreachable or refusing provider.

use crate::error::CredentialError;
use fcm_wrapper_common::{http::APPLICATION_JSON, log_result};
use fcm_wrapper_config::FcmConfig;
use reqwest::{header::CONTENT_TYPE, RequestBuilder};
use std::fmt;
use tokio::runtime::{Handle, Runtime};
use tracing::debug;
use yup_oauth2::{parse_service_account_key, ServiceAccountAuthenticator};

pub use fcm_wrapper_config::DEFAULT_SCOPE as FIREBASE_MESSAGING_SCOPE;

/// A bearer token for the FCM send endpoint.
///
/// The token value is kept out of `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// The value of the `Authorization` header, `Bearer <token>`, for HTTP
    /// clients other than reqwest.
    pub fn authorization_value(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Obtains an OAuth2 access token for Firebase Cloud Messaging
///
/// # Arguments
///
/// * `document` - The service account private key file generated in the Firebase console,
///   as text or bytes
///
/// # Errors
///
/// * [`CredentialError::Parse`] if the document is not a service account key
///   or its private key is unusable
/// * [`CredentialError::Network`] if the token endpoint cannot be reached
/// * [`CredentialError::Rejected`] if the provider refuses the request or returns no token
pub async fn obtain_access_token(
    document: impl AsRef<[u8]>,
) -> Result<AccessToken, CredentialError> {
    obtain_access_token_with_scopes(document, &[FIREBASE_MESSAGING_SCOPE]).await
}

/// Same as [`obtain_access_token`] with caller supplied scopes.
pub async fn obtain_access_token_with_scopes(
    document: impl AsRef<[u8]>,
    scopes: &[&str],
) -> Result<AccessToken, CredentialError> {
    log_result(
        exchange(document.as_ref(), scopes).await,
        "Obtained FCM access token",
        "Failed to obtain FCM access token",
    )
}

/// Reads the service account document from `config.key_path` and exchanges it
/// for a token with `config.scope`.
pub async fn obtain_access_token_from_config(
    config: &FcmConfig,
) -> Result<AccessToken, CredentialError> {
    let document = log_result(
        read_key_file(config).await,
        "Read service account key file",
        "Failed to read service account key file",
    )?;
    obtain_access_token_with_scopes(document, &[config.scope.as_str()]).await
}

/// Blocking variant of [`obtain_access_token`] for callers running on plain
/// threads, e.g. a background worker.
///
/// The exchange is driven on a private single-threaded runtime. Called from
/// a thread that already drives an async runtime it returns
/// [`CredentialError::InsideRuntime`] instead of blocking that runtime.
pub fn obtain_access_token_blocking(
    document: impl AsRef<[u8]>,
) -> Result<AccessToken, CredentialError> {
    let runtime = log_result(
        blocking_runtime(),
        "Started runtime for blocking token exchange",
        "Failed to obtain FCM access token",
    )?;
    runtime.block_on(obtain_access_token(document))
}

fn blocking_runtime() -> Result<Runtime, CredentialError> {
    if Handle::try_current().is_ok() {
        return Err(CredentialError::InsideRuntime);
    }
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}

/// Adds `Authorization: Bearer <token>` and `Content-Type: application/json`
/// to an outgoing request.
pub fn attach_auth(request: RequestBuilder, token: &AccessToken) -> RequestBuilder {
    request
        .bearer_auth(token.as_str())
        .header(CONTENT_TYPE, APPLICATION_JSON)
}

async fn read_key_file(config: &FcmConfig) -> Result<Vec<u8>, CredentialError> {
    let key_path = config
        .key_path
        .as_deref()
        .ok_or(CredentialError::MissingKeyPath)?;
    Ok(tokio::fs::read(key_path).await?)
}

async fn exchange(document: &[u8], scopes: &[&str]) -> Result<AccessToken, CredentialError> {
    let sa_key = parse_service_account_key(document)
        .map_err(|err| CredentialError::Parse(err.to_string()))?;
    debug!(client_email = %sa_key.client_email, token_uri = %sa_key.token_uri, "Requesting FCM access token");

    let auth = ServiceAccountAuthenticator::builder(sa_key)
        .build()
        .await
        .map_err(|err| CredentialError::Parse(err.to_string()))?;

    let auth_token = auth.token(scopes).await.map_err(classify)?;
    match auth_token.token() {
        Some(token) => Ok(AccessToken::new(token)),
        None => Err(CredentialError::Rejected("No token available".to_string())),
    }
}

fn classify(err: yup_oauth2::Error) -> CredentialError {
    use yup_oauth2::Error;

    match err {
        Error::HttpError(err) => CredentialError::Network(err.to_string()),
        Error::AuthError(err) => CredentialError::Rejected(err.to_string()),
        Error::JSONError(err) => {
            CredentialError::Rejected(format!("unreadable token response: {}", err))
        }
        // signing the assertion failed, the key itself is unusable
        Error::LowLevelError(err) => CredentialError::Parse(err.to_string()),
        other => CredentialError::Rejected(other.to_string()),
    }
}
