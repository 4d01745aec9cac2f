//! Test fixtures for the FCM wrapper integration tests
//!
//! The private key under this directory was generated for these tests only
//! and is not registered with any Google project.

use serde_json::{json, Value};
use std::io::Write;
use tempfile::NamedTempFile;

pub const TEST_PRIVATE_KEY: &str = include_str!("test_service_account_key.pem");

/// Builds a service account document whose `token_uri` points at `token_uri`.
pub fn service_account_document(token_uri: &str) -> Value {
    json!({
        "type": "service_account",
        "project_id": "demo-project",
        "private_key_id": "0123456789abcdef",
        "private_key": TEST_PRIVATE_KEY,
        "client_email": "fcm-sender@demo-project.iam.gserviceaccount.com",
        "client_id": "100000000000000000000",
        "auth_uri": "https://accounts.google.com/o/oauth2/auth",
        "token_uri": token_uri,
    })
}

/// Writes the document to a temporary key file, deleted when the handle drops.
pub fn write_key_file(document: &Value) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp key file");
    write!(file, "{}", document).expect("write key file");
    file
}

/// Token endpoint reply in the shape Google returns.
pub fn token_response(access_token: &str) -> Value {
    json!({
        "access_token": access_token,
        "token_type": "Bearer",
        "expires_in": 3599
    })
}
