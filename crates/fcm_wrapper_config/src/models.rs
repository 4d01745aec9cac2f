use serde::{Deserialize, Serialize};

/// OAuth2 scope that authorizes calls to the FCM send endpoint.
pub const DEFAULT_SCOPE: &str = "https://www.googleapis.com/auth/firebase.messaging";
/// Base URL of the FCM HTTP v1 API.
pub const DEFAULT_API_BASE_URL: &str = "https://fcm.googleapis.com";
/// Request timeout applied by the shared HTTP client, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

fn default_scope() -> String {
    DEFAULT_SCOPE.to_string()
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

// --- Firebase Cloud Messaging Config ---
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct FcmConfig {
    /// Firebase project that owns the messaging endpoint.
    #[serde(default)]
    pub project_id: Option<String>,
    /// Path to the service account private key file.
    #[serde(default)]
    pub key_path: Option<String>,
    #[serde(default = "default_scope")]
    pub scope: String,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for FcmConfig {
    fn default() -> Self {
        Self {
            project_id: None,
            key_path: None,
            scope: default_scope(),
            api_base_url: default_api_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl FcmConfig {
    /// Creates a configuration for the given project with every other value defaulted.
    pub fn for_project(project_id: impl Into<String>) -> Self {
        Self {
            project_id: Some(project_id.into()),
            ..Self::default()
        }
    }

    /// The `messages:send` URL for the configured project, if a project is set.
    pub fn send_url(&self) -> Option<String> {
        self.project_id.as_deref().map(|project_id| {
            format!(
                "{}/v1/projects/{}/messages:send",
                self.api_base_url.trim_end_matches('/'),
                project_id
            )
        })
    }
}
