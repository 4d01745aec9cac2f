//! Message model for the Firebase Cloud Messaging HTTP v1 API
//!
//! A [`Message`] is plain data: it can be built up field by field, cloned and
//! retargeted freely, and may sit in an incomplete state in memory. The only
//! way out is through a validating export ([`Message::to_json`],
//! [`Message::to_json_value`], [`Message::to_request_body`]), so a message
//! without a target or without a payload never reaches the network.
//!
//! Struct fields carry the provider's snake_case wire names directly, and
//! enum values are mapped with an explicit `#[serde(rename = "...")]` per
//! variant, so the JSON contract can be read straight off the type
//! definitions.

use crate::error::MessageError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::debug;

pub use fcm_wrapper_common::http::APPLICATION_JSON;

/// Free-form JSON object, used where the provider passes a platform payload through untouched.
pub type JsonObject = Map<String, Value>;

/// Selects which kind of recipient a message is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetType {
    /// A single device registration token.
    Token,
    /// Every device subscribed to a topic.
    Topic,
    /// Every device matching a boolean expression over topics,
    /// e.g. `'foo' in topics && 'bar' in topics`.
    Condition,
}

/// The recipient of a message. Exactly one kind can be selected at a time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    Token(String),
    Topic(String),
    Condition(String),
}

impl Target {
    pub fn new(target_type: TargetType, value: impl Into<String>) -> Self {
        let value = value.into();
        match target_type {
            TargetType::Token => Target::Token(value),
            TargetType::Topic => Target::Topic(value),
            TargetType::Condition => Target::Condition(value),
        }
    }

    pub fn target_type(&self) -> TargetType {
        match self {
            Target::Token(_) => TargetType::Token,
            Target::Topic(_) => TargetType::Topic,
            Target::Condition(_) => TargetType::Condition,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Target::Token(value) | Target::Topic(value) | Target::Condition(value) => {
                value.as_str()
            }
        }
    }
}

/// Basic notification shown by every platform when no override applies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// URL of an image to show in the notification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Notification {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            body: Some(body.into()),
            image: None,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// Platform independent options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FcmOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analytics_label: Option<String>,
}

// --- Android ---

// Enum values are read in either case. Values this crate does not know yet are
// kept verbatim in `Other` and written back unchanged.

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AndroidMessagePriority {
    #[serde(rename = "NORMAL", alias = "normal")]
    Normal,
    #[serde(rename = "HIGH", alias = "high")]
    High,
    #[serde(untagged)]
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationPriority {
    #[serde(rename = "PRIORITY_UNSPECIFIED", alias = "priority_unspecified")]
    Unspecified,
    #[serde(rename = "PRIORITY_MIN", alias = "priority_min")]
    Min,
    #[serde(rename = "PRIORITY_LOW", alias = "priority_low")]
    Low,
    #[serde(rename = "PRIORITY_DEFAULT", alias = "priority_default")]
    Default,
    #[serde(rename = "PRIORITY_HIGH", alias = "priority_high")]
    High,
    #[serde(rename = "PRIORITY_MAX", alias = "priority_max")]
    Max,
    #[serde(untagged)]
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    #[serde(rename = "VISIBILITY_UNSPECIFIED", alias = "visibility_unspecified")]
    Unspecified,
    #[serde(rename = "PRIVATE", alias = "private")]
    Private,
    #[serde(rename = "PUBLIC", alias = "public")]
    Public,
    #[serde(rename = "SECRET", alias = "secret")]
    Secret,
    #[serde(untagged)]
    Other(String),
}

/// Whether the notification may be proxied by the OS notification service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Proxy {
    #[serde(rename = "PROXY_UNSPECIFIED", alias = "proxy_unspecified")]
    Unspecified,
    #[serde(rename = "ALLOW", alias = "allow")]
    Allow,
    #[serde(rename = "DENY", alias = "deny")]
    Deny,
    #[serde(rename = "IF_PRIORITY_LOWERED", alias = "if_priority_lowered")]
    IfPriorityLowered,
    #[serde(untagged)]
    Other(String),
}

/// Android specific options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AndroidConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collapse_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<AndroidMessagePriority>,
    /// Time to live in the provider's duration format, e.g. `"3.5s"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restricted_package_name: Option<String>,
    /// Replaces `Message::data` on Android when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<AndroidNotification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fcm_options: Option<FcmOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direct_boot_ok: Option<bool>,
}

impl AndroidConfig {
    /// Sets `ttl` from a duration, rendered as seconds with up to nine fractional digits.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(format_duration(ttl));
        self
    }
}

fn format_duration(duration: Duration) -> String {
    let nanos = duration.subsec_nanos();
    if nanos == 0 {
        format!("{}s", duration.as_secs())
    } else {
        let fraction = format!("{:09}", nanos);
        format!("{}.{}s", duration.as_secs(), fraction.trim_end_matches('0'))
    }
}

/// Notification options for Android devices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AndroidNotification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// `#rrggbb` colour of the icon.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sound: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub click_action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_loc_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_loc_args: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_loc_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_loc_args: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sticky: Option<bool>,
    /// RFC 3339 timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_priority: Option<NotificationPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_sound: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_vibrate_timings: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_light_settings: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vibrate_timings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_count: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub light_settings: Option<LightSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bypass_proxy_notification: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy: Option<Proxy>,
}

/// LED settings for Android notifications.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LightSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub light_on_duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub light_off_duration: Option<String>,
}

/// RGBA colour, each channel in `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Color {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub red: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub green: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blue: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f32>,
}

// --- Web push ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebpushConfig {
    /// HTTP headers defined by the Web Push protocol, e.g. `TTL`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<BTreeMap<String, String>>,
    /// Web Notification options, passed through as-is.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<JsonObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fcm_options: Option<WebpushFcmOptions>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebpushFcmOptions {
    /// Opened when the user clicks the notification. HTTPS only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analytics_label: Option<String>,
}

// --- APNs ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApnsConfig {
    /// APNs request headers, e.g. `apns-priority`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
    /// APNs payload including the `aps` dictionary, passed through as-is.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<JsonObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fcm_options: Option<ApnsFcmOptions>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApnsFcmOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analytics_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

// --- Message ---

/// A push message for the FCM `messages:send` endpoint.
///
/// ```
/// use fcm_wrapper::message::{Message, Notification, TargetType};
///
/// let json = Message::default()
///     .with_notification(Notification::new("Hello", "World"))
///     .set_target(TargetType::Token, "asd123")
///     .to_json()
///     .unwrap();
///
/// assert_eq!(
///     json,
///     r#"{"message":{"token":"asd123","notification":{"title":"Hello","body":"World"}}}"#
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Message {
    /// Assigned by the provider; only present on messages read back with [`Message::from_json`].
    pub name: Option<String>,
    /// Arbitrary key/value payload delivered to the client app.
    pub data: Option<BTreeMap<String, String>>,
    pub notification: Option<Notification>,
    pub android: Option<AndroidConfig>,
    pub webpush: Option<WebpushConfig>,
    pub apns: Option<ApnsConfig>,
    pub fcm_options: Option<FcmOptions>,
    pub target: Option<Target>,
}

impl Message {
    /// Returns a copy of this message addressed to `target`.
    ///
    /// `self` is left untouched, so one base message can be sent to several
    /// recipients. Any previously selected target is dropped.
    pub fn set_target(&self, target_type: TargetType, target: impl Into<String>) -> Message {
        Message {
            target: Some(Target::new(target_type, target)),
            ..self.clone()
        }
    }

    pub fn with_target(mut self, target: Target) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_data<K, V, I>(mut self, data: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        self.data = Some(
            data.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        );
        self
    }

    pub fn with_notification(mut self, notification: Notification) -> Self {
        self.notification = Some(notification);
        self
    }

    pub fn with_android(mut self, android: AndroidConfig) -> Self {
        self.android = Some(android);
        self
    }

    pub fn with_webpush(mut self, webpush: WebpushConfig) -> Self {
        self.webpush = Some(webpush);
        self
    }

    pub fn with_apns(mut self, apns: ApnsConfig) -> Self {
        self.apns = Some(apns);
        self
    }

    pub fn with_fcm_options(mut self, fcm_options: FcmOptions) -> Self {
        self.fcm_options = Some(fcm_options);
        self
    }

    pub fn token(&self) -> Option<&str> {
        match &self.target {
            Some(Target::Token(token)) => Some(token.as_str()),
            _ => None,
        }
    }

    pub fn topic(&self) -> Option<&str> {
        match &self.target {
            Some(Target::Topic(topic)) => Some(topic.as_str()),
            _ => None,
        }
    }

    pub fn condition(&self) -> Option<&str> {
        match &self.target {
            Some(Target::Condition(condition)) => Some(condition.as_str()),
            _ => None,
        }
    }

    /// Checks that the message can be sent: a target must be selected and at
    /// least one of `data` / `notification` must be set.
    pub fn validate(&self) -> Result<(), MessageError> {
        if self.target.is_none() {
            return Err(MessageError::InvalidTarget(
                "you must set the target of the message with set_target() before sending it"
                    .to_string(),
            ));
        }
        if self.data.is_none() && self.notification.is_none() {
            return Err(MessageError::InvalidPayload);
        }
        Ok(())
    }

    /// Validates the message and renders the request body of the send API,
    /// `{"message": {...}}`. Absent fields are omitted.
    pub fn to_json(&self) -> Result<String, MessageError> {
        self.validate()?;
        let json = serde_json::to_string(&Envelope {
            message: WireMessage::from(self),
        })?;
        debug!(bytes = json.len(), "serialized FCM message");
        Ok(json)
    }

    /// Like [`Message::to_json`], but returns the envelope as a JSON value.
    pub fn to_json_value(&self) -> Result<Value, MessageError> {
        self.validate()?;
        Ok(serde_json::to_value(Envelope {
            message: WireMessage::from(self),
        })?)
    }

    /// Parses a `{"message": {...}}` document.
    ///
    /// Unknown fields are ignored. The result is not validated, except that a
    /// document naming more than one target is rejected with
    /// [`MessageError::InvalidTarget`].
    pub fn from_json(json: &str) -> Result<Message, MessageError> {
        let envelope: Envelope<OwnedWireMessage> = serde_json::from_str(json)?;
        Message::try_from(envelope.message)
    }

    /// Validates and serializes the message as an HTTP body.
    ///
    /// The body carries no media type of its own. The request must set
    /// `Content-Type` to [`APPLICATION_JSON`]; [`crate::auth::attach_auth`]
    /// and [`crate::client::prepare_send`] do this, other callers have to add
    /// the header themselves.
    pub fn to_request_body(&self) -> Result<reqwest::Body, MessageError> {
        Ok(reqwest::Body::from(self.to_json()?))
    }
}

// --- Wire representation ---

#[derive(Serialize, Deserialize)]
struct Envelope<M> {
    message: M,
}

/// Borrowed view of a [`Message`] in the provider's field order.
#[derive(Serialize)]
struct WireMessage<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    token: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    topic: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    condition: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    notification: Option<&'a Notification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    android: Option<&'a AndroidConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    webpush: Option<&'a WebpushConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    apns: Option<&'a ApnsConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fcm_options: Option<&'a FcmOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

impl<'a> From<&'a Message> for WireMessage<'a> {
    fn from(message: &'a Message) -> Self {
        Self {
            token: message.token(),
            topic: message.topic(),
            condition: message.condition(),
            data: message.data.as_ref(),
            notification: message.notification.as_ref(),
            android: message.android.as_ref(),
            webpush: message.webpush.as_ref(),
            apns: message.apns.as_ref(),
            fcm_options: message.fcm_options.as_ref(),
            name: message.name.as_deref(),
        }
    }
}

#[derive(Deserialize)]
struct OwnedWireMessage {
    name: Option<String>,
    token: Option<String>,
    topic: Option<String>,
    condition: Option<String>,
    data: Option<BTreeMap<String, String>>,
    notification: Option<Notification>,
    android: Option<AndroidConfig>,
    webpush: Option<WebpushConfig>,
    apns: Option<ApnsConfig>,
    fcm_options: Option<FcmOptions>,
}

impl TryFrom<OwnedWireMessage> for Message {
    type Error = MessageError;

    fn try_from(wire: OwnedWireMessage) -> Result<Self, Self::Error> {
        let mut targets = [
            wire.token.map(Target::Token),
            wire.topic.map(Target::Topic),
            wire.condition.map(Target::Condition),
        ]
        .into_iter()
        .flatten();

        let target = targets.next();
        if targets.next().is_some() {
            return Err(MessageError::InvalidTarget(
                "you can only set one target type for the message".to_string(),
            ));
        }

        Ok(Message {
            name: wire.name,
            data: wire.data,
            notification: wire.notification,
            android: wire.android,
            webpush: wire.webpush,
            apns: wire.apns,
            fcm_options: wire.fcm_options,
            target,
        })
    }
}

/// Reply of the `messages:send` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendResponse {
    /// The identifier of the sent message, `projects/{project_id}/messages/{message_id}`.
    pub name: String,
}

impl SendResponse {
    pub fn from_json(json: &str) -> Result<Self, MessageError> {
        Ok(serde_json::from_str(json)?)
    }
}
