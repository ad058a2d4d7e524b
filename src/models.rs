//! Request and response types for the deploy webhook and form test endpoints.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{Display, EnumString, IntoStaticStr};

use crate::error::{Fault, Result};

/// Deployment lifecycle stage.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DeployEventKind {
    /// Deployment was created.
    Created,
    /// Build finished successfully.
    Succeeded,
    /// Build failed.
    Failed,
    /// Deployment is live.
    Ready,
}

impl DeployEventKind {
    /// Classify a raw event type such as `"succeeded"` or `"deployment.succeeded"`.
    pub fn classify(raw: &str) -> Option<Self> {
        let stage = raw.trim().rsplit('.').next()?;
        stage.parse().ok()
    }
}

/// Decode a request body that must be a JSON object.
///
/// Anything else (including `null`) is a fault, like destructuring a missing
/// body would be.
pub fn parse_object(body: &[u8]) -> Result<Map<String, Value>> {
    match serde_json::from_slice::<Value>(body)? {
        Value::Object(map) => Ok(map),
        other => Err(Fault::from_message(format!(
            "request body must be a JSON object, got {}",
            json_kind(&other)
        ))
        .into()),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Text form of a scalar leaf; `None` for null, arrays and objects.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Inbound deployment lifecycle notification.
///
/// The body shape is not checked. `type` is kept as whatever JSON value was
/// sent, and nested deployment fields are looked up link by link, so a
/// missing or wrongly typed link just reads as absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeployEvent {
    body: Value,
}

impl DeployEvent {
    /// Decode a deploy event from a raw request body.
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        parse_object(body).map(|map| Self::from(Value::Object(map)))
    }

    /// Raw `type` value, exactly as sent.
    pub fn event_type(&self) -> Option<&Value> {
        self.body.get("type")
    }

    /// `type` rendered as text for logging.
    pub fn event_type_text(&self) -> Option<String> {
        self.event_type().and_then(scalar_text)
    }

    fn deployment_field(&self, field: &str) -> Option<String> {
        self.body
            .pointer(&format!("/payload/deployment/{}", field))
            .and_then(scalar_text)
    }

    /// `payload.deployment.id`, absent if any link is missing.
    pub fn deployment_id(&self) -> Option<String> {
        self.deployment_field("id")
    }

    /// `payload.deployment.url`, absent if any link is missing.
    pub fn deployment_url(&self) -> Option<String> {
        self.deployment_field("url")
    }

    /// `payload.deployment.name`, absent if any link is missing.
    pub fn deployment_name(&self) -> Option<String> {
        self.deployment_field("name")
    }

    /// Lifecycle stage, if the event type is a recognised string.
    pub fn kind(&self) -> Option<DeployEventKind> {
        self.event_type()
            .and_then(Value::as_str)
            .and_then(DeployEventKind::classify)
    }
}

impl From<Value> for DeployEvent {
    fn from(body: Value) -> Self {
        Self { body }
    }
}

/// Acknowledgement returned for a deploy event.
#[derive(Debug, Clone, Serialize)]
pub struct DeployAck {
    /// Always "received".
    pub status: &'static str,
    /// Echo of the inbound `type`, omitted when it was not sent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_type: Option<Value>,
    /// When the event was received.
    pub received_at: String,
}

/// Candidate contact-form submission checked without being stored.
///
/// Fields that are missing or not strings are `None` and fail validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestFormSubmission {
    /// Sender name.
    pub name: Option<String>,
    /// Sender email address.
    pub email: Option<String>,
    /// Message body.
    pub message: Option<String>,
}

impl TestFormSubmission {
    /// Decode a submission from a raw request body.
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        let map = parse_object(body)?;
        let text = |key: &str| map.get(key).and_then(Value::as_str).map(str::to_owned);

        Ok(Self {
            name: text("name"),
            email: text("email"),
            message: text("message"),
        })
    }
}

/// Response for a submission that passed every rule.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationPassed {
    /// Always "validation_passed".
    pub status: &'static str,
    /// Human-readable outcome.
    pub message: &'static str,
    /// When validation ran.
    pub validated_at: String,
}
