use serde::{Deserialize, Serialize};

use crate::errors::{NotifyError, Result};

/// Notification as submitted by a caller. Every field is optional on the
/// wire so that missing fields are reported as validation errors instead of
/// deserialization failures.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Notification {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// A notification whose key, title and content are all present.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidNotification {
    pub key: String,
    pub title: String,
    pub content: String,
}

impl Notification {
    pub fn new(
        key: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            key: Some(key.into()),
            title: Some(title.into()),
            content: Some(content.into()),
        }
    }

    pub fn validate(self) -> Result<ValidNotification> {
        fn required(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.trim().is_empty())
        }

        match (
            required(self.key),
            required(self.title),
            required(self.content),
        ) {
            (Some(key), Some(title), Some(content)) => Ok(ValidNotification {
                key,
                title,
                content,
            }),
            _ => Err(NotifyError::Validation(
                "Missing required parameters: key, title and content".to_string(),
            )),
        }
    }
}

/// The gateway's answer, kept as-is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GatewayResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl GatewayResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
