use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Image generation
// POST {baseURL}/images/generations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageGenRequest {
    /// Endpoint ID or model name.
    pub model: String,
    pub prompt: String,
    pub size: String,
    pub watermark: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ref_image_urls: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub req_key: Option<String>,
}

// ---------------------------------------------------------------------------
// Video generation (async task pattern)
// POST {baseURL}/contents/generations/tasks  → task id
// GET  {baseURL}/contents/generations/tasks/{id}  → status + content
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoGenRequest {
    pub model: String,
    pub content: Vec<VideoContentItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VideoContentItem {
    Text {
        text: String,
    },
    ImageUrl {
        image_url: ImageRef,
        #[serde(skip_serializing_if = "Option::is_none")]
        role: Option<ContentRole>,
    },
}

impl VideoContentItem {
    pub fn image(url: impl Into<String>, role: Option<ContentRole>) -> Self {
        Self::ImageUrl {
            image_url: ImageRef { url: url.into() },
            role,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageRef {
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentRole {
    ReferenceImage,
}

/// Task state (pending | processing | success | failed) read from a status
/// payload. Some gateways nest it under `data`, others put it at the top.
pub fn task_state(body: &Value) -> Option<&str> {
    body.get("data")
        .and_then(|d| d.get("status"))
        .or_else(|| body.get("status"))
        .and_then(Value::as_str)
}

// ---------------------------------------------------------------------------
// Error body, shared by both generation endpoints
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub code: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub param: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

impl ApiError {
    pub fn code_string(&self) -> Option<String> {
        match self.code.as_ref()? {
            Value::String(s) => Some(s.clone()),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}
