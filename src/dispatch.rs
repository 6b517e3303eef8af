//! Routes a tool call to the matching ARK operation and folds every outcome
//! into a response envelope. Failures never escape as protocol errors: they
//! come back as `{error, tool, arguments}` with the error flag set.

use serde_json::{json, Map, Value};
use tracing::{info, warn};

use crate::ark::ArkClient;
use crate::error::{Error, Result};
use crate::tasks::{ImageParams, VideoParams, DEFAULT_IMAGE_MODEL, DEFAULT_VIDEO_MODEL};

pub type JsonObject = Map<String, Value>;

pub const GENERATE_IMAGE: &str = "generate_image";
pub const GENERATE_VIDEO: &str = "generate_video";
pub const QUERY_VIDEO_TASK: &str = "query_video_task";

/// Operator-provided fallbacks, applied when a caller leaves a field out.
#[derive(Debug, Clone)]
pub struct ToolDefaults {
    pub image_endpoint_id: Option<String>,
    pub video_endpoint_id: Option<String>,
    pub image_model: String,
    pub video_model: String,
}

impl Default for ToolDefaults {
    fn default() -> Self {
        Self {
            image_endpoint_id: None,
            video_endpoint_id: None,
            image_model: DEFAULT_IMAGE_MODEL.into(),
            video_model: DEFAULT_VIDEO_MODEL.into(),
        }
    }
}

/// A single text item plus the error flag.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolResponse {
    pub text: String,
    pub is_error: bool,
}

impl ToolResponse {
    fn success(result: &Value) -> Self {
        Self {
            text: pretty(result),
            is_error: false,
        }
    }

    fn failure(tool: &str, arguments: &JsonObject, err: &Error) -> Self {
        let envelope = json!({
            "error": err.to_string(),
            "tool": tool,
            "arguments": arguments,
        });
        Self {
            text: pretty(&envelope),
            is_error: true,
        }
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

pub struct Dispatcher {
    ark: ArkClient,
    defaults: ToolDefaults,
}

impl Dispatcher {
    pub fn new(ark: ArkClient, defaults: ToolDefaults) -> Self {
        Self { ark, defaults }
    }

    pub async fn call(&self, name: &str, arguments: JsonObject) -> ToolResponse {
        info!(tool = name, "tool call");
        match self.route(name, &arguments).await {
            Ok(result) => ToolResponse::success(&result),
            Err(e) => {
                warn!(tool = name, error = %e, "tool call failed");
                ToolResponse::failure(name, &arguments, &e)
            }
        }
    }

    async fn route(&self, name: &str, arguments: &JsonObject) -> Result<Value> {
        match name {
            GENERATE_IMAGE => self.generate_image(parse_args(arguments)?).await,
            GENERATE_VIDEO => self.generate_video(parse_args(arguments)?).await,
            QUERY_VIDEO_TASK => self.query_video_task(&task_id_arg(arguments)).await,
            other => Err(Error::UnknownTool(other.to_string())),
        }
    }

    async fn generate_image(&self, mut params: ImageParams) -> Result<Value> {
        fill_endpoint(&mut params.endpoint_id, &self.defaults.image_endpoint_id);
        let req = params.build(&self.defaults.image_model);
        info!(model = %req.model, size = %req.size, "submitting image generation");
        self.ark.generate_image(&req).await
    }

    async fn generate_video(&self, mut params: VideoParams) -> Result<Value> {
        fill_endpoint(&mut params.endpoint_id, &self.defaults.video_endpoint_id);
        let req = params.build(&self.defaults.video_model)?;
        info!(
            model = %req.model,
            items = req.content.len(),
            req_key = ?params.req_key,
            "submitting video generation"
        );
        self.ark.create_video_task(&req).await
    }

    async fn query_video_task(&self, task_id: &str) -> Result<Value> {
        self.ark.get_video_task(task_id).await
    }
}

fn parse_args<T: serde::de::DeserializeOwned>(arguments: &JsonObject) -> Result<T> {
    serde_json::from_value(Value::Object(arguments.clone()))
        .map_err(|e| Error::validation(e.to_string()))
}

/// Non-string IDs are stringified; a missing ID becomes empty and is rejected
/// by the client.
fn task_id_arg(arguments: &JsonObject) -> String {
    match arguments.get("task_id") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

fn fill_endpoint(endpoint_id: &mut Option<String>, default: &Option<String>) {
    let missing = endpoint_id.as_deref().map_or(true, str::is_empty);
    if missing {
        if let Some(d) = default.as_deref().filter(|d| !d.is_empty()) {
            *endpoint_id = Some(d.to_string());
        }
    }
}
