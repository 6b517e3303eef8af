use rmcp::{
    model::*,
    service::RequestContext,
    ErrorData, RoleServer, ServerHandler,
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;

use crate::dispatch::{self, Dispatcher, ToolResponse};
use crate::tasks::{ImageParams, VideoParams};

// ---------------------------------------------------------------------------
// Tool parameter schemas (advertised through tools/list only)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, JsonSchema)]
pub struct QueryVideoTaskParams {
    /// Video generation task ID returned by generate_video.
    pub task_id: String,
}

const GENERATE_IMAGE_DESCRIPTION: &str = "Generate images with the Doubao Seedream models. \
    Supports text-to-image, image-to-image (image_url) and multi-image fusion (ref_image_urls). \
    Prefer endpoint_id (an inference endpoint created in the Volcengine console) over model; \
    a bare model name may need extra account permissions and fails with \
    InvalidEndpointOrModel.NotFound otherwise. \
    Models: doubao-seedream-4-5 (default), doubao-seedream-3-0-t2i. \
    Sizes: 2560x1440, 1920x2160 (default), 1920x2560, 2160x3840. \
    Watermark is off unless requested.";

const GENERATE_VIDEO_DESCRIPTION: &str = "Generate a video with the Doubao Seedance models. \
    Supports text-to-video, image-to-video (first_frame_image_url) and reference images (ref_image_urls). \
    Prompt is at most 500 characters. \
    Models: doubao-seedance-1.0-pro, doubao-seedance-1.0-pro-fast, doubao-seedance-1.0-lite-t2v (default). \
    video_duration: 3, 4, 5 (default), 6 seconds. fps: 24 (default), 30. \
    resolution: 480p, 720p (default), 1080p. \
    Returns a task ID; poll it with query_video_task.";

const QUERY_VIDEO_TASK_DESCRIPTION: &str = "Query the status and result of a Doubao video generation task. \
    Status is one of pending, processing, success, failed. \
    On success the result carries the video download URL.";

/// The three tools with their input schemas.
pub fn tools() -> Vec<Tool> {
    vec![
        Tool::new(dispatch::GENERATE_IMAGE, GENERATE_IMAGE_DESCRIPTION, JsonObject::new())
            .with_input_schema::<ImageParams>(),
        Tool::new(dispatch::GENERATE_VIDEO, GENERATE_VIDEO_DESCRIPTION, JsonObject::new())
            .with_input_schema::<VideoParams>(),
        Tool::new(dispatch::QUERY_VIDEO_TASK, QUERY_VIDEO_TASK_DESCRIPTION, JsonObject::new())
            .with_input_schema::<QueryVideoTaskParams>(),
    ]
}

impl From<ToolResponse> for CallToolResult {
    fn from(resp: ToolResponse) -> Self {
        let content = vec![Content::text(resp.text)];
        if resp.is_error {
            CallToolResult::error(content)
        } else {
            CallToolResult::success(content)
        }
    }
}

// ---------------------------------------------------------------------------
// MCP Server
// ---------------------------------------------------------------------------

/// Tool calls go to the dispatcher with the caller's arguments untouched, so
/// argument problems come back as error envelopes rather than JSON-RPC errors.
#[derive(Clone)]
pub struct DoubaoMcp {
    dispatcher: Arc<Dispatcher>,
    tools: Arc<Vec<Tool>>,
}

impl DoubaoMcp {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            dispatcher,
            tools: Arc::new(tools()),
        }
    }
}

impl ServerHandler for DoubaoMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(SERVER_INSTRUCTIONS.into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult::with_all_items(self.tools.as_ref().clone()))
    }

    fn get_tool(&self, name: &str) -> Option<Tool> {
        self.tools.iter().find(|t| t.name == name).cloned()
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        let arguments = request.arguments.unwrap_or_default();
        Ok(self.dispatcher.call(&request.name, arguments).await.into())
    }
}

// ---------------------------------------------------------------------------
// Server instructions: advertised to clients on initialize
// ---------------------------------------------------------------------------

const SERVER_INSTRUCTIONS: &str = "\
Doubao image and video generation (Volcengine ARK).

# Workflow

1. **Images**: generate_image is synchronous and returns image URLs directly.
2. **Videos**: generate_video submits an asynchronous task and returns its id.
3. **Polling**: call query_video_task with that id until status is success or failed.
   A non-zero code in the query result can simply mean the task is still running.

# Endpoints

If a call fails with InvalidEndpointOrModel.NotFound, create an inference endpoint in the
Volcengine console and pass its id as endpoint_id. The server may also be configured with
default endpoint ids, used whenever endpoint_id is omitted.

# Video prompt directives

The video prompt may end with directives the service parses itself:
--dur <seconds> --fps <24|30> --rs <480p|720p|1080p> --ratio <16:9|adaptive|...>
A directive written into the prompt overrides the matching structured argument.
";
