pub mod normalize;
pub mod transport;
pub mod types;

use serde_json::Value;
use tracing::info;

use crate::error::{Error, Result};
use transport::{HttpTransport, Transport, UpstreamRequest};
use types::{ImageGenRequest, VideoGenRequest};

pub const DEFAULT_BASE_URL: &str = "https://ark.cn-beijing.volces.com/api/v3";

const IMAGE_GENERATIONS_PATH: &str = "/images/generations";
const VIDEO_TASKS_PATH: &str = "/contents/generations/tasks";

/// Every method hands back the upstream payload untouched once the
/// normalizer has accepted it.
pub struct ArkClient {
    transport: Box<dyn Transport>,
}

impl ArkClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self::with_transport(HttpTransport::new(base_url, api_key))
    }

    pub fn with_transport(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Box::new(transport),
        }
    }

    /// POST /images/generations: synchronous, returns image URL(s).
    pub async fn generate_image(&self, req: &ImageGenRequest) -> Result<Value> {
        let body = serde_json::to_value(req)?;
        let resp = self
            .transport
            .send(UpstreamRequest::post(IMAGE_GENERATIONS_PATH, body))
            .await?;
        let out = normalize::check_generation("image generation", resp)?;
        let images = out.get("data").and_then(Value::as_array).map_or(0, Vec::len);
        info!(images, model = ?str_field(&out, "model"), "image generation succeeded");
        Ok(out)
    }

    /// POST /contents/generations/tasks: returns the async task ID.
    pub async fn create_video_task(&self, req: &VideoGenRequest) -> Result<Value> {
        let body = serde_json::to_value(req)?;
        let resp = self
            .transport
            .send(UpstreamRequest::post(VIDEO_TASKS_PATH, body))
            .await?;
        let out = normalize::check_generation("video generation", resp)?;
        info!(
            task_id = ?str_field(&out, "id"),
            status = ?str_field(&out, "status"),
            "video task created"
        );
        Ok(out)
    }

    /// GET /contents/generations/tasks/{task_id}: poll task status.
    pub async fn get_video_task(&self, task_id: &str) -> Result<Value> {
        if task_id.trim().is_empty() {
            return Err(Error::validation("task_id must not be empty"));
        }
        let path = format!("{VIDEO_TASKS_PATH}/{task_id}");
        let resp = self.transport.send(UpstreamRequest::get(path)).await?;
        let out = normalize::check_task_query(resp)?;
        info!(task_id, state = ?types::task_state(&out), "video task polled");
        Ok(out)
    }
}

fn str_field<'a>(v: &'a Value, key: &str) -> Option<&'a str> {
    v.get(key).and_then(Value::as_str)
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use reqwest::StatusCode;
    use serde_json::Value;

    use super::transport::{RawResponse, Transport, UpstreamRequest};
    use crate::error::Result;

    /// Records every request and answers from a queue of canned responses.
    #[derive(Clone, Default)]
    pub struct StubTransport {
        pub sent: Arc<Mutex<Vec<UpstreamRequest>>>,
        replies: Arc<Mutex<VecDeque<RawResponse>>>,
    }

    impl StubTransport {
        pub fn replying(status: StatusCode, body: Value) -> Self {
            let stub = Self::default();
            stub.push(status, Some(body));
            stub
        }

        pub fn push(&self, status: StatusCode, body: Option<Value>) {
            self.replies.lock().unwrap().push_back(RawResponse { status, body });
        }

        pub fn requests(&self) -> Vec<UpstreamRequest> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for StubTransport {
        async fn send(&self, req: UpstreamRequest) -> Result<RawResponse> {
            self.sent.lock().unwrap().push(req);
            Ok(self
                .replies
                .lock()
                .unwrap()
                .pop_front()
                .expect("stub transport ran out of replies"))
        }
    }
}
