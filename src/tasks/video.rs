use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::directives::{self, Directive};
use super::{
    non_empty, resolve_model, DEFAULT_VIDEO_DURATION, DEFAULT_VIDEO_FPS, DEFAULT_VIDEO_RESOLUTION,
    MAX_VIDEO_PROMPT_CHARS,
};
use crate::ark::types::{ContentRole, VideoContentItem, VideoGenRequest};
use crate::error::{Error, Result};

/// Arguments of the `generate_video` tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct VideoParams {
    /// Text describing the video (max 500 characters). May embed `--dur`, `--fps`,
    /// `--rs` or `--ratio` directives, which then override the matching fields.
    #[schemars(extend("maxLength" = 500))]
    pub prompt: String,
    /// Inference endpoint ID created in the Volcengine console. Takes priority over `model`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint_id: Option<String>,
    /// Model name, default doubao-seedance-1.0-lite-t2v.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(extend("enum" = [
        "doubao-seedance-1.0-pro",
        "doubao-seedance-1.0-pro-fast",
        "doubao-seedance-1.0-lite-t2v"
    ]))]
    pub model: Option<String>,
    /// Duration in seconds, default 5.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(extend("enum" = [3, 4, 5, 6]))]
    pub video_duration: Option<u32>,
    /// Frame rate, default 24.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(extend("enum" = [24, 30]))]
    pub fps: Option<u32>,
    /// Resolution, default 720p.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(extend("enum" = ["480p", "720p", "1080p"]))]
    pub resolution: Option<String>,
    /// First frame image URL (image-to-video).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_frame_image_url: Option<String>,
    /// Reference image URLs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref_image_urls: Option<Vec<String>>,
    /// Request key for tracing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub req_key: Option<String>,
}

impl VideoParams {
    /// Builds the task creation body. Fails only on an oversized prompt.
    pub fn build(&self, default_model: &str) -> Result<VideoGenRequest> {
        let chars = self.prompt.chars().count();
        if chars > MAX_VIDEO_PROMPT_CHARS {
            return Err(Error::validation(format!(
                "prompt must be at most {MAX_VIDEO_PROMPT_CHARS} characters, got {chars}"
            )));
        }

        let model = resolve_model(self.endpoint_id.as_deref(), self.model.as_deref(), default_model);
        let text = directives::encode(&self.prompt, &self.directives());

        let mut content = vec![VideoContentItem::Text { text }];
        if let Some(url) = non_empty(&self.first_frame_image_url) {
            content.push(VideoContentItem::image(url, None));
        }
        for url in self.ref_image_urls.iter().flatten() {
            content.push(VideoContentItem::image(url.clone(), Some(ContentRole::ReferenceImage)));
        }

        Ok(VideoGenRequest { model, content })
    }

    fn directives(&self) -> Vec<Directive> {
        let resolution = non_empty(&self.resolution).unwrap_or_else(|| DEFAULT_VIDEO_RESOLUTION.into());
        let ratio = directives::ratio_for(&resolution);
        vec![
            Directive::new(directives::DURATION, self.video_duration.unwrap_or(DEFAULT_VIDEO_DURATION)),
            Directive::new(directives::FPS, self.fps.unwrap_or(DEFAULT_VIDEO_FPS)),
            Directive::new(directives::RESOLUTION, &resolution),
            Directive::new(directives::RATIO, ratio),
        ]
    }
}
