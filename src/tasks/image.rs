use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{non_empty, non_empty_list, resolve_model, DEFAULT_IMAGE_SIZE};
use crate::ark::types::ImageGenRequest;

/// Arguments of the `generate_image` tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ImageParams {
    /// Text describing the image to generate.
    pub prompt: String,
    /// Inference endpoint ID created in the Volcengine console. Takes priority over `model`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint_id: Option<String>,
    /// Model name. Using a bare model name may require account permissions; prefer `endpoint_id`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(extend("enum" = ["doubao-seedream-4-5", "doubao-seedream-3-0-t2i"]))]
    pub model: Option<String>,
    /// Image size, default 1920x2160. The service requires at least 3686400 pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(extend("enum" = ["2560x1440", "1920x2160", "1920x2560", "2160x3840"]))]
    pub size: Option<String>,
    /// Reference image URL (image-to-image).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Several reference image URLs (multi-image fusion).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref_image_urls: Option<Vec<String>>,
    /// Request key for tracing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub req_key: Option<String>,
    /// Add a watermark to the result. Default: false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watermark: Option<bool>,
}

impl ImageParams {
    /// Pure transform into the request body. Nothing is validated here; the
    /// service rejects what it does not accept.
    pub fn build(&self, default_model: &str) -> ImageGenRequest {
        ImageGenRequest {
            model: resolve_model(self.endpoint_id.as_deref(), self.model.as_deref(), default_model),
            prompt: self.prompt.clone(),
            size: non_empty(&self.size).unwrap_or_else(|| DEFAULT_IMAGE_SIZE.into()),
            watermark: self.watermark.unwrap_or(false),
            image_url: non_empty(&self.image_url),
            ref_image_urls: non_empty_list(&self.ref_image_urls),
            req_key: non_empty(&self.req_key),
        }
    }
}
