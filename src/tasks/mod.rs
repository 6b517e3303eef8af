pub mod directives;
pub mod image;
pub mod video;

pub use image::ImageParams;
pub use video::VideoParams;

// ---------------------------------------------------------------------------
// Valid values: advertised in tool descriptions. Only the prompt length is
// enforced locally; everything else is left for the service to reject.
// ---------------------------------------------------------------------------

pub const IMAGE_MODELS: &[&str] = &["doubao-seedream-4-5", "doubao-seedream-3-0-t2i"];

/// Sizes accepted by the tool schema. The service needs at least 3,686,400 pixels.
pub const IMAGE_SIZES: &[&str] = &["2560x1440", "1920x2160", "1920x2560", "2160x3840"];

pub const VIDEO_MODELS: &[&str] = &[
    "doubao-seedance-1.0-pro",
    "doubao-seedance-1.0-pro-fast",
    "doubao-seedance-1.0-lite-t2v",
];

pub const VIDEO_DURATIONS: &[u32] = &[3, 4, 5, 6];
pub const VIDEO_FPS: &[u32] = &[24, 30];
pub const VIDEO_RESOLUTIONS: &[&str] = &["480p", "720p", "1080p"];

pub const DEFAULT_IMAGE_MODEL: &str = "doubao-seedream-4-5";
pub const DEFAULT_IMAGE_SIZE: &str = "1920x2160";
pub const DEFAULT_VIDEO_MODEL: &str = "doubao-seedance-1.0-lite-t2v";
pub const DEFAULT_VIDEO_DURATION: u32 = 5;
pub const DEFAULT_VIDEO_FPS: u32 = 24;
pub const DEFAULT_VIDEO_RESOLUTION: &str = "720p";

pub const MAX_VIDEO_PROMPT_CHARS: usize = 500;

/// Endpoint ID beats model name beats the default. Empty strings count as absent.
pub fn resolve_model(endpoint_id: Option<&str>, model: Option<&str>, default_model: &str) -> String {
    endpoint_id
        .filter(|s| !s.is_empty())
        .or(model.filter(|s| !s.is_empty()))
        .unwrap_or(default_model)
        .to_string()
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_deref().filter(|s| !s.is_empty()).map(String::from)
}

fn non_empty_list(value: &Option<Vec<String>>) -> Option<Vec<String>> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_wins_over_model() {
        assert_eq!(resolve_model(Some("ep-1"), Some("m"), "d"), "ep-1");
        assert_eq!(resolve_model(None, Some("m"), "d"), "m");
        assert_eq!(resolve_model(None, None, "d"), "d");
    }

    #[test]
    fn empty_identifiers_are_skipped() {
        assert_eq!(resolve_model(Some(""), Some("m"), "d"), "m");
        assert_eq!(resolve_model(Some(""), Some(""), "d"), "d");
    }

    #[test]
    fn default_duration_is_advertised() {
        assert!(VIDEO_DURATIONS.contains(&DEFAULT_VIDEO_DURATION));
        assert!(VIDEO_FPS.contains(&DEFAULT_VIDEO_FPS));
        assert!(VIDEO_RESOLUTIONS.contains(&DEFAULT_VIDEO_RESOLUTION));
        assert!(IMAGE_SIZES.contains(&DEFAULT_IMAGE_SIZE));
        assert!(IMAGE_MODELS.contains(&DEFAULT_IMAGE_MODEL));
        assert!(VIDEO_MODELS.contains(&DEFAULT_VIDEO_MODEL));
    }

    fn schema_enum<T: schemars::JsonSchema>(field: &str) -> Vec<serde_json::Value> {
        let schema = schemars::schema_for!(T);
        schema.as_value()["properties"][field]["enum"]
            .as_array()
            .cloned()
            .unwrap_or_default()
    }

    #[test]
    fn schema_enums_match_constants() {
        use serde_json::json;
        assert_eq!(schema_enum::<ImageParams>("size"), json!(IMAGE_SIZES).as_array().unwrap().clone());
        assert_eq!(schema_enum::<ImageParams>("model"), json!(IMAGE_MODELS).as_array().unwrap().clone());
        assert_eq!(schema_enum::<VideoParams>("model"), json!(VIDEO_MODELS).as_array().unwrap().clone());
        assert_eq!(schema_enum::<VideoParams>("video_duration"), json!(VIDEO_DURATIONS).as_array().unwrap().clone());
        assert_eq!(schema_enum::<VideoParams>("fps"), json!(VIDEO_FPS).as_array().unwrap().clone());
        assert_eq!(schema_enum::<VideoParams>("resolution"), json!(VIDEO_RESOLUTIONS).as_array().unwrap().clone());
    }
}
