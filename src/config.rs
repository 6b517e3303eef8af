use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::ark::DEFAULT_BASE_URL;
use crate::dispatch::ToolDefaults;
use crate::tasks::{DEFAULT_IMAGE_MODEL, DEFAULT_VIDEO_MODEL};

pub const ENV_API_KEY: &str = "DOUBAO_API_KEY";
pub const ENV_BASE_URL: &str = "DOUBAO_BASE_URL";
pub const ENV_IMAGE_ENDPOINT_ID: &str = "DOUBAO_IMAGE_ENDPOINT_ID";
pub const ENV_VIDEO_ENDPOINT_ID: &str = "DOUBAO_VIDEO_ENDPOINT_ID";
pub const ENV_DEFAULT_IMAGE_MODEL: &str = "DOUBAO_DEFAULT_IMAGE_MODEL";
pub const ENV_DEFAULT_VIDEO_MODEL: &str = "DOUBAO_DEFAULT_VIDEO_MODEL";

// ---------------------------------------------------------------------------
// Settings: {configDir}/doubao-mcp/settings.json, overridden by DOUBAO_* env
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_base_url")]
    #[serde(alias = "baseURL")]
    pub base_url: String,
    #[serde(default)]
    pub image_endpoint_id: Option<String>,
    #[serde(default)]
    pub video_endpoint_id: Option<String>,
    #[serde(default = "default_image_model")]
    pub default_image_model: String,
    #[serde(default = "default_video_model")]
    pub default_video_model: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_image_model() -> String {
    DEFAULT_IMAGE_MODEL.to_string()
}

fn default_video_model() -> String {
    DEFAULT_VIDEO_MODEL.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            image_endpoint_id: None,
            video_endpoint_id: None,
            default_image_model: default_image_model(),
            default_video_model: default_video_model(),
        }
    }
}

impl Settings {
    /// Settings file (if any), then the process environment. Fails when no
    /// API key ends up configured.
    pub fn load() -> Result<Self> {
        let mut settings = match settings_path() {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        settings.apply_env(std::env::vars());
        settings.validate()?;
        Ok(settings)
    }

    /// A missing file yields defaults; a malformed one is an error.
    pub fn from_file(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(contents) => serde_json::from_str(&contents)
                .with_context(|| format!("invalid settings file {}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e).with_context(|| format!("failed to read {}", path.display())),
        }
    }

    /// Empty values are ignored, so `DOUBAO_IMAGE_ENDPOINT_ID=` does not
    /// clear a value from the settings file.
    pub fn apply_env<I>(&mut self, vars: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in vars {
            if value.is_empty() {
                continue;
            }
            match key.as_str() {
                ENV_API_KEY => self.api_key = value,
                ENV_BASE_URL => self.base_url = value,
                ENV_IMAGE_ENDPOINT_ID => self.image_endpoint_id = Some(value),
                ENV_VIDEO_ENDPOINT_ID => self.video_endpoint_id = Some(value),
                ENV_DEFAULT_IMAGE_MODEL => self.default_image_model = value,
                ENV_DEFAULT_VIDEO_MODEL => self.default_video_model = value,
                _ => {}
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            bail!("no API key configured: set {ENV_API_KEY}");
        }
        Ok(())
    }

    pub fn tool_defaults(&self) -> ToolDefaults {
        ToolDefaults {
            image_endpoint_id: self.image_endpoint_id.clone().filter(|s| !s.is_empty()),
            video_endpoint_id: self.video_endpoint_id.clone().filter(|s| !s.is_empty()),
            image_model: self.default_image_model.clone(),
            video_model: self.default_video_model.clone(),
        }
    }
}

fn settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("doubao-mcp").join("settings.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn env_overrides_defaults() {
        let mut s = Settings::default();
        s.apply_env(vars(&[
            (ENV_API_KEY, "sk-1"),
            (ENV_IMAGE_ENDPOINT_ID, "ep-img"),
            (ENV_DEFAULT_VIDEO_MODEL, "doubao-seedance-1.0-pro"),
            ("PATH", "/usr/bin"),
        ]));
        assert_eq!(s.api_key, "sk-1");
        assert_eq!(s.image_endpoint_id.as_deref(), Some("ep-img"));
        assert_eq!(s.video_endpoint_id, None);
        assert_eq!(s.default_image_model, DEFAULT_IMAGE_MODEL);
        assert_eq!(s.default_video_model, "doubao-seedance-1.0-pro");
        assert_eq!(s.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn empty_env_values_are_ignored() {
        let mut s = Settings {
            video_endpoint_id: Some("ep-file".into()),
            ..Settings::default()
        };
        s.apply_env(vars(&[(ENV_VIDEO_ENDPOINT_ID, ""), (ENV_API_KEY, "")]));
        assert_eq!(s.video_endpoint_id.as_deref(), Some("ep-file"));
        assert!(s.api_key.is_empty());
    }

    #[test]
    fn missing_api_key_fails_validation() {
        let err = Settings::default().validate().unwrap_err();
        assert!(err.to_string().contains(ENV_API_KEY));
    }

    #[test]
    fn settings_file_accepts_camel_case_and_base_url_alias() {
        let s: Settings = serde_json::from_str(
            r#"{"apiKey":"k","baseURL":"https://proxy/api/v3","imageEndpointId":"ep-1"}"#,
        )
        .unwrap();
        assert_eq!(s.api_key, "k");
        assert_eq!(s.base_url, "https://proxy/api/v3");
        assert_eq!(s.image_endpoint_id.as_deref(), Some("ep-1"));
        assert_eq!(s.default_video_model, DEFAULT_VIDEO_MODEL);
    }

    #[test]
    fn missing_settings_file_yields_defaults() {
        let s = Settings::from_file(Path::new("/nonexistent/doubao-mcp/settings.json")).unwrap();
        assert!(s.api_key.is_empty());
    }

    #[test]
    fn tool_defaults_drop_empty_endpoints() {
        let s = Settings {
            image_endpoint_id: Some(String::new()),
            video_endpoint_id: Some("ep-v".into()),
            ..Settings::default()
        };
        let d = s.tool_defaults();
        assert_eq!(d.image_endpoint_id, None);
        assert_eq!(d.video_endpoint_id.as_deref(), Some("ep-v"));
    }
}
