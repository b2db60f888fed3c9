use serde::{Deserialize, Serialize};

use crate::models::ImageSize;

#[derive(Debug, Clone, Serialize)]
pub struct OpenAiImageRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub size: ImageSize,
    pub n: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpenAiImageResponse {
    #[serde(default)]
    pub data: Vec<ProviderImage>,
}

/// One item of a provider response. Either field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderImage {
    #[serde(default)]
    pub b64_json: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl ProviderImage {
    pub fn inline(b64_json: impl Into<String>) -> Self {
        Self {
            b64_json: Some(b64_json.into()),
            url: None,
        }
    }

    pub fn remote(url: impl Into<String>) -> Self {
        Self {
            b64_json: None,
            url: Some(url.into()),
        }
    }

    pub fn inline_data(&self) -> Option<&str> {
        self.b64_json.as_deref().filter(|data| !data.is_empty())
    }

    pub fn remote_url(&self) -> Option<&str> {
        self.url.as_deref().filter(|url| !url.is_empty())
    }

    /// A single reference string for the item: a PNG data URI when inline data
    /// is present, else the URL. `None` marks the item as unusable.
    pub fn reference(&self) -> Option<String> {
        if let Some(data) = self.inline_data() {
            return Some(format!("data:image/png;base64,{}", data));
        }
        self.remote_url().map(str::to_string)
    }
}
