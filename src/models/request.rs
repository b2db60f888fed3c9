use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    error::{ImagineError, Result},
    models::ImageSize,
    normalize::normalize,
};

pub const PROMPT_REQUIRED: &str = "Prompt is required.";

/// Inbound `POST /api/generate` body. Fields stay loosely typed so that a
/// wrong type degrades to a default instead of failing deserialization, but
/// the body itself must be a JSON object.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct GenerateBody {
    pub prompt: Option<Value>,
    pub size: Option<Value>,
    pub n: Option<Value>,
}

impl From<Map<String, Value>> for GenerateBody {
    fn from(mut fields: Map<String, Value>) -> Self {
        Self {
            prompt: fields.remove("prompt"),
            size: fields.remove("size"),
            n: fields.remove("n"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// A validated request. Only [`GenerationRequest::new`] builds one, so the
/// prompt is never blank and the count is always within `[1, 4]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    prompt: String,
    size: ImageSize,
    count: u32,
}

impl GenerationRequest {
    /// Trims and validates the prompt, then normalizes size and count.
    pub fn new(prompt: &str, raw_size: Option<&str>, raw_count: Option<&Value>) -> Result<Self> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(ImagineError::ValidationError(PROMPT_REQUIRED.into()));
        }

        let (size, count) = normalize(raw_size, raw_count);
        Ok(Self {
            prompt: prompt.to_string(),
            size,
            count,
        })
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn size(&self) -> ImageSize {
        self.size
    }

    pub fn count(&self) -> u32 {
        self.count
    }
}

impl TryFrom<&GenerateBody> for GenerationRequest {
    type Error = ImagineError;

    fn try_from(body: &GenerateBody) -> Result<Self> {
        // Non-string prompts are treated like empty ones
        let prompt = body.prompt.as_ref().and_then(Value::as_str).unwrap_or("");
        let size = body.size.as_ref().and_then(Value::as_str);
        Self::new(prompt, size, body.n.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_trims_prompt() {
        let request = GenerationRequest::new("  fox  ", None, None).unwrap();
        assert_eq!(request.prompt(), "fox");
        assert_eq!(request.size(), ImageSize::Square512);
        assert_eq!(request.count(), 1);
    }

    #[test]
    fn test_rejects_blank_prompt() {
        let err = GenerationRequest::new("   ", Some("256x256"), Some(&json!(2))).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_from_body() {
        let body: GenerateBody =
            serde_json::from_value(json!({"prompt": "cat", "size": "1024x1024", "n": "3"}))
                .unwrap();
        let request = GenerationRequest::try_from(&body).unwrap();
        assert_eq!(request.size(), ImageSize::Square1024);
        assert_eq!(request.count(), 3);
    }

    #[test]
    fn test_from_body_wrong_types() {
        let body: GenerateBody =
            serde_json::from_value(json!({"prompt": 42, "size": 256})).unwrap();
        assert!(GenerationRequest::try_from(&body).unwrap_err().is_validation());

        let body: GenerateBody =
            serde_json::from_value(json!({"prompt": "ok", "size": 256, "n": null})).unwrap();
        let request = GenerationRequest::try_from(&body).unwrap();
        assert_eq!(request.size(), ImageSize::Square512);
        assert_eq!(request.count(), 1);
    }

    #[test]
    fn test_count_is_always_clamped() {
        let none = GenerationRequest::new("fox", None, Some(&json!(0))).unwrap();
        assert_eq!(none.count(), 1);

        let many = GenerationRequest::new("fox", None, Some(&json!(50))).unwrap();
        assert_eq!(many.count(), 4);
    }

    #[test]
    fn test_body_must_be_object() {
        assert!(serde_json::from_str::<GenerateBody>(r#"["cat"]"#).is_err());
        assert!(serde_json::from_str::<GenerateBody>(r#""cat""#).is_err());
        assert!(serde_json::from_str::<GenerateBody>("null").is_err());

        let body: GenerateBody = serde_json::from_str(r#"{"prompt":"cat","extra":true}"#).unwrap();
        assert_eq!(body.prompt, Some(json!("cat")));
        assert_eq!(body.size, None);
    }
}
