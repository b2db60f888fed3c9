use crate::{
    config::OpenAiConfig,
    error::{ImagineError, Result},
    models::{ImageSize, OpenAiImageRequest, OpenAiImageResponse, ProviderImage},
    provider::traits::ImageProvider,
};
use async_trait::async_trait;
use reqwest::{header::HeaderValue, Client};

pub const PROVIDER_NAME: &str = "openai";

pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiProvider {
    pub fn new(config: OpenAiConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ImagineError::ConfigError("OpenAI API key is required".into()))?;

        // The key is only attached to generation calls; downloads go to
        // arbitrary hosts and must stay unauthenticated.
        if HeaderValue::from_str(&format!("Bearer {}", api_key)).is_err() {
            return Err(ImagineError::ConfigError(
                "OpenAI API key is not a valid header".into(),
            ));
        }

        let client = Client::builder()
            .build()
            .map_err(|e| ImagineError::ConfigError(format!("HTTP client setup failed: {}", e)))?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            model: config.model().to_string(),
            base_url: config.base_url().to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn endpoint(&self) -> String {
        format!("{}/images/generations", self.base_url)
    }
}

#[async_trait]
impl ImageProvider for OpenAiProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn generate(&self, prompt: &str, size: ImageSize, n: u32) -> Result<Vec<ProviderImage>> {
        let payload = OpenAiImageRequest {
            model: &self.model,
            prompt,
            size,
            n,
        };

        log::info!("Generating {} image(s) with model: {}", n, self.model);

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| ImagineError::ProviderError(format!("OpenAI request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ImagineError::ProviderError(format!(
                "OpenAI returned {}: {}",
                status, error_text
            )));
        }

        let body: OpenAiImageResponse = response.json().await.map_err(|e| {
            ImagineError::ProviderError(format!("OpenAI response was not understood: {}", e))
        })?;

        log::debug!("OpenAI returned {} item(s)", body.data.len());
        Ok(body.data)
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ImagineError::ProviderError(format!("Image download failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(ImagineError::ProviderError(format!(
                "Failed to fetch image url: {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ImagineError::ProviderError(format!("Image download failed: {}", e)))?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Accepts one connection, answers with `status` and `body`, and yields
    /// the raw request it received.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut received = Vec::new();
            let mut chunk = [0u8; 4096];
            loop {
                let read = socket.read(&mut chunk).await.unwrap();
                if read == 0 {
                    break;
                }
                received.extend_from_slice(&chunk[..read]);
                if request_complete(&received) {
                    break;
                }
            }

            let response = format!(
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            String::from_utf8_lossy(&received).to_string()
        });

        (format!("http://{}", addr), handle)
    }

    fn request_complete(received: &[u8]) -> bool {
        let text = String::from_utf8_lossy(received);
        let Some(head_end) = text.find("\r\n\r\n") else {
            return false;
        };
        let length = header_value(&text[..head_end], "content-length")
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(0);
        received.len() >= head_end + 4 + length
    }

    fn header_value<'a>(request: &'a str, name: &str) -> Option<&'a str> {
        request.lines().skip(1).find_map(|line| {
            let (key, value) = line.split_once(':')?;
            key.trim().eq_ignore_ascii_case(name).then(|| value.trim())
        })
    }

    fn provider_at(base_url: &str) -> OpenAiProvider {
        OpenAiProvider::new(
            OpenAiConfig::new()
                .with_api_key("sk-secret")
                .with_base_url(format!("{}/v1", base_url)),
        )
        .unwrap()
    }

    #[test]
    fn test_requires_api_key() {
        assert!(OpenAiProvider::new(OpenAiConfig::new()).is_err());
        assert!(OpenAiProvider::new(OpenAiConfig::new().with_api_key("  ")).is_err());
        assert!(OpenAiProvider::new(OpenAiConfig::new().with_api_key("sk-\nbad")).is_err());
    }

    #[test]
    fn test_endpoint_and_model() {
        let provider = OpenAiProvider::new(
            OpenAiConfig::new()
                .with_api_key("sk-test")
                .with_base_url("http://127.0.0.1:9/v1/"),
        )
        .unwrap();
        assert_eq!(provider.name(), "openai");
        assert_eq!(provider.model(), "gpt-image-1");
        assert_eq!(provider.endpoint(), "http://127.0.0.1:9/v1/images/generations");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_provider_error() {
        let provider = OpenAiProvider::new(
            OpenAiConfig::new()
                .with_api_key("sk-test")
                .with_base_url("http://127.0.0.1:9/v1"),
        )
        .unwrap();

        let err = provider
            .generate("fox", ImageSize::Square256, 1)
            .await
            .unwrap_err();
        assert!(matches!(err, ImagineError::ProviderError(_)));
    }

    #[tokio::test]
    async fn test_generate_sends_bearer_and_parses_items() {
        let (base_url, server) = serve_once(
            "200 OK",
            r#"{"data":[{"b64_json":"QUJD"},{"url":"https://img.example/a.png"}]}"#,
        )
        .await;
        let provider = provider_at(&base_url);

        let items = provider
            .generate("fox", ImageSize::Square256, 2)
            .await
            .unwrap();
        assert_eq!(
            items,
            vec![
                ProviderImage::inline("QUJD"),
                ProviderImage::remote("https://img.example/a.png")
            ]
        );

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /v1/images/generations "));
        assert_eq!(header_value(&request, "authorization"), Some("Bearer sk-secret"));
        assert_eq!(header_value(&request, "content-type"), Some("application/json"));
        assert!(request.contains(r#""size":"256x256""#));
        assert!(request.contains(r#""n":2"#));
    }

    #[tokio::test]
    async fn test_generate_error_status_keeps_body() {
        let (base_url, server) = serve_once(
            "500 Internal Server Error",
            r#"{"error":{"message":"model overloaded"}}"#,
        )
        .await;

        let err = provider_at(&base_url)
            .generate("fox", ImageSize::Square512, 1)
            .await
            .unwrap_err();
        match err {
            ImagineError::ProviderError(message) => {
                assert!(message.contains("500"));
                assert!(message.contains("model overloaded"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_fetch_does_not_forward_api_key() {
        let (base_url, server) = serve_once("200 OK", "PNGDATA").await;
        let provider = provider_at("http://127.0.0.1:9");

        let bytes = provider
            .fetch(&format!("{}/images/a.png", base_url))
            .await
            .unwrap();
        assert_eq!(bytes, b"PNGDATA".to_vec());

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /images/a.png "));
        assert_eq!(header_value(&request, "authorization"), None);
        assert_eq!(header_value(&request, "content-type"), None);
        assert!(!request.contains("sk-secret"));
    }

    #[tokio::test]
    async fn test_fetch_error_status() {
        let (base_url, server) = serve_once("404 Not Found", "").await;

        let err = provider_at("http://127.0.0.1:9")
            .fetch(&format!("{}/gone.png", base_url))
            .await
            .unwrap_err();
        match err {
            ImagineError::ProviderError(message) => assert!(message.contains("404")),
            other => panic!("unexpected error: {:?}", other),
        }
        server.await.unwrap();
    }
}
