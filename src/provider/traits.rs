use crate::{
    error::Result,
    models::{ImageSize, ProviderImage},
};
use async_trait::async_trait;

/// A remote image generation service. Every call is one-shot: callers do not
/// retry, and any error is treated as final.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Tag reported to callers when this provider produced the images.
    fn name(&self) -> &str;

    /// Extension for files written from this provider's image bytes.
    fn file_extension(&self) -> &str {
        "png"
    }

    async fn generate(&self, prompt: &str, size: ImageSize, n: u32) -> Result<Vec<ProviderImage>>;

    /// Downloads an image the provider returned by reference.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}
