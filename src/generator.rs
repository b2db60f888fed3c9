//! Provider-first generation with deterministic fallback.
//!
//! A request either gets the provider's images in the provider's order, or
//! exactly `count` fallback images where image `i` was synthesized with seed
//! `i`. The provider is called at most once per request and never retried.

use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::{
    config::Config,
    error::{ImagineError, Result},
    fallback::{encode::SVG_EXTENSION, synthesize, DataUri, DocumentEncoder, RawSvg},
    models::{
        parse_size, GenerationRequest, GenerationResult, ImageSize, Provenance, ProviderImage,
        PROMPT_REQUIRED,
    },
    provider::{provider_from_config, ImageProvider},
};

/// One image ready to be written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub provenance: Provenance,
    pub bytes: Vec<u8>,
    pub extension: String,
}

impl GeneratedFile {
    /// The fallback artwork for seed 0, sized from a lenient `"WxH"` string.
    pub fn fallback(prompt: &str, raw_size: &str, provenance: Provenance) -> Self {
        let dims = parse_size(raw_size);
        let document = synthesize(prompt, dims.width, dims.height, 0);
        Self {
            provenance,
            bytes: RawSvg.encode(&document),
            extension: SVG_EXTENSION.to_string(),
        }
    }
}

#[derive(Clone, Default)]
pub struct Generator {
    provider: Option<Arc<dyn ImageProvider>>,
}

impl Generator {
    pub fn new(provider: Option<Arc<dyn ImageProvider>>) -> Self {
        Self { provider }
    }

    pub fn with_provider(provider: Arc<dyn ImageProvider>) -> Self {
        Self::new(Some(provider))
    }

    pub fn fallback_only() -> Self {
        Self::new(None)
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(provider_from_config(config))
    }

    pub fn provider_name(&self) -> Option<&str> {
        self.provider.as_deref().map(|p| p.name())
    }

    pub async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult> {
        ensure_prompt(request.prompt())?;
        let _timer = crate::logger::timer("image generation");

        let provenance = match &self.provider {
            None => Provenance::Fallback,
            Some(provider) => match try_provider(provider.as_ref(), request).await {
                Ok(images) => {
                    return Ok(GenerationResult {
                        images,
                        provider: Provenance::Provider(provider.name().to_string()),
                    })
                }
                Err(e) => {
                    log::warn!(
                        "⚠️  {} generation failed, using fallback. Details: {}",
                        provider.name(),
                        e
                    );
                    Provenance::ProviderFallback(provider.name().to_string())
                }
            },
        };

        Ok(GenerationResult {
            images: fallback_images(request.prompt(), request.size(), request.count()),
            provider: provenance,
        })
    }

    /// Single-image variant for writing to disk. Provider bytes come from the
    /// inline base64 payload or a follow-up download of the returned URL.
    pub async fn generate_file(&self, prompt: &str, raw_size: &str) -> Result<GeneratedFile> {
        let prompt = ensure_prompt(prompt)?;

        let provenance = match &self.provider {
            None => Provenance::Fallback,
            Some(provider) => {
                let size = ImageSize::parse_or_default(raw_size);
                match fetch_first_image(provider.as_ref(), prompt, size).await {
                    Ok(bytes) => {
                        return Ok(GeneratedFile {
                            provenance: Provenance::Provider(provider.name().to_string()),
                            bytes,
                            extension: provider.file_extension().to_string(),
                        })
                    }
                    Err(e) => {
                        log::warn!("⚠️  {} generation failed, writing fallback: {}", provider.name(), e);
                        Provenance::ProviderFallback(provider.name().to_string())
                    }
                }
            }
        };

        Ok(GeneratedFile::fallback(prompt, raw_size, provenance))
    }
}

/// `count` data-URI images, seeds `0..count` in ascending order.
pub fn fallback_images(prompt: &str, size: ImageSize, count: u32) -> Vec<String> {
    let dims = size.dimensions();
    (0..count)
        .map(|seed| DataUri.encode(&synthesize(prompt, dims.width, dims.height, seed)))
        .collect()
}

fn ensure_prompt(prompt: &str) -> Result<&str> {
    let prompt = prompt.trim();
    if prompt.is_empty() {
        return Err(ImagineError::ValidationError(PROMPT_REQUIRED.into()));
    }
    Ok(prompt)
}

async fn try_provider(
    provider: &dyn ImageProvider,
    request: &GenerationRequest,
) -> Result<Vec<String>> {
    let items = provider
        .generate(request.prompt(), request.size(), request.count())
        .await?;

    let images: Vec<String> = items.iter().filter_map(ProviderImage::reference).collect();
    if images.is_empty() {
        return Err(ImagineError::ProviderError(format!(
            "{} returned no usable images ({} item(s))",
            provider.name(),
            items.len()
        )));
    }
    Ok(images)
}

async fn fetch_first_image(
    provider: &dyn ImageProvider,
    prompt: &str,
    size: ImageSize,
) -> Result<Vec<u8>> {
    let items = provider.generate(prompt, size, 1).await?;
    let item = items
        .first()
        .ok_or_else(|| ImagineError::ProviderError("provider returned no images".into()))?;

    if let Some(data) = item.inline_data() {
        return STANDARD
            .decode(data)
            .map_err(|e| ImagineError::ProviderError(format!("invalid base64 image: {}", e)));
    }
    if let Some(url) = item.remote_url() {
        return provider.fetch(url).await;
    }
    Err(ImagineError::ProviderError(
        "provider item had neither data nor url".into(),
    ))
}
