//! Prompt-to-image generation with a deterministic fallback.
//!
//! Requests go to the configured image provider first. When there is no
//! provider, or it fails or returns nothing usable, the crate synthesizes
//! SVG artwork from the prompt instead, so a valid prompt always yields images.

pub mod config;
pub mod error;
pub mod fallback;
pub mod generator;
pub mod logger;
pub mod models;
pub mod normalize;
pub mod output;
pub mod provider;
#[cfg(feature = "server")]
pub mod server;

pub use config::{Config, OpenAiConfig};
pub use error::{ImagineError, Result};
pub use fallback::{synthesize, DataUri, DocumentEncoder, RawSvg, SvgDocument};
pub use generator::{fallback_images, GeneratedFile, Generator};
pub use models::{
    parse_size, GenerationRequest, GenerationResult, ImageDimensions, ImageSize, Provenance,
    ProviderImage,
};
pub use normalize::normalize;
pub use provider::{ImageProvider, OpenAiProvider};
