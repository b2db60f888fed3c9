use serde::{Serialize, Serializer};
use std::fmt;

pub const FALLBACK_TAG: &str = "fallback";

/// Where the images in a [`GenerationResult`] came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provenance {
    /// No provider configured.
    Fallback,
    /// The named provider produced the images.
    Provider(String),
    /// The named provider was tried, failed or returned nothing usable.
    ProviderFallback(String),
}

impl Provenance {
    pub fn is_fallback(&self) -> bool {
        !matches!(self, Provenance::Provider(_))
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provenance::Fallback => f.write_str(FALLBACK_TAG),
            Provenance::Provider(name) => f.write_str(name),
            Provenance::ProviderFallback(name) => write!(f, "{}-{}", name, FALLBACK_TAG),
        }
    }
}

impl Serialize for Provenance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationResult {
    pub images: Vec<String>,
    pub provider: Provenance,
}
