use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

pub const MIN_DIMENSION: u32 = 64;

/// The sizes a caller may ask for. Anything else is replaced by
/// [`ImageSize::default`] at the request boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageSize {
    Square256,
    #[default]
    Square512,
    Square1024,
}

impl ImageSize {
    pub const ALL: [ImageSize; 3] = [
        ImageSize::Square256,
        ImageSize::Square512,
        ImageSize::Square1024,
    ];

    /// Exact match against the allow-list, no trimming or case folding.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|size| size.as_str() == value)
    }

    pub fn parse_or_default(value: &str) -> Self {
        Self::parse(value).unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::Square256 => "256x256",
            ImageSize::Square512 => "512x512",
            ImageSize::Square1024 => "1024x1024",
        }
    }

    pub fn dimensions(&self) -> ImageDimensions {
        parse_size(self.as_str())
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ImageSize {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ImageSize {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse_or_default(&raw))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

impl Default for ImageDimensions {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
        }
    }
}

/// Parses a strict `<digits>x<digits>` string. Malformed input yields 512x512;
/// each side is raised to at least 64 and otherwise passed through untouched.
pub fn parse_size(value: &str) -> ImageDimensions {
    let Some((w, h)) = value.split_once('x') else {
        return ImageDimensions::default();
    };

    match (parse_side(w), parse_side(h)) {
        (Some(width), Some(height)) => ImageDimensions {
            width: width.max(MIN_DIMENSION),
            height: height.max(MIN_DIMENSION),
        },
        _ => ImageDimensions::default(),
    }
}

fn parse_side(digits: &str) -> Option<u32> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // Only overflow can fail past the digit check
    Some(digits.parse().unwrap_or(u32::MAX))
}
