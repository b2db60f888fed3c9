use base64::{engine::general_purpose::STANDARD, Engine as _};

use super::svg::SvgDocument;

pub const SVG_MIME: &str = "image/svg+xml";
pub const SVG_EXTENSION: &str = "svg";

/// Turns a synthesized document into one surface encoding. Synthesis happens
/// once; callers pick the encoder that matches where the image is going.
pub trait DocumentEncoder {
    type Output;

    fn encode(&self, document: &SvgDocument) -> Self::Output;
}

/// The document bytes as-is, for writing `.svg` files.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawSvg;

impl DocumentEncoder for RawSvg {
    type Output = Vec<u8>;

    fn encode(&self, document: &SvgDocument) -> Vec<u8> {
        document.as_str().as_bytes().to_vec()
    }
}

/// `data:image/svg+xml;base64,...`, for inline use in JSON responses.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataUri;

impl DocumentEncoder for DataUri {
    type Output = String;

    fn encode(&self, document: &SvgDocument) -> String {
        format!(
            "data:{};base64,{}",
            SVG_MIME,
            STANDARD.encode(document.as_str())
        )
    }
}
