//! Deterministic fallback artwork: prompt + seed in, SVG out. Used whenever
//! no provider is configured or the provider fails.

pub mod color;
pub mod encode;
pub mod hash;
pub mod svg;

pub use color::{hsl_to_hex, ColorPair};
pub use encode::{DataUri, DocumentEncoder, RawSvg};
pub use hash::{hash_prompt, seeded_hash};
pub use svg::{escape_text, synthesize, SvgDocument};
