use std::fmt;

use super::color::ColorPair;

const PANEL_INSET: u32 = 16;
const PANEL_RADIUS: u32 = 12;
const MIN_FONT_SIZE: f64 = 14.0;
const FONT_FAMILY: &str =
    "system-ui, -apple-system, Segoe UI, Roboto, Ubuntu, Cantarell, Noto Sans, sans-serif";

/// A complete, self-contained SVG document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgDocument(String);

impl SvgDocument {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for SvgDocument {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SvgDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Escapes `&`, `<` and `>` for embedding in element text. `&` goes first so
/// the entities produced for the other two are not escaped again.
pub fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

pub fn font_size(width: u32, height: u32) -> f64 {
    (width.min(height) as f64 / 16.0).max(MIN_FONT_SIZE)
}

/// Renders the fallback artwork for `prompt`: a diagonal two-stop gradient,
/// a translucent rounded panel inset on every side, and the prompt centered
/// on top. Pure and total; the same inputs always give the same bytes.
pub fn synthesize(prompt: &str, width: u32, height: u32, seed: u32) -> SvgDocument {
    let colors = ColorPair::derive(prompt, seed);
    render(prompt, width, height, &colors)
}

fn render(prompt: &str, width: u32, height: u32, colors: &ColorPair) -> SvgDocument {
    let panel_width = width.saturating_sub(2 * PANEL_INSET);
    let panel_height = height.saturating_sub(2 * PANEL_INSET);

    let svg = format!(
        r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">
  <defs>
    <linearGradient id="g" x1="0" y1="0" x2="1" y2="1">
      <stop offset="0%" stop-color="{bg1}"/>
      <stop offset="100%" stop-color="{bg2}"/>
    </linearGradient>
  </defs>
  <rect x="0" y="0" width="100%" height="100%" fill="url(#g)"/>
  <g>
    <rect x="{inset}" y="{inset}" rx="{radius}" ry="{radius}" width="{panel_width}" height="{panel_height}" fill="rgba(255,255,255,0.25)" />
    <text x="50%" y="50%" dominant-baseline="middle" text-anchor="middle" font-family="{font_family}" font-size="{font_size}" fill="#111" opacity="0.9" style="paint-order: stroke; stroke: rgba(255,255,255,0.65); stroke-width: 6px;">
      {text}
    </text>
  </g>
</svg>"##,
        width = width,
        height = height,
        bg1 = colors.bg1,
        bg2 = colors.bg2,
        inset = PANEL_INSET,
        radius = PANEL_RADIUS,
        panel_width = panel_width,
        panel_height = panel_height,
        font_family = FONT_FAMILY,
        font_size = font_size(width, height),
        text = escape_text(prompt),
    );

    SvgDocument(svg)
}
