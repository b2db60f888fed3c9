use super::hash::seeded_hash;

pub const HUE_OFFSET: u32 = 60;
pub const SATURATION: u32 = 70;
pub const LIGHTNESS_START: u32 = 60;
pub const LIGHTNESS_END: u32 = 40;

/// HSL (degrees, percent, percent) to a `#rrggbb` string. `hue` is expected
/// to already be reduced into `0..360`.
pub fn hsl_to_hex(hue: u32, saturation: u32, lightness: u32) -> String {
    let h = hue as f64;
    let s = saturation as f64 / 100.0;
    let l = lightness as f64 / 100.0;

    let k = |n: f64| (n + h / 30.0) % 12.0;
    let a = s * l.min(1.0 - l);
    let channel = |n: f64| {
        let v = l - a * (k(n) - 3.0).min(9.0 - k(n)).min(1.0).max(-1.0);
        (255.0 * v).round().clamp(0.0, 255.0) as u8
    };

    format!("#{:02x}{:02x}{:02x}", channel(0.0), channel(8.0), channel(4.0))
}

/// The two gradient stops of a fallback image. `hue_b` is always `hue_a`
/// rotated by 60 degrees; only the base hue depends on prompt and seed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorPair {
    pub hue_a: u32,
    pub hue_b: u32,
    pub bg1: String,
    pub bg2: String,
}

impl ColorPair {
    pub fn derive(prompt: &str, seed: u32) -> Self {
        Self::from_hue(seeded_hash(prompt, seed) % 360)
    }

    pub fn from_hue(hue: u32) -> Self {
        let hue_a = hue % 360;
        let hue_b = (hue_a + HUE_OFFSET) % 360;
        Self {
            hue_a,
            hue_b,
            bg1: hsl_to_hex(hue_a, SATURATION, LIGHTNESS_START),
            bg2: hsl_to_hex(hue_b, SATURATION, LIGHTNESS_END),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primaries() {
        assert_eq!(hsl_to_hex(0, 100, 50), "#ff0000");
        assert_eq!(hsl_to_hex(120, 100, 50), "#00ff00");
        assert_eq!(hsl_to_hex(240, 100, 50), "#0000ff");
        assert_eq!(hsl_to_hex(0, 0, 100), "#ffffff");
        assert_eq!(hsl_to_hex(0, 0, 0), "#000000");
    }

    #[test]
    fn test_fallback_palette_values() {
        assert_eq!(hsl_to_hex(0, 70, 60), "#e05252");
        assert_eq!(hsl_to_hex(345, 70, 60), "#e05275");
        assert_eq!(hsl_to_hex(45, 70, 40), "#ad8a1f");
        assert_eq!(hsl_to_hex(200, 50, 50), "#4095bf");
    }

    #[test]
    fn test_pair_for_fox() {
        // hash("fox-0") % 360 == 66
        let pair = ColorPair::derive("fox", 0);
        assert_eq!(pair.hue_a, 66);
        assert_eq!(pair.hue_b, 126);
        assert_eq!(pair.bg1, "#d2e052");
        assert_eq!(pair.bg2, "#1fad2d");
    }

    #[test]
    fn test_hue_offset_wraps() {
        for hue in 0..360 {
            let pair = ColorPair::from_hue(hue);
            assert_eq!(pair.hue_b, (pair.hue_a + 60) % 360);
        }
        assert_eq!(ColorPair::from_hue(330).hue_b, 30);
    }
}
