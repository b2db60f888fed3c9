/// Polynomial string hash (`h = h * 31 + unit`) over UTF-16 code units with
/// 32-bit signed wraparound at every step. Returns the absolute value of the
/// final accumulator; `i32::MIN` becomes 2147483648 rather than overflowing.
pub fn hash_prompt(text: &str) -> u32 {
    text.encode_utf16()
        .fold(0i32, |acc, unit| acc.wrapping_mul(31).wrapping_add(unit as i32))
        .unsigned_abs()
}

/// Seed input for one fallback image: `"{prompt}-{seed}"`.
pub fn seeded_hash(prompt: &str, seed: u32) -> u32 {
    hash_prompt(&format!("{}-{}", prompt, seed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_values() {
        assert_eq!(hash_prompt(""), 0);
        assert_eq!(hash_prompt("a"), 97);
        assert_eq!(hash_prompt("hello"), 99162322);
        assert_eq!(hash_prompt("Aa"), hash_prompt("BB"));
    }

    #[test]
    fn test_wraparound_and_abs() {
        // Accumulator ends on i32::MIN
        assert_eq!(hash_prompt("polygenelubricants"), 2147483648);
        // Accumulator ends at -1257075647
        assert_eq!(hash_prompt("sunset over the sea-0"), 1257075647);
    }

    #[test]
    fn test_counts_utf16_units() {
        // One astral code point is two UTF-16 units
        let emoji = "😀";
        let (hi, lo) = (0xD83Du32 as i32, 0xDE00u32 as i32);
        let expected = (hi.wrapping_mul(31).wrapping_add(lo)).unsigned_abs();
        assert_eq!(hash_prompt(emoji), expected);
    }

    #[test]
    fn test_seed_changes_input() {
        assert_eq!(seeded_hash("fox", 0), hash_prompt("fox-0"));
        assert_ne!(seeded_hash("fox", 0), seeded_hash("fox", 1));
    }
}
