/// Generate a content fingerprint for duplicate-post detection
///
/// Normalization rules:
/// - Convert to lowercase
/// - Collapse whitespace runs into single spaces
/// - Trim leading/trailing whitespace
///
/// The hash itself is the classic 32-bit signed multiplicative rolling hash
/// (`h = h * 31 + code_unit`, wrapping) over the UTF-16 code units of the
/// normalized text, rendered as lowercase hex.
///
/// This is NOT a cryptographic hash and must stay that way: fingerprints are
/// persisted per member, and existing dashboard data compares against values
/// produced by this exact algorithm. It is only good enough to flag likely
/// duplicates within one member's post history.
pub fn generate_content_hash(text: &str) -> String {
    let normalized = text
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    let mut hash: i32 = 0;
    for unit in normalized.encode_utf16() {
        hash = hash.wrapping_mul(31).wrapping_add(unit as i32);
    }

    format!("{:x}", hash as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_text_same_hash() {
        let text1 = "Excited to share our Q1 results!";
        let text2 = "Excited to share our Q1 results!";

        assert_eq!(generate_content_hash(text1), generate_content_hash(text2));
    }

    #[test]
    fn test_case_insensitive() {
        let text1 = "Excited to share our Q1 results!";
        let text2 = "EXCITED TO SHARE OUR Q1 RESULTS!";

        assert_eq!(generate_content_hash(text1), generate_content_hash(text2));
    }

    #[test]
    fn test_whitespace_normalized() {
        let text1 = "Hello World";
        let text2 = "Hello    World";
        let text3 = "  Hello World  ";
        let text4 = "Hello\nWorld";

        let hash1 = generate_content_hash(text1);
        let hash2 = generate_content_hash(text2);
        let hash3 = generate_content_hash(text3);
        let hash4 = generate_content_hash(text4);

        assert_eq!(hash1, hash2);
        assert_eq!(hash2, hash3);
        assert_eq!(hash3, hash4);
    }

    #[test]
    fn test_different_content_different_hash() {
        let text1 = "Hiring a senior Rust engineer";
        let text2 = "Hiring a senior Go engineer";

        assert_ne!(generate_content_hash(text1), generate_content_hash(text2));
    }

    #[test]
    fn test_known_values() {
        // h("a") = 97 = 0x61, h("ab") = 97*31 + 98 = 3105 = 0xc21
        assert_eq!(generate_content_hash("a"), "61");
        assert_eq!(generate_content_hash("ab"), "c21");
    }

    #[test]
    fn test_hash_format_is_hex() {
        let hash = generate_content_hash(
            "A long enough post body that the rolling hash wraps around the 32-bit range",
        );
        assert!(!hash.is_empty());
        assert!(hash.len() <= 8);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_empty_string() {
        assert_eq!(generate_content_hash(""), "0");
        assert_eq!(generate_content_hash("   "), "0");
    }
}
