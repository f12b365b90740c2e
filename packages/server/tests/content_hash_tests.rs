//! Unit tests for the duplicate-content fingerprint.

use server_core::common::utils::generate_content_hash;

#[test]
fn identical_text_produces_same_hash() {
    let text1 = "Thrilled to welcome three new engineers to the team!";
    let text2 = "Thrilled to welcome three new engineers to the team!";

    assert_eq!(generate_content_hash(text1), generate_content_hash(text2));
}

#[test]
fn case_and_whitespace_insensitive_hash() {
    let hash1 = generate_content_hash("Hello   World");
    let hash2 = generate_content_hash("hello world");
    let hash3 = generate_content_hash("hello\nworld");

    assert_eq!(hash1, hash2);
    assert_eq!(hash2, hash3);
}

#[test]
fn leading_and_trailing_whitespace_ignored() {
    let hash1 = generate_content_hash("Quarterly results are in");
    let hash2 = generate_content_hash("   Quarterly results are in \t ");

    assert_eq!(hash1, hash2);
}

#[test]
fn different_content_different_hash() {
    let text1 = "We are hiring a Rust engineer";
    let text2 = "We are hiring a React engineer";

    assert_ne!(generate_content_hash(text1), generate_content_hash(text2));
}

#[test]
fn word_order_matters() {
    let text1 = "Results drive culture";
    let text2 = "Culture drives results";

    assert_ne!(generate_content_hash(text1), generate_content_hash(text2));
}

#[test]
fn hash_format_is_compact_hex() {
    let hash = generate_content_hash("Announcing our partnership with a leading logistics firm");

    // 32-bit rolling hash rendered as hex: at most 8 chars, never empty
    assert!(!hash.is_empty());
    assert!(hash.len() <= 8);
    assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn stored_fingerprints_stay_stable() {
    // These values are persisted in member post history; the algorithm must
    // not change underneath them.
    assert_eq!(generate_content_hash("a"), "61");
    assert_eq!(generate_content_hash("ab"), "c21");
    assert_eq!(generate_content_hash(""), "0");
}
