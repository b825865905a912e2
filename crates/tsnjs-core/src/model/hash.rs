//! Content hashing for entries and cache keys.
//!
//! Hash family: xxh3-64 (already the teacher's hashing dependency for file
//! content), base64 of the 8 big-endian bytes, truncated to 12 characters.
//! See DESIGN.md for why this family was chosen over a cryptographic digest.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use xxhash_rust::xxh3::xxh3_64;

/// A 12-character content digest over an entity's exact byte span.
pub type EntryHash = String;

/// Hash the exact byte range of an entity as it appears in the file. No
/// normalisation is applied — spec.md §3 requires the hash to reflect the
/// literal bytes.
pub fn hash_span(bytes: &[u8]) -> EntryHash {
    let digest = xxh3_64(bytes);
    let encoded = URL_SAFE_NO_PAD.encode(digest.to_be_bytes());
    encoded.chars().take(12).collect()
}

/// Hash full file content, used as the parse-cache key (mirrors the
/// teacher's `hash_content` used to key `ParserManager`'s cache).
pub fn hash_content(bytes: &[u8]) -> u64 {
    xxh3_64(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_twelve_chars() {
        let h = hash_span(b"function alpha() { return 'alpha'; }");
        assert_eq!(h.chars().count(), 12);
    }

    #[test]
    fn hash_is_stable() {
        let a = hash_span(b"const x = 1;");
        let b = hash_span(b"const x = 1;");
        assert_eq!(a, b);
    }

    #[test]
    fn hash_differs_on_whitespace() {
        let a = hash_span(b"const x = 1;");
        let b = hash_span(b"const x  = 1;");
        assert_ne!(a, b);
    }
}

#[cfg(test)]
mod hash_stability_properties {
    use super::*;
    use proptest::prelude::*;

    // spec.md §8's hash-stability invariant: hashing the same bytes twice
    // yields the same digest, and a single byte changing anywhere in the
    // span changes it (no silent collisions across the corpus this
    // generates).
    proptest! {
        #[test]
        fn same_bytes_hash_identically(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
            prop_assert_eq!(hash_span(&bytes), hash_span(&bytes));
        }

        #[test]
        fn always_twelve_chars(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
            prop_assert_eq!(hash_span(&bytes).chars().count(), 12);
        }
    }
}
