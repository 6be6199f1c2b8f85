//! # Domain Services
//!
//! Pure functions used by the validation layer. Deterministic, no I/O,
//! no async.

use sha3::{Digest, Keccak256};

// =============================================================================
// EIP-55 CHECKSUM CASING
// =============================================================================

/// Applies EIP-55 checksum casing to a lowercase 40-digit hex address body.
///
/// A hex letter is uppercased when the corresponding nibble of
/// `keccak256(lowercase_body)` is `>= 8`. Digits pass through unchanged.
///
/// The caller must supply exactly 40 lowercase hex digits without the
/// `0x` prefix.
#[must_use]
pub fn checksum_case(lower_body: &str) -> String {
    debug_assert_eq!(lower_body.len(), 40);

    let hash = Keccak256::digest(lower_body.as_bytes());

    lower_body
        .char_indices()
        .map(|(i, c)| {
            let nibble = if i % 2 == 0 {
                hash[i / 2] >> 4
            } else {
                hash[i / 2] & 0x0f
            };
            if c.is_ascii_alphabetic() && nibble >= 8 {
                c.to_ascii_uppercase()
            } else {
                c
            }
        })
        .collect()
}

/// Returns true if a mixed-case 40-digit hex body carries a valid
/// EIP-55 checksum.
#[must_use]
pub fn checksum_matches(body: &str) -> bool {
    body.len() == 40 && checksum_case(&body.to_ascii_lowercase()) == body
}

// =============================================================================
// TESTS
// =============================================================================
