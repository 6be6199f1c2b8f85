//! # Value Objects
//!
//! Validated domain primitives for the client. Every constructor enforces
//! the shape it promises, so a value of one of these types is safe to
//! forward to a port without re-checking.

use crate::domain::services;
use crate::errors::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

// Re-export U256 from primitive-types for 256-bit share arithmetic
pub use primitive_types::U256;

// =============================================================================
// ACCOUNT ADDRESS
// =============================================================================

/// A 0x-prefixed, 40-hex-digit account address, lowercase-normalized.
///
/// Mixed-case input is accepted only when it carries a valid EIP-55
/// checksum; all-lowercase and all-uppercase input is treated as
/// case-insensitive. The stored form is always lowercase.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountAddress(String);

impl AccountAddress {
    /// Parses and normalizes an address.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidAddress`] unless the input is
    /// `0x` followed by exactly 40 hex digits with consistent or
    /// checksum-valid casing.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let invalid = |reason: &'static str| ValidationError::InvalidAddress {
            input: input.to_string(),
            reason,
        };

        let trimmed = input.trim();
        let body = trimmed
            .strip_prefix("0x")
            .ok_or_else(|| invalid("missing 0x prefix"))?;

        if body.len() != 40 {
            return Err(invalid("expected 40 hex digits"));
        }
        if !body.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid("non-hex digit"));
        }

        let has_upper = body.chars().any(|c| c.is_ascii_uppercase());
        let has_lower = body.chars().any(|c| c.is_ascii_lowercase());
        if has_upper && has_lower && !services::checksum_matches(body) {
            return Err(invalid("checksum mismatch"));
        }

        Ok(Self(format!("0x{}", body.to_ascii_lowercase())))
    }

    /// Returns the normalized address string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the EIP-55 checksummed rendering for display purposes.
    #[must_use]
    pub fn to_checksummed(&self) -> String {
        format!("0x{}", services::checksum_case(&self.0[2..]))
    }
}

impl fmt::Debug for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// SHARE AMOUNT
// =============================================================================

/// A non-negative integer share in contract-domain units.
///
/// Shares are not necessarily percentages; the client never checks that
/// shares sum to a total; that rule belongs to the remote contract.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShareAmount(U256);

impl ShareAmount {
    /// Parses a share from decimal text.
    ///
    /// Only plain base-10 digit strings are accepted: fractional,
    /// scientific-notation, signed, and empty input all fail. Nothing is
    /// ever rounded.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidShare`] for any input that is
    /// not exactly representable as a 256-bit unsigned integer.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let invalid = |reason: &'static str| ValidationError::InvalidShare {
            input: input.to_string(),
            reason,
        };

        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(invalid("empty"));
        }
        if !trimmed.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("not a base-10 integer"));
        }

        U256::from_dec_str(trimmed)
            .map(Self)
            .map_err(|_| invalid("exceeds 256 bits"))
    }

    /// Creates a share from an integer.
    #[must_use]
    pub fn from_u64(value: u64) -> Self {
        Self(U256::from(value))
    }

    /// Returns the raw 256-bit value.
    #[must_use]
    pub fn value(&self) -> U256 {
        self.0
    }

    /// Returns true for the zero share.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Debug for ShareAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ShareAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// DOCUMENT POINTER
// =============================================================================

/// An opaque content identifier referencing an encrypted off-chain
/// document (an IPFS CID in practice).
///
/// The pointer is written and read verbatim; the only local rule is
/// non-emptiness. Its internal structure is never inspected.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentPointer(String);

impl DocumentPointer {
    /// Wraps a pointer string.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyPointer`] for empty or
    /// whitespace-only input.
    pub fn new(input: &str) -> Result<Self, ValidationError> {
        if input.trim().is_empty() {
            return Err(ValidationError::EmptyPointer);
        }
        Ok(Self(input.to_string()))
    }

    /// Returns the pointer string, verbatim.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the pointer, returning the inner string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Debug for DocumentPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for DocumentPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// BENEFICIARY
// =============================================================================

/// A recipient address paired with its integer share.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Beneficiary {
    /// Address that will receive a distribution.
    pub recipient: AccountAddress,
    /// Share in contract-domain units.
    pub share: ShareAmount,
}

impl Beneficiary {
    /// Creates a beneficiary from already-validated parts.
    #[must_use]
    pub fn new(recipient: AccountAddress, share: ShareAmount) -> Self {
        Self { recipient, share }
    }
}

// =============================================================================
// CONTRACT ID
// =============================================================================

/// The fixed deployment target all contract calls are addressed to.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContractId(AccountAddress);

impl ContractId {
    /// Wraps a deployment address.
    #[must_use]
    pub fn new(address: AccountAddress) -> Self {
        Self(address)
    }

    /// Parses a deployment address from text.
    ///
    /// # Errors
    ///
    /// Same rules as [`AccountAddress::parse`].
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        AccountAddress::parse(input).map(Self)
    }

    /// Returns the deployment address.
    #[must_use]
    pub fn address(&self) -> &AccountAddress {
        &self.0
    }
}

impl fmt::Display for ContractId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// SUBMISSION HANDLE
// =============================================================================

/// Opaque handle for a submitted transaction, issued by the signing
/// provider. The client never parses it; it only passes it back to the
/// provider to await resolution.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubmissionHandle(String);

impl SubmissionHandle {
    /// Wraps a provider-issued handle.
    #[must_use]
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    /// Returns the raw handle string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SubmissionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for SubmissionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const CHECKSUMMED: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";

    #[test]
    fn test_address_lowercase_normalization() {
        let addr = AccountAddress::parse(CHECKSUMMED).unwrap();
        assert_eq!(addr.as_str(), "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed");
        assert_eq!(addr.to_checksummed(), CHECKSUMMED);
    }

    #[test]
    fn test_address_accepts_uniform_casing() {
        let lower = "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed";
        let upper = "0x5AAEB6053F3E94C9B9A09F33669435E7EF1BEAED";
        assert_eq!(
            AccountAddress::parse(lower).unwrap(),
            AccountAddress::parse(upper).unwrap()
        );
    }

    #[test]
    fn test_address_rejects_bad_shapes() {
        for input in [
            "",
            "0x",
            "5aaeb6053f3e94c9b9a09f33669435e7ef1beaed", // no prefix
            "0x5aaeb6",                                  // too short
            "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaedff", // too long
            "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaeg", // non-hex
        ] {
            assert!(
                matches!(
                    AccountAddress::parse(input),
                    Err(ValidationError::InvalidAddress { .. })
                ),
                "accepted {input:?}"
            );
        }
    }

    #[test]
    fn test_address_rejects_checksum_mismatch() {
        // Mixed case that is not the EIP-55 casing.
        let mangled = "0x5aaeb6053F3E94C9b9A09f33669435E7Ef1BeAed";
        assert!(matches!(
            AccountAddress::parse(mangled),
            Err(ValidationError::InvalidAddress {
                reason: "checksum mismatch",
                ..
            })
        ));
    }

    #[test]
    fn test_share_parse_accepts_integers() {
        assert_eq!(ShareAmount::parse("0").unwrap(), ShareAmount::from_u64(0));
        assert!(ShareAmount::parse("0").unwrap().is_zero());
        assert_eq!(ShareAmount::parse("50").unwrap(), ShareAmount::from_u64(50));
        assert_eq!(
            ShareAmount::parse(" 1000000 ").unwrap(),
            ShareAmount::from_u64(1_000_000)
        );
    }

    #[test]
    fn test_share_parse_rejects_non_integers() {
        for input in ["", "  ", "-1", "+5", "1.5", "1e3", "0x10", "fifty", "5 0"] {
            assert!(
                matches!(
                    ShareAmount::parse(input),
                    Err(ValidationError::InvalidShare { .. })
                ),
                "accepted {input:?}"
            );
        }
    }

    #[test]
    fn test_share_parse_rejects_overflow() {
        // 2^256 in decimal, one past the maximum representable value.
        let too_big =
            "115792089237316195423570985008687907853269984665640564039457584007913129639936";
        assert!(matches!(
            ShareAmount::parse(too_big),
            Err(ValidationError::InvalidShare {
                reason: "exceeds 256 bits",
                ..
            })
        ));
    }

    #[test]
    fn test_document_pointer_verbatim() {
        let pointer = DocumentPointer::new("QmTest123").unwrap();
        assert_eq!(pointer.as_str(), "QmTest123");

        assert!(matches!(
            DocumentPointer::new(""),
            Err(ValidationError::EmptyPointer)
        ));
        assert!(matches!(
            DocumentPointer::new("   "),
            Err(ValidationError::EmptyPointer)
        ));
    }

    #[test]
    fn test_beneficiary_construction() {
        let recipient = AccountAddress::parse(CHECKSUMMED).unwrap();
        let beneficiary = Beneficiary::new(recipient.clone(), ShareAmount::from_u64(50));
        assert_eq!(beneficiary.recipient, recipient);
        assert_eq!(beneficiary.share.value(), U256::from(50));
    }
}
