//! # Error Types
//!
//! The full failure taxonomy of the client, one enum per family.
//!
//! Local validation failures are raised before anything leaves the client
//! and never reach a port. Session and read errors are surfaced to the
//! caller immediately; the core retries nothing. Terminal write outcomes
//! (reverted/failed) are *data* on the transaction record, not errors;
//! see [`crate::domain::entities::TransactionStatus`].

use thiserror::Error;
use uuid::Uuid;

// =============================================================================
// VALIDATION ERRORS
// =============================================================================

/// Errors from local input validation.
///
/// A value that fails here is never forwarded to the wallet provider or
/// the remote contract.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Input does not have the 0x-prefixed 40-hex-digit address shape,
    /// or its mixed-case checksum does not verify.
    #[error("invalid address {input:?}: {reason}")]
    InvalidAddress {
        /// The rejected input, verbatim.
        input: String,
        /// What the input failed.
        reason: &'static str,
    },

    /// Input is not a plain non-negative base-10 integer that fits in
    /// 256 bits. Fractional and scientific-notation inputs are rejected,
    /// never rounded.
    #[error("invalid share {input:?}: {reason}")]
    InvalidShare {
        /// The rejected input, verbatim.
        input: String,
        /// What the input failed.
        reason: &'static str,
    },

    /// Document pointer is empty or whitespace-only.
    #[error("document pointer must not be empty")]
    EmptyPointer,
}

// =============================================================================
// SESSION ERRORS
// =============================================================================

/// Errors from the signing session (wallet connection lifecycle).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// No wallet provider is available in the environment.
    #[error("no wallet provider available")]
    NoProvider,

    /// The human rejected the authorization request.
    #[error("authorization rejected by the user")]
    UserRejected,

    /// A connect negotiation is already outstanding; the session never
    /// queues a second one.
    #[error("a connect negotiation is already in progress")]
    AlreadyConnecting,
}

// =============================================================================
// SUBMISSION ERRORS
// =============================================================================

/// Pre-confirmation failures of a write operation.
///
/// Raised while obtaining a submission handle. Once a handle exists, any
/// later failure is reported through the transaction record instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    /// No active identity; a wallet must be connected before writing.
    #[error("no active identity: connect a wallet before submitting writes")]
    NotConnected,

    /// The provider refused to sign the transaction.
    #[error("signing rejected by the provider: {0}")]
    Rejected(String),

    /// The remote interface rejected the argument encoding.
    #[error("malformed arguments: {0}")]
    MalformedArguments(String),

    /// Transport-level failure while submitting.
    #[error("transport failure during submission: {0}")]
    Transport(String),
}

// =============================================================================
// READ ERRORS
// =============================================================================

/// Failures of a contract read call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReadError {
    /// Transport-level failure while reading.
    #[error("transport failure during read: {0}")]
    Transport(String),

    /// The remote answered, but the response could not be decoded.
    #[error("malformed response from {method}: {detail}")]
    MalformedResponse {
        /// Remote interface method that produced the response.
        method: &'static str,
        /// Decoder diagnostic.
        detail: String,
    },
}

// =============================================================================
// CLIENT ERROR (umbrella for the inbound API)
// =============================================================================

/// Any failure surfaced by the public client API.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Local validation failed; the caller must correct the input.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Signing session failure.
    #[error("session error: {0}")]
    Session(#[from] SessionError),

    /// Write submission failure (pre-confirmation).
    #[error("submission error: {0}")]
    Submission(#[from] SubmissionError),

    /// Contract read failure.
    #[error("read error: {0}")]
    Read(#[from] ReadError),

    /// No transaction record with the given ID exists.
    #[error("unknown transaction record: {0}")]
    UnknownRecord(Uuid),

    /// Internal error (should not happen in production).
    #[error("internal error: {0}")]
    Internal(String),
}

// =============================================================================
// TESTS
// =============================================================================
