//! # Domain Layer
//!
//! Validated value objects, the transaction record state machine, and
//! pure helper services. Nothing in this module performs I/O.

pub mod entities;
pub mod services;
pub mod value_objects;

pub use entities::{
    MirrorValue, OperationKind, StateField, Timestamp, TransactionRecord, TransactionStatus,
};
pub use value_objects::{
    AccountAddress, Beneficiary, ContractId, DocumentPointer, ShareAmount, SubmissionHandle, U256,
};
