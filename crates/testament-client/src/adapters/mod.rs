//! # Adapters
//!
//! Reference implementations of the driven ports. The in-memory pair is
//! used by the test suite and local development; a production deployment
//! plugs the real browser provider in behind the same traits.

pub mod contract;
pub mod wallet;

pub use contract::InMemoryContract;
pub use wallet::{AuthorizationScript, InMemoryWalletProvider};
