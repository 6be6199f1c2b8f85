//! # Testament Test Suite
//!
//! Unified test crate exercising the client end-to-end against the
//! in-memory adapters.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── flows.rs      # Operator journeys (connect, store, register, handover)
//!     └── lifecycle.rs  # Adversarial paths (reverts, failures, concurrency)
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p testament-tests
//!
//! # By category
//! cargo test -p testament-tests integration::flows::
//! cargo test -p testament-tests integration::lifecycle::
//! ```

#![allow(dead_code)]

pub mod integration;

use std::sync::Arc;
use testament_client::prelude::*;

/// Deployment target used across the suite.
pub const TARGET: &str = "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed";
/// Operator (testator) account.
pub const OWNER: &str = "0xfb6916095ca1df60bb79ce92ce3ea74c37c5d359";
/// First beneficiary account.
pub const RECIPIENT: &str = "0xdbf03b407c01e7cd3cbea99509d93f8dddc8c6fb";
/// Second beneficiary account.
pub const RECIPIENT_2: &str = "0xd1220a0cf47c7b9be7a2e6ba89f429762e7b9adb";

/// Initializes tracing once for the whole suite; repeated calls no-op.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// The fixed deployment target.
pub fn target() -> ContractId {
    ContractId::parse(TARGET).unwrap()
}

/// The operator identity the scripted wallet approves.
pub fn owner() -> AccountAddress {
    AccountAddress::parse(OWNER).unwrap()
}

/// Service over a fresh approving wallet and the given contract double.
pub fn service_over(
    contract: InMemoryContract,
) -> (
    Arc<InMemoryWalletProvider>,
    Arc<InMemoryContract>,
    TestamentService<InMemoryWalletProvider, InMemoryContract>,
) {
    let provider = Arc::new(InMemoryWalletProvider::approving(owner()));
    let contract = Arc::new(contract);
    let service = TestamentService::new(
        Arc::clone(&provider),
        Arc::clone(&contract),
        target(),
        ClientConfig::default(),
    );
    (provider, contract, service)
}
