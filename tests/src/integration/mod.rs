//! Cross-component integration tests for the Testament client.

pub mod flows;
pub mod lifecycle;
