//! # Ports
//!
//! Hexagonal boundary of the client: inbound (driving) and outbound
//! (driven) interfaces.

pub mod inbound;
pub mod outbound;
