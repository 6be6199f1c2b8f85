//! # State Mirror
//!
//! Read-only cache of the last-observed authoritative contract values.
//! Refreshed on demand and after confirmed writes; never fed from a
//! pending, reverted, or failed write.

use crate::client::now_ms;
use crate::client::proxy::ContractProxy;
use crate::domain::entities::{MirrorValue, StateField};
use crate::errors::ReadError;
use crate::ports::outbound::ContractTransport;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Local cache of readable contract fields.
pub struct StateMirror<T> {
    /// Proxy used for refresh reads.
    proxy: Arc<ContractProxy<T>>,
    /// Field cache. Values are replaced wholesale, never merged.
    cache: RwLock<HashMap<StateField, MirrorValue>>,
}

impl<T: ContractTransport> StateMirror<T> {
    /// Creates an empty mirror over the given proxy.
    pub fn new(proxy: Arc<ContractProxy<T>>) -> Self {
        Self {
            proxy,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Fetches the field from the contract and replaces the cached value
    /// atomically. Returns the fresh value.
    ///
    /// # Errors
    ///
    /// [`ReadError`] from the underlying read; the cached value is left
    /// untouched on failure.
    pub async fn refresh(&self, field: StateField) -> Result<String, ReadError> {
        let value = match field {
            StateField::EncryptedWill => self.proxy.get_encrypted_will().await?,
        };

        debug!(method = field.read_method(), "mirror refreshed");
        self.cache.write().insert(
            field,
            MirrorValue::Known {
                value: value.clone(),
                fetched_at: now_ms(),
            },
        );
        Ok(value)
    }

    /// Last cached value for the field, or `Unknown` if never fetched.
    /// Never suspends and performs no I/O.
    #[must_use]
    pub fn get(&self, field: StateField) -> MirrorValue {
        self.cache
            .read()
            .get(&field)
            .cloned()
            .unwrap_or(MirrorValue::Unknown)
    }
}

// =============================================================================
// TESTS
// =============================================================================
