//! # Contract Proxy
//!
//! Maps the fixed remote interface onto typed operations, bound to one
//! deployment target. No business logic lives here: arguments arrive as
//! validated domain values and are forwarded verbatim; reads decode to
//! the declared return shape or fail.

use crate::domain::value_objects::{
    AccountAddress, Beneficiary, ContractId, DocumentPointer, SubmissionHandle,
};
use crate::errors::{ReadError, SubmissionError};
use crate::ports::outbound::{
    ContractTransport, ReadRequest, ReadValue, SubmissionOutcome, WriteRequest,
};
use std::sync::Arc;
use tracing::trace;

/// Typed view of the deployed inheritance registry.
pub struct ContractProxy<T> {
    /// Transport to the signing provider / remote node.
    transport: Arc<T>,
    /// The fixed deployment target all calls are addressed to.
    target: ContractId,
}

impl<T: ContractTransport> ContractProxy<T> {
    /// Creates a proxy bound to one deployment target.
    pub fn new(transport: Arc<T>, target: ContractId) -> Self {
        Self { transport, target }
    }

    /// The deployment target this proxy is bound to.
    #[must_use]
    pub fn target(&self) -> &ContractId {
        &self.target
    }

    // -------------------------------------------------------------------------
    // Read operations
    // -------------------------------------------------------------------------

    /// `getEncryptedWill() -> string`
    ///
    /// Suspends until the remote answers. The returned string is
    /// verbatim; a never-set field comes back empty.
    ///
    /// # Errors
    ///
    /// [`ReadError`] on transport failure or a malformed response.
    pub async fn get_encrypted_will(&self) -> Result<String, ReadError> {
        let value = self
            .transport
            .read(&self.target, ReadRequest::GetEncryptedWill)
            .await?;
        match value {
            ReadValue::Text(text) => Ok(text),
        }
    }

    // -------------------------------------------------------------------------
    // Write operations (submission only, no confirmation wait)
    // -------------------------------------------------------------------------

    /// `setEncryptedWill(string)`
    ///
    /// # Errors
    ///
    /// [`SubmissionError`] if no handle could be obtained.
    pub async fn set_encrypted_will(
        &self,
        from: &AccountAddress,
        pointer: DocumentPointer,
    ) -> Result<SubmissionHandle, SubmissionError> {
        self.submit(from, WriteRequest::SetEncryptedWill { pointer })
            .await
    }

    /// `addTokenBeneficiary(address, uint256)`
    ///
    /// # Errors
    ///
    /// [`SubmissionError`] if no handle could be obtained.
    pub async fn add_token_beneficiary(
        &self,
        from: &AccountAddress,
        beneficiary: Beneficiary,
    ) -> Result<SubmissionHandle, SubmissionError> {
        self.submit(from, WriteRequest::AddTokenBeneficiary { beneficiary })
            .await
    }

    /// `approveIdentity(address)`
    ///
    /// # Errors
    ///
    /// [`SubmissionError`] if no handle could be obtained.
    pub async fn approve_identity(
        &self,
        from: &AccountAddress,
        beneficiary: AccountAddress,
    ) -> Result<SubmissionHandle, SubmissionError> {
        self.submit(from, WriteRequest::ApproveIdentity { beneficiary })
            .await
    }

    /// `confirmDeceased()`
    ///
    /// # Errors
    ///
    /// [`SubmissionError`] if no handle could be obtained.
    pub async fn confirm_deceased(
        &self,
        from: &AccountAddress,
    ) -> Result<SubmissionHandle, SubmissionError> {
        self.submit(from, WriteRequest::ConfirmDeceased).await
    }

    /// `distributeToken()`
    ///
    /// # Errors
    ///
    /// [`SubmissionError`] if no handle could be obtained.
    pub async fn distribute_token(
        &self,
        from: &AccountAddress,
    ) -> Result<SubmissionHandle, SubmissionError> {
        self.submit(from, WriteRequest::DistributeToken).await
    }

    /// Suspends until the handle resolves and classifies the outcome.
    pub async fn await_resolution(&self, handle: &SubmissionHandle) -> SubmissionOutcome {
        self.transport.await_resolution(handle).await
    }

    async fn submit(
        &self,
        from: &AccountAddress,
        request: WriteRequest,
    ) -> Result<SubmissionHandle, SubmissionError> {
        trace!(
            method = request.method_name(),
            from = %from,
            target = %self.target,
            "submitting write"
        );
        self.transport.submit(&self.target, from, request).await
    }
}

// =============================================================================
// TESTS
// =============================================================================
