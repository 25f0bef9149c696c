//! # Mock Validators (Phase 1)
//!
//! Deterministic, transparent validators for tests and local deployments.
//! "Proofs" are plain encodings checked with SHA-256. They satisfy the
//! [`Validator`] contract but carry no zero-knowledge or soundness
//! guarantees.
//!
//! ## Security Notice
//!
//! None of these validators should be bound to a proof identifier that
//! guards real value. They exist so the registry, dispatch and ledger paths
//! can be exercised end to end.

use pve_core::{Identity, ReferenceParameters};
use sha2::{Digest, Sha256};

use crate::output::{BlobError, OutputBlob};
use crate::traits::{Validator, ValidatorRejection};

const MOCK_TAG_DOMAIN: &[u8] = b"pve-mock-validator-v1";

/// Accepts any non-empty proof data and echoes it as a single sub-output.
#[derive(Debug, Default, Clone, Copy)]
pub struct EchoValidator;

impl Validator for EchoValidator {
    fn validate(
        &self,
        proof_data: &[u8],
        _sender: &Identity,
        _params: &ReferenceParameters,
    ) -> Result<OutputBlob, ValidatorRejection> {
        if proof_data.is_empty() {
            return Err(ValidatorRejection::Malformed("empty proof data".to_string()));
        }
        Ok(OutputBlob::new(vec![proof_data.to_vec()]))
    }
}

/// Treats proof data as an encoded [`OutputBlob`] and returns it.
#[derive(Debug, Default, Clone, Copy)]
pub struct BlobValidator;

impl Validator for BlobValidator {
    fn validate(
        &self,
        proof_data: &[u8],
        _sender: &Identity,
        _params: &ReferenceParameters,
    ) -> Result<OutputBlob, ValidatorRejection> {
        OutputBlob::decode(proof_data).map_err(|e| ValidatorRejection::Malformed(e.to_string()))
    }
}

/// Always rejects.
#[derive(Debug, Default, Clone, Copy)]
pub struct RejectingValidator;

impl Validator for RejectingValidator {
    fn validate(
        &self,
        _proof_data: &[u8],
        _sender: &Identity,
        _params: &ReferenceParameters,
    ) -> Result<OutputBlob, ValidatorRejection> {
        Err(ValidatorRejection::Invalid("validator rejects all proofs".to_string()))
    }
}

/// Binds proof data to the sender and the reference parameters.
///
/// Proof data is an encoded [`OutputBlob`] followed by a 32-byte tag:
/// `SHA256(domain ‖ params ‖ sender ‖ encoded blob)`. A proof built for one
/// sender or one parameter set is rejected under any other.
#[derive(Debug, Default, Clone, Copy)]
pub struct MockValidator;

impl MockValidator {
    /// Build proof data that this validator accepts.
    ///
    /// # Errors
    ///
    /// [`BlobError::TooLarge`] if `blob` has no wire form.
    pub fn prove(
        blob: &OutputBlob,
        sender: &Identity,
        params: &ReferenceParameters,
    ) -> Result<Vec<u8>, BlobError> {
        let mut data = blob.encode()?;
        let tag = mock_tag(&data, sender, params);
        data.extend_from_slice(&tag);
        Ok(data)
    }
}

impl Validator for MockValidator {
    fn validate(
        &self,
        proof_data: &[u8],
        sender: &Identity,
        params: &ReferenceParameters,
    ) -> Result<OutputBlob, ValidatorRejection> {
        let split = proof_data.len().checked_sub(32).ok_or_else(|| {
            ValidatorRejection::Malformed(format!(
                "proof data is {} bytes, shorter than the 32-byte tag",
                proof_data.len()
            ))
        })?;
        let (encoded, tag) = proof_data.split_at(split);
        if mock_tag(encoded, sender, params).as_slice() != tag {
            tracing::debug!(sender = %sender, "mock proof tag mismatch");
            return Err(ValidatorRejection::Invalid(
                "tag does not match sender and reference parameters".to_string(),
            ));
        }
        OutputBlob::decode(encoded).map_err(|e| ValidatorRejection::Malformed(e.to_string()))
    }
}

fn mock_tag(encoded: &[u8], sender: &Identity, params: &ReferenceParameters) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(MOCK_TAG_DOMAIN);
    hasher.update(params.to_bytes());
    hasher.update(sender.as_bytes());
    hasher.update(encoded);
    hasher.finalize().into()
}
