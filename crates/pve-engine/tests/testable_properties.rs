//! # Engine Properties
//!
//! End-to-end checks of the registry, dispatch, ledger and admin contracts
//! through the public `ProofEngine` surface only.

use proptest::prelude::*;

use pve_core::{fingerprint, EngineError, Fingerprint, Identity, ProofIdentifier, ReferenceParameters};
use pve_engine::ProofEngine;
use pve_validator::{
    BlobValidator, EchoValidator, MockValidator, OutputBlob, RejectingValidator, ValidatorHandle,
};

const OWNER: Identity = Identity::from_bytes([0x0e; 32]);
const SENDER: Identity = Identity::from_bytes([0x5e; 32]);
const MALLORY: Identity = Identity::from_bytes([0x66; 32]);
const BALANCED: ProofIdentifier = ProofIdentifier::new(1, 1, 1);

fn echo() -> ValidatorHandle {
    ValidatorHandle::new("echo", EchoValidator)
}

fn engine_with(proof: ProofIdentifier, handle: ValidatorHandle) -> ProofEngine {
    let mut engine = ProofEngine::new(OWNER);
    engine.set_validator(OWNER, proof, handle).unwrap();
    engine
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn test_binding_is_write_once(category in any::<u8>(), id in any::<u8>()) {
        let proof = ProofIdentifier::new(1, category, id);
        let first = echo();
        let mut engine = engine_with(proof, first.clone());

        let second = ValidatorHandle::new("reject", RejectingValidator);
        prop_assert_eq!(
            engine.set_validator(OWNER, proof, second),
            Err(EngineError::AlreadyRegistered { proof })
        );
        prop_assert!(engine.validator(proof).unwrap().same_capability(&first));
    }

    #[test]
    fn test_future_epoch_rejected(epoch in 2u8..=255, category in any::<u8>(), id in any::<u8>()) {
        let proof = ProofIdentifier::new(epoch, category, id);
        let mut engine = ProofEngine::new(OWNER);
        prop_assert_eq!(
            engine.set_validator(OWNER, proof, echo()),
            Err(EngineError::EpochExceeded { proof, epoch, latest: 1 })
        );
        prop_assert!(engine.registry().is_empty());
    }
}

#[test]
fn test_invalidate_disables_both_entry_points() {
    let mut engine = engine_with(BALANCED, echo());
    engine.validate(BALANCED, SENDER, b"note").unwrap();
    engine.invalidate(OWNER, BALANCED).unwrap();

    let disabled = EngineError::DisabledValidator { proof: BALANCED };
    assert_eq!(engine.validate(BALANCED, SENDER, b"other").unwrap_err(), disabled);
    assert_eq!(
        engine.validate_by_hash(BALANCED, fingerprint(b"note"), SENDER),
        Err(disabled)
    );
    assert!(engine.validator(BALANCED).is_some());
    assert_eq!(engine.ledger_len(), 1);
}

#[test]
fn test_invalidate_cannot_be_undone() {
    let mut engine = engine_with(BALANCED, echo());
    engine.invalidate(OWNER, BALANCED).unwrap();
    assert_eq!(
        engine.set_validator(OWNER, BALANCED, echo()),
        Err(EngineError::AlreadyRegistered { proof: BALANCED })
    );
    assert!(engine.is_revoked(BALANCED));
}

// ---------------------------------------------------------------------------
// Dispatch and ledger
// ---------------------------------------------------------------------------

#[test]
fn test_clear_is_not_idempotent() {
    let mut engine = engine_with(BALANCED, echo());
    engine.validate(BALANCED, SENDER, b"note").unwrap();
    let fp = fingerprint(b"note");

    engine.clear(BALANCED, &[fp], SENDER).unwrap();
    assert_eq!(
        engine.clear(BALANCED, &[fp], SENDER),
        Err(EngineError::NotPreviouslyValidated {
            proof: BALANCED,
            fingerprint: fp
        })
    );
}

#[test]
fn test_two_sub_output_round_trip() {
    let mut engine = engine_with(BALANCED, ValidatorHandle::new("mock", MockValidator));
    let blob = OutputBlob::new(vec![b"note-1".to_vec(), b"note-2".to_vec()]);
    let data = MockValidator::prove(&blob, &SENDER, engine.reference_parameters()).unwrap();

    let out = engine.validate(BALANCED, SENDER, &data).unwrap();
    assert_eq!(out, blob);
    let (fp1, fp2) = (fingerprint(b"note-1"), fingerprint(b"note-2"));
    assert!(engine.validate_by_hash(BALANCED, fp1, SENDER).unwrap());
    assert!(engine.validate_by_hash(BALANCED, fp2, SENDER).unwrap());

    engine.clear(BALANCED, &[fp1], SENDER).unwrap();
    assert!(!engine.validate_by_hash(BALANCED, fp1, SENDER).unwrap());
    assert!(engine.validate_by_hash(BALANCED, fp2, SENDER).unwrap());
}

#[test]
fn test_mock_proof_bound_to_sender_and_parameters() {
    let mut engine = engine_with(BALANCED, ValidatorHandle::new("mock", MockValidator));
    let blob = OutputBlob::new(vec![b"note".to_vec()]);
    let data = MockValidator::prove(&blob, &SENDER, engine.reference_parameters()).unwrap();

    assert!(matches!(
        engine.validate(BALANCED, MALLORY, &data),
        Err(EngineError::ValidationRejected { .. })
    ));
    engine
        .set_reference_parameters(OWNER, ReferenceParameters::new([[1; 32]; 6]))
        .unwrap();
    assert!(matches!(
        engine.validate(BALANCED, SENDER, &data),
        Err(EngineError::ValidationRejected { .. })
    ));
    assert_eq!(engine.ledger_len(), 0);
}

#[test]
fn test_facts_are_scoped_to_sender_and_proof() {
    let other = ProofIdentifier::new(1, 1, 2);
    let mut engine = engine_with(BALANCED, echo());
    engine.set_validator(OWNER, other, echo()).unwrap();
    engine.validate(BALANCED, SENDER, b"note").unwrap();

    let fp = fingerprint(b"note");
    assert!(!engine.validate_by_hash(other, fp, SENDER).unwrap());
    assert!(!engine.validate_by_hash(BALANCED, fp, MALLORY).unwrap());
    assert!(engine.clear(BALANCED, &[fp], MALLORY).is_err());
    assert!(engine.validate_by_hash(BALANCED, fp, SENDER).unwrap());
}

proptest! {
    #[test]
    fn test_non_balanced_never_writes(
        category in any::<u8>().prop_filter("not balanced", |c| *c != 1),
        outputs in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..16), 0..4),
    ) {
        let proof = ProofIdentifier::new(1, category, 1);
        let mut engine = engine_with(proof, ValidatorHandle::new("blob", BlobValidator));
        let blob = OutputBlob::new(outputs);
        prop_assert_eq!(engine.validate(proof, SENDER, &blob.encode().unwrap()).unwrap(), blob);
        prop_assert_eq!(engine.ledger_len(), 0);
    }

    #[test]
    fn test_clear_is_all_or_nothing(
        notes in prop::collection::btree_set(prop::collection::vec(any::<u8>(), 1..8), 1..6),
        stray in prop::collection::vec(any::<u8>(), 8..12),
    ) {
        let notes: Vec<Vec<u8>> = notes.into_iter().collect();
        let mut engine = engine_with(BALANCED, ValidatorHandle::new("blob", BlobValidator));
        engine
            .validate(BALANCED, SENDER, &OutputBlob::new(notes.clone()).encode().unwrap())
            .unwrap();
        let recorded = engine.ledger_len();

        let mut request: Vec<Fingerprint> = notes.iter().map(|n| fingerprint(n)).collect();
        request.push(fingerprint(&stray));
        prop_assert!(engine.clear(BALANCED, &request, SENDER).is_err());
        prop_assert_eq!(engine.ledger_len(), recorded);
        for note in &notes {
            prop_assert!(engine.validate_by_hash(BALANCED, fingerprint(note), SENDER).unwrap());
        }
    }
}

#[test]
fn test_zero_fingerprint_rejected_with_position() {
    let mut engine = engine_with(BALANCED, echo());
    engine.validate(BALANCED, SENDER, b"note").unwrap();
    assert_eq!(
        engine.clear(BALANCED, &[fingerprint(b"note"), Fingerprint::ZERO], SENDER),
        Err(EngineError::InvalidFingerprint { index: 1 })
    );
    assert_eq!(engine.ledger_len(), 1);
}

// ---------------------------------------------------------------------------
// Versioning and authorization
// ---------------------------------------------------------------------------

#[test]
fn test_epoch_scenario() {
    let mut engine = engine_with(BALANCED, echo());
    let initial = engine.latest_epoch();
    for _ in 0..3 {
        engine.increment_epoch(OWNER).unwrap();
    }
    assert_eq!(engine.latest_epoch(), initial + 3);

    let too_new = ProofIdentifier::new(5, 1, 1);
    assert_eq!(
        engine.set_validator(OWNER, too_new, echo()),
        Err(EngineError::EpochExceeded {
            proof: too_new,
            epoch: 5,
            latest: 4
        })
    );
    engine
        .set_validator(OWNER, ProofIdentifier::new(4, 1, 1), echo())
        .unwrap();
    engine.validate(BALANCED, SENDER, b"still served").unwrap();
}

#[test]
fn test_non_owner_changes_nothing() {
    let mut engine = engine_with(BALANCED, echo());
    engine.validate(BALANCED, SENDER, b"note").unwrap();
    let before = engine.snapshot();
    let unauthorized = Err(EngineError::Unauthorized { caller: MALLORY });

    assert_eq!(
        engine.set_validator(MALLORY, ProofIdentifier::new(1, 2, 1), echo()),
        unauthorized
    );
    assert_eq!(engine.invalidate(MALLORY, BALANCED), unauthorized);
    assert_eq!(engine.increment_epoch(MALLORY).map(|_| ()), unauthorized);
    assert_eq!(
        engine.set_reference_parameters(MALLORY, ReferenceParameters::new([[7; 32]; 6])),
        unauthorized
    );
    assert_eq!(engine.transfer_ownership(MALLORY, MALLORY), unauthorized);

    assert_eq!(engine.snapshot(), before);
}
