// tests/pipeline_tests.rs
//! End-to-end verification: issue a state, move it, and exercise the
//! failure paths of the pipeline over an in-memory resolver.

use ed25519_dalek::SigningKey;
use std::sync::Arc;
use weft_ledger::contracts::dummy::{self, DummyContract, SingleOwnerState};
use weft_ledger::prelude::*;

fn key(seed: u8) -> SigningKey {
    SigningKey::from_bytes(&[seed; 32])
}

fn registry() -> ContractRegistry {
    ContractRegistry::new().register(Arc::new(DummyContract))
}

fn sign(wire: &WireTransaction, keys: &[&SigningKey]) -> SignedTransaction {
    let id = wire.id();
    SignedTransaction::from_wire(wire, keys.iter().map(|k| sign_hash(k, &id)).collect())
}

#[tokio::test]
async fn issue_then_move_verifies() {
    let _ = env_logger::builder().is_test(true).try_init();

    let alice = key(1);
    let bob = key(2);
    let notary = Party::new("Notary", PublicKey::of(&key(100)));
    let verifier = Verifier::new(registry());
    let mut resolver = MapResolver::new();

    // Issue: no inputs, one output owned by Alice.
    let issue = dummy::generate_initial(PublicKey::of(&alice), 42, notary).build();
    let ltx = verifier
        .verify(&sign(&issue, &[&alice]), &resolver)
        .await
        .unwrap();
    assert!(ltx.inputs.is_empty());
    assert_eq!(ltx.id, issue.id());

    // Commit the issue's outputs to the resolver, then spend them.
    resolver.add_transaction(&issue);
    let prior = StateAndRef {
        state: issue.outputs[0].clone(),
        state_ref: StateRef::new(issue.id(), 0),
    };
    let mv = dummy::move_states(&[prior], PublicKey::of(&bob))
        .unwrap()
        .build();
    let ltx = verifier
        .verify(&sign(&mv, &[&alice]), &resolver)
        .await
        .unwrap();

    assert_eq!(ltx.inputs.len(), 1);
    assert_eq!(ltx.inputs[0].state_ref.txhash, issue.id());
    let moved = SingleOwnerState::decode(&ltx.outputs[0].data).unwrap();
    assert_eq!(moved.owner, PublicKey::of(&bob));
    assert_eq!(moved.magic_number, 42);
}

#[tokio::test]
async fn unsigned_transaction_never_passes() {
    let alice = key(1);
    let notary = Party::new("Notary", PublicKey::of(&key(100)));
    let issue = dummy::generate_initial(PublicKey::of(&alice), 0, notary).build();

    let err = Verifier::new(registry())
        .verify(&sign(&issue, &[]), &MapResolver::new())
        .await
        .unwrap_err();
    match err {
        VerificationError::SignaturesMissing { missing } => {
            assert!(missing.contains(&PublicKey::of(&alice)));
        }
        other => panic!("expected SignaturesMissing, got {:?}", other),
    }
}

#[tokio::test]
async fn unresolvable_input_reports_the_offending_ref() {
    let alice = key(1);
    let notary = Party::new("Notary", PublicKey::of(&key(100)));
    let issue = dummy::generate_initial(PublicKey::of(&alice), 7, notary).build();

    // Build a move against outputs no resolver knows about.
    let prior = StateAndRef {
        state: issue.outputs[0].clone(),
        state_ref: StateRef::new(issue.id(), 0),
    };
    let mv = dummy::move_states(&[prior], PublicKey::of(&key(2)))
        .unwrap()
        .build();

    let err = Verifier::new(registry())
        .verify(&sign(&mv, &[&alice]), &MapResolver::new())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        VerificationError::UnresolvableInput {
            state_ref: StateRef::new(issue.id(), 0)
        }
    );
}

#[tokio::test]
async fn notary_change_is_rejected_under_general_type() {
    let alice = key(1);
    let old_notary = Party::new("Notary", PublicKey::of(&key(100)));
    let new_notary = Party::new("Other notary", PublicKey::of(&key(101)));

    let issue = dummy::generate_initial(PublicKey::of(&alice), 3, old_notary).build();
    let mut resolver = MapResolver::new();
    resolver.add_transaction(&issue);

    // Hand-build a General transaction whose output hops notaries.
    let prior = StateAndRef {
        state: issue.outputs[0].clone(),
        state_ref: StateRef::new(issue.id(), 0),
    };
    let state = SingleOwnerState::decode(&prior.state.data).unwrap();
    let wtx = TransactionBuilder::new(TransactionType::General)
        .with_notary(new_notary.clone())
        .add_input(prior)
        .add_output(TransactionState::new(&state, new_notary))
        .add_command(Command::new(dummy::move_command(), vec![state.owner]))
        .build();

    let err = Verifier::new(registry())
        .verify(&sign(&wtx, &[&alice]), &resolver)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        VerificationError::Structural(StructuralError::NotaryChangeInWrongTransactionType { .. })
    ));
}

#[tokio::test]
async fn unknown_contract_is_rejected() {
    let alice = key(1);
    let notary = Party::new("Notary", PublicKey::of(&key(100)));
    let issue = dummy::generate_initial(PublicKey::of(&alice), 0, notary).build();

    // An empty registry knows nothing about the dummy contract.
    let err = Verifier::new(ContractRegistry::new())
        .verify(&sign(&issue, &[&alice]), &MapResolver::new())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        VerificationError::UnknownContract {
            contract: dummy::DUMMY_PROGRAM_ID.clone()
        }
    );
}

#[tokio::test]
async fn empty_transaction_verifies_trivially() {
    let wtx = TransactionBuilder::new(TransactionType::General).build();
    let stx = SignedTransaction::from_wire(&wtx, vec![]);
    let ltx = Verifier::new(registry())
        .verify(&stx, &MapResolver::new())
        .await
        .unwrap();
    assert!(ltx.inputs.is_empty());
    assert!(ltx.outputs.is_empty());
    assert!(ltx.commands.is_empty());
}
