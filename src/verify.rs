// src/verify.rs
// The local verification pipeline: signature completeness, input
// resolution, transaction-type structural rules, then one verify call per
// governing contract. A transaction is either fully checked or rejected
// outright; nothing here retries.

use crate::contracts::{ContractRegistry, StateAndRef, StateRef, TransactionState};
use crate::error::VerificationError;
use crate::transactions::ledger::LedgerTransaction;
use crate::transactions::signed::SignedTransaction;
use async_trait::async_trait;
use log::debug;
use std::collections::HashMap;

/// Input-resolution collaborator: turns a state reference into the full
/// prior output it points at. Supplied by external storage; the one
/// operation in this core that may suspend.
#[async_trait]
pub trait InputResolver: Send + Sync {
    async fn resolve(&self, state_ref: &StateRef) -> Result<TransactionState, VerificationError>;
}

/// In-memory resolver over a map of known outputs. Used by tests and local
/// tooling.
#[derive(Debug, Clone, Default)]
pub struct MapResolver {
    outputs: HashMap<StateRef, TransactionState>,
}

impl MapResolver {
    pub fn new() -> Self {
        MapResolver {
            outputs: HashMap::new(),
        }
    }

    pub fn insert(&mut self, state_ref: StateRef, state: TransactionState) {
        self.outputs.insert(state_ref, state);
    }

    /// Record every output of a wire transaction under its id, as a vault
    /// would after commit.
    pub fn add_transaction(&mut self, wire: &crate::transactions::wire::WireTransaction) {
        let id = wire.id();
        for (index, output) in wire.outputs.iter().enumerate() {
            self.outputs
                .insert(StateRef::new(id, index as u32), output.clone());
        }
    }
}

#[async_trait]
impl InputResolver for MapResolver {
    async fn resolve(&self, state_ref: &StateRef) -> Result<TransactionState, VerificationError> {
        self.outputs
            .get(state_ref)
            .cloned()
            .ok_or(VerificationError::UnresolvableInput {
                state_ref: *state_ref,
            })
    }
}

/// Orchestrates local acceptance of a transaction. Holds the immutable
/// contract registry; everything else arrives per call.
pub struct Verifier {
    registry: ContractRegistry,
}

impl Verifier {
    pub fn new(registry: ContractRegistry) -> Self {
        Verifier { registry }
    }

    /// Fully check one signed transaction. On success the transaction is
    /// locally valid, ready to notarize; the resolved form is returned for
    /// the caller's use. The first failure is terminal for this attempt.
    pub async fn verify(
        &self,
        stx: &SignedTransaction,
        resolver: &dyn InputResolver,
    ) -> Result<LedgerTransaction, VerificationError> {
        debug!("verifying transaction {}", stx.id());
        let commands = stx.verify_signatures(&[])?;
        let wire = stx.wire_transaction()?;

        // Resolve each unique input once; all must resolve before any
        // contract runs.
        let mut resolved: HashMap<StateRef, TransactionState> = HashMap::new();
        let mut inputs = Vec::with_capacity(wire.inputs.len());
        for state_ref in &wire.inputs {
            if !resolved.contains_key(state_ref) {
                let state = resolver.resolve(state_ref).await?;
                resolved.insert(*state_ref, state);
            }
            inputs.push(StateAndRef {
                state: resolved[state_ref].clone(),
                state_ref: *state_ref,
            });
        }

        let ltx = LedgerTransaction {
            inputs,
            outputs: wire.outputs.clone(),
            commands,
            attachments: wire.attachments.clone(),
            id: stx.id(),
            notary: wire.notary.clone(),
            signers: wire.signers.clone(),
            timestamp: wire.timestamp.clone(),
            tx_type: wire.tx_type,
        };

        ltx.tx_type.verify(&ltx)?;

        for contract_id in ltx.contracts() {
            let contract =
                self.registry
                    .get(&contract_id)
                    .ok_or_else(|| VerificationError::UnknownContract {
                        contract: contract_id.clone(),
                    })?;
            debug!("running contract {} on {}", contract_id, ltx.id);
            contract.verify(&ltx)?;
        }

        Ok(ltx)
    }
}
