// src/transactions/txtype.rs
// Transaction types and their structural rules. Each variant is a distinct
// rule set checked against the resolved transaction once, before any
// contract-level verify runs.

use crate::contracts::StateData;
use crate::error::{StructuralError, VerificationError};
use crate::transactions::ledger::LedgerTransaction;
use serde::{Deserialize, Serialize};

/// Which structural invariants apply to a transaction, in particular
/// whether the notary may change between inputs and outputs. Chosen by the
/// builder, immutable thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionType {
    /// The default. With one or more inputs, a single notary governs the
    /// transaction: every input and every output must share it; with no
    /// inputs there is nothing to conflict with and outputs may pick any
    /// notary.
    General,
    /// The only type under which a state's governing notary may change.
    NotaryChange,
}

impl TransactionType {
    pub fn verify(&self, tx: &LedgerTransaction) -> Result<(), VerificationError> {
        match self {
            TransactionType::General => verify_general(tx),
            TransactionType::NotaryChange => verify_notary_change(tx),
        }
    }
}

fn verify_general(tx: &LedgerTransaction) -> Result<(), VerificationError> {
    // With no inputs there is nothing to conflict with; otherwise one
    // notary governs the whole transaction: the declared one if present,
    // else the first input's. Every input and every output must sit under
    // it.
    let anchor = match (&tx.notary, tx.inputs.first()) {
        (_, None) => return Ok(()),
        (Some(notary), _) => notary.clone(),
        (None, Some(first)) => first.state.notary.clone(),
    };
    for input in &tx.inputs {
        if input.state.notary != anchor {
            return Err(StructuralError::NotaryChangeInWrongTransactionType {
                input_notary: input.state.notary.clone(),
                output_notary: anchor,
            }
            .into());
        }
    }
    for output in &tx.outputs {
        if output.notary != anchor {
            return Err(StructuralError::NotaryChangeInWrongTransactionType {
                input_notary: anchor,
                output_notary: output.notary.clone(),
            }
            .into());
        }
    }
    Ok(())
}

fn verify_notary_change(tx: &LedgerTransaction) -> Result<(), VerificationError> {
    // State content (modulo the notary, which lives outside StateData) must
    // be preserved; only the responsible notary changes.
    let mut consumed: Vec<String> = tx
        .inputs
        .iter()
        .map(|i| canonical_state(&i.state.data))
        .collect();
    let mut created: Vec<String> = tx.outputs.iter().map(|o| canonical_state(&o.data)).collect();
    consumed.sort();
    created.sort();
    if consumed != created {
        return Err(StructuralError::StateContentChanged.into());
    }

    // The notary losing responsibility must be among the declared signers.
    for input in &tx.inputs {
        if !tx.signers.contains(&input.state.notary.owning_key) {
            return Err(StructuralError::MissingNotarySignature {
                notary: input.state.notary.clone(),
            }
            .into());
        }
    }
    Ok(())
}

fn canonical_state(data: &StateData) -> String {
    serde_json::to_string(data).expect("state data always serializes")
}
