// src/transactions/ledger.rs

use crate::contracts::{
    AuthenticatedObject, CommandData, ContractId, StateAndRef, TransactionState,
};
use crate::crypto::{Party, PublicKey, SecureHash};
use crate::transactions::txtype::TransactionType;
use crate::transactions::wire::Timestamp;
use std::collections::BTreeSet;

/// A wire transaction with every input resolved to the full prior output it
/// references and every command authenticated — the shape contracts verify
/// against. Built transiently by the pipeline, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerTransaction {
    pub inputs: Vec<StateAndRef>,
    pub outputs: Vec<TransactionState>,
    pub commands: Vec<AuthenticatedObject<CommandData>>,
    pub attachments: Vec<SecureHash>,
    pub id: SecureHash,
    pub notary: Option<Party>,
    pub signers: Vec<PublicKey>,
    pub timestamp: Option<Timestamp>,
    pub tx_type: TransactionType,
}

impl LedgerTransaction {
    /// Distinct contracts governing any input, output or command of this
    /// transaction. Each gets exactly one `verify` call.
    pub fn contracts(&self) -> BTreeSet<ContractId> {
        let mut ids = BTreeSet::new();
        for input in &self.inputs {
            ids.insert(input.state.data.contract.clone());
        }
        for output in &self.outputs {
            ids.insert(output.data.contract.clone());
        }
        for command in &self.commands {
            ids.insert(command.value.contract.clone());
        }
        ids
    }
}
