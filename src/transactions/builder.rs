// src/transactions/builder.rs

use crate::contracts::{Command, StateAndRef, TransactionState};
use crate::crypto::{Party, PublicKey, SecureHash};
use crate::transactions::txtype::TransactionType;
use crate::transactions::wire::{Timestamp, WireTransaction};
use std::collections::BTreeSet;

/// Assembles a [`WireTransaction`]. The transaction type is fixed at
/// construction; `build` freezes the content and derives the required
/// signer set, after which the transaction never changes.
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    tx_type: TransactionType,
    notary: Option<Party>,
    inputs: Vec<StateAndRef>,
    attachments: Vec<SecureHash>,
    outputs: Vec<TransactionState>,
    commands: Vec<Command>,
    timestamp: Option<Timestamp>,
}

impl TransactionBuilder {
    pub fn new(tx_type: TransactionType) -> Self {
        TransactionBuilder {
            tx_type,
            notary: None,
            inputs: Vec::new(),
            attachments: Vec::new(),
            outputs: Vec::new(),
            commands: Vec::new(),
            timestamp: None,
        }
    }

    pub fn with_notary(mut self, notary: Party) -> Self {
        self.notary = Some(notary);
        self
    }

    pub fn add_input(mut self, input: StateAndRef) -> Self {
        self.inputs.push(input);
        self
    }

    pub fn add_attachment(mut self, attachment: SecureHash) -> Self {
        self.attachments.push(attachment);
        self
    }

    pub fn add_output(mut self, output: TransactionState) -> Self {
        self.outputs.push(output);
        self
    }

    pub fn add_command(mut self, command: Command) -> Self {
        self.commands.push(command);
        self
    }

    pub fn set_timestamp(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// The resolved inputs accumulated so far (the wire form keeps only
    /// their references).
    pub fn input_states(&self) -> &[StateAndRef] {
        &self.inputs
    }

    /// Freeze into the canonical wire form. The signer set is always the
    /// union of every command's required signers.
    pub fn build(self) -> WireTransaction {
        let signers: BTreeSet<PublicKey> = self
            .commands
            .iter()
            .flat_map(|c| c.signers.iter().copied())
            .collect();
        WireTransaction {
            inputs: self.inputs.iter().map(|i| i.state_ref).collect(),
            attachments: self.attachments,
            outputs: self.outputs,
            commands: self.commands,
            notary: self.notary,
            signers: signers.into_iter().collect(),
            tx_type: self.tx_type,
            timestamp: self.timestamp,
        }
    }
}
