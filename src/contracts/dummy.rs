// src/contracts/dummy.rs
// The dummy contract doesn't do anything useful. It exists for testing the
// verification plumbing: an always-accepting contract with a single-owner
// and a multi-owner state.

use super::{
    Command, CommandData, Contract, ContractId, ContractState, OwnableState, StateAndRef,
    StateData, TransactionState, Transfer,
};
use crate::crypto::{Party, PublicKey};
use crate::error::{BuildError, VerificationError};
use crate::transactions::builder::TransactionBuilder;
use crate::transactions::ledger::LedgerTransaction;
use crate::transactions::txtype::TransactionType;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Program id of the dummy contract.
pub static DUMMY_PROGRAM_ID: Lazy<ContractId> = Lazy::new(|| ContractId::from("dummy"));

/// A transferable state carrying nothing but a magic number and its owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleOwnerState {
    pub magic_number: i64,
    pub owner: PublicKey,
}

impl SingleOwnerState {
    pub fn decode(data: &StateData) -> Result<Self, BuildError> {
        if data.contract != *DUMMY_PROGRAM_ID {
            return Err(BuildError::StateDecode {
                contract: DUMMY_PROGRAM_ID.clone(),
                reason: format!("state is governed by {}", data.contract),
            });
        }
        serde_json::from_value(data.fields.clone()).map_err(|e| BuildError::StateDecode {
            contract: DUMMY_PROGRAM_ID.clone(),
            reason: e.to_string(),
        })
    }
}

impl ContractState for SingleOwnerState {
    fn contract_id(&self) -> ContractId {
        DUMMY_PROGRAM_ID.clone()
    }

    fn participants(&self) -> Vec<PublicKey> {
        vec![self.owner]
    }
}

impl OwnableState for SingleOwnerState {
    fn owner(&self) -> PublicKey {
        self.owner
    }

    fn with_new_owner(&self, new_owner: PublicKey) -> Transfer<Self> {
        Transfer {
            command: move_command(),
            new_state: SingleOwnerState {
                owner: new_owner,
                ..self.clone()
            },
        }
    }
}

/// Alternative state with multiple participants. Exists primarily to
/// exercise states with more than one interested key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiOwnerState {
    pub magic_number: i64,
    pub owners: Vec<PublicKey>,
}

impl ContractState for MultiOwnerState {
    fn contract_id(&self) -> ContractId {
        DUMMY_PROGRAM_ID.clone()
    }

    fn participants(&self) -> Vec<PublicKey> {
        self.owners.clone()
    }
}

/// Type-only "Create" command.
pub fn create_command() -> CommandData {
    CommandData::type_only(DUMMY_PROGRAM_ID.clone(), "Create")
}

/// Type-only "Move" command.
pub fn move_command() -> CommandData {
    CommandData::type_only(DUMMY_PROGRAM_ID.clone(), "Move")
}

/// The "empty contract": accepts every transaction shape.
pub struct DummyContract;

impl Contract for DummyContract {
    fn id(&self) -> ContractId {
        DUMMY_PROGRAM_ID.clone()
    }

    fn verify(&self, _tx: &LedgerTransaction) -> Result<(), VerificationError> {
        // Always accepts.
        Ok(())
    }
}

/// Build a one-output "Create" transaction issuing a single-owner state.
pub fn generate_initial(owner: PublicKey, magic_number: i64, notary: Party) -> TransactionBuilder {
    let state = SingleOwnerState {
        magic_number,
        owner,
    };
    TransactionBuilder::new(TransactionType::General)
        .with_notary(notary.clone())
        .add_output(TransactionState::new(&state, notary))
        .add_command(Command::new(create_command(), vec![owner]))
}

/// Build a transaction consuming `priors` and creating one replacement
/// output under `new_owner`.
///
/// Preconditions are checked explicitly rather than trusted: at least one
/// prior, all priors decode as [`SingleOwnerState`], share one owner and
/// one notary. No partial construction happens on failure.
pub fn move_states(
    priors: &[StateAndRef],
    new_owner: PublicKey,
) -> Result<TransactionBuilder, BuildError> {
    let first = priors.first().ok_or(BuildError::NoInputStates)?;
    let decoded: Vec<SingleOwnerState> = priors
        .iter()
        .map(|p| SingleOwnerState::decode(&p.state.data))
        .collect::<Result<_, _>>()?;

    let owner = decoded[0].owner;
    if decoded.iter().any(|s| s.owner != owner) {
        return Err(BuildError::MixedOwners);
    }
    let notary = first.state.notary.clone();
    if priors.iter().any(|p| p.state.notary != notary) {
        return Err(BuildError::MixedNotaries);
    }

    let Transfer { command, new_state } = decoded[0].with_new_owner(new_owner);
    let mut builder = TransactionBuilder::new(TransactionType::General).with_notary(notary.clone());
    for prior in priors {
        builder = builder.add_input(prior.clone());
    }
    Ok(builder
        .add_command(Command::new(command, vec![owner]))
        .add_output(TransactionState::new(&new_state, notary)))
}
