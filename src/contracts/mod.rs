// src/contracts/mod.rs
// State and command model: the facts a transaction consumes/creates, the
// commands that express intent, and the contract capability that decides
// which transactions are valid.

pub mod dummy;

use crate::crypto::{Party, PublicKey, SecureHash};
use crate::error::VerificationError;
use crate::transactions::ledger::LedgerTransaction;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Identifies the verification logic governing a family of states.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContractId(String);

impl ContractId {
    pub fn new(id: impl Into<String>) -> Self {
        ContractId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ContractId {
    fn from(s: &str) -> Self {
        ContractId(s.to_string())
    }
}

impl fmt::Display for ContractId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Serialized envelope of a contract state: the contract that governs it,
/// its JSON fields, and the keys with an interest in it (relevancy, not
/// signing).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateData {
    pub contract: ContractId,
    pub fields: JsonValue,
    pub participants: Vec<PublicKey>,
}

impl StateData {
    /// Encode a typed state into its envelope.
    pub fn encode<S: ContractState + Serialize>(state: &S) -> Self {
        StateData {
            contract: state.contract_id(),
            fields: serde_json::to_value(state).expect("contract state always serializes"),
            participants: state.participants(),
        }
    }
}

/// Any value that can appear as a transaction output.
pub trait ContractState {
    /// The contract whose `verify` governs this state.
    fn contract_id(&self) -> ContractId;

    /// Keys with an interest in this state.
    fn participants(&self) -> Vec<PublicKey>;
}

/// Result of an ownership transfer: the command to attach to the spending
/// transaction and the replacement state.
#[derive(Debug, Clone, PartialEq)]
pub struct Transfer<S> {
    pub command: CommandData,
    pub new_state: S,
}

/// A freely transferable state: exposes its owner and the canonical
/// ownership-transfer operation.
pub trait OwnableState: ContractState + Sized {
    fn owner(&self) -> PublicKey;

    /// Produce the `Move` command and a copy of this state identical in
    /// every field except `owner`.
    fn with_new_owner(&self, new_owner: PublicKey) -> Transfer<Self>;
}

/// A state plus the notary currently responsible for preventing it from
/// being double-spent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionState {
    pub data: StateData,
    pub notary: Party,
}

impl TransactionState {
    pub fn new<S: ContractState + Serialize>(state: &S, notary: Party) -> Self {
        TransactionState {
            data: StateData::encode(state),
            notary,
        }
    }
}

/// Pointer to exactly one output of exactly one prior transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateRef {
    pub txhash: SecureHash,
    pub index: u32,
}

impl StateRef {
    pub fn new(txhash: SecureHash, index: u32) -> Self {
        StateRef { txhash, index }
    }
}

impl fmt::Display for StateRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.txhash, self.index)
    }
}

/// A resolved input: the full prior output together with the reference that
/// pointed at it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateAndRef {
    pub state: TransactionState,
    pub state_ref: StateRef,
}

/// Application-defined intent attached to a transaction. `value: None` is
/// the type-only form, a pure marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandData {
    pub contract: ContractId,
    pub name: String,
    pub value: Option<JsonValue>,
}

impl CommandData {
    /// A type-only command: name without payload.
    pub fn type_only(contract: ContractId, name: impl Into<String>) -> Self {
        CommandData {
            contract,
            name: name.into(),
            value: None,
        }
    }
}

/// A command together with the keys that must sign the transaction for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    pub data: CommandData,
    pub signers: Vec<PublicKey>,
}

impl Command {
    /// Required signers are kept sorted and deduplicated.
    pub fn new(data: CommandData, signers: Vec<PublicKey>) -> Self {
        let mut signers = signers;
        signers.sort();
        signers.dedup();
        Command { data, signers }
    }
}

/// A value paired with the keys that actually signed the enclosing
/// transaction. Only produced by signature verification.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticatedObject<T> {
    pub signers: Vec<PublicKey>,
    pub value: T,
}

/// The contract-execution sandbox contract: a pure, deterministic function
/// from a fully resolved transaction to accept/reject. It sees the entire
/// transaction (all inputs/outputs/commands, not just "its own") and must
/// filter internally; no I/O, no clock other than the transaction's own
/// timestamp field.
pub trait Contract: Send + Sync {
    fn id(&self) -> ContractId;

    fn verify(&self, tx: &LedgerTransaction) -> Result<(), VerificationError>;
}

/// Immutable lookup from contract id to verification logic. Built once at
/// startup, only read afterwards.
#[derive(Clone, Default)]
pub struct ContractRegistry {
    contracts: HashMap<ContractId, Arc<dyn Contract>>,
}

impl ContractRegistry {
    pub fn new() -> Self {
        ContractRegistry {
            contracts: HashMap::new(),
        }
    }

    pub fn register(mut self, contract: Arc<dyn Contract>) -> Self {
        self.contracts.insert(contract.id(), contract);
        self
    }

    pub fn get(&self, id: &ContractId) -> Option<&Arc<dyn Contract>> {
        self.contracts.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pk(seed: u8) -> PublicKey {
        PublicKey::from_bytes([seed; 32])
    }

    #[test]
    fn test_command_signers_sorted_and_deduped() {
        let data = CommandData::type_only(ContractId::from("dummy"), "Create");
        let cmd = Command::new(data, vec![pk(9), pk(1), pk(9), pk(5)]);
        assert_eq!(cmd.signers, vec![pk(1), pk(5), pk(9)]);
    }

    #[test]
    fn test_state_ref_display() {
        let r = StateRef::new(SecureHash::sha256(b"tx"), 3);
        let shown = r.to_string();
        assert!(shown.ends_with("(3)"));
    }

    #[test]
    fn test_registry_lookup() {
        let registry = ContractRegistry::new().register(Arc::new(dummy::DummyContract));
        assert!(registry.get(&dummy::DUMMY_PROGRAM_ID).is_some());
        assert!(registry.get(&ContractId::from("missing")).is_none());
    }
}
