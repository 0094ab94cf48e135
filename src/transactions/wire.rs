// src/transactions/wire.rs

use crate::contracts::{Command, StateRef, TransactionState};
use crate::crypto::{Party, PublicKey, SecureHash};
use crate::error::VerificationError;
use crate::transactions::txtype::TransactionType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Optional validity window for a transaction. Contracts may read it; it is
/// their only source of time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamp {
    pub after: Option<DateTime<Utc>>,
    pub before: Option<DateTime<Utc>>,
}

/// The canonical, content-addressed, unsigned transaction shape: inputs as
/// references, outputs as values. Never mutated after its id is computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireTransaction {
    pub inputs: Vec<StateRef>,
    pub attachments: Vec<SecureHash>,
    pub outputs: Vec<TransactionState>,
    pub commands: Vec<Command>,
    pub notary: Option<Party>,
    /// Union of every command's required signers, sorted and deduplicated.
    pub signers: Vec<PublicKey>,
    pub tx_type: TransactionType,
    pub timestamp: Option<Timestamp>,
}

impl WireTransaction {
    /// Canonical byte encoding: compact JSON with serde-declared field
    /// order; sequences keep insertion order, so reordering inputs,
    /// outputs, commands or attachments changes the id. Digests, keys and
    /// signatures encode as lowercase hex strings.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        serde_json::to_vec(self).expect("wire transaction always serializes")
    }

    /// The transaction id: SHA-256 of the canonical bytes. A pure function
    /// of content.
    pub fn id(&self) -> SecureHash {
        SecureHash::sha256(&self.canonical_bytes())
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, VerificationError> {
        serde_json::from_slice(bytes).map_err(|e| VerificationError::Encoding(e.to_string()))
    }
}
