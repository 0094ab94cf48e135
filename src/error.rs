// src/error.rs
// Error taxonomy for transaction building and verification. Every failure
// carries enough structured data (missing-key sets, offending refs,
// contract ids) for callers to act programmatically.

use crate::contracts::{ContractId, StateRef};
use crate::crypto::{Party, PublicKey, SecureHash};
use std::collections::BTreeSet;
use thiserror::Error;

/// Violation of the active transaction type's structural rules. Fatal; the
/// transaction must be rebuilt with the correct type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StructuralError {
    #[error("notary change from {input_notary} to {output_notary} is not allowed in a General transaction")]
    NotaryChangeInWrongTransactionType {
        input_notary: Party,
        output_notary: Party,
    },

    #[error("a notary change transaction must preserve state content")]
    StateContentChanged,

    #[error("a notary change transaction must be signed by the current notary {notary}")]
    MissingNotarySignature { notary: Party },
}

/// Terminal outcome of a failed local verification. Nothing here is retried
/// internally; a caller may only re-submit after obtaining more signatures
/// (`SignaturesMissing`) or rebuilding the transaction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VerificationError {
    #[error("structural check failed: {0}")]
    Structural(#[from] StructuralError),

    /// Required signatures not yet present. Recoverable: gather signatures
    /// from exactly the reported keys and re-verify the same bytes.
    #[error("missing signatures from {} required key(s)", missing.len())]
    SignaturesMissing { missing: BTreeSet<PublicKey> },

    /// A present signature failed cryptographic verification. Distinct from
    /// missing, never downgraded to it.
    #[error("signature by {by} does not verify against the transaction id")]
    InvalidSignature { by: PublicKey },

    #[error("input state {state_ref} could not be resolved")]
    UnresolvableInput { state_ref: StateRef },

    #[error("contract {contract} rejected the transaction: {reason}")]
    ContractRejection { contract: ContractId, reason: String },

    #[error("no contract registered under id {contract}")]
    UnknownContract { contract: ContractId },

    #[error("transaction id {declared} does not match content hash {computed}")]
    MismatchedId {
        computed: SecureHash,
        declared: SecureHash,
    },

    #[error("transaction encoding failed: {0}")]
    Encoding(String),
}

/// Misuse of a transaction-building helper. Raised before any partial
/// construction happens.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("at least one input state is required")]
    NoInputStates,

    #[error("input state does not decode as a {contract} state: {reason}")]
    StateDecode { contract: ContractId, reason: String },

    #[error("input states are owned by more than one key")]
    MixedOwners,

    #[error("input states are governed by more than one notary")]
    MixedNotaries,
}
