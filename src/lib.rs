//! Weft ledger core: the transaction data model and local verification
//! engine of the Weft distributed ledger.
//!
//! A ledger fact ("state") is consumed and created by transactions. A
//! transaction is content-addressed (its id is the SHA-256 of its canonical
//! bytes), signed by the keys its commands require, and accepted only after
//! the structural rules of its transaction type, signature completeness and
//! every governing contract's `verify` all pass. Ordering/notarization,
//! storage and transport live outside this crate and are consumed through
//! the collaborator traits in [`verify`].

pub mod contracts;
pub mod crypto;
pub mod error;
pub mod transactions;
pub mod verify;

pub use contracts::{
    AuthenticatedObject, Command, CommandData, Contract, ContractId, ContractRegistry,
    ContractState, OwnableState, StateAndRef, StateData, StateRef, TransactionState, Transfer,
};
pub use crypto::{sign_hash, DigitalSignature, Party, PublicKey, SecureHash};
pub use error::{BuildError, StructuralError, VerificationError};
pub use transactions::builder::TransactionBuilder;
pub use transactions::ledger::LedgerTransaction;
pub use transactions::signed::SignedTransaction;
pub use transactions::txtype::TransactionType;
pub use transactions::wire::{Timestamp, WireTransaction};
pub use verify::{InputResolver, MapResolver, Verifier};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::contracts::dummy::{self, DummyContract, SingleOwnerState};
    pub use crate::contracts::*;
    pub use crate::crypto::*;
    pub use crate::error::*;
    pub use crate::transactions::builder::TransactionBuilder;
    pub use crate::transactions::ledger::LedgerTransaction;
    pub use crate::transactions::signed::SignedTransaction;
    pub use crate::transactions::txtype::TransactionType;
    pub use crate::transactions::wire::{Timestamp, WireTransaction};
    pub use crate::verify::{InputResolver, MapResolver, Verifier};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
