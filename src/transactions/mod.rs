// src/transactions/mod.rs
// The three shapes of one logical transaction: unsigned canonical form
// (wire), signed form, and the fully resolved form contracts verify
// against, plus the builder that constructs them and the transaction-type
// structural rules.

pub mod builder;
pub mod ledger;
pub mod signed;
pub mod txtype;
pub mod wire;

pub use builder::TransactionBuilder;
pub use ledger::LedgerTransaction;
pub use signed::SignedTransaction;
pub use txtype::TransactionType;
pub use wire::{Timestamp, WireTransaction};
