// src/transactions/signed.rs

use crate::contracts::{AuthenticatedObject, CommandData};
use crate::crypto::{DigitalSignature, PublicKey, SecureHash};
use crate::error::VerificationError;
use crate::transactions::wire::WireTransaction;
use std::collections::BTreeSet;

/// The serialized wire form plus the signatures collected so far. The id is
/// pinned to the content hash at construction; adding signatures never
/// changes the bytes or the id.
#[derive(Debug, Clone, PartialEq)]
pub struct SignedTransaction {
    raw: Vec<u8>,
    signatures: Vec<DigitalSignature>,
    id: SecureHash,
}

impl SignedTransaction {
    /// Wrap raw wire bytes. Fails if `id` is not the content hash of
    /// `raw` — a signed transaction never carries a foreign id.
    pub fn new(
        raw: Vec<u8>,
        signatures: Vec<DigitalSignature>,
        id: SecureHash,
    ) -> Result<Self, VerificationError> {
        let computed = SecureHash::sha256(&raw);
        if computed != id {
            return Err(VerificationError::MismatchedId {
                computed,
                declared: id,
            });
        }
        Ok(SignedTransaction {
            raw,
            signatures,
            id,
        })
    }

    /// Serialize a wire transaction and attach signatures. Infallible: the
    /// id is computed from the bytes being wrapped.
    pub fn from_wire(wire: &WireTransaction, signatures: Vec<DigitalSignature>) -> Self {
        let raw = wire.canonical_bytes();
        let id = SecureHash::sha256(&raw);
        SignedTransaction {
            raw,
            signatures,
            id,
        }
    }

    pub fn id(&self) -> SecureHash {
        self.id
    }

    pub fn raw_bytes(&self) -> &[u8] {
        &self.raw
    }

    pub fn signatures(&self) -> &[DigitalSignature] {
        &self.signatures
    }

    /// Decode the enclosed wire transaction.
    pub fn wire_transaction(&self) -> Result<WireTransaction, VerificationError> {
        WireTransaction::from_bytes(&self.raw)
    }

    /// Append one more signature; the underlying bytes and id are
    /// unchanged, so partially signed transactions can circulate.
    pub fn with_signature(mut self, signature: DigitalSignature) -> Self {
        self.signatures.push(signature);
        self
    }

    /// Signature-completeness check.
    ///
    /// Every present signature must cryptographically verify against the
    /// transaction id (an invalid signature is a hard failure, never
    /// treated as missing). The keys still owed a signature are
    /// `required - present - allowed_to_be_missing`; if any remain, the
    /// error reports exactly that set so callers can drive multi-party
    /// signing. On success, returns each command paired with the subset of
    /// its required signers that actually signed.
    pub fn verify_signatures(
        &self,
        allowed_to_be_missing: &[PublicKey],
    ) -> Result<Vec<AuthenticatedObject<CommandData>>, VerificationError> {
        let wire = self.wire_transaction()?;

        let mut present: BTreeSet<PublicKey> = BTreeSet::new();
        for signature in &self.signatures {
            if !signature.verify(&self.id) {
                return Err(VerificationError::InvalidSignature { by: signature.by });
            }
            present.insert(signature.by);
        }

        let allowed: BTreeSet<PublicKey> = allowed_to_be_missing.iter().copied().collect();
        let missing: BTreeSet<PublicKey> = wire
            .signers
            .iter()
            .filter(|k| !present.contains(k) && !allowed.contains(k))
            .copied()
            .collect();
        if !missing.is_empty() {
            return Err(VerificationError::SignaturesMissing { missing });
        }

        Ok(wire
            .commands
            .iter()
            .map(|c| AuthenticatedObject {
                signers: c
                    .signers
                    .iter()
                    .filter(|k| present.contains(k))
                    .copied()
                    .collect(),
                value: c.data.clone(),
            })
            .collect())
    }
}
