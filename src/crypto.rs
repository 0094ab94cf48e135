// src/crypto.rs
// Content addressing and signature primitives: SHA-256 digests for
// transaction ids, ed25519 keys and signatures (hex-encoded on the wire).

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use serde::de::Error;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;

/// 256-bit content digest. Used as a transaction id and inside state
/// references; a pure function of the hashed bytes.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SecureHash([u8; 32]);

impl SecureHash {
    /// Hash arbitrary bytes. Deterministic and total.
    pub fn sha256(bytes: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        let res = hasher.finalize();
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&res[..32]);
        SecureHash(arr)
    }

    pub fn zero() -> Self {
        SecureHash([0u8; 32])
    }

    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        SecureHash(bytes)
    }

    /// The raw digest bytes; this is the payload that gets signed.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        let arr: [u8; 32] = bytes
            .try_into()
            .map_err(|_| hex::FromHexError::InvalidStringLength)?;
        Ok(SecureHash(arr))
    }
}

impl fmt::Display for SecureHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::Debug for SecureHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecureHash({})", hex::encode(self.0))
    }
}

impl Serialize for SecureHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(self.0))
    }
}

impl<'de> Deserialize<'de> for SecureHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        SecureHash::from_hex(&s).map_err(D::Error::custom)
    }
}

/// An ed25519 verifying key. Comparable and orderable so key sets can be
/// intersected and reported deterministically.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PublicKey([u8; 32]);

impl PublicKey {
    pub fn from_verifying_key(vk: &VerifyingKey) -> Self {
        PublicKey(vk.to_bytes())
    }

    /// Convenience: the public half of a signing key.
    pub fn of(signing_key: &SigningKey) -> Self {
        PublicKey::from_verifying_key(&signing_key.verifying_key())
    }

    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        PublicKey(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        let arr: [u8; 32] = bytes
            .try_into()
            .map_err(|_| hex::FromHexError::InvalidStringLength)?;
        Ok(PublicKey(arr))
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", hex::encode(self.0))
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(self.0))
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        PublicKey::from_hex(&s).map_err(D::Error::custom)
    }
}

/// A named identity on the ledger (owners, notaries). Two parties are the
/// same identity iff their name and owning key match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Party {
    pub name: String,
    pub owning_key: PublicKey,
}

impl Party {
    pub fn new(name: impl Into<String>, owning_key: PublicKey) -> Self {
        Party {
            name: name.into(),
            owning_key,
        }
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// An ed25519 signature together with the key that produced it. The signed
/// message is always the transaction id's raw bytes, never the full body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigitalSignature {
    pub by: PublicKey,
    /// Hex-encoded 64-byte ed25519 signature.
    pub sig: String,
}

impl DigitalSignature {
    /// Cryptographically verify this signature against a transaction id.
    /// Returns false on malformed keys/signatures rather than erroring.
    pub fn verify(&self, id: &SecureHash) -> bool {
        let sig_bytes = match hex::decode(&self.sig) {
            Ok(b) => b,
            Err(_) => return false,
        };
        let sig_array: [u8; 64] = match sig_bytes.try_into() {
            Ok(arr) => arr,
            Err(_) => return false,
        };
        let signature = Signature::from_bytes(&sig_array);

        let pubkey = match VerifyingKey::from_bytes(self.by.as_bytes()) {
            Ok(pk) => pk,
            Err(_) => return false,
        };

        pubkey.verify(id.as_bytes(), &signature).is_ok()
    }
}

/// Sign a transaction id with a private key.
pub fn sign_hash(signing_key: &SigningKey, id: &SecureHash) -> DigitalSignature {
    let signature = signing_key.sign(id.as_bytes());
    DigitalSignature {
        by: PublicKey::of(signing_key),
        sig: hex::encode(signature.to_bytes()),
    }
}
