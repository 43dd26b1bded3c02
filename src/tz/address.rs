//! Tezos base58check addresses and public keys.

use std::fmt::Display;
use std::str::FromStr;

use ed25519_dalek::{PUBLIC_KEY_LENGTH, VerifyingKey};

use crate::error::Error;

const ADDRESS_LENGTH: usize = 36;
const HASH_LENGTH: usize = 20;
const EDPK_PREFIX: [u8; 4] = [13, 15, 37, 217];

/// Address prefixes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Prefix {
    /// Implicit account, Ed25519 key.
    Tz1,

    /// Implicit account, secp256k1 key.
    Tz2,

    /// Implicit account, P-256 key.
    Tz3,

    /// Originated account (smart contract).
    Kt1,
}

impl Prefix {
    /// Textual prefix.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tz1 => "tz1",
            Self::Tz2 => "tz2",
            Self::Tz3 => "tz3",
            Self::Kt1 => "KT1",
        }
    }

    // Bytes prepended to the 20-byte hash before base58check encoding.
    const fn bytes(self) -> [u8; 3] {
        match self {
            Self::Tz1 => [6, 161, 159],
            Self::Tz2 => [6, 161, 161],
            Self::Tz3 => [6, 161, 164],
            Self::Kt1 => [2, 90, 121],
        }
    }

    fn parse(address: &str) -> Option<Self> {
        [Self::Tz1, Self::Tz2, Self::Tz3, Self::Kt1]
            .into_iter()
            .find(|p| address.starts_with(p.as_str()))
    }
}

/// A validated Tezos account address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Address {
    prefix: Prefix,
    value: String,
}

impl Address {
    /// The address prefix.
    #[must_use]
    pub const fn prefix(&self) -> Prefix {
        self.prefix
    }

    /// Whether the address is an originated (smart contract) account.
    #[must_use]
    pub fn is_originated(&self) -> bool {
        self.prefix == Prefix::Kt1
    }

    /// The address as a string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}

impl FromStr for Address {
    type Err = Error;

    /// Parse and validate prefix, length and checksum.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some(prefix) = Prefix::parse(s) else {
            return Err(Error::InvalidDid(format!("unknown address prefix: {s}")));
        };
        if s.len() != ADDRESS_LENGTH {
            return Err(Error::InvalidDid(format!("invalid address length: {s}")));
        }

        let bytes = bs58::decode(s)
            .with_check(None)
            .into_vec()
            .map_err(|e| Error::InvalidDid(format!("invalid address {s}: {e}")))?;
        if bytes.len() != 3 + HASH_LENGTH || bytes[..3] != prefix.bytes() {
            return Err(Error::InvalidDid(format!("invalid address encoding: {s}")));
        }

        Ok(Self {
            prefix,
            value: s.to_string(),
        })
    }
}

/// Decode a base58check `edpk` public key.
///
/// # Errors
///
/// Returns [`Error::InvalidPublicKey`] when the key is not a valid Ed25519
/// public key. Other curves are not supported.
pub fn decode_public_key(public_key: &str) -> Result<VerifyingKey, Error> {
    if !public_key.starts_with("edpk") {
        return Err(Error::InvalidPublicKey(format!("unsupported public key type: {public_key}")));
    }

    let bytes = bs58::decode(public_key)
        .with_check(None)
        .into_vec()
        .map_err(|e| Error::InvalidPublicKey(format!("issue decoding public key: {e}")))?;
    let Some(key) = bytes.strip_prefix(EDPK_PREFIX.as_slice()) else {
        return Err(Error::InvalidPublicKey("public key has an unexpected prefix".into()));
    };
    let key: [u8; PUBLIC_KEY_LENGTH] = key.try_into().map_err(|_| {
        Error::InvalidPublicKey(format!("public key is not {PUBLIC_KEY_LENGTH} bytes"))
    })?;

    VerifyingKey::from_bytes(&key)
        .map_err(|e| Error::InvalidPublicKey(format!("invalid Ed25519 public key: {e}")))
}
