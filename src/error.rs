//! # DID Resolution Errors
//!
//! A single error type is used across the resolution pipeline. Each variant
//! maps to an error code that can be reported in DID resolution metadata
//! (see [`Error::code`]) and carries a human-readable message.

use thiserror::Error;

/// Errors raised while resolving a `did:tz` DID.
#[derive(Error, Debug)]
pub enum Error {
    /// The DID or its method-specific identifier is malformed.
    #[error("{0}")]
    InvalidDid(String),

    /// The DID method is not handled by the resolver.
    #[error("{0}")]
    MethodNotSupported(String),

    /// A resolution option could not be used.
    #[error("{0}")]
    InvalidOptions(String),

    /// The chain reached through the RPC endpoint is not the chain the DID
    /// was derived for.
    #[error("chain id mismatch: expected {expected}, found {actual}")]
    ChainMismatch {
        /// Chain id used to build the baseline document.
        expected: String,

        /// Chain id reported by the node.
        actual: String,
    },

    /// The metadata of a manager contract is unusable.
    #[error("{0}")]
    InvalidMetadata(String),

    /// A value expected to be a DID URL cannot be dereferenced.
    #[error("{0}")]
    InvalidDidUrl(String),

    /// A public key cannot be decoded or is of an unsupported type.
    #[error("{0}")]
    InvalidPublicKey(String),

    /// A signed patch was supplied without the key to verify it.
    #[error("need public key for signed patches")]
    MissingPublicKey,

    /// The signed patch envelope is malformed or its signature does not
    /// verify.
    #[error("{0}")]
    InvalidSignature(String),

    /// The signed patch header has no key id.
    #[error("missing 'kid' header property")]
    MissingKeyId,

    /// The key that signed the patch is not an authentication method of the
    /// document.
    #[error("not authorized to propose updates: {0}")]
    NotAuthorized(String),

    /// The patch payload is missing, malformed, or cannot be applied.
    #[error("{0}")]
    InvalidPatch(String),

    /// An upstream collaborator (chain node, indexer) failed.
    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}

impl Error {
    /// Error code to report in `didResolutionMetadata.error`.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidDid(_) => "invalidDid",
            Self::MethodNotSupported(_) => "unsupportedDidMethod",
            Self::InvalidOptions(_) => "invalidOptions",
            Self::ChainMismatch { .. } => "chainMismatch",
            Self::InvalidMetadata(_) => "invalidMetadata",
            Self::InvalidDidUrl(_) => "invalidDidUrl",
            Self::InvalidPublicKey(_) => "invalidPublicKey",
            Self::MissingPublicKey => "missingPublicKey",
            Self::InvalidSignature(_) => "invalidSignature",
            Self::MissingKeyId => "missingKid",
            Self::NotAuthorized(_) => "notAuthorized",
            Self::InvalidPatch(_) => "invalidPatch",
            Self::Transport(_) => "transportError",
        }
    }

    /// Human-readable description of the error.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Transport(e) => format!("{e:#}"),
            _ => self.to_string(),
        }
    }
}

#[cfg(test)]
mod test {
    use anyhow::anyhow;

    use super::*;

    #[test]
    fn error_code() {
        let err = Error::MethodNotSupported("method not supported: eth".into());
        assert_eq!(err.code(), "unsupportedDidMethod");
        assert_eq!(err.message(), "method not supported: eth");
    }

    #[test]
    fn fixed_messages() {
        assert_eq!(Error::MissingPublicKey.message(), "need public key for signed patches");
        assert_eq!(Error::MissingKeyId.message(), "missing 'kid' header property");
        assert_eq!(Error::MissingKeyId.code(), "missingKid");
    }

    #[test]
    fn chain_mismatch() {
        let err = Error::ChainMismatch {
            expected: "NetXdQprcVkpaWU".into(),
            actual: "NetXz969SFaFn8k".into(),
        };
        assert_eq!(err.code(), "chainMismatch");
        assert_eq!(
            err.message(),
            "chain id mismatch: expected NetXdQprcVkpaWU, found NetXz969SFaFn8k"
        );
    }

    #[test]
    fn transport_context() {
        let err: Error = anyhow!("connection refused").context("fetching chain id").into();
        assert_eq!(err.code(), "transportError");
        assert_eq!(err.message(), "fetching chain id: connection refused");
    }
}
