//! # DID Tezos Resolver
//!
//! Resolves `did:tz` Decentralized Identifiers to DID documents.
//!
//! A `did:tz` DID names a Tezos account, optionally qualified by network:
//!
//! ```text
//! did:tz:tz1TzrmTBSuiVHV2VfMnGRMYvTEPCP42oSM8
//! did:tz:granadanet:tz1TzrmTBSuiVHV2VfMnGRMYvTEPCP42oSM8
//! ```
//!
//! Chain state and indexer queries are made through the [`ChainClient`] and
//! [`Indexer`] traits, which the caller implements over the transport of its
//! choice. A resolver is registered in a [`Registry`] that dispatches
//! requests by DID method:
//!
//! ```rust,ignore
//! let registry = Registry::new().with(DidTz::new(Config::from_env(), node, tzkt));
//! let resolved = registry.resolve(did, &Options::default()).await;
//! ```
//!
//! See [DID resolution](https://www.w3.org/TR/did-core/#did-resolution) for more.

pub mod config;
pub mod core;
pub mod document;
pub mod error;
pub mod jws;
pub mod patch;
mod provider;
mod registry;
mod resolution;
pub mod tz;
mod url;

pub use self::config::{Config, Network};
pub use self::core::Kind;
pub use self::document::*;
pub use self::error::Error;
pub use self::provider::*;
pub use self::registry::*;
pub use self::resolution::*;
pub use self::tz::DidTz;
pub use self::url::Url;

/// Result type used by the resolver.
pub type Result<T, E = Error> = std::result::Result<T, E>;
