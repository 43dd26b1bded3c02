//! # DID Tezos
//!
//! The `did:tz` method. A DID document is derived from a Tezos account in
//! three steps, each building on the last:
//!
//! 1. a baseline verification method for the account itself,
//! 2. a verification method and service declared by a DID manager contract,
//! 3. a signed update proposed by a holder of an authentication key.
//!
//! See <https://did-tezos.spruceid.com>

pub mod address;
pub mod baseline;
pub mod delegation;
pub mod identifier;
pub mod update;

use anyhow::Context;
use async_trait::async_trait;

use self::delegation::Delegation;
use crate::config::Config;
use crate::document::Document;
use crate::error::Error;
use crate::provider::{ChainClient, Indexer};
use crate::registry::DidMethod;
use crate::resolution::{ContentType, Options, Resolved};
use crate::url::Url;

/// Method name.
pub const METHOD: &str = "tz";

/// `did:tz` resolver.
#[derive(Clone, Debug)]
pub struct DidTz<C, I> {
    config: Config,
    chain: C,
    indexer: I,
}

impl<C: ChainClient, I: Indexer> DidTz<C, I> {
    /// Create a resolver reading chain state through `chain` and discovering
    /// manager contracts through `indexer`.
    #[must_use]
    pub const fn new(config: Config, chain: C, indexer: I) -> Self {
        Self { config, chain, indexer }
    }

    /// The resolver's configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Resolve a `did:tz` DID.
    ///
    /// Never fails: errors are reported in `didResolutionMetadata` alongside
    /// whatever document had been built when the error occurred.
    pub async fn resolve(&self, did: &str, options: &Options) -> Resolved {
        let mut resolved = Resolved::new();

        let outcome = match did.strip_prefix("did:tz:") {
            Some(id) => self.run(did, id, options, &mut resolved).await,
            None => Err(Error::InvalidDid(format!("{did} is not a did:tz DID"))),
        };
        if let Err(e) = outcome {
            tracing::warn!("resolution of {did} failed: {e}");
            resolved.metadata.set_error(&e);
        }

        resolved
    }

    async fn run(
        &self, did: &str, id: &str, options: &Options, resolved: &mut Resolved,
    ) -> Result<(), Error> {
        let identifier = identifier::validate(id, &self.config)?;
        let endpoints = self.config.endpoints(&identifier.network, options)?;
        tracing::debug!("resolving {did} on {} via {}", identifier.network, endpoints.rpc);

        resolved.document = Some(Document::new(did));
        resolved.metadata.content_type = Some(ContentType::DidLdJson);

        let chain_id = match endpoints.chain_id {
            Some(chain_id) => chain_id,
            None => self.chain.chain_id(&endpoints.rpc).await.context("fetching chain id")?,
        };
        baseline::apply(resolved, &identifier.address, &chain_id, options.public_key.as_deref());

        let delegation = Delegation {
            address: &identifier.address,
            chain_id: &chain_id,
            rpc: &endpoints.rpc,
            indexer: &endpoints.indexer,
        };
        delegation::apply(&self.chain, &self.indexer, resolved, &delegation).await?;

        update::apply(
            resolved,
            options.public_key.as_deref(),
            options.signed_ietf_json_patch.as_deref(),
        )
    }
}

#[async_trait]
impl<C: ChainClient, I: Indexer> DidMethod for DidTz<C, I> {
    fn name(&self) -> &str {
        METHOD
    }

    async fn resolve(&self, did: &Url, options: &Options) -> Resolved {
        Self::resolve(self, &did.did(), options).await
    }
}
