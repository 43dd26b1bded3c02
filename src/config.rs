//! # Configuration
//!
//! The networks a resolver accepts, and the endpoints used to reach them.
//! Adding a network is a change to the [`Config`] table, not to code.

use std::env;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::resolution::Options;

/// Network name accepted without a table entry. Endpoints for a custom
/// network must be supplied by the caller.
pub const CUSTOM: &str = "custom";

/// Environment variable overriding the node RPC endpoint.
pub const RPC_ENV: &str = "TEZOS_RPC_URL";

/// Environment variable overriding the indexer endpoint.
pub const INDEXER_ENV: &str = "TEZOS_INDEXER_URL";

/// Resolver configuration.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Known networks.
    pub networks: Vec<Network>,

    /// Network used when an identifier has no network segment.
    pub default_network: String,

    /// Node RPC endpoint used for every network, overriding the table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rpc: Option<String>,

    /// Indexer endpoint used for every network, overriding the table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indexer: Option<String>,
}

/// A Tezos network.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Network {
    /// Name used in identifiers, e.g. `mainnet`.
    pub name: String,

    /// Chain id, e.g. `NetXdQprcVkpaWU`.
    pub chain_id: String,

    /// Default node RPC endpoint.
    pub rpc: String,

    /// Default indexer endpoint.
    pub indexer: String,
}

impl Network {
    fn new(name: &str, chain_id: &str, rpc: &str, indexer: &str) -> Self {
        Self {
            name: name.to_string(),
            chain_id: chain_id.to_string(),
            rpc: rpc.to_string(),
            indexer: indexer.to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            networks: vec![
                Network::new(
                    "mainnet",
                    "NetXdQprcVkpaWU",
                    "https://mainnet.api.tez.ie",
                    "https://api.tzkt.io",
                ),
                Network::new(
                    "granadanet",
                    "NetXz969SFaFn8k",
                    "https://granadanet.api.tez.ie",
                    "https://api.granadanet.tzkt.io",
                ),
                Network::new(
                    "florencenet",
                    "NetXxkAx4woPLyu",
                    "https://florencenet.api.tez.ie",
                    "https://api.florencenet.tzkt.io",
                ),
            ],
            default_network: "mainnet".to_string(),
            rpc: None,
            indexer: None,
        }
    }
}

/// Endpoints and chain id to use for a single resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
    /// Node RPC endpoint.
    pub rpc: String,

    /// Indexer endpoint.
    pub indexer: String,

    /// Chain id from the network table. `None` for a custom network, whose
    /// chain id must be read from the node.
    pub chain_id: Option<String>,
}

impl Config {
    /// The default network table with endpoint overrides read from
    /// `TEZOS_RPC_URL` and `TEZOS_INDEXER_URL`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_overrides(env::var(RPC_ENV).ok(), env::var(INDEXER_ENV).ok())
    }

    /// Set endpoint overrides. Empty values are ignored.
    #[must_use]
    pub fn with_overrides(mut self, rpc: Option<String>, indexer: Option<String>) -> Self {
        if let Some(rpc) = rpc.filter(|s| !s.is_empty()) {
            self.rpc = Some(rpc);
        }
        if let Some(indexer) = indexer.filter(|s| !s.is_empty()) {
            self.indexer = Some(indexer);
        }
        self
    }

    /// Look up a network by name.
    #[must_use]
    pub fn network(&self, name: &str) -> Option<&Network> {
        self.networks.iter().find(|n| n.name == name)
    }

    /// Whether `name` may be used as the network segment of an identifier.
    #[must_use]
    pub fn is_allowed(&self, name: &str) -> bool {
        name == CUSTOM || self.network(name).is_some()
    }

    /// Endpoints for `network`. Resolution options take precedence over
    /// configured overrides, which take precedence over the network table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOptions`] when no endpoint is known for the
    /// network, e.g. a custom network without overrides.
    pub fn endpoints(&self, network: &str, options: &Options) -> Result<Endpoints, Error> {
        let entry = self.network(network);

        let rpc = options
            .rpc
            .clone()
            .or_else(|| self.rpc.clone())
            .or_else(|| entry.map(|n| n.rpc.clone()))
            .ok_or_else(|| {
                Error::InvalidOptions(format!("no RPC endpoint for network {network}"))
            })?;
        let indexer = options
            .indexer
            .clone()
            .or_else(|| self.indexer.clone())
            .or_else(|| entry.map(|n| n.indexer.clone()))
            .ok_or_else(|| {
                Error::InvalidOptions(format!("no indexer endpoint for network {network}"))
            })?;

        Ok(Endpoints {
            rpc,
            indexer,
            chain_id: entry.map(|n| n.chain_id.clone()),
        })
    }
}
