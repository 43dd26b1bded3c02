//! # Provider Traits
//!
//! The resolver reads chain state through a [`ChainClient`] and discovers
//! manager contracts through an [`Indexer`]. Implementers supply the
//! transport (HTTP, cache, fixture data); the resolver only depends on the
//! contracts below.
//!
//! Both traits take the endpoint to query as an argument since the endpoint
//! is chosen per request (see [`crate::config`]).

use std::future::Future;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// [`ChainClient`] is used to proxy reads from a Tezos node.
pub trait ChainClient: Send + Sync {
    /// The chain id of the network served by `rpc`, e.g. `NetXdQprcVkpaWU`.
    ///
    /// # Errors
    ///
    /// Returns an error if the node cannot be reached.
    fn chain_id(&self, rpc: &str) -> impl Future<Output = Result<String>> + Send;

    /// The storage of the contract at `address`, as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the node cannot be reached or the contract does
    /// not exist.
    fn contract_storage(
        &self, rpc: &str, address: &str,
    ) -> impl Future<Output = Result<Value>> + Send;

    /// The TZIP-16 metadata of the contract at `address`, if the contract
    /// declares any.
    ///
    /// # Errors
    ///
    /// Returns an error if the node cannot be reached or the metadata cannot
    /// be fetched.
    fn contract_metadata(
        &self, rpc: &str, address: &str,
    ) -> impl Future<Output = Result<Option<ContractMetadata>>> + Send;

    /// Execute the off-chain view `view` of the contract at `address` and
    /// return its result.
    ///
    /// # Errors
    ///
    /// Returns an error if the view does not exist or fails to execute.
    fn execute_view(
        &self, rpc: &str, address: &str, view: &str,
    ) -> impl Future<Output = Result<Value>> + Send;
}

/// [`Indexer`] answers account-level queries the node does not serve
/// efficiently.
pub trait Indexer: Send + Sync {
    /// Contracts associated with the account at `address`, in the order the
    /// indexer returns them.
    ///
    /// # Errors
    ///
    /// Returns an error if the indexer cannot be reached.
    fn contracts(
        &self, indexer: &str, address: &str,
    ) -> impl Future<Output = Result<Vec<AccountContract>>> + Send;

    /// First and last activity of the contract at `address`.
    ///
    /// # Errors
    ///
    /// Returns an error if the indexer cannot be reached.
    fn activity(
        &self, indexer: &str, address: &str,
    ) -> impl Future<Output = Result<ContractActivity>> + Send;
}

/// Off-chain (TZIP-16) contract metadata.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
#[allow(clippy::module_name_repetitions)]
pub struct ContractMetadata {
    /// Interfaces the contract claims to implement, e.g. `TZIP-019`.
    #[serde(default)]
    pub interfaces: Vec<String>,

    /// Names of the off-chain views the contract exposes.
    #[serde(default)]
    pub views: Vec<String>,

    /// Errors raised while loading or validating the metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Value>,

    /// Remaining metadata members (`name`, `version`, `authors`, ...).
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl ContractMetadata {
    /// Whether the contract declares the view `name`.
    #[must_use]
    pub fn has_view(&self, name: &str) -> bool {
        self.views.iter().any(|v| v == name)
    }

    /// Whether the contract declares the interface `name`.
    #[must_use]
    pub fn implements(&self, name: &str) -> bool {
        self.interfaces.iter().any(|i| i == name)
    }
}

/// A contract record returned by the indexer.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AccountContract {
    /// Contract address (`KT1...`).
    pub address: String,

    /// Account kind, e.g. `smart_contract`.
    pub kind: String,

    /// When the contract was originated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Activity timestamps of a contract, as reported by the indexer.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContractActivity {
    /// First time the contract was seen on chain.
    pub first_seen: Option<DateTime<Utc>>,

    /// Last time the contract was active.
    pub last_seen: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    #[test]
    fn metadata_members() {
        let metadata: ContractMetadata = serde_json::from_value(json!({
            "name": "did manager",
            "interfaces": ["TZIP-019"],
            "views": ["GetVerificationMethod", "GetService"]
        }))
        .expect("should deserialize");

        assert!(metadata.implements("TZIP-019"));
        assert!(metadata.has_view("GetService"));
        assert!(!metadata.has_view("GetOwner"));
        assert!(metadata.errors.is_none());
        assert_eq!(metadata.other.get("name"), Some(&json!("did manager")));
    }
}
