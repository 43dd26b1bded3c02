//! Mock Tezos node and indexer shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;

use anyhow::{Result, anyhow};
use chrono::{TimeZone, Utc};
use did_tz::{AccountContract, ChainClient, ContractActivity, ContractMetadata, Indexer};
use ed25519_dalek::SigningKey;
use ed25519_dalek::pkcs8::EncodePrivateKey;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde_json::{Value, json};

pub const MAINNET: &str = "NetXdQprcVkpaWU";
pub const GRANADANET: &str = "NetXz969SFaFn8k";

// Ed25519 key pair generated from `[7u8; 32]`, and its implicit account.
pub const PUBLIC_KEY: &str = "edpkvRQaXJ26ZAFi2ZNq5Hb5wXcc3S1Q8kVaXNjxXDfmtWEp9DkpFZ";
pub const KEY_ADDRESS: &str = "tz1Qr9uevaimfiPS6X1otehsKrwvZjX7bsyL";

pub const ADDRESS: &str = "tz1TzrmTBSuiVHV2VfMnGRMYvTEPCP42oSM8";
pub const MANAGER: &str = "KT1VyRPjyNnobNYamZNUDcCU69aCyj7zi8Ff";
pub const DELEGATE_VM: &str = "did:pkh:tz:tz1VSUr8wwNhLAzempoch5d6hLRiTh8Cjcjb#TezosMethod2021";

pub fn signing_key() -> SigningKey {
    SigningKey::from_bytes(&[7u8; 32])
}

/// Sign `payload` as a compact `EdDSA` JWS.
pub fn sign(kid: Option<&str>, payload: &Value, key: &SigningKey) -> String {
    let der = key.to_pkcs8_der().expect("should encode key");
    let mut header = Header::new(Algorithm::EdDSA);
    header.kid = kid.map(ToString::to_string);
    jsonwebtoken::encode(&header, payload, &EncodingKey::from_ed_der(der.as_bytes()))
        .expect("should sign")
}

#[derive(Clone)]
pub struct Contract {
    pub metadata: Option<ContractMetadata>,
    pub views: HashMap<String, Value>,
}

impl Contract {
    pub fn manager(vm_url: &str) -> Self {
        let metadata = serde_json::from_value(json!({
            "name": "Example DID manager",
            "version": "1.0.0",
            "interfaces": ["TZIP-019"],
            "views": ["GetVerificationMethod", "GetService"]
        }))
        .expect("should deserialize");

        Self {
            metadata: Some(metadata),
            views: HashMap::from([
                ("GetVerificationMethod".to_string(), json!(vm_url)),
                (
                    "GetService".to_string(),
                    json!({"type_": "TezosDiscoveryService", "endpoint": "http://example.com"}),
                ),
            ]),
        }
    }
}

#[derive(Clone)]
pub struct Node {
    pub chain_id: String,
    pub contracts: HashMap<String, Contract>,
}

impl Node {
    pub fn new(chain_id: &str) -> Self {
        Self {
            chain_id: chain_id.to_string(),
            contracts: HashMap::new(),
        }
    }

    pub fn with(mut self, address: &str, contract: Contract) -> Self {
        self.contracts.insert(address.to_string(), contract);
        self
    }
}

impl ChainClient for Node {
    async fn chain_id(&self, _: &str) -> Result<String> {
        Ok(self.chain_id.clone())
    }

    async fn contract_storage(&self, _: &str, address: &str) -> Result<Value> {
        let contract =
            self.contracts.get(address).ok_or_else(|| anyhow!("no contract {address}"))?;
        if contract.metadata.is_some() {
            Ok(json!({"metadata": {"": "74657a6f732d73746f726167653a636f6e74656e74"}}))
        } else {
            Ok(json!({"owner": KEY_ADDRESS}))
        }
    }

    async fn contract_metadata(
        &self, _: &str, address: &str,
    ) -> Result<Option<ContractMetadata>> {
        Ok(self.contracts.get(address).and_then(|c| c.metadata.clone()))
    }

    async fn execute_view(&self, _: &str, address: &str, view: &str) -> Result<Value> {
        self.contracts
            .get(address)
            .and_then(|c| c.views.get(view).cloned())
            .ok_or_else(|| anyhow!("no view {view} on {address}"))
    }
}

#[derive(Clone, Default)]
pub struct Tzkt {
    pub contracts: HashMap<String, Vec<AccountContract>>,
    pub offline: bool,
}

impl Tzkt {
    pub fn with(mut self, account: &str, contract: &str) -> Self {
        self.contracts.entry(account.to_string()).or_default().push(AccountContract {
            address: contract.to_string(),
            kind: "smart_contract".to_string(),
            created_at: None,
        });
        self
    }
}

impl Indexer for Tzkt {
    async fn contracts(&self, _: &str, address: &str) -> Result<Vec<AccountContract>> {
        if self.offline {
            return Err(anyhow!("connection refused"));
        }
        Ok(self.contracts.get(address).cloned().unwrap_or_default())
    }

    async fn activity(&self, _: &str, _: &str) -> Result<ContractActivity> {
        Ok(ContractActivity {
            first_seen: Some(Utc.with_ymd_and_hms(2021, 8, 2, 9, 14, 3).unwrap()),
            last_seen: Some(Utc.with_ymd_and_hms(2021, 10, 11, 17, 2, 45).unwrap()),
        })
    }
}
