//! Delegation through a DID manager contract.
//!
//! A manager is a smart contract whose TZIP-16 metadata declares the
//! `TZIP-019` interface and the views `GetVerificationMethod` and
//! `GetService`. An originated account is its own manager candidate; an
//! implicit account's candidates are the contracts the indexer associates
//! with it.

use std::str::FromStr;

use anyhow::Context;
use serde::Deserialize;
use serde_json::Value;

use super::address::Address;
use super::baseline::account_id;
use crate::core::Kind;
use crate::document::{Service, VerificationMethod};
use crate::error::Error;
use crate::provider::{ChainClient, ContractMetadata, Indexer};
use crate::resolution::Resolved;
use crate::url::Url;

/// Interface a manager contract must declare.
pub const INTERFACE: &str = "TZIP-019";

/// View returning the DID URL of the delegated verification method.
pub const GET_VERIFICATION_METHOD: &str = "GetVerificationMethod";

/// View returning the discovery service.
pub const GET_SERVICE: &str = "GetService";

/// Fragment of the discovery service id.
pub const SERVICE_FRAGMENT: &str = "discovery";

const SMART_CONTRACT: &str = "smart_contract";

// Resolution metadata members the manager's metadata may not overwrite.
const RESERVED: [&str; 3] = ["contentType", "error", "errorMessage"];

/// Inputs to delegation.
#[derive(Clone, Debug)]
pub struct Delegation<'a> {
    /// Address the DID was derived from.
    pub address: &'a Address,

    /// Chain id the baseline document was built for.
    pub chain_id: &'a str,

    /// Node RPC endpoint.
    pub rpc: &'a str,

    /// Indexer endpoint.
    pub indexer: &'a str,
}

#[derive(Deserialize)]
struct ServiceView {
    #[serde(rename = "type_")]
    type_: String,
    endpoint: Value,
}

struct Manager {
    address: String,
    metadata: ContractMetadata,
    created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Merge the verification method and service of the account's manager
/// contract into the document.
///
/// Finding no manager is not an error.
///
/// # Errors
///
/// Returns [`Error::ChainMismatch`] when the node is not on the expected
/// chain, [`Error::InvalidMetadata`] or [`Error::InvalidDidUrl`] when the
/// manager's metadata or views are unusable, and [`Error::Transport`] when
/// the node or indexer fails.
pub async fn apply(
    chain: &impl ChainClient, indexer: &impl Indexer, resolved: &mut Resolved,
    delegation: &Delegation<'_>,
) -> Result<(), Error> {
    let live = chain.chain_id(delegation.rpc).await.context("fetching chain id")?;
    if live != delegation.chain_id {
        return Err(Error::ChainMismatch {
            expected: delegation.chain_id.to_string(),
            actual: live,
        });
    }

    let Some(document) = resolved.document.as_mut() else {
        return Ok(());
    };
    if delegation.address.is_originated() {
        document.verification_method = Some(vec![]);
    }
    if document.verification_method.is_none() {
        return Ok(());
    }

    let Some(manager) = find_manager(chain, indexer, delegation).await? else {
        tracing::debug!("no manager contract for {}", delegation.address);
        return Ok(());
    };
    tracing::debug!("using manager contract {}", manager.address);

    if let Some(errors) = &manager.metadata.errors {
        return Err(Error::InvalidMetadata(format!(
            "metadata of {} has errors: {errors}",
            manager.address
        )));
    }

    let additional = &mut resolved.metadata.additional;
    additional.insert("interfaces".to_string(), manager.metadata.interfaces.clone().into());
    for (key, value) in &manager.metadata.other {
        if !RESERVED.contains(&key.as_str()) {
            additional.insert(key.clone(), value.clone());
        }
    }

    // delegated verification method
    let vm_url = chain
        .execute_view(delegation.rpc, &manager.address, GET_VERIFICATION_METHOD)
        .await
        .with_context(|| format!("executing {GET_VERIFICATION_METHOD} on {}", manager.address))?;
    let Some(vm_url) = vm_url.as_str() else {
        return Err(Error::InvalidDidUrl(format!("{GET_VERIFICATION_METHOD} returned {vm_url}")));
    };
    let url = Url::from_str(vm_url)?;
    let Some(type_) = url.fragment.clone() else {
        return Err(Error::InvalidDidUrl(format!("{vm_url} has no fragment")));
    };

    let vm = VerificationMethod {
        id: vm_url.to_string(),
        type_,
        controller: url.did(),
        blockchain_account_id: Some(account_id(delegation.chain_id, delegation.address)),
        ..VerificationMethod::default()
    };
    if document.authentication(&vm.id).is_none() {
        document.authentication.get_or_insert_with(Vec::new).push(Kind::String(vm.id.clone()));
    }
    let methods = document.verification_method.get_or_insert_with(Vec::new);
    if !methods.iter().any(|m| m.id == vm.id) {
        methods.push(vm);
    }

    // discovery service
    let service = chain
        .execute_view(delegation.rpc, &manager.address, GET_SERVICE)
        .await
        .with_context(|| format!("executing {GET_SERVICE} on {}", manager.address))?;
    let service = ServiceView::deserialize(&service)
        .map_err(|e| Error::InvalidMetadata(format!("invalid {GET_SERVICE} result: {e}")))?;
    let service_endpoint = match service.endpoint {
        Value::String(s) => Kind::String(s),
        other => Kind::Object(other),
    };
    document.service = Some(vec![Service {
        id: format!("{}#{SERVICE_FRAGMENT}", document.id),
        type_: service.type_,
        service_endpoint,
        ..Service::default()
    }]);

    let activity = indexer
        .activity(delegation.indexer, &manager.address)
        .await
        .with_context(|| format!("fetching activity of {}", manager.address))?;
    resolved.document_metadata.created = activity.first_seen.or(manager.created_at);
    resolved.document_metadata.updated = activity.last_seen;

    Ok(())
}

// First candidate contract that qualifies as a manager.
async fn find_manager(
    chain: &impl ChainClient, indexer: &impl Indexer, delegation: &Delegation<'_>,
) -> Result<Option<Manager>, Error> {
    let candidates = if delegation.address.is_originated() {
        vec![(delegation.address.to_string(), None)]
    } else {
        indexer
            .contracts(delegation.indexer, delegation.address.as_str())
            .await
            .with_context(|| format!("listing contracts of {}", delegation.address))?
            .into_iter()
            .filter(|c| c.kind == SMART_CONTRACT)
            .map(|c| (c.address, c.created_at))
            .collect()
    };

    for (address, created_at) in candidates {
        if let Some(metadata) = qualify(chain, delegation.rpc, &address).await? {
            return Ok(Some(Manager {
                address,
                metadata,
                created_at,
            }));
        }
    }
    Ok(None)
}

// The contract's metadata, if the contract implements the manager
// interface.
async fn qualify(
    chain: &impl ChainClient, rpc: &str, address: &str,
) -> Result<Option<ContractMetadata>, Error> {
    let storage = chain
        .contract_storage(rpc, address)
        .await
        .with_context(|| format!("fetching storage of {address}"))?;
    if storage.get("metadata").is_none() {
        return Ok(None);
    }

    let Some(metadata) = chain
        .contract_metadata(rpc, address)
        .await
        .with_context(|| format!("fetching metadata of {address}"))?
    else {
        return Ok(None);
    };

    let qualifies = metadata.implements(INTERFACE)
        && metadata.has_view(GET_VERIFICATION_METHOD)
        && metadata.has_view(GET_SERVICE);
    Ok(qualifies.then_some(metadata))
}
