//! Baseline document derived from the account address and chain id.

use super::address::Address;
use crate::core::Kind;
use crate::document::VerificationMethod;
use crate::resolution::Resolved;

/// Verification method type of the baseline (and delegated) key.
pub const VERIFICATION_METHOD_TYPE: &str =
    "Ed25519PublicKeyBLAKE2BDigestSize20Base58CheckEncoded2021";

/// Fragment of the baseline verification method id.
pub const ACCOUNT_FRAGMENT: &str = "blockchainAccountId";

/// CAIP-10 account id of `address` on `chain_id`.
#[must_use]
pub fn account_id(chain_id: &str, address: &Address) -> String {
    format!("tezos:{chain_id}:{address}")
}

/// Add the baseline verification method to the document.
///
/// With `public_key`, the key is embedded in `authentication` as a full
/// verification method. Without, the method references the account on
/// chain and `authentication` holds its id.
///
/// Originated accounts are controlled by code and get no baseline method.
pub fn apply(resolved: &mut Resolved, address: &Address, chain_id: &str, public_key: Option<&str>) {
    let Some(document) = resolved.document.as_mut() else {
        return;
    };
    if address.is_originated() {
        tracing::debug!("{address} is originated: no baseline verification method");
        return;
    }

    let did = &document.id;
    let mut vm = VerificationMethod {
        id: format!("{did}#{ACCOUNT_FRAGMENT}"),
        type_: VERIFICATION_METHOD_TYPE.to_string(),
        controller: did.clone(),
        ..VerificationMethod::default()
    };

    let authentication = if let Some(public_key) = public_key {
        vm.public_key_base58 = Some(public_key.to_string());
        Kind::Object(vm.clone())
    } else {
        vm.blockchain_account_id = Some(account_id(chain_id, address));
        Kind::String(vm.id.clone())
    };

    document.assertion_method = Some(vec![Kind::String(vm.id.clone())]);
    document.authentication = Some(vec![authentication]);
    document.verification_method = Some(vec![vm]);
}
