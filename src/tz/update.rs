//! Signed off-chain updates.
//!
//! A holder of a key already listed in the document's `authentication`
//! relationship may propose changes as a compact JWS whose payload carries a
//! JSON Patch:
//!
//! ```json
//! {"ietf-json-patch": [{"op": "add", "path": "/service", "value": [...]}]}
//! ```
//!
//! The signature is verified with the public key supplied in the resolution
//! options before the `kid` is matched against the document.
//!
//! The supplied public key is not bound to the account it authorizes for:
//! nothing checks that its hash matches the DID's address or the
//! `blockchainAccountId` of the referenced method. Any holder of a valid
//! Ed25519 key can therefore sign for a `kid` listed in `authentication`,
//! except an embedded method whose `publicKeyBase58` differs from the
//! supplied key. Callers must not treat a patched document as stronger
//! evidence of control than the key they passed in.

use crate::core::Kind;
use crate::document::Document;
use crate::error::Error;
use crate::resolution::Resolved;
use crate::tz::address::decode_public_key;
use crate::{jws, patch};

/// Payload member holding the patch operations.
pub const PATCH_MEMBER: &str = "ietf-json-patch";

/// Verify `signed_patch` and apply it to the document.
///
/// Nothing happens when there is no document, the document has no
/// `authentication` relationship, or no patch was supplied. The document is
/// only replaced when every operation applies.
///
/// # Errors
///
/// Returns an error when the public key is missing or invalid, the
/// signature does not verify, the signer is not authorized, or the patch
/// cannot be applied.
pub fn apply(
    resolved: &mut Resolved, public_key: Option<&str>, signed_patch: Option<&str>,
) -> Result<(), Error> {
    let Some(document) = resolved.document.as_ref() else {
        return Ok(());
    };
    if document.authentication.is_none() {
        return Ok(());
    }
    let Some(signed_patch) = signed_patch else {
        return Ok(());
    };
    let Some(public_key) = public_key else {
        return Err(Error::MissingPublicKey);
    };

    let key = decode_public_key(public_key)?;
    let verified = jws::decode_verify(signed_patch, &key)?;
    tracing::debug!("patch signature verified");

    let Some(kid) = verified.header.kid else {
        return Err(Error::MissingKeyId);
    };
    match document.authentication(&kid) {
        None => {
            return Err(Error::NotAuthorized(format!("{kid} is not an authentication method")));
        }
        Some(Kind::Object(vm))
            if vm.public_key_base58.as_deref().is_some_and(|pk| pk != public_key) =>
        {
            return Err(Error::NotAuthorized(format!("{kid} does not match the public key")));
        }
        Some(_) => {}
    }
    tracing::debug!("patch authorized by {kid}");

    let Some(operations) = verified.claims.get(PATCH_MEMBER) else {
        return Err(Error::InvalidPatch(format!("missing '{PATCH_MEMBER}' payload property")));
    };
    if !operations.is_array() {
        return Err(Error::InvalidPatch(format!(
            "payload property '{PATCH_MEMBER}' must be an array"
        )));
    }
    let operations = patch::operations(operations)?;

    let current = serde_json::to_value(document)
        .map_err(|e| Error::InvalidPatch(format!("issue serializing document: {e}")))?;
    let patched = patch::apply(&current, &operations)?;
    let patched: Document = serde_json::from_value(patched).map_err(|e| {
        Error::InvalidPatch(format!("patched document is not a DID document: {e}"))
    })?;

    tracing::debug!("applied {} patch operations", operations.0.len());
    resolved.document = Some(patched);
    Ok(())
}
