//! # JSON Patch
//!
//! The subset of [RFC 6902](https://www.rfc-editor.org/rfc/rfc6902) used to
//! update DID documents: `add` and `replace`.
//!
//! A patch is applied as a whole. Operations run in order against a copy of
//! the target and the copy is only returned once every operation succeeded.

use json_patch::{Patch, PatchOperation};
use serde::Deserialize;
use serde_json::Value;

use crate::error::Error;

/// Deserialize a list of operations, accepting only `add` and `replace`.
///
/// # Errors
///
/// Returns [`Error::InvalidPatch`] when an entry is not a patch operation or
/// is an operation other than `add` or `replace`.
pub fn operations(value: &Value) -> Result<Patch, Error> {
    let patch = Patch::deserialize(value)
        .map_err(|e| Error::InvalidPatch(format!("invalid patch operation: {e}")))?;

    let unsupported = patch
        .0
        .iter()
        .position(|op| !matches!(op, PatchOperation::Add(_) | PatchOperation::Replace(_)));
    if let Some(i) = unsupported {
        return Err(Error::InvalidPatch(format!(
            "operation {i}: only 'add' and 'replace' are supported"
        )));
    }
    Ok(patch)
}

/// Apply `patch` to a copy of `target`.
///
/// # Errors
///
/// Returns [`Error::InvalidPatch`] naming the first operation that cannot be
/// applied. `target` is never modified.
pub fn apply(target: &Value, patch: &Patch) -> Result<Value, Error> {
    let mut doc = target.clone();
    json_patch::patch(&mut doc, &patch.0).map_err(|e| Error::InvalidPatch(e.to_string()))?;
    Ok(doc)
}
