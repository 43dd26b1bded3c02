//! # DID Resolution
//!
//! Data structures returned by DID resolution.
//!
//! See [DID resolution](https://www.w3.org/TR/did-core/#did-resolution) for more.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::document::{Document, DocumentMetadata};
use crate::error::Error;

/// JSON-LD context of a DID resolution result.
pub const RESOLUTION_CONTEXT: &str = "https://w3id.org/did-resolution/v1";

/// Used to pass additional values to the `resolve` method. Any properties used
/// should be registered in the DID Specification Registries.
///
/// ```json
/// {
///    "rpc": "https://mainnet.api.tez.ie",
///    "publicKey": "edpkvRQaXJ26ZAFi2ZNq5Hb5wXcc3S1Q8kVaXNjxXDfmtWEp9DkpFZ"
/// }
/// ```
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Options {
    /// Tezos node RPC endpoint. Overrides the configured endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rpc: Option<String>,

    /// Indexer endpoint. Overrides the configured endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indexer: Option<String>,

    /// Base58check-encoded public key of the implicit account. When set, the
    /// key is embedded in the `authentication` relationship.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,

    /// Compact JWS whose payload is `{"ietf-json-patch": [...]}`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signed_ietf_json_patch: Option<String>,
}

/// Returned by DID resolution.
///
/// The value is built up by each resolution step in turn and handed back to
/// the caller once complete. It is never shared between requests.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Resolved {
    /// The DID resolution context.
    #[serde(rename = "@context")]
    pub context: String,

    /// Resolution metadata.
    #[serde(rename = "didResolutionMetadata")]
    pub metadata: Metadata,

    /// The DID document. `null` when resolution failed before a document
    /// could be derived.
    #[serde(rename = "didDocument")]
    pub document: Option<Document>,

    /// DID document metadata.
    #[serde(rename = "didDocumentMetadata")]
    pub document_metadata: DocumentMetadata,
}

impl Resolved {
    /// An empty result carrying only the resolution context.
    #[must_use]
    pub fn new() -> Self {
        Self {
            context: RESOLUTION_CONTEXT.to_string(),
            ..Self::default()
        }
    }

    /// A result for a failed resolution with no document.
    #[must_use]
    pub fn from_error(err: &Error) -> Self {
        let mut resolved = Self::new();
        resolved.metadata.set_error(err);
        resolved
    }
}

/// DID resolution metadata.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    /// The Media Type of the returned resource.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<ContentType>,

    /// The error code from the resolution process, if applicable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// A human-readable explanation of the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,

    /// Additional information about the resolution process. For `did:tz`
    /// this holds the metadata declared by the DID manager contract.
    #[serde(flatten)]
    pub additional: Map<String, Value>,
}

impl Metadata {
    /// Record an error.
    pub fn set_error(&mut self, err: &Error) {
        self.error = Some(err.code().to_string());
        self.error_message = Some(err.message());
    }
}

/// The Media Type of the returned resource.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub enum ContentType {
    /// JSON-LD representation of a DID document.
    #[default]
    #[serde(rename = "application/did+ld+json")]
    DidLdJson,
}
