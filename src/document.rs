//! # DID Document
//!
//! A DID Document is a JSON-LD document that contains information related to a
//! DID.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::Kind;

/// Default JSON-LD context of a DID document.
pub const DID_CONTEXT: &str = "https://www.w3.org/ns/did/v1";

/// DID Document
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// The context of the DID document.
    #[serde(rename = "@context")]
    pub context: Kind<Value>,

    /// The DID for a particular DID subject.
    ///
    /// The subject is defined as the entity identified by the DID and described
    /// by the DID document.
    pub id: String,

    /// If set, MUST be a set of verification methods for the DID subject.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_method: Option<Vec<VerificationMethod>>,

    /// The `authentication` verification relationship is used to specify how
    /// the DID subject is expected to be authenticated, for purposes such
    /// as logging into a website or in any sort of challenge-response
    /// protocol.
    ///
    /// <https://www.w3.org/TR/did-core/#authentication>
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authentication: Option<Vec<Kind<VerificationMethod>>>,

    /// The `assertion_method` verification relationship is used to specify how
    /// the DID subject is expected to express claims, such as for the
    /// purposes of issuing a Verifiable Credential.
    ///
    /// <https://www.w3.org/TR/did-core/#assertion>
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assertion_method: Option<Vec<Kind<VerificationMethod>>>,

    /// A set of services, that express ways of communicating with the DID
    /// subject or related entities.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<Vec<Service>>,

    /// Properties not modelled above. Signed updates may add arbitrary
    /// members to a document, which are kept here.
    #[serde(flatten)]
    pub additional: BTreeMap<String, Value>,
}

impl Document {
    /// Create an empty document for the given DID.
    #[must_use]
    pub fn new(did: impl Into<String>) -> Self {
        Self {
            context: Kind::String(DID_CONTEXT.to_string()),
            id: did.into(),
            ..Self::default()
        }
    }

    /// Retrieves a service by its id.
    #[must_use]
    pub fn service(&self, id: &str) -> Option<&Service> {
        self.service.as_ref()?.iter().find(|s| s.id == id)
    }

    /// Retrieves a verification method by its id.
    #[must_use]
    pub fn verification_method(&self, id: &str) -> Option<&VerificationMethod> {
        self.verification_method.as_ref()?.iter().find(|vm| vm.id == id)
    }

    /// Finds the `authentication` entry identified by `kid`, either an id
    /// reference or an embedded verification method.
    #[must_use]
    pub fn authentication(&self, kid: &str) -> Option<&Kind<VerificationMethod>> {
        self.authentication.as_ref()?.iter().find(|entry| match entry {
            Kind::String(id) => id == kid,
            Kind::Object(vm) => vm.id == kid,
        })
    }
}

/// Services are used to express ways of communicating with the DID subject or
/// associated entities.
///
/// For `did:tz`, the service is the discovery endpoint declared by the DID
/// manager contract.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    /// A URI unique to the service.
    pub id: String,

    /// The service type. SHOULD be registered in the DID Specification
    /// Registries.
    #[serde(rename = "type")]
    pub type_: String,

    /// The endpoint for the service: a URI string or a map.
    #[allow(clippy::struct_field_names)]
    pub service_endpoint: Kind<Value>,

    /// Other service properties, e.g. `description`.
    #[serde(flatten)]
    pub additional: BTreeMap<String, Value>,
}

/// A DID document can express verification methods, such as cryptographic
/// public keys, which can be used to authenticate or authorize interactions
/// with the DID subject or associated parties.
///
/// Tezos verification methods either point at a blockchain account
/// (`blockchainAccountId`, a CAIP-10 account id) or carry the raw public key
/// (`publicKeyBase58`). Exactly one of the two is set.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VerificationMethod {
    /// A DID URL that identifies the verification method.
    pub id: String,

    /// The type of verification method. SHOULD be a registered type in the
    /// [DID Specification Registries](https://www.w3.org/TR/did-spec-registries).
    #[serde(rename = "type")]
    pub type_: String,

    /// The DID of the controller of the verification method.
    pub controller: String,

    /// CAIP-10 account id, `tezos:<chain id>:<address>`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blockchain_account_id: Option<String>,

    /// Base58check-encoded public key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_key_base58: Option<String>,

    /// Other key material or properties, e.g. `publicKeyJwk`.
    #[serde(flatten)]
    pub additional: BTreeMap<String, Value>,
}

/// DID document metadata. This typically does not change unless the DID
/// document changes.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
#[allow(clippy::module_name_repetitions)]
pub struct DocumentMetadata {
    /// Timestamp of the Create operation.
    /// An XMLSCHEMA11-2 (RFC3339) e.g. 2010-01-01T19:23:24Z.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,

    /// Timestamp of the last Update operation. May be the same value as the
    /// `created` property.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,
}
