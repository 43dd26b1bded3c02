//! # Method Registry
//!
//! Dispatches resolution requests to DID method resolvers by method name.
//! A [`Registry`] is built once at start-up and shared by reference with
//! whatever entry point resolves DIDs.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Error;
use crate::resolution::{Options, Resolved};
use crate::url::Url;

/// A resolver for one DID method.
#[async_trait]
pub trait DidMethod: Send + Sync {
    /// Method name, e.g. `tz`.
    fn name(&self) -> &str;

    /// Resolve the DID. Failures are reported in the result's metadata.
    async fn resolve(&self, did: &Url, options: &Options) -> Resolved;
}

/// Method name to resolver mapping.
#[derive(Clone, Default)]
pub struct Registry {
    methods: HashMap<String, Arc<dyn DidMethod>>,
}

impl Registry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `method`, replacing any resolver with the same name.
    pub fn register(&mut self, method: impl DidMethod + 'static) {
        self.methods.insert(method.name().to_string(), Arc::new(method));
    }

    /// Builder form of [`Registry::register`].
    #[must_use]
    pub fn with(mut self, method: impl DidMethod + 'static) -> Self {
        self.register(method);
        self
    }

    /// Names of the registered methods.
    pub fn methods(&self) -> impl Iterator<Item = &str> {
        self.methods.keys().map(String::as_str)
    }

    /// Resolve `did` with the resolver registered for its method.
    pub async fn resolve(&self, did: &str, options: &Options) -> Resolved {
        let url = match parse_did(did) {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!("rejecting {did}: {e}");
                return Resolved::from_error(&e);
            }
        };
        let Some(method) = self.methods.get(&url.method) else {
            let err = Error::MethodNotSupported(format!("method not supported: {}", url.method));
            return Resolved::from_error(&err);
        };
        method.resolve(&url, options).await
    }
}

// A DID to resolve has no path, query or fragment.
fn parse_did(did: &str) -> Result<Url, Error> {
    let url = Url::from_str(did).map_err(|e| Error::InvalidDid(e.message()))?;
    if url.path.is_some() || url.query.is_some() || url.fragment.is_some() {
        return Err(Error::InvalidDid(format!("{did} is a DID URL, not a DID")));
    }
    Ok(url)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::document::Document;

    struct Echo;

    #[async_trait]
    impl DidMethod for Echo {
        fn name(&self) -> &str {
            "echo"
        }

        async fn resolve(&self, did: &Url, _: &Options) -> Resolved {
            let mut resolved = Resolved::new();
            resolved.document = Some(Document::new(did.did()));
            resolved
        }
    }

    #[tokio::test]
    async fn dispatch() {
        let registry = Registry::new().with(Echo);
        assert_eq!(registry.methods().collect::<Vec<_>>(), vec!["echo"]);

        let resolved = registry.resolve("did:echo:abc", &Options::default()).await;
        assert!(resolved.metadata.error.is_none());
        assert_eq!(resolved.document.map(|d| d.id), Some("did:echo:abc".to_string()));
    }

    #[tokio::test]
    async fn unsupported_method() {
        let registry = Registry::new().with(Echo);
        let resolved = registry.resolve("did:web:example.com", &Options::default()).await;

        assert_eq!(resolved.metadata.error.as_deref(), Some("unsupportedDidMethod"));
        assert!(resolved.document.is_none());
    }

    #[tokio::test]
    async fn malformed_did() {
        let registry = Registry::new().with(Echo);

        for did in ["echo:abc", "did:echo", "did:echo:abc#key-1"] {
            let resolved = registry.resolve(did, &Options::default()).await;
            assert_eq!(resolved.metadata.error.as_deref(), Some("invalidDid"), "{did}");
        }
    }
}
