//! Destructure DID URLs into strongly typed components.
//!
//! A DID URL is of the form
//!
//! `did:<method>:<method-specific-id>[/<path>][?<query>][#<fragment>]`.

use std::fmt::Display;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::Error;

static DID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("^did:(?<method>[a-z0-9]+):(?<id>[A-Za-z0-9._:%-]*[A-Za-z0-9._%-])$")
        .expect("should compile")
});

/// Structure of a DID URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Url {
    /// DID method name.
    pub method: String,

    /// Method-specific ID.
    ///
    /// This may include any information that is needed by a DID method to
    /// address a specific DID document.
    pub id: String,

    /// Path.
    ///
    /// If present, a DID path is identical to a generic URI path.
    pub path: Option<Vec<String>>,

    /// Query.
    ///
    /// Kept verbatim; `did:tz` does not interpret DID parameters.
    pub query: Option<String>,

    /// Fragment.
    ///
    /// If present, the fragment is a string that corresponds to a specific
    /// resource identifier within a DID document. Typically a service or a
    /// verification method.
    pub fragment: Option<String>,
}

impl Display for Url {
    /// Format the URL as a specification-compliant string.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "did:{}:{}", self.method, self.id)?;
        if let Some(path) = &self.path {
            write!(f, "/{}", path.join("/"))?;
        }
        if let Some(query) = &self.query {
            write!(f, "?{query}")?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{fragment}")?;
        }
        Ok(())
    }
}

impl FromStr for Url {
    type Err = Error;

    /// Parse a string if possible into a strongly typed DID URL struct.
    ///
    /// Expecting a format:
    /// `did:<method>:<method-specific-id>[/<path>][?<query>][#<fragment>]`.
    ///
    /// # Errors:
    /// If the string is not a valid DID URL an error is returned.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let url = url::Url::parse(s)
            .map_err(|e| Error::InvalidDidUrl(format!("issue parsing URL {s}: {e}")))?;
        if url.scheme() != "did" {
            return Err(Error::InvalidDidUrl(format!("{s} does not start with 'did'")));
        }

        let (did_path, path) = match url.path().split_once('/') {
            Some((did_path, path)) => {
                let segments =
                    path.split('/').map(ToString::to_string).collect::<Vec<_>>();
                (did_path, Some(segments).filter(|p| !p.iter().all(String::is_empty)))
            }
            None => (url.path(), None),
        };

        let did = format!("did:{did_path}");
        let Some(caps) = DID_REGEX.captures(&did) else {
            return Err(Error::InvalidDidUrl(format!("{did} is not a valid DID")));
        };

        Ok(Self {
            method: caps["method"].to_string(),
            id: caps["id"].to_string(),
            path,
            query: url.query().map(ToString::to_string),
            fragment: url.fragment().filter(|f| !f.is_empty()).map(ToString::to_string),
        })
    }
}

impl Url {
    /// Get the DID part of the URL.
    ///
    /// This is in the form of `did:<method>:<method-specific-id>`.
    #[must_use]
    pub fn did(&self) -> String {
        format!("did:{}:{}", self.method, self.id)
    }

    /// Get the internal resource identifier from the DID URL.
    ///
    /// This is in the form of `did:<method>:<method-specific-id>#<fragment>`
    /// and is used to dereference a service or verification method that is
    /// internal to the DID document.
    #[must_use]
    pub fn resource_id(&self) -> String {
        let mut id = self.did();
        if let Some(fragment) = &self.fragment {
            id.push('#');
            id.push_str(fragment);
        }
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_url() {
        let url = Url::from_str("did:pkh:tz:tz1TzrmTBSuiVHV2VfMnGRMYvTEPCP42oSM8#TezosMethod2021")
            .expect("should parse");
        assert_eq!(url.method, "pkh");
        assert_eq!(url.id, "tz:tz1TzrmTBSuiVHV2VfMnGRMYvTEPCP42oSM8");
        assert_eq!(url.path, None);
        assert_eq!(url.query, None);
        assert_eq!(url.fragment.as_deref(), Some("TezosMethod2021"));
        assert_eq!(url.did(), "did:pkh:tz:tz1TzrmTBSuiVHV2VfMnGRMYvTEPCP42oSM8");
        assert_eq!(
            url.to_string(),
            "did:pkh:tz:tz1TzrmTBSuiVHV2VfMnGRMYvTEPCP42oSM8#TezosMethod2021"
        );
    }

    #[test]
    fn url_with_the_works() {
        let url =
            Url::from_str("did:example:123456789abcdefghi/path/to/resource?service=agent#key-1")
                .expect("should parse");
        assert_eq!(url.method, "example");
        assert_eq!(url.id, "123456789abcdefghi");
        assert_eq!(
            url.path,
            Some(vec!["path".to_string(), "to".to_string(), "resource".to_string()])
        );
        assert_eq!(url.query.as_deref(), Some("service=agent"));
        assert_eq!(url.resource_id(), "did:example:123456789abcdefghi#key-1");
        assert_eq!(
            url.to_string(),
            "did:example:123456789abcdefghi/path/to/resource?service=agent#key-1"
        );
    }

    #[test]
    fn no_fragment() {
        let url =
            Url::from_str("did:tz:KT1VyRPjyNnobNYamZNUDcCU69aCyj7zi8Ff").expect("should parse");
        assert_eq!(url.fragment, None);
        assert_eq!(url.resource_id(), url.did());
    }

    #[test]
    fn invalid_urls() {
        for s in [
            "",
            "tz1TzrmTBSuiVHV2VfMnGRMYvTEPCP42oSM8",
            "https://example.com#key",
            "did:tz",
            "did:TZ:abc",
            "did:tz:",
        ] {
            assert!(Url::from_str(s).is_err(), "{s} should not parse");
        }
    }
}
