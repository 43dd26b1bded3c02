//! Parsing of the `did:tz` method-specific identifier:
//! `<address>` or `<network>:<address>`.

use std::str::FromStr;

use super::address::Address;
use crate::config::Config;
use crate::error::Error;

/// A validated method-specific identifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identifier {
    /// Network name, `custom`, or the configured default network.
    pub network: String,

    /// Account address.
    pub address: Address,
}

/// Validate the method-specific identifier `id` against the networks in
/// `config`.
///
/// # Errors
///
/// Returns [`Error::InvalidDid`] if the identifier has more than two
/// segments, an invalid address, or a network that is not allowed.
pub fn validate(id: &str, config: &Config) -> Result<Identifier, Error> {
    let segments = id.split(':').collect::<Vec<_>>();
    let (network, address) = match segments.as_slice() {
        [address] => (config.default_network.as_str(), *address),
        [network, address] => (*network, *address),
        _ => return Err(Error::InvalidDid(format!("invalid identifier: {id}"))),
    };

    let address = Address::from_str(address)?;
    if !config.is_allowed(network) {
        return Err(Error::InvalidDid(format!("unsupported network: {network}")));
    }

    Ok(Identifier {
        network: network.to_string(),
        address,
    })
}
