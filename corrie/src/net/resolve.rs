use crate::error::{Error, Result};
use crate::offload::execute;

use std::net::{IpAddr, ToSocketAddrs};

/// Resolves `host`/`service` into an address, offloading the blocking
/// lookup onto a throwaway OS thread.
///
/// `service` may be a numeric port or a service name recognized by the
/// platform's resolver, exactly as accepted by
/// `(host, service).to_socket_addrs()`.
pub async fn resolve(host: &str, service: &str) -> Result<IpAddr> {
    let owned_host = host.to_owned();
    let owned_service = service.to_owned();

    let lookup = execute(move || (owned_host.as_str(), owned_service.as_str()).to_socket_addrs());

    let addrs = lookup
        .await
        .map_err(|err| Error::ResolveFailed(err.to_string()))?;

    addrs
        .map(|addr| addr.ip())
        .next()
        .ok_or_else(|| Error::ResolveFailed(format!("no addresses found for {host}")))
}
