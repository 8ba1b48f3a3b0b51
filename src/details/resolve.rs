use crate::details::{PingError, PingErrorKind, PingResult};
use std::net::{IpAddr, Ipv4Addr};

/// Resolves a host name or dotted quad to the first IPv4 address found.
pub(crate) fn lookup_host_v4(hostname: &str) -> PingResult<Ipv4Addr> {
    if let Ok(ip) = hostname.parse::<Ipv4Addr>() {
        return Ok(ip);
    }

    let ips: Vec<IpAddr> = dns_lookup::lookup_host(hostname)
        .map_err(|e| PingError::new(PingErrorKind::Resolution, format!("could not resolve {hostname}: {e}")))?;
    ips.into_iter()
        .find_map(|ip| match ip {
            IpAddr::V4(ipv4) => Some(ipv4),
            IpAddr::V6(_) => None,
        })
        .ok_or_else(|| PingError::new(PingErrorKind::Resolution, format!("could not resolve {hostname} to IPv4")))
}
