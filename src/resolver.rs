use crate::header_tools::{first_listed_ip, single_ip};

use hyper::header::{HeaderMap, HeaderName};
use std::net::{IpAddr, SocketAddr};
use thiserror::Error;

pub const DEFAULT_REAL_IP_HEADER: &str = "X-Real-IP";
pub const DEFAULT_FORWARDED_FOR_HEADER: &str = "X-Forwarded-For";

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveError {
    #[error("No valid IP address found in headers or peer address")]
    NoValidIp,
}

/// Finds the client address of a request which may have passed through proxies.
///
/// Candidates are tried in order: the trusted real-IP header, every entry of the
/// forwarded-for header from left to right, and finally the peer of the
/// connection. The first one parsing as an IPv4 or IPv6 address wins.
#[derive(Debug, Clone)]
pub struct IpResolver {
    real_ip_header: HeaderName,
    forwarded_for_header: HeaderName,
}

impl IpResolver {
    pub fn new(real_ip_header: HeaderName, forwarded_for_header: HeaderName) -> Self {
        Self {
            real_ip_header,
            forwarded_for_header,
        }
    }

    /// The peer is `None` when the transport has no socket address to offer.
    ///
    /// IPv4-mapped IPv6 addresses are reported as plain IPv4.
    pub fn resolve(
        &self,
        headers: &HeaderMap,
        peer: Option<SocketAddr>,
    ) -> Result<IpAddr, ResolveError> {
        single_ip(headers, &self.real_ip_header)
            .or_else(|| first_listed_ip(headers, &self.forwarded_for_header))
            .or_else(|| peer.as_ref().map(SocketAddr::ip))
            .map(|ip| ip.to_canonical())
            .ok_or(ResolveError::NoValidIp)
    }
}
