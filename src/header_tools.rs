use hyper::header::{HeaderMap, HeaderName};
use std::net::IpAddr;

/// Address from a header carrying exactly one value, like `X-Real-IP`.
///
/// Only the first occurrence of the header is considered.
pub fn single_ip(headers: &HeaderMap, name: &HeaderName) -> Option<IpAddr> {
    headers.get(name)?.to_str().ok()?.trim().parse().ok()
}

/// First valid address of a comma-separated list header, like `X-Forwarded-For`.
///
/// Repeated header lines are scanned in the order they were received, malformed
/// entries are skipped.
pub fn first_listed_ip(headers: &HeaderMap, name: &HeaderName) -> Option<IpAddr> {
    headers
        .get_all(name)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .find_map(|s| s.trim().parse::<IpAddr>().ok())
}
