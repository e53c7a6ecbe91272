use crate::geo::GeoRecord;

use std::fmt;
use std::net::IpAddr;

/// Plain-text reply: the address, the location when known, and the attribution.
///
/// ```text
/// 203.0.113.5
/// Paris, France
/// Europe/Paris
/// ExampleISP
///
/// Created by ...
/// ```
pub struct Summary<'a> {
    address: IpAddr,
    location: Option<&'a GeoRecord>,
    attribution: &'a str,
}

impl<'a> Summary<'a> {
    /// Records with a non-success status are ignored.
    pub fn new(address: IpAddr, record: Option<&'a GeoRecord>, attribution: &'a str) -> Self {
        Self {
            address,
            location: record.filter(|record| record.is_success()),
            attribution,
        }
    }
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address)?;
        if let Some(record) = self.location {
            write!(f, "\n{}, {}", record.city, record.country)?;
            write!(f, "\n{}", record.timezone)?;
            write!(f, "\n{}", record.isp)?;
        }
        write!(f, "\n\n{}", self.attribution)
    }
}
