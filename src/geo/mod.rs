pub use error::GeoError;
pub use ip_api::IpApiClient;
pub use record::{GeoRecord, LookupStatus};

mod error;
mod ip_api;
mod record;
