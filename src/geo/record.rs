use serde::Deserialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupStatus {
    Success,
    #[default]
    #[serde(other)]
    Fail,
}

/// Geolocation of a single address as reported by ip-api.com.
///
/// Fields missing from the response are left empty, a failed lookup only
/// carries `status`, `message` and `query`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeoRecord {
    #[serde(rename = "as")]
    pub autonomous_system: String,
    pub city: String,
    pub country: String,
    pub country_code: String,
    pub isp: String,
    pub lat: f64,
    pub lon: f64,
    pub org: String,
    pub query: String,
    pub region: String,
    pub region_name: String,
    pub status: LookupStatus,
    pub timezone: String,
    pub zip: String,
    pub message: String,
}

impl GeoRecord {
    pub fn is_success(&self) -> bool {
        self.status == LookupStatus::Success
    }
}
