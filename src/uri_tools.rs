use hyper::http::uri::{InvalidUri, Uri};
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use thiserror::Error;

const IP_PLACEHOLDER: &str = "{ip}";
const IP_API_ENDPOINT: &str = "http://ip-api.com/json/{ip}";

#[derive(Error, Debug)]
pub enum EndpointTemplateError {
    #[error(r#"endpoint template "{0}" has no "{{ip}}" placeholder"#)]
    NoPlaceholder(String),
    #[error(r#"endpoint template "{template}" does not expand to a valid URI: {error}"#)]
    InvalidUri { template: String, error: InvalidUri },
    #[error(r#"endpoint template "{0}" must be an absolute URI with a supported scheme"#)]
    UnsupportedScheme(String),
}

/// Lookup endpoint with an `{ip}` placeholder, e.g. `http://ip-api.com/json/{ip}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct EndpointTemplate(String);

impl EndpointTemplate {
    pub fn new(template: impl Into<String>) -> Result<Self, EndpointTemplateError> {
        let template = template.into();
        if !template.contains(IP_PLACEHOLDER) {
            return Err(EndpointTemplateError::NoPlaceholder(template));
        }
        let endpoint = Self(template);
        let probe = endpoint
            .expand(Ipv4Addr::UNSPECIFIED.into())
            .map_err(|error| EndpointTemplateError::InvalidUri {
                template: endpoint.0.clone(),
                error,
            })?;
        match (probe.scheme_str(), probe.authority()) {
            (Some(scheme), Some(_)) if supported_scheme(scheme) => Ok(endpoint),
            _ => Err(EndpointTemplateError::UnsupportedScheme(endpoint.0)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn expand(&self, ip: IpAddr) -> Result<Uri, InvalidUri> {
        self.0.replace(IP_PLACEHOLDER, &ip.to_string()).parse()
    }
}

impl Default for EndpointTemplate {
    fn default() -> Self {
        Self(IP_API_ENDPOINT.to_owned())
    }
}

impl TryFrom<String> for EndpointTemplate {
    type Error = EndpointTemplateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

fn supported_scheme(scheme: &str) -> bool {
    scheme.eq_ignore_ascii_case("http")
        || (cfg!(feature = "https") && scheme.eq_ignore_ascii_case("https"))
}
