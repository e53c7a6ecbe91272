use crate::geo::{GeoError, GeoRecord};
use crate::uri_tools::EndpointTemplate;

use hyper::client::{Client, HttpConnector};
use hyper::header::ACCEPT;
use hyper::{Body, Request};
#[cfg(feature = "https")]
use hyper_tls::HttpsConnector;
use std::net::IpAddr;

#[cfg(feature = "https")]
type Connector = HttpsConnector<HttpConnector>;
#[cfg(not(feature = "https"))]
type Connector = HttpConnector;

#[cfg(feature = "https")]
fn connector() -> Connector {
    HttpsConnector::new()
}

#[cfg(not(feature = "https"))]
fn connector() -> Connector {
    HttpConnector::new()
}

/// Client of the ip-api.com JSON endpoint, or of anything speaking the same format.
pub struct IpApiClient {
    client: Client<Connector>,
    endpoint: EndpointTemplate,
}

impl IpApiClient {
    pub fn new(endpoint: EndpointTemplate) -> Self {
        let client = Client::builder().build::<_, Body>(connector());
        Self { client, endpoint }
    }

    pub fn endpoint(&self) -> &EndpointTemplate {
        &self.endpoint
    }

    /// Single GET, no retries.
    ///
    /// The provider answers `200 OK` for addresses it cannot locate too, so the
    /// caller has to check [`GeoRecord::is_success`].
    pub async fn lookup(&self, ip: IpAddr) -> Result<GeoRecord, GeoError> {
        let uri = self.endpoint.expand(ip)?;
        let request = Request::get(&uri)
            .header(ACCEPT, "application/json")
            .body(Body::empty())?;
        let response = self.client.request(request).await?;
        if !response.status().is_success() {
            return Err(response.status().into());
        }
        let body = hyper::body::to_bytes(response.into_body()).await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_tools::{closed_port_endpoint, ProviderStub};

    use hyper::StatusCode;

    #[tokio::test]
    async fn lookup_success() {
        let provider = ProviderStub::start(StatusCode::OK, ProviderStub::PARIS).await;
        let client = IpApiClient::new(provider.endpoint());

        let record = client.lookup("203.0.113.5".parse().unwrap()).await.unwrap();
        assert!(record.is_success());
        assert_eq!(record.timezone, "Europe/Paris");
        assert_eq!(provider.requested_paths(), ["/json/203.0.113.5"]);
    }

    #[tokio::test]
    async fn lookup_ipv6_path() {
        let provider = ProviderStub::start(StatusCode::OK, ProviderStub::FAIL).await;
        let client = IpApiClient::new(provider.endpoint());

        let record = client.lookup("2001:db8::1".parse().unwrap()).await.unwrap();
        assert!(!record.is_success());
        assert_eq!(provider.requested_paths(), ["/json/2001:db8::1"]);
    }

    #[tokio::test]
    async fn lookup_non_success_status() {
        let provider = ProviderStub::start(StatusCode::TOO_MANY_REQUESTS, "").await;
        let client = IpApiClient::new(provider.endpoint());

        let error = client.lookup("203.0.113.5".parse().unwrap()).await.unwrap_err();
        assert!(matches!(error, GeoError::NonSuccess(StatusCode::TOO_MANY_REQUESTS)));
    }

    #[tokio::test]
    async fn lookup_malformed_body() {
        let provider = ProviderStub::start(StatusCode::OK, "not json at all").await;
        let client = IpApiClient::new(provider.endpoint());

        let error = client.lookup("203.0.113.5".parse().unwrap()).await.unwrap_err();
        assert!(matches!(error, GeoError::Decode(_)));
    }

    #[tokio::test]
    async fn lookup_unreachable() {
        let client = IpApiClient::new(closed_port_endpoint());

        let error = client.lookup("203.0.113.5".parse().unwrap()).await.unwrap_err();
        assert!(matches!(error, GeoError::Hyper(_)));
    }
}
