use crate::config::Config;
use crate::geo::IpApiClient;
use crate::resolver::{IpResolver, ResolveError};
use crate::summary::Summary;

use hyper::header::{HeaderMap, HeaderName, HeaderValue, InvalidHeaderName, CONTENT_TYPE};
use hyper::{Body, Request, Response, StatusCode};
use std::net::SocketAddr;
use thiserror::Error;

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ServiceError {
    #[error("No valid ip")]
    NoValidIp(#[from] ResolveError),
}

impl ServiceError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::NoValidIp(_) => StatusCode::BAD_REQUEST,
        }
    }
}

pub struct WhereamiService {
    resolver: IpResolver,
    geo: IpApiClient,
    attribution: String,
    response_headers: HeaderMap,
}

impl WhereamiService {
    pub fn from_config(config: Config) -> Result<Self, InvalidConfigError> {
        let Config {
            real_ip_header,
            forwarded_for_header,
            provider,
            attribution,
            response_headers,
            ..
        } = config;

        let resolver = IpResolver::new(
            header_name(&real_ip_header)?,
            header_name(&forwarded_for_header)?,
        );

        Ok(Self {
            resolver,
            geo: IpApiClient::new(provider),
            attribution,
            response_headers,
        })
    }
}

fn header_name(name: &str) -> Result<HeaderName, InvalidConfigError> {
    name.parse().map_err(|error| InvalidConfigError::HeaderName {
        name: name.to_owned(),
        error,
    })
}

impl WhereamiService {
    /// Answers a single request, `peer` is the remote end of the connection.
    ///
    /// Provider failures are logged and produce a reply without location.
    pub async fn response(
        &self,
        peer: Option<SocketAddr>,
        request: &Request<Body>,
    ) -> Result<Response<Body>, ServiceError> {
        let client_ip = self.resolver.resolve(request.headers(), peer)?;
        let record = match self.geo.lookup(client_ip).await {
            Ok(record) => {
                if !record.is_success() {
                    log::debug!(
                        r#"{} could not locate {}: "{}""#,
                        self.geo.endpoint().as_str(),
                        client_ip,
                        record.message,
                    );
                }
                Some(record)
            }
            Err(err) => {
                log::warn!("Geolocation lookup for {client_ip} failed: {err}");
                None
            }
        };
        let summary = Summary::new(client_ip, record.as_ref(), &self.attribution);
        Ok(self.text_response(StatusCode::OK, summary.to_string()))
    }

    pub fn make_error_response(&self, error: ServiceError) -> Response<Body> {
        self.text_response(error.status(), error.to_string())
    }

    fn text_response(&self, status: StatusCode, body: String) -> Response<Body> {
        let mut response = Response::new(Body::from(body));
        *response.status_mut() = status;
        let headers = response.headers_mut();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(TEXT_PLAIN));
        for (name, value) in &self.response_headers {
            headers.insert(name, value.clone());
        }
        response
    }
}

pub fn log_response(peer: Option<SocketAddr>, request: &Request<Body>, response: &Response<Body>) {
    log::info!(
        "{} {} {} {}",
        peer.map_or_else(|| "-".to_owned(), |peer| peer.ip().to_string()),
        request.method(),
        request.uri(),
        response.status(),
    );
}

#[derive(Debug, Error)]
pub enum InvalidConfigError {
    #[error(r#"header name "{name}" is invalid: {error}"#)]
    HeaderName {
        name: String,
        error: InvalidHeaderName,
    },
}
