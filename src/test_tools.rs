use crate::uri_tools::EndpointTemplate;

use hyper::server::conn::AddrStream;
use hyper::service::{make_service_fn, service_fn};
use hyper::{Body, Request, Response, Server, StatusCode};
use std::convert::Infallible;
use std::net::{SocketAddr, TcpListener};
use std::sync::{Arc, Mutex};

/// Local HTTP server answering every request with the same canned response.
pub struct ProviderStub {
    addr: SocketAddr,
    paths: Arc<Mutex<Vec<String>>>,
}

impl ProviderStub {
    pub const PARIS: &'static str = r#"{"status":"success","country":"France","countryCode":"FR","region":"IDF","regionName":"Île-de-France","city":"Paris","zip":"75001","lat":48.8566,"lon":2.3522,"timezone":"Europe/Paris","isp":"ExampleISP","org":"Example Org","as":"AS64496 Example Networks","query":"203.0.113.5"}"#;
    pub const FAIL: &'static str = r#"{"status":"fail"}"#;

    pub async fn start(status: StatusCode, body: &'static str) -> Self {
        let paths = Arc::new(Mutex::new(Vec::new()));
        let make_service = {
            let paths = paths.clone();
            make_service_fn(move |_: &AddrStream| {
                let paths = paths.clone();
                let service = service_fn(move |request: Request<Body>| {
                    paths.lock().unwrap().push(request.uri().path().to_owned());
                    async move {
                        Ok::<_, Infallible>(
                            Response::builder()
                                .status(status)
                                .header("Content-Type", "application/json")
                                .body(Body::from(body))
                                .unwrap(),
                        )
                    }
                });
                async move { Ok::<_, Infallible>(service) }
            })
        };
        let server = Server::bind(&([127, 0, 0, 1], 0).into()).serve(make_service);
        let addr = server.local_addr();
        tokio::spawn(server);
        Self { addr, paths }
    }

    pub fn endpoint(&self) -> EndpointTemplate {
        EndpointTemplate::new(format!("http://{}/json/{{ip}}", self.addr)).unwrap()
    }

    pub fn requested_paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }
}

/// Endpoint on a port nobody listens to.
pub fn closed_port_endpoint() -> EndpointTemplate {
    let port = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    EndpointTemplate::new(format!("http://127.0.0.1:{port}/json/{{ip}}")).unwrap()
}
