#[cfg(feature = "multi-thread")]
use whereami::config::ConfigThreads;
use whereami::config::{load_config, Config};
use whereami::service::{log_response, WhereamiService};

use hyper::server::conn::AddrStream;
use hyper::service::{make_service_fn, service_fn};
use hyper::{Body, Request, Server};
use std::convert::Infallible;
use std::sync::Arc;

async fn async_main(config: Config) -> anyhow::Result<()> {
    let host = config.socket_addr();

    simple_logger::init_with_level(config.log_level)?;

    let whereami_service = Arc::new(WhereamiService::from_config(config)?);

    let make_service = make_service_fn(move |connection: &AddrStream| {
        let socket_remote_addr = connection.remote_addr();
        let whereami_service = whereami_service.clone();
        let service = service_fn(move |request: Request<Body>| {
            let whereami_service = whereami_service.clone();
            async move {
                let response = whereami_service
                    .response(Some(socket_remote_addr), &request)
                    .await
                    .unwrap_or_else(|error| whereami_service.make_error_response(error));
                log_response(Some(socket_remote_addr), &request, &response);
                Ok::<_, Infallible>(response)
            }
        });
        async move { Ok::<_, Infallible>(service) }
    });

    let server = Server::try_bind(&host)?.serve(make_service);
    log::info!("Listening on {}", server.local_addr());

    if let Err(e) = server.await {
        log::error!("server error: {}", e);
    }
    Err(anyhow::anyhow!("server exited"))
}

fn main() -> anyhow::Result<()> {
    let config = load_config(std::env::args().nth(1))?;

    #[cfg(feature = "multi-thread")]
    let mut runtime_builder = match config.threads {
        ConfigThreads::Custom(threads) => match threads.get() {
            1 => tokio::runtime::Builder::new_current_thread(),
            threads => {
                let mut builder = tokio::runtime::Builder::new_multi_thread();
                builder.worker_threads(threads);
                builder
            }
        },
        ConfigThreads::Cores => tokio::runtime::Builder::new_multi_thread(),
    };
    #[cfg(not(feature = "multi-thread"))]
    let mut runtime_builder = tokio::runtime::Builder::new_current_thread();
    let runtime = runtime_builder.enable_all().build()?;

    runtime.block_on(async_main(config))
}
