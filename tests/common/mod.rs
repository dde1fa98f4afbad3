//! Shared utilities for integration tests: programmable mock upstreams and a
//! running server wired to them.

#![allow(dead_code)]

use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use cep_race::config::CepConfig;
use cep_race::{HttpServer, Shutdown};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

pub const VIACEP_SE: &str = r#"{"cep":"01001-000","logradouro":"Praça da Sé","complemento":"lado ímpar","bairro":"Sé","localidade":"São Paulo","uf":"SP","ibge":"3550308","gia":"1004","ddd":"11","siafi":"7107"}"#;
pub const APICEP_SE: &str = r#"{"code":"01001-000","state":"SP","city":"São Paulo","district":"Sé","address":"Praça da Sé - lado ímpar"}"#;
pub const VIACEP_MISSING: &str = r#"{"erro": true}"#;
pub const APICEP_MISSING: &str = r#"{"status":404,"ok":false,"message":"CEP não encontrado","statusText":"not_found"}"#;
pub const APICEP_RATE_LIMITED: &str = r#"{"status":429,"ok":false,"message":"rate limited","statusText":"Too Many Requests"}"#;

/// Start a programmable mock upstream on an ephemeral port.
///
/// `f` receives the request path and returns the status and body to send.
pub async fn start_programmable_backend<F, Fut>(f: F) -> SocketAddr
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        let _ = serve_one(socket, f.as_ref()).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

async fn serve_one<F, Fut>(mut socket: TcpStream, f: &F) -> std::io::Result<()>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = (u16, String)>,
{
    let path = {
        let mut reader = BufReader::new(&mut socket);
        let mut request_line = String::new();
        reader.read_line(&mut request_line).await?;
        loop {
            let mut header = String::new();
            let n = reader.read_line(&mut header).await?;
            if n == 0 || header == "\r\n" {
                break;
            }
        }
        request_line
            .split_whitespace()
            .nth(1)
            .unwrap_or("/")
            .to_string()
    };

    let (status, body) = f(path).await;
    let status_text = match status {
        200 => "200 OK",
        400 => "400 Bad Request",
        404 => "404 Not Found",
        429 => "429 Too Many Requests",
        500 => "500 Internal Server Error",
        503 => "503 Service Unavailable",
        other => return Err(std::io::Error::other(format!("unsupported status {other}"))),
    };

    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status_text,
        body.len(),
        body
    );
    socket.write_all(response.as_bytes()).await?;
    socket.shutdown().await
}

/// Mock upstream that answers every request with `status`/`body` after `delay`,
/// counting the requests it receives.
pub async fn start_mock_backend(
    status: u16,
    body: &'static str,
    delay: Duration,
) -> (SocketAddr, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let addr = start_programmable_backend(move |_path| {
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(delay).await;
            (status, body.to_string())
        }
    })
    .await;
    (addr, hits)
}

/// An address nothing listens on.
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Configuration pointing both providers at local mocks.
pub fn config_for(viacep: SocketAddr, apicep: SocketAddr) -> CepConfig {
    let mut config = CepConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.providers.viacep_url = format!("http://{viacep}");
    config.providers.apicep_url = format!("http://{apicep}");
    config.providers.request_timeout_secs = 5;
    config.providers.use_system_proxy = false;
    config
}

/// Start the server on an ephemeral port. Trigger the returned
/// [`Shutdown`] to stop it.
pub async fn start_server(config: CepConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(config).unwrap();

    let shutdown = Shutdown::new();
    let signalled = shutdown.signalled();
    tokio::spawn(async move {
        let _ = server.run(listener, signalled).await;
    });

    (addr, shutdown)
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
