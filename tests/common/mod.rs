//! Shared utilities for integration tests.

use std::net::{SocketAddr, UdpSocket};
use std::time::Duration;

use tokio::net::TcpListener;
use udp_health::config::AppConfig;
use udp_health::http::HttpServer;
use udp_health::lifecycle::Shutdown;

/// Start a UDP service that answers every datagram with "pong".
/// Returns the port it listens on.
pub fn start_udp_responder() -> u16 {
    let socket = UdpSocket::bind("127.0.0.1:0").unwrap();
    let port = socket.local_addr().unwrap().port();

    std::thread::spawn(move || {
        let mut buf = [0u8; 1024];
        while let Ok((_, peer)) = socket.recv_from(&mut buf) {
            let _ = socket.send_to(b"pong", peer);
        }
    });

    port
}

/// Bind a UDP socket that receives but never replies.
/// Keep the socket alive for as long as the port should look open.
pub fn silent_udp_listener() -> (UdpSocket, u16) {
    let socket = UdpSocket::bind("127.0.0.1:0").unwrap();
    let port = socket.local_addr().unwrap().port();
    (socket, port)
}

/// Config probing `127.0.0.1:port` with a short socket timeout and no rate limit.
pub fn probe_config(port: u16) -> AppConfig {
    let mut config = AppConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.probe.host = "127.0.0.1".into();
    config.probe.port = port;
    config.probe.timeout_ms = 200;
    config.rate_limit.enabled = false;
    config
}

/// Start the HTTP server on an ephemeral port.
pub async fn start_server(config: AppConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(10))
        .build()
        .unwrap()
}
