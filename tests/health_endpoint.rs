//! End-to-end tests for the /health endpoint.

use std::time::{Duration, Instant};

use reqwest::StatusCode;

mod common;

#[tokio::test]
async fn test_health_up_via_get() {
    let port = common::start_udp_responder();
    let (addr, shutdown) = common::start_server(common::probe_config(port)).await;
    let client = common::http_client();

    let res = client
        .get(format!("http://{}/health", addr))
        .send()
        .await
        .expect("server unreachable");

    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key("x-request-id"));
    assert_eq!(res.text().await.unwrap(), "UP");

    shutdown.trigger();
}

#[tokio::test]
async fn test_health_up_via_head() {
    let port = common::start_udp_responder();
    let (addr, shutdown) = common::start_server(common::probe_config(port)).await;
    let client = common::http_client();

    for path in ["/health", "/health/head"] {
        let res = client
            .head(format!("http://{}{}", addr, path))
            .send()
            .await
            .expect("server unreachable");
        assert_eq!(res.status(), StatusCode::OK, "HEAD {}", path);
    }

    let res = client
        .get(format!("http://{}/health/get", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    shutdown.trigger();
}

#[tokio::test]
async fn test_health_down_responds_not_found() {
    let (udp, port) = common::silent_udp_listener();
    let (addr, shutdown) = common::start_server(common::probe_config(port)).await;
    let client = common::http_client();

    let res = client
        .get(format!("http://{}/health", addr))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.text().await.unwrap(), "DOWN");

    drop(udp);
    shutdown.trigger();
}

#[tokio::test]
async fn test_closed_port_responds_not_found() {
    let port = {
        let (udp, port) = common::silent_udp_listener();
        drop(udp);
        port
    };
    let (addr, shutdown) = common::start_server(common::probe_config(port)).await;

    let res = common::http_client()
        .head(format!("http://{}/health", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    shutdown.trigger();
}

#[tokio::test]
async fn test_caller_timeout_holds_down_response() {
    let (udp, port) = common::silent_udp_listener();
    let mut config = common::probe_config(port);
    config.probe.caller_timeout_secs = 2;
    let (addr, shutdown) = common::start_server(config).await;

    let start = Instant::now();
    let res = common::http_client()
        .get(format!("http://{}/health", addr))
        .send()
        .await
        .unwrap();
    let elapsed = start.elapsed();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(elapsed >= Duration::from_secs(2), "responded after {:?}", elapsed);

    drop(udp);
    shutdown.trigger();
}

#[tokio::test]
async fn test_caller_client_times_out_first() {
    let (udp, port) = common::silent_udp_listener();
    let mut config = common::probe_config(port);
    config.probe.caller_timeout_secs = 2;
    let (addr, shutdown) = common::start_server(config).await;

    let client = reqwest::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(1))
        .build()
        .unwrap();
    let err = client
        .head(format!("http://{}/health", addr))
        .send()
        .await
        .unwrap_err();
    assert!(err.is_timeout());

    drop(udp);
    shutdown.trigger();
}

#[tokio::test]
async fn test_held_responses_do_not_block_other_checks() {
    let (udp, down_port) = common::silent_udp_listener();
    let mut down_config = common::probe_config(down_port);
    down_config.probe.caller_timeout_secs = 2;
    let (down_addr, down_shutdown) = common::start_server(down_config).await;

    let up_port = common::start_udp_responder();
    let (up_addr, up_shutdown) = common::start_server(common::probe_config(up_port)).await;
    let client = common::http_client();

    let held = tokio::spawn({
        let client = client.clone();
        async move { client.get(format!("http://{}/health", down_addr)).send().await }
    });

    let start = Instant::now();
    let res = client
        .get(format!("http://{}/health", up_addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(start.elapsed() < Duration::from_secs(1));

    let held = held.await.unwrap().unwrap();
    assert_eq!(held.status(), StatusCode::BAD_REQUEST);

    drop(udp);
    down_shutdown.trigger();
    up_shutdown.trigger();
}

#[tokio::test]
async fn test_rate_limit_rejects_excess_requests() {
    let port = common::start_udp_responder();
    let mut config = common::probe_config(port);
    config.rate_limit.enabled = true;
    config.rate_limit.requests_per_second = 1;
    config.rate_limit.burst_size = 2;
    let (addr, shutdown) = common::start_server(config).await;
    let client = common::http_client();

    let mut statuses = Vec::new();
    for _ in 0..3 {
        let res = client
            .get(format!("http://{}/health", addr))
            .send()
            .await
            .unwrap();
        statuses.push(res.status());
    }

    assert_eq!(
        statuses,
        vec![StatusCode::OK, StatusCode::OK, StatusCode::TOO_MANY_REQUESTS]
    );

    shutdown.trigger();
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let port = common::start_udp_responder();
    let (addr, shutdown) = common::start_server(common::probe_config(port)).await;

    let res = common::http_client()
        .get(format!("http://{}/status", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    shutdown.trigger();
}
