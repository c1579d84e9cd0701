//! Listener startup and shutdown tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

mod common;

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{routing::get, Router};

use bytes::Bytes;
use http_body_util::{BodyExt, Empty};
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use tokio::sync::{oneshot, Notify};

use statsbridge_core::ErrorKind;
use statsbridge_exporter::config::BridgeConfig;
use statsbridge_exporter::lifecycle::{self, Listeners};

fn local_config() -> BridgeConfig {
    let mut cfg = BridgeConfig::default();
    cfg.target.listen = "127.0.0.1:0".into();
    cfg.exporter.listen = "127.0.0.1:0".into();
    cfg.exporter.fetch_timeout_ms = 1000;
    cfg.shutdown.drain_timeout_ms = 1000;
    cfg
}

async fn http_get(url: String) -> (u16, String) {
    let client = Client::builder(TokioExecutor::new()).build_http::<Empty<Bytes>>();
    let resp = client.get(url.parse().unwrap()).await.unwrap();
    let status = resp.status().as_u16();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn occupied_port_fails_with_listener_bind() {
    let taken = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let mut cfg = local_config();
    cfg.target.listen = taken.local_addr().unwrap().to_string();

    let err = lifecycle::run(cfg, std::future::pending::<()>())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ListenerBind);
}

#[tokio::test]
async fn invalid_config_is_rejected_before_binding() {
    let mut cfg = local_config();
    cfg.exporter.target_url = "ftp://example".into();
    let err = lifecycle::run(cfg, async {}).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);
}

#[tokio::test]
async fn shutdown_returns_within_drain_bound() {
    let res = tokio::time::timeout(
        Duration::from_secs(5),
        lifecycle::run(local_config(), tokio::time::sleep(Duration::from_millis(50))),
    )
    .await
    .expect("run must return after shutdown");
    res.unwrap();
}

#[tokio::test]
async fn end_to_end_scrape() {
    let mut cfg = local_config();
    let target = lifecycle::bind(cfg.target.listen_addr().unwrap()).await.unwrap();
    let exporter = lifecycle::bind(cfg.exporter.listen_addr().unwrap()).await.unwrap();
    let target_addr = target.local_addr().unwrap();
    let exporter_addr = exporter.local_addr().unwrap();
    cfg.exporter.target_url = format!("http://{target_addr}");

    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let server = tokio::spawn(lifecycle::serve(
        cfg,
        Listeners { target, exporter },
        async move {
            let _ = stop_rx.await;
        },
    ));

    assert_eq!(http_get(format!("http://{target_addr}/test200")).await.0, 200);
    assert_eq!(http_get(format!("http://{target_addr}/test200")).await.0, 200);
    assert_eq!(http_get(format!("http://{target_addr}/test500")).await.0, 500);

    let (status, body) = http_get(format!("http://{target_addr}/stats")).await;
    assert_eq!(status, 200);
    assert_eq!(body, r#"{"http200Requestcounter":2,"http500Requestcounter":1}"#);

    let (status, body) = http_get(format!("http://{exporter_addr}/metrics")).await;
    assert_eq!(status, 200);
    assert!(body.contains("httpserver_up 1\n"), "{body}");
    assert!(body.contains("http_request_200counter{counter=\"twohundred\"} 2\n"), "{body}");
    assert!(body.contains("http_request_500counter{counter=\"fivehundred\"} 1\n"), "{body}");

    stop_tx.send(()).unwrap();
    tokio::time::timeout(Duration::from_secs(5), server)
        .await
        .expect("server must stop")
        .unwrap()
        .unwrap();
}

#[tokio::test]
async fn drain_deadline_aborts_hung_scrape() {
    let reached = Arc::new(Notify::new());
    let r = Arc::clone(&reached);
    let stub = Router::new().route(
        "/stats",
        get(move || {
            let r = Arc::clone(&r);
            async move {
                r.notify_one();
                tokio::time::sleep(Duration::from_secs(60)).await;
                "{}"
            }
        }),
    );
    let stub_addr = common::spawn_stub(stub).await;

    let mut cfg = local_config();
    cfg.exporter.target_url = format!("http://{stub_addr}");
    cfg.exporter.fetch_timeout_ms = 60000;
    cfg.shutdown.drain_timeout_ms = 300;

    let listeners = Listeners::bind(&cfg).await.unwrap();
    let exporter_addr = listeners.exporter.local_addr().unwrap();

    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let server = tokio::spawn(lifecycle::serve(cfg, listeners, async move {
        let _ = stop_rx.await;
    }));

    // The scrape never completes; its connection is torn down by the abort.
    tokio::spawn(async move {
        let client = Client::builder(TokioExecutor::new()).build_http::<Empty<Bytes>>();
        let uri = format!("http://{exporter_addr}/metrics").parse().unwrap();
        let _ = client.get(uri).await;
    });

    tokio::time::timeout(Duration::from_secs(5), reached.notified())
        .await
        .expect("scrape must reach the target");

    let started = Instant::now();
    stop_tx.send(()).unwrap();
    tokio::time::timeout(Duration::from_secs(5), server)
        .await
        .expect("serve must return after the drain deadline")
        .unwrap()
        .unwrap();

    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_millis(250), "returned early: {elapsed:?}");
    assert!(elapsed < Duration::from_secs(3), "drain not bounded: {elapsed:?}");
}
