//! Helpers shared by exporter integration tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use std::net::SocketAddr;
use std::time::Duration;

use axum::body::Body;
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use statsbridge_exporter::collector::{Collector, MetricCollector, Sample};
use statsbridge_exporter::fetch::{StatsFetcher, TargetUrl};

/// Serve `app` on an ephemeral local port.
pub async fn spawn_stub(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Answer every connection with `raw` bytes, then close it.
pub async fn spawn_raw(raw: &'static [u8]) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        loop {
            let (mut sock, _) = listener.accept().await.unwrap();
            tokio::spawn(async move {
                let mut buf = [0u8; 4096];
                let _ = sock.read(&mut buf).await;
                let _ = sock.write_all(raw).await;
                let _ = sock.shutdown().await;
            });
        }
    });
    addr
}

/// An address nothing listens on (connection refused).
pub async fn dead_addr() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

pub fn collector_for(addr: SocketAddr, timeout: Duration) -> MetricCollector {
    let target = TargetUrl::parse(&format!("http://{addr}")).unwrap();
    MetricCollector::new(StatsFetcher::new(timeout), target)
}

pub async fn collect_pairs(c: &dyn Collector) -> Vec<(String, f64)> {
    c.collect()
        .await
        .into_iter()
        .map(|Sample { desc, value }| (desc.fq_name().to_string(), value))
        .collect()
}

pub async fn body_string(resp: Response<Body>) -> String {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
