//! Stats fetch against the synthetic target.
//!
//! One GET per call, bounded by a deadline covering connect, headers and body.
//! The response status is not inspected: a well-formed document is accepted
//! even behind a 500 (legacy targets answer `/stats` that way).

use std::fmt;
use std::time::Duration;

use bytes::Bytes;
use http::{header, Method, Request, Uri};
use http_body_util::{BodyExt, Empty, LengthLimitError, Limited};
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;

use statsbridge_core::error::{BridgeError, Result};
use statsbridge_core::{StatsSnapshot, STATS_PATH};

const USER_AGENT: &str = concat!("statsbridge/", env!("CARGO_PKG_VERSION"));

/// Upper bound on a stats body; larger responses fail as a read error.
pub const MAX_STATS_BODY: usize = 64 * 1024;

/// Validated base URL of the target plus its prebuilt stats URI.
#[derive(Debug, Clone)]
pub struct TargetUrl {
    base: String,
    stats: Uri,
}

impl TargetUrl {
    pub fn parse(s: &str) -> Result<Self> {
        let base = s.trim().trim_end_matches('/').to_string();
        let uri: Uri = base
            .parse()
            .map_err(|e| BridgeError::Config(format!("invalid target url ({s}): {e}")))?;

        if uri.scheme_str() != Some("http") {
            return Err(BridgeError::Config(format!(
                "target url must use the http scheme: {s}"
            )));
        }
        if uri.authority().is_none() {
            return Err(BridgeError::Config(format!("target url has no host: {s}")));
        }

        let stats = format!("{base}{STATS_PATH}")
            .parse()
            .map_err(|e| BridgeError::Config(format!("invalid stats url for {s}: {e}")))?;

        Ok(Self { base, stats })
    }

    pub fn as_str(&self) -> &str {
        &self.base
    }

    pub fn stats_uri(&self) -> &Uri {
        &self.stats
    }
}

impl fmt::Display for TargetUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)
    }
}

/// Shared HTTP client handle plus the per-fetch deadline.
#[derive(Clone)]
pub struct StatsFetcher {
    client: Client<HttpConnector, Empty<Bytes>>,
    timeout: Duration,
}

impl StatsFetcher {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: Client::builder(TokioExecutor::new()).build_http(),
            timeout,
        }
    }

    /// Fetch and parse `<target>/stats`.
    pub async fn fetch(&self, target: &TargetUrl) -> Result<StatsSnapshot> {
        match tokio::time::timeout(self.timeout, self.fetch_once(target)).await {
            Ok(res) => res,
            Err(_) => Err(BridgeError::Timeout(self.timeout)),
        }
    }

    async fn fetch_once(&self, target: &TargetUrl) -> Result<StatsSnapshot> {
        let req = Request::builder()
            .method(Method::GET)
            .uri(target.stats_uri().clone())
            .header(header::USER_AGENT, USER_AGENT)
            .body(Empty::<Bytes>::new())
            .map_err(|e| BridgeError::Network(format!("build request failed: {e}")))?;

        let resp = self
            .client
            .request(req)
            .await
            .map_err(|e| {
                BridgeError::Network(format!("GET {}: {}", target.stats_uri(), describe(&e)))
            })?;

        let status = resp.status();
        let body = Limited::new(resp.into_body(), MAX_STATS_BODY)
            .collect()
            .await
            .map_err(|e| {
                if e.is::<LengthLimitError>() {
                    BridgeError::Read(format!(
                        "stats body from {target} exceeds {MAX_STATS_BODY} bytes"
                    ))
                } else {
                    BridgeError::Read(format!("stats body from {target}: {e}"))
                }
            })?
            .to_bytes();

        tracing::debug!(
            target_url = %target,
            %status,
            body = %String::from_utf8_lossy(&body),
            "stats response"
        );

        StatsSnapshot::from_slice(&body)
    }
}

/// Flatten an error and its sources into one line.
fn describe(e: &(dyn std::error::Error + 'static)) -> String {
    let mut out = e.to_string();
    let mut src = e.source();
    while let Some(s) = src {
        out.push_str(": ");
        out.push_str(&s.to_string());
        src = s.source();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_url_builds_stats_uri() {
        let t = TargetUrl::parse("http://localhost:8080/").unwrap();
        assert_eq!(t.as_str(), "http://localhost:8080");
        assert_eq!(t.stats_uri().to_string(), "http://localhost:8080/stats");
    }

    #[test]
    fn target_url_keeps_path_prefix() {
        let t = TargetUrl::parse("http://10.0.0.7:8080/svc").unwrap();
        assert_eq!(t.stats_uri().path(), "/svc/stats");
    }

    #[test]
    fn target_url_rejects_non_http() {
        for bad in ["https://localhost:8080", "localhost:8080", "/stats", ""] {
            assert!(TargetUrl::parse(bad).is_err(), "{bad}");
        }
    }
}
