use std::net::SocketAddr;
use std::time::Duration;

use serde::Deserialize;
use statsbridge_core::error::{BridgeError, Result};

use crate::fetch::TargetUrl;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BridgeConfig {
    pub version: u32,

    #[serde(default)]
    pub target: TargetSection,

    #[serde(default)]
    pub exporter: ExporterSection,

    #[serde(default)]
    pub shutdown: ShutdownSection,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            version: 1,
            target: TargetSection::default(),
            exporter: ExporterSection::default(),
            shutdown: ShutdownSection::default(),
        }
    }
}

impl BridgeConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(BridgeError::Config(format!(
                "unsupported config version: {}",
                self.version
            )));
        }

        self.target.validate()?;
        self.exporter.validate()?;
        self.shutdown.validate()?;

        Ok(())
    }
}

/// Synthetic target listener.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetSection {
    #[serde(default = "default_target_listen")]
    pub listen: String,

    /// Answer `/stats` with 500 (as older deployments did) instead of 200.
    #[serde(default)]
    pub legacy_stats_status: bool,
}

impl Default for TargetSection {
    fn default() -> Self {
        Self {
            listen: default_target_listen(),
            legacy_stats_status: false,
        }
    }
}

impl TargetSection {
    pub fn validate(&self) -> Result<()> {
        parse_listen("target.listen", &self.listen).map(|_| ())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        parse_listen("target.listen", &self.listen)
    }
}

/// Exposition listener and upstream stats target.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExporterSection {
    #[serde(default = "default_exporter_listen")]
    pub listen: String,

    #[serde(default = "default_target_url")]
    pub target_url: String,

    #[serde(default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u64,
}

impl Default for ExporterSection {
    fn default() -> Self {
        Self {
            listen: default_exporter_listen(),
            target_url: default_target_url(),
            fetch_timeout_ms: default_fetch_timeout_ms(),
        }
    }
}

impl ExporterSection {
    pub fn validate(&self) -> Result<()> {
        parse_listen("exporter.listen", &self.listen)?;
        TargetUrl::parse(&self.target_url)?;
        if !(100..=60000).contains(&self.fetch_timeout_ms) {
            return Err(BridgeError::Config(
                "exporter.fetch_timeout_ms must be between 100 and 60000".into(),
            ));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        parse_listen("exporter.listen", &self.listen)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShutdownSection {
    #[serde(default = "default_drain_timeout_ms")]
    pub drain_timeout_ms: u64,
}

impl Default for ShutdownSection {
    fn default() -> Self {
        Self {
            drain_timeout_ms: default_drain_timeout_ms(),
        }
    }
}

impl ShutdownSection {
    pub fn validate(&self) -> Result<()> {
        if !(100..=120000).contains(&self.drain_timeout_ms) {
            return Err(BridgeError::Config(
                "shutdown.drain_timeout_ms must be between 100 and 120000".into(),
            ));
        }
        Ok(())
    }

    pub fn drain_timeout(&self) -> Duration {
        Duration::from_millis(self.drain_timeout_ms)
    }
}

fn parse_listen(field: &str, s: &str) -> Result<SocketAddr> {
    s.parse()
        .map_err(|e| BridgeError::Config(format!("{field} must be a valid SocketAddr ({s}): {e}")))
}

fn default_target_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_exporter_listen() -> String {
    "0.0.0.0:9000".into()
}
fn default_target_url() -> String {
    "http://localhost:8080".into()
}
fn default_fetch_timeout_ms() -> u64 {
    5000
}
fn default_drain_timeout_ms() -> u64 {
    10000
}
