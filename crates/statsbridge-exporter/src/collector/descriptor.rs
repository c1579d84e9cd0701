//! Metric descriptors and emitted samples.

use std::collections::BTreeMap;
use std::sync::Arc;

/// Exposition type of a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Counter,
    Gauge,
}

impl ValueKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::Counter => "counter",
            ValueKind::Gauge => "gauge",
        }
    }
}

/// Immutable metric identity (name + constant labels) with help text and type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricDescriptor {
    fq_name: String,
    help: String,
    const_labels: BTreeMap<String, String>,
    kind: ValueKind,
}

impl MetricDescriptor {
    pub fn new(
        fq_name: impl Into<String>,
        help: impl Into<String>,
        const_labels: &[(&str, &str)],
        kind: ValueKind,
    ) -> Arc<Self> {
        Arc::new(Self {
            fq_name: fq_name.into(),
            help: help.into(),
            const_labels: const_labels
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            kind,
        })
    }

    pub fn fq_name(&self) -> &str {
        &self.fq_name
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    /// Labels in sorted key order.
    pub fn const_labels(&self) -> &BTreeMap<String, String> {
        &self.const_labels
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }
}

/// One emitted value.
#[derive(Debug, Clone)]
pub struct Sample {
    pub desc: Arc<MetricDescriptor>,
    pub value: f64,
}

impl Sample {
    pub fn new(desc: &Arc<MetricDescriptor>, value: f64) -> Self {
        Self { desc: Arc::clone(desc), value }
    }
}

/// Join non-empty parts with `_` (`("httpserver", "", "up")` -> `httpserver_up`).
pub fn build_fq_name(namespace: &str, subsystem: &str, name: &str) -> String {
    [namespace, subsystem, name]
        .iter()
        .filter(|p| !p.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("_")
}
