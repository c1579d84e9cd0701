//! Collector mapping the target's `/stats` document to exported metrics.
//!
//! Per scrape: probe the target, then emit. A failed probe yields only
//! `httpserver_up 0`; a successful one yields `httpserver_up 1` followed by
//! every configured metric in fixed order.

use std::sync::Arc;

use async_trait::async_trait;

use statsbridge_core::StatsSnapshot;

use crate::fetch::{StatsFetcher, TargetUrl};

use super::{build_fq_name, Collector, MetricDescriptor, Sample, ValueKind};

/// A metric derived from a fetched snapshot.
struct ExportedMetric {
    desc: Arc<MetricDescriptor>,
    eval: fn(&StatsSnapshot) -> f64,
}

pub struct MetricCollector {
    fetcher: StatsFetcher,
    target: TargetUrl,
    up: Arc<MetricDescriptor>,
    metrics: Vec<ExportedMetric>,
}

impl MetricCollector {
    pub fn new(fetcher: StatsFetcher, target: TargetUrl) -> Self {
        let up = MetricDescriptor::new(
            build_fq_name("httpserver", "", "up"),
            "Last query successful.",
            &[],
            ValueKind::Gauge,
        );

        let metrics = vec![
            ExportedMetric {
                desc: MetricDescriptor::new(
                    build_fq_name("http", "request", "200counter"),
                    "http.requests.counter",
                    &[("counter", "twohundred")],
                    ValueKind::Counter,
                ),
                eval: |s| s.success,
            },
            ExportedMetric {
                desc: MetricDescriptor::new(
                    build_fq_name("http", "request", "500counter"),
                    "http.requests.counter",
                    &[("counter", "fivehundred")],
                    ValueKind::Counter,
                ),
                eval: |s| s.error,
            },
        ];

        Self { fetcher, target, up, metrics }
    }
}

#[async_trait]
impl Collector for MetricCollector {
    fn describe(&self) -> Vec<Arc<MetricDescriptor>> {
        std::iter::once(Arc::clone(&self.up))
            .chain(self.metrics.iter().map(|m| Arc::clone(&m.desc)))
            .collect()
    }

    async fn collect(&self) -> Vec<Sample> {
        let stats = match self.fetcher.fetch(&self.target).await {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(
                    target_url = %self.target,
                    kind = e.kind().as_str(),
                    error = %e,
                    "failed getting /stats endpoint of target"
                );
                return vec![Sample::new(&self.up, 0.0)];
            }
        };

        let mut out = Vec::with_capacity(self.metrics.len() + 1);
        out.push(Sample::new(&self.up, 1.0));
        for m in &self.metrics {
            out.push(Sample::new(&m.desc, (m.eval)(&stats)));
        }
        out
    }
}
