//! Collector registry consumed by the `/metrics` handler.

use std::collections::HashSet;
use std::sync::Arc;

use statsbridge_core::error::{BridgeError, Result};

use crate::collector::{Collector, Sample};

#[derive(Default)]
pub struct Registry {
    collectors: Vec<Arc<dyn Collector>>,
    names: HashSet<String>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a collector. Fails if any described name is already taken.
    pub fn register(&mut self, c: Arc<dyn Collector>) -> Result<()> {
        let mut incoming = HashSet::new();
        for d in c.describe() {
            let name = d.fq_name().to_string();
            if self.names.contains(&name) || !incoming.insert(name.clone()) {
                return Err(BridgeError::Registration(format!(
                    "duplicate metric name: {name}"
                )));
            }
        }
        self.names.extend(incoming);
        self.collectors.push(c);
        Ok(())
    }

    /// Collect from every registered collector, in registration order.
    pub async fn gather(&self) -> Vec<Sample> {
        let mut out = Vec::new();
        for c in &self.collectors {
            out.extend(c.collect().await);
        }
        out
    }
}
