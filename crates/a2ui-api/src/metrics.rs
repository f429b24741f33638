//! Prometheus counters for inference and execution.
use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

pub struct Metrics {
    registry: Registry,
    pub inferences: IntCounter,
    pub executions: IntCounterVec,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();
        let inferences = IntCounter::new("a2ui_inferences_total", "Successful task inferences")?;
        let executions = IntCounterVec::new(
            Opts::new("a2ui_executions_total", "Execution attempts by outcome"),
            &["outcome"],
        )?;
        registry.register(Box::new(inferences.clone()))?;
        registry.register(Box::new(executions.clone()))?;
        Ok(Self {
            registry,
            inferences,
            executions,
        })
    }

    pub fn record_execution(&self, outcome: &str) {
        self.executions.with_label_values(&[outcome]).inc();
    }

    /// Text exposition format.
    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_are_exported() {
        let metrics = Metrics::new().unwrap();
        metrics.inferences.inc();
        metrics.record_execution("ok");
        metrics.record_execution("invalid");
        let text = metrics.encode().unwrap();
        assert!(text.contains("a2ui_inferences_total 1"));
        assert!(text.contains("a2ui_executions_total{outcome=\"ok\"} 1"));
        assert!(text.contains("a2ui_executions_total{outcome=\"invalid\"} 1"));
    }
}
