use chrono::{DateTime, Utc};

use crate::error::TopError;
use crate::parsing::Quantity;
use crate::types::MeasuredResource;

use super::base::{parse_usage, sample_name, NodeMetrics, ResourceUsage};
use super::MetricsRecord;

/// A node's usage, passed through from its sample unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRecord {
    name: String,
    usage: ResourceUsage,
    timestamp: DateTime<Utc>,
}

impl NodeRecord {
    pub fn new(name: impl Into<String>, usage: ResourceUsage, timestamp: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            usage,
            timestamp,
        }
    }

    pub fn from_metrics(sample: &NodeMetrics) -> Result<Self, TopError> {
        Ok(Self {
            name: sample_name(&sample.metadata)?,
            usage: parse_usage(&sample.usage)?,
            timestamp: sample.timestamp.0,
        })
    }
}

impl MetricsRecord for NodeRecord {
    fn name(&self) -> &str {
        &self.name
    }

    fn namespace(&self) -> &str {
        ""
    }

    fn resource_usage(&self, resource: MeasuredResource) -> Quantity {
        self.usage.get(resource.as_str()).copied().unwrap_or_default()
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Convert a list of node samples, failing on the first invalid one.
pub fn node_records(samples: &[NodeMetrics]) -> Result<Vec<NodeRecord>, TopError> {
    samples.iter().map(NodeRecord::from_metrics).collect()
}
