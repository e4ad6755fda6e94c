use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::TopError;
use crate::parsing::{zero_quantity, Quantity};
use crate::types::{MeasuredResource, MEASURED_RESOURCES, MEASURED_RESOURCE_COUNT};

use super::base::{parse_usage, sample_name, ContainerMetrics, PodMetrics, ResourceUsage};
use super::MetricsRecord;

/// One container's usage inside a pod sample.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerRecord {
    name: String,
    usage: ResourceUsage,
    timestamp: DateTime<Utc>,
}

impl ContainerRecord {
    fn from_metrics(sample: &ContainerMetrics, timestamp: DateTime<Utc>) -> Result<Self, TopError> {
        if sample.name.is_empty() {
            return Err(TopError::MissingName);
        }
        Ok(Self {
            name: sample.name.clone(),
            usage: parse_usage(&sample.usage)?,
            timestamp,
        })
    }
}

impl MetricsRecord for ContainerRecord {
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

/// A pod's usage, summed over its containers.
#[derive(Debug, Clone, PartialEq)]
pub struct PodRecord {
    namespace: String,
    name: String,
    timestamp: DateTime<Utc>,
    total: [Quantity; MEASURED_RESOURCE_COUNT],
    containers: Vec<ContainerRecord>,
}

impl PodRecord {
    /// Containers in the order the sample listed them.
    pub fn containers(&self) -> &[ContainerRecord] {
        &self.containers
    }
}

impl MetricsRecord for PodRecord {
    fn name(&self) -> &str {
        &self.name
    }

    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn resource_usage(&self, resource: MeasuredResource) -> Quantity {
        self.total[resource.index()]
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Build a pod record, totalling every measured resource across the sample's containers.
pub fn build_pod_record(sample: &PodMetrics) -> Result<PodRecord, TopError> {
    let name = sample_name(&sample.metadata)?;
    let namespace = sample.metadata.namespace.clone().unwrap_or_default();
    let timestamp = sample.timestamp.0;

    let mut total = [Quantity::default(); MEASURED_RESOURCE_COUNT];
    for res in MEASURED_RESOURCES {
        total[res.index()] = zero_quantity(res)?;
    }

    let mut containers = Vec::with_capacity(sample.containers.len());
    for c in &sample.containers {
        let container = ContainerRecord::from_metrics(c, timestamp)?;
        for res in MEASURED_RESOURCES {
            total[res.index()] += container.resource_usage(res);
        }
        containers.push(container);
    }

    debug!(
        "aggregated pod {}/{} over {} containers",
        namespace,
        name,
        containers.len()
    );

    Ok(PodRecord {
        namespace,
        name,
        timestamp,
        total,
        containers,
    })
}

/// Convert a list of pod samples, failing on the first invalid one.
pub fn pod_records(samples: &[PodMetrics]) -> Result<Vec<PodRecord>, TopError> {
    samples.iter().map(build_pod_record).collect()
}
