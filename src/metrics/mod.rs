// Metrics records built from metrics.k8s.io samples
pub mod base;
pub mod nodes;
pub mod pods;

use chrono::{DateTime, Utc};

use crate::parsing::Quantity;
use crate::types::MeasuredResource;

/// Uniform read access to one subject's resource usage.
pub trait MetricsRecord {
    fn name(&self) -> &str;

    /// Empty for nodes and containers.
    fn namespace(&self) -> &str;

    /// Usage for `resource`, or zero when the sample did not report it.
    fn resource_usage(&self, resource: MeasuredResource) -> Quantity;

    fn timestamp(&self) -> DateTime<Utc>;
}

// Re-export commonly used items
pub use base::{
    list_node_metrics_http, list_pod_metrics_http, ContainerMetrics, NodeMetrics, NodeMetricsList,
    PodMetrics, PodMetricsList, ResourceUsage,
};
pub use nodes::{node_records, NodeRecord};
pub use pods::{build_pod_record, pod_records, ContainerRecord, PodRecord};
