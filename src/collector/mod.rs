use anyhow::{Context, Result};
use kube::Client;
use tracing::{debug, info};

use crate::metrics::{self, NodeRecord, PodRecord};

/// Fetches samples from the metrics API and turns them into records.
pub struct MetricsCollector<'a> {
    client: &'a Client,
}

impl<'a> MetricsCollector<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Fail early when the metrics API is not served.
    pub async fn ensure_metrics_available(&self) -> Result<()> {
        metrics::list_node_metrics_http(self.client)
            .await
            .context("metrics API (metrics.k8s.io/v1beta1) is not available")?;
        Ok(())
    }

    pub async fn collect_node_records(&self) -> Result<Vec<NodeRecord>> {
        let samples = metrics::list_node_metrics_http(self.client).await?;
        debug!("fetched {} node samples", samples.len());
        Ok(metrics::node_records(&samples)?)
    }

    /// Pod records for the given namespaces, in namespace order.
    /// An empty slice selects every namespace.
    pub async fn collect_pod_records(&self, namespaces: &[String]) -> Result<Vec<PodRecord>> {
        if namespaces.is_empty() {
            info!("Collecting pod metrics for all namespaces");
            let samples = metrics::list_pod_metrics_http(self.client, None).await?;
            return Ok(metrics::pod_records(&samples)?);
        }

        let mut records = Vec::new();
        for ns in namespaces {
            info!("Collecting pod metrics for namespace: {}", ns);
            let samples = metrics::list_pod_metrics_http(self.client, Some(ns.as_str())).await?;
            records.extend(
                metrics::pod_records(&samples).with_context(|| format!("namespace {}", ns))?,
            );
        }
        Ok(records)
    }
}
