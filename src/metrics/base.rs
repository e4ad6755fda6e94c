use anyhow::{anyhow, Result};
use k8s_openapi::apimachinery::pkg::api::resource::Quantity as RawQuantity;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ObjectMeta, Time};
use kube::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::BTreeMap;

use crate::error::TopError;
use crate::parsing::Quantity;

pub const METRICS_API_PREFIX: &str = "/apis/metrics.k8s.io/v1beta1";

/// Usage as reported by the metrics API, keyed by resource name.
pub type RawUsage = BTreeMap<String, RawQuantity>;

/// Parsed usage keyed by resource name.
pub type ResourceUsage = BTreeMap<String, Quantity>;

#[derive(Debug, Clone, Deserialize)]
pub struct NodeMetrics {
    pub metadata: ObjectMeta,
    pub timestamp: Time,
    #[serde(default)]
    pub window: Option<String>,
    #[serde(default)]
    pub usage: RawUsage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContainerMetrics {
    pub name: String,
    #[serde(default)]
    pub usage: RawUsage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PodMetrics {
    pub metadata: ObjectMeta,
    pub timestamp: Time,
    #[serde(default)]
    pub window: Option<String>,
    #[serde(default)]
    pub containers: Vec<ContainerMetrics>,
}

#[derive(Debug, Deserialize)]
pub struct NodeMetricsList {
    pub items: Vec<NodeMetrics>,
}

#[derive(Debug, Deserialize)]
pub struct PodMetricsList {
    pub items: Vec<PodMetrics>,
}

pub async fn list_node_metrics_http(client: &Client) -> Result<Vec<NodeMetrics>> {
    let path = format!("{}/nodes", METRICS_API_PREFIX);
    let list: NodeMetricsList = get_json(client, &path).await?;
    Ok(list.items)
}

/// Pod metrics for one namespace, or for the whole cluster when `namespace` is `None`.
pub async fn list_pod_metrics_http(client: &Client, namespace: Option<&str>) -> Result<Vec<PodMetrics>> {
    let path = match namespace {
        Some(ns) => format!("{}/namespaces/{}/pods", METRICS_API_PREFIX, ns),
        None => format!("{}/pods", METRICS_API_PREFIX),
    };
    let list: PodMetricsList = get_json(client, &path).await?;
    Ok(list.items)
}

async fn get_json<T: DeserializeOwned>(client: &Client, path: &str) -> Result<T> {
    use http::Request as HttpRequest;
    let req = HttpRequest::builder()
        .method("GET")
        .uri(path)
        .body(Vec::new())
        .map_err(|e| anyhow!("build request: {}", e))?;
    Ok(client.request(req).await?)
}

pub(crate) fn parse_usage(raw: &RawUsage) -> Result<ResourceUsage, TopError> {
    raw.iter()
        .map(|(name, q)| Quantity::try_from(q).map(|parsed| (name.clone(), parsed)))
        .collect()
}

pub(crate) fn sample_name(metadata: &ObjectMeta) -> Result<String, TopError> {
    metadata
        .name
        .as_ref()
        .filter(|n| !n.is_empty())
        .cloned()
        .ok_or(TopError::MissingName)
}
