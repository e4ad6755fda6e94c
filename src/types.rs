use std::fmt;
use std::str::FromStr;

use crate::error::TopError;
use crate::sorting::SortField;

/// Resource kinds tracked by the report, in column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MeasuredResource {
    Cpu,
    Memory,
    Storage,
}

pub const MEASURED_RESOURCE_COUNT: usize = 3;

pub const MEASURED_RESOURCES: [MeasuredResource; MEASURED_RESOURCE_COUNT] = [
    MeasuredResource::Cpu,
    MeasuredResource::Memory,
    MeasuredResource::Storage,
];

pub const NODE_COLUMNS: &[&str] = &["NAME", "CPU", "MEMORY", "STORAGE", "TIMESTAMP"];
pub const POD_COLUMNS: &[&str] = &["NAMESPACE", "NAME", "CPU", "MEMORY", "STORAGE", "TIMESTAMP"];

impl MeasuredResource {
    /// Kubernetes resource name, as used for keys in a usage map.
    pub fn as_str(&self) -> &'static str {
        match self {
            MeasuredResource::Cpu => "cpu",
            MeasuredResource::Memory => "memory",
            MeasuredResource::Storage => "storage",
        }
    }

    /// Position in `MEASURED_RESOURCES`.
    pub fn index(&self) -> usize {
        match self {
            MeasuredResource::Cpu => 0,
            MeasuredResource::Memory => 1,
            MeasuredResource::Storage => 2,
        }
    }
}

impl fmt::Display for MeasuredResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MeasuredResource {
    type Err = TopError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MEASURED_RESOURCES
            .iter()
            .copied()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| TopError::UnknownResource(s.to_string()))
    }
}

/// Which table the binary prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopTarget {
    Nodes,
    Pods,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub target: TopTarget,
    /// Empty means all namespaces.
    pub namespaces: Vec<String>,
    pub sort_by: Option<SortField>,
    pub print_containers: bool,
    pub fail_if_no_metrics: bool,
}
