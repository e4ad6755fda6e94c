// Public modules
pub mod types;
pub mod error;
pub mod config;
pub mod parsing;
pub mod metrics;
pub mod sorting;
pub mod collector;
pub mod report;

// Re-export commonly used items
pub use types::*;
pub use error::TopError;
pub use config::{load_config, load_config_with_env, EnvironmentProvider, SystemEnvironment, MockEnvironment};
pub use parsing::{zero_quantity, Quantity};
pub use metrics::{build_pod_record, node_records, pod_records, MetricsRecord, NodeRecord, PodRecord, ContainerRecord};
pub use sorting::{sort_records, SortField};
pub use collector::MetricsCollector;
pub use report::{render_node_table, render_pod_table, format_usage, format_timestamp, TopPrinter};
