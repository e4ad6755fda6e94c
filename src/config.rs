//! Environment-driven configuration for the binary.
//!
//! Recognised variables: `TOP_TARGET` (`nodes` | `pods`), `NAMESPACES`
//! (comma-separated, empty for all), `SORT_BY` (`name` or a measured
//! resource), `PRINT_CONTAINERS` and `FAIL_IF_NO_METRICS`.

use anyhow::{anyhow, Context, Result};
use std::collections::HashMap;

use crate::sorting::SortField;
use crate::types::{Config, TopTarget};

/// Source of configuration variables.
pub trait EnvironmentProvider {
    fn get_var(&self, key: &str) -> Option<String>;
}

/// Reads the process environment.
pub struct SystemEnvironment;

impl EnvironmentProvider for SystemEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// In-memory variables for tests.
#[derive(Debug, Default)]
pub struct MockEnvironment {
    vars: HashMap<String, String>,
}

impl MockEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }
}

impl EnvironmentProvider for MockEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

pub fn load_config() -> Result<Config> {
    load_config_with_env(&SystemEnvironment)
}

pub fn load_config_with_env<E: EnvironmentProvider>(env: &E) -> Result<Config> {
    let target = match env.get_var("TOP_TARGET").as_deref().map(str::trim) {
        None | Some("") | Some("pods") => TopTarget::Pods,
        Some("nodes") => TopTarget::Nodes,
        Some(other) => return Err(anyhow!("Invalid TOP_TARGET {:?}, expected nodes or pods", other)),
    };

    let namespaces = env.get_var("NAMESPACES").unwrap_or_default();
    let namespaces: Vec<String> = namespaces
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    let sort_by = match env.get_var("SORT_BY") {
        Some(v) if !v.trim().is_empty() => {
            Some(v.trim().parse::<SortField>().context("Invalid SORT_BY")?)
        }
        _ => None,
    };

    let print_containers = env.get_var("PRINT_CONTAINERS")
        .map(|v| is_truthy(&v))
        .unwrap_or(false);

    let fail_if_no_metrics = env.get_var("FAIL_IF_NO_METRICS")
        .map(|v| is_truthy(&v))
        .unwrap_or(true);

    Ok(Config {
        target,
        namespaces,
        sort_by,
        print_containers,
        fail_if_no_metrics,
    })
}

fn is_truthy(v: &str) -> bool {
    matches!(v, "1" | "true" | "TRUE" | "True")
}
