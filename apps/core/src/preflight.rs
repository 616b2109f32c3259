//! Startup preflight checks.
//!
//! Verifies the configuration and probes the session catalog once before the server
//! binds. Failures never block startup: the service runs degraded and the catalog is
//! retried on every request anyway.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use url::Url;

use crate::config::Config;
use crate::recommend::HttpCatalog;

/// Result of a single check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    pub name: String,
    pub passed: bool,
    pub message: String,
    pub details: Option<String>,
}

impl CheckResult {
    fn pass(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            passed: true,
            message: message.to_string(),
            details: None,
        }
    }

    fn fail(name: &str, message: &str, details: Option<String>) -> Self {
        Self {
            name: name.to_string(),
            passed: false,
            message: message.to_string(),
            details,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreflightReport {
    pub all_passed: bool,
    pub checks: Vec<CheckResult>,
    /// Some check failed; the service still starts
    pub degraded: bool,
    pub summary: String,
}

pub async fn run_preflight_checks(config: &Config, catalog: &HttpCatalog) -> PreflightReport {
    info!("Running preflight checks");

    let checks = vec![check_configuration(config), check_catalog_upstream(catalog).await];

    let all_passed = checks.iter().all(|c| c.passed);
    let summary = if all_passed {
        "All checks passed. Service ready.".to_string()
    } else {
        let failed: Vec<&str> = checks
            .iter()
            .filter(|c| !c.passed)
            .map(|c| c.name.as_str())
            .collect();
        format!("Starting degraded, failed checks: {}", failed.join(", "))
    };

    for check in &checks {
        if check.passed {
            info!(check = %check.name, "{}", check.message);
        } else {
            warn!(check = %check.name, details = ?check.details, "{}", check.message);
        }
    }
    info!("Preflight summary: {}", summary);

    PreflightReport {
        all_passed,
        checks,
        degraded: !all_passed,
        summary,
    }
}

fn check_configuration(config: &Config) -> CheckResult {
    const NAME: &str = "configuration";

    if let Err(e) = Url::parse(&config.catalog_url) {
        return CheckResult::fail(NAME, "Catalog URL is invalid", Some(e.to_string()));
    }

    match config.bind_address() {
        Ok(addr) => CheckResult::pass(
            NAME,
            &format!("Listening on {}, catalog at {}", addr, config.catalog_url),
        ),
        Err(e) => CheckResult::fail(NAME, "Bind address is invalid", Some(e.to_string())),
    }
}

async fn check_catalog_upstream(catalog: &HttpCatalog) -> CheckResult {
    const NAME: &str = "catalog_upstream";

    match catalog.try_fetch().await {
        Ok(items) => CheckResult::pass(NAME, &format!("Catalog reachable, {} records", items.len())),
        Err(e) => CheckResult::fail(
            NAME,
            "Catalog unreachable, recommendations will be empty until it recovers",
            Some(e.to_string()),
        ),
    }
}
