//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Every enabled service must name an address
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Runs before any channel is dialed

use crate::check::error::{CheckError, ErrorList};
use crate::config::schema::{AppConfig, CheckerConfig};

/// Check the per-service sections.
pub fn validate_services(config: &CheckerConfig) -> Result<(), ErrorList> {
    let mut errs = ErrorList::new();
    for kind in config.enabled_services() {
        let svc = config.service(kind);
        if svc.address.trim().is_empty() {
            errs.push(CheckError::Configuration { service: kind });
        }
        if svc.timeout_secs <= 0 {
            tracing::warn!(
                service = %kind,
                timeout_secs = svc.timeout_secs,
                "Non-positive timeout, probes will fail with deadline exceeded"
            );
        }
    }
    errs.into_result()
}

/// Validate a whole configuration file.
pub fn validate_config(config: &AppConfig) -> Result<(), ErrorList> {
    validate_services(&config.services)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{ServiceConfig, ServiceKind};

    #[test]
    fn test_disabled_service_needs_no_address() {
        let config = CheckerConfig::default();
        assert!(validate_services(&config).is_ok());
    }

    #[test]
    fn test_reports_every_empty_address() {
        let config = CheckerConfig {
            frontend: ServiceConfig::enabled("", 5),
            history: ServiceConfig::enabled("history:7234", 5),
            matching: ServiceConfig::enabled("  ", 5),
        };
        let errs = validate_services(&config).unwrap_err();
        let services: Vec<_> = errs
            .iter()
            .filter_map(|e| match e {
                CheckError::Configuration { service } => Some(*service),
                _ => None,
            })
            .collect();
        assert_eq!(services, vec![ServiceKind::Frontend, ServiceKind::Matching]);
    }
}
