//! Core domain logic for the Roster employee registry.
//! This crate is the single source of truth for registry invariants.

pub mod logging;
pub mod model;
pub mod registry;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LogSettings, LoggingError};
pub use model::employee::{Employee, EmployeeId};
pub use registry::employee_registry::{
    normalize_index_key, EmployeeRegistry, InMemoryEmployeeRegistry, RegistryError,
    RegistryOptions, RegistryResult, DEFAULT_FIRST_ID, MAX_FIRST_ID,
};
pub use service::employee_service::{EmployeeService, RegistryStats};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
