//! Registry layer: storage contracts and the in-memory multi-index table.
//!
//! # Responsibility
//! - Define the `EmployeeRegistry` contract used by the service layer.
//! - Keep index maintenance details out of service/use-case code.
//!
//! # Invariants
//! - Registry APIs report missing or wrong-state targets as `RegistryError`
//!   values and never panic on them.

pub mod employee_registry;
