//! Domain model for the employee registry.
//!
//! # Invariants
//! - Every record is identified by a registry-assigned `EmployeeId`.
//! - Deletion is first a soft-delete flag; hard delete is a registry concern.

pub mod employee;
