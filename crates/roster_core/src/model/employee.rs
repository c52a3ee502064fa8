//! Employee domain model.
//!
//! # Responsibility
//! - Define the canonical record owned by the registry.
//! - Provide lifecycle helpers for soft-delete semantics.
//!
//! # Invariants
//! - `id` is assigned by the registry and never changes for a record.
//! - `is_active` is the source of truth for soft-delete state.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Registry-assigned numeric identifier.
///
/// Identifiers released by a delete may be handed to a later record, so an
/// `EmployeeId` names a slot, not a person.
pub type EmployeeId = u64;

/// Canonical employee record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    id: EmployeeId,
    name: String,
    role: String,
    salary: f64,
    is_active: bool,
}

impl Employee {
    /// Creates an active record with a registry-provided ID.
    pub(crate) fn new(
        id: EmployeeId,
        name: impl Into<String>,
        role: impl Into<String>,
        salary: f64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            role: role.into(),
            salary,
            is_active: true,
        }
    }

    pub fn id(&self) -> EmployeeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn salary(&self) -> f64 {
        self.salary
    }

    /// Returns whether this record should be considered visible/active.
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Marks this record as softly deleted.
    pub(crate) fn deactivate(&mut self) {
        self.is_active = false;
    }

    /// Clears the soft delete flag.
    pub(crate) fn activate(&mut self) {
        self.is_active = true;
    }

    // Name/role setters stay crate-private: the registry must re-bucket the
    // record in its name/role indexes whenever these change.
    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub(crate) fn set_role(&mut self, role: String) {
        self.role = role;
    }

    pub(crate) fn set_salary(&mut self, salary: f64) {
        self.salary = salary;
    }

    fn status_label(&self) -> &'static str {
        if self.is_active {
            "Active"
        } else {
            "Inactive"
        }
    }
}

impl Display for Employee {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[ID={}, Name='{}', Role='{}', Salary=${:.2}, Status={}]",
            self.id,
            self.name,
            self.role,
            self.salary,
            self.status_label()
        )
    }
}
