//! Employee use-case service.
//!
//! # Responsibility
//! - Provide stable entry points for registry callers.
//! - Emit metadata-only operation logs and keep timing statistics.
//! - Render the console report blocks used by the demo binary.
//!
//! # Invariants
//! - Service APIs never bypass the registry's index maintenance.
//! - Log lines carry identifiers and status codes only, never names or roles.

use crate::model::employee::{Employee, EmployeeId};
use crate::registry::employee_registry::{EmployeeRegistry, RegistryResult};
use log::{debug, info, warn};
use serde::Serialize;
use std::time::{Duration, Instant};

/// Snapshot of registry size and service operation counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistryStats {
    /// Records not hard-deleted, inactive ones included.
    pub total_employees: usize,
    pub active_employees: usize,
    /// Timed operations served so far.
    pub operations: u64,
    /// Mean wall time per timed operation; `0` when nothing ran yet.
    pub avg_operation_nanos: u128,
    pub reusable_ids: usize,
    pub name_index_keys: usize,
    pub role_index_keys: usize,
}

#[derive(Debug, Default)]
struct OperationClock {
    operations: u64,
    total: Duration,
}

impl OperationClock {
    fn record(&mut self, started_at: Instant) {
        self.operations += 1;
        self.total += started_at.elapsed();
    }

    fn average_nanos(&self) -> u128 {
        if self.operations == 0 {
            0
        } else {
            self.total.as_nanos() / u128::from(self.operations)
        }
    }
}

/// Use-case service wrapper over an employee registry.
pub struct EmployeeService<R: EmployeeRegistry> {
    registry: R,
    clock: OperationClock,
}

impl<R: EmployeeRegistry> EmployeeService<R> {
    /// Creates a service using the provided registry implementation.
    pub fn new(registry: R) -> Self {
        Self {
            registry,
            clock: OperationClock::default(),
        }
    }

    /// Read-only access to the wrapped registry. Calls made through it are
    /// neither logged nor timed.
    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn into_registry(self) -> R {
        self.registry
    }

    /// Adds an active employee and returns the assigned identifier.
    pub fn add_employee(&mut self, name: &str, role: &str, salary: f64) -> EmployeeId {
        let started_at = Instant::now();
        let id = self.registry.add(name, role, salary);
        self.clock.record(started_at);

        info!("event=employee_add module=service status=ok id={id}");
        id
    }

    /// Soft-deletes an employee, releasing its identifier for reuse.
    pub fn soft_delete(&mut self, id: EmployeeId) -> RegistryResult<()> {
        let started_at = Instant::now();
        let result = self.registry.soft_delete(id);
        self.clock.record(started_at);

        log_mutation("employee_soft_delete", id, &result);
        result
    }

    /// Restores a soft-deleted employee if its identifier is still unclaimed.
    pub fn reactivate(&mut self, id: EmployeeId) -> RegistryResult<()> {
        let started_at = Instant::now();
        let result = self.registry.reactivate(id);
        self.clock.record(started_at);

        log_mutation("employee_reactivate", id, &result);
        result
    }

    /// Removes an employee from every index.
    pub fn hard_delete(&mut self, id: EmployeeId) -> RegistryResult<Employee> {
        let started_at = Instant::now();
        let result = self.registry.hard_delete(id);
        self.clock.record(started_at);

        log_mutation("employee_hard_delete", id, &result);
        result
    }

    pub fn rename(&mut self, id: EmployeeId, name: &str) -> RegistryResult<()> {
        let started_at = Instant::now();
        let result = self.registry.rename(id, name);
        self.clock.record(started_at);

        log_mutation("employee_rename", id, &result);
        result
    }

    pub fn reassign_role(&mut self, id: EmployeeId, role: &str) -> RegistryResult<()> {
        let started_at = Instant::now();
        let result = self.registry.reassign_role(id, role);
        self.clock.record(started_at);

        log_mutation("employee_reassign_role", id, &result);
        result
    }

    pub fn set_salary(&mut self, id: EmployeeId, salary: f64) -> RegistryResult<()> {
        let started_at = Instant::now();
        let result = self.registry.set_salary(id, salary);
        self.clock.record(started_at);

        log_mutation("employee_set_salary", id, &result);
        result
    }

    /// Looks up one employee by identifier, active or not.
    pub fn find_by_id(&mut self, id: EmployeeId) -> Option<&Employee> {
        let started_at = Instant::now();
        let found = self.registry.find_by_id(id);
        self.clock.record(started_at);

        let status = if found.is_some() { "ok" } else { "not_found" };
        debug!("event=employee_find_by_id module=service status={status} id={id}");
        found
    }

    /// Active employees whose name matches case-insensitively.
    pub fn find_by_name(&mut self, name: &str) -> Vec<&Employee> {
        let started_at = Instant::now();
        let found = self.registry.find_by_name(name);
        self.clock.record(started_at);

        debug!(
            "event=employee_find_by_name module=service status=ok hits={}",
            found.len()
        );
        found
    }

    /// Active employees whose role matches case-insensitively.
    pub fn find_by_role(&mut self, role: &str) -> Vec<&Employee> {
        let started_at = Instant::now();
        let found = self.registry.find_by_role(role);
        self.clock.record(started_at);

        debug!(
            "event=employee_find_by_role module=service status=ok hits={}",
            found.len()
        );
        found
    }

    pub fn list_active(&self) -> Vec<&Employee> {
        self.registry.list_active()
    }

    pub fn list_ordered_by_id(&self) -> Vec<&Employee> {
        self.registry.list_ordered_by_id()
    }

    pub fn stats(&self) -> RegistryStats {
        RegistryStats {
            total_employees: self.registry.len(),
            active_employees: self.registry.active_len(),
            operations: self.clock.operations,
            avg_operation_nanos: self.clock.average_nanos(),
            reusable_ids: self.registry.reusable_ids().len(),
            name_index_keys: self.registry.name_key_count(),
            role_index_keys: self.registry.role_key_count(),
        }
    }

    /// Active employees in insertion order, one bullet per line.
    pub fn render_active(&self) -> String {
        let active = self.registry.list_active();
        if active.is_empty() {
            return "No active employees found.\n".to_string();
        }
        render_bullets(&active)
    }

    /// Active employees in ascending identifier order, one bullet per line.
    pub fn render_ordered_by_id(&self) -> String {
        render_bullets(&self.registry.list_ordered_by_id())
    }

    pub fn render_stats(&self) -> String {
        let stats = self.stats();
        format!(
            "• Total employees: {}\n\
             • Active employees: {}\n\
             • Total operations: {}\n\
             • Avg operation time: {} ns\n\
             • Reusable IDs: {}\n\
             • Name index size: {}\n\
             • Role index size: {}\n",
            stats.total_employees,
            stats.active_employees,
            stats.operations,
            stats.avg_operation_nanos,
            stats.reusable_ids,
            stats.name_index_keys,
            stats.role_index_keys,
        )
    }
}

fn render_bullets(employees: &[&Employee]) -> String {
    employees
        .iter()
        .map(|employee| format!("• {employee}\n"))
        .collect()
}

fn log_mutation<T>(event: &str, id: EmployeeId, result: &RegistryResult<T>) {
    match result {
        Ok(_) => info!("event={event} module=service status=ok id={id}"),
        Err(err) => warn!(
            "event={event} module=service status={} id={id}",
            err.code()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::{EmployeeService, OperationClock};
    use crate::registry::employee_registry::InMemoryEmployeeRegistry;
    use std::time::Duration;

    #[test]
    fn clock_average_is_zero_before_any_operation() {
        assert_eq!(OperationClock::default().average_nanos(), 0);
    }

    #[test]
    fn clock_average_divides_total_by_count() {
        let clock = OperationClock {
            operations: 4,
            total: Duration::from_nanos(1_000),
        };
        assert_eq!(clock.average_nanos(), 250);
    }

    #[test]
    fn render_active_reports_empty_registry() {
        let service = EmployeeService::new(InMemoryEmployeeRegistry::new());
        assert_eq!(service.render_active(), "No active employees found.\n");
        assert_eq!(service.render_ordered_by_id(), "");
    }

    #[test]
    fn render_stats_lists_every_counter_on_its_own_line() {
        let mut service = EmployeeService::new(InMemoryEmployeeRegistry::new());
        service.add_employee("Alice", "Developer", 70_000.0);

        let rendered = service.render_stats();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "• Total employees: 1");
        assert_eq!(lines[2], "• Total operations: 1");
        assert_eq!(lines[6], "• Role index size: 1");
        assert!(rendered.ends_with('\n'));
    }
}
