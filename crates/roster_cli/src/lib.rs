//! Sample staffing scenario shared by the `roster` binary and its tests.
//!
//! # Responsibility
//! - Drive the core service through add, lookup and delete steps.
//! - Write the report to any `io::Write` sink.

use log::warn;
use roster_core::{
    Employee, EmployeeRegistry, EmployeeService, InMemoryEmployeeRegistry, RegistryError,
};
use std::io::{self, Write};

/// Runs the sample scenario against a fresh registry and writes the report.
///
/// Every line is deterministic except the average operation time in the
/// stats block.
pub fn run_demo(out: &mut impl Write) -> io::Result<()> {
    let mut service = EmployeeService::new(InMemoryEmployeeRegistry::new());

    for (name, role, salary) in [
        ("Alice", "Developer", 70_000.0),
        ("Bob", "Designer", 65_000.0),
        ("Charlie", "Manager", 90_000.0),
        ("Alice", "Tester", 50_000.0),
    ] {
        let id = service.add_employee(name, role, salary);
        if let Some(employee) = service.registry().find_by_id(id) {
            writeln!(out, "Employee added: {employee}")?;
        }
    }

    writeln!(out, "\nActive employees:")?;
    write!(out, "{}", service.render_active())?;

    match service.find_by_id(1002) {
        Some(employee) => writeln!(out, "\nFound: {employee}")?,
        None => writeln!(out, "\nNo employee found with ID: 1002")?,
    }
    write_matches(
        out,
        "Employees named 'Alice'",
        "No active employee found with name: Alice",
        service.find_by_name("Alice"),
    )?;
    write_matches(
        out,
        "Employees in role 'Developer'",
        "No active employee found with role: Developer",
        service.find_by_role("Developer"),
    )?;

    let soft = service.soft_delete(1002);
    report(out, soft.map(|()| "Soft deleted employee with ID: 1002"))?;
    let hard = service.hard_delete(1003);
    report(out, hard.map(|_| "Hard deleted employee with ID: 1003"))?;
    let repeat = service.soft_delete(1002);
    report(out, repeat.map(|()| "Soft deleted employee with ID: 1002"))?;

    writeln!(out, "\nActive employees:")?;
    write!(out, "{}", service.render_active())?;
    writeln!(out, "\nEmployees sorted by ID:")?;
    write!(out, "{}", service.render_ordered_by_id())?;
    writeln!(out, "\nSystem stats:")?;
    write!(out, "{}", service.render_stats())?;
    out.flush()
}

fn write_matches(
    out: &mut impl Write,
    heading: &str,
    empty: &str,
    matches: Vec<&Employee>,
) -> io::Result<()> {
    if matches.is_empty() {
        return writeln!(out, "{empty}");
    }
    writeln!(out, "{heading}:")?;
    for employee in matches {
        writeln!(out, "{employee}")?;
    }
    Ok(())
}

fn report(out: &mut impl Write, outcome: Result<&str, RegistryError>) -> io::Result<()> {
    match outcome {
        Ok(message) => writeln!(out, "{message}"),
        Err(err) => {
            warn!("event=demo_step module=cli status={} id={}", err.code(), err.id());
            writeln!(out, "Skipped: {err}")
        }
    }
}
