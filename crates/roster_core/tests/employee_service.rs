use roster_core::{
    EmployeeRegistry, EmployeeService, InMemoryEmployeeRegistry, RegistryError, RegistryOptions,
};

fn demo_service() -> EmployeeService<InMemoryEmployeeRegistry> {
    let mut service = EmployeeService::new(InMemoryEmployeeRegistry::new());
    service.add_employee("Alice", "Developer", 70_000.0);
    service.add_employee("Bob", "Designer", 65_000.0);
    service.add_employee("Charlie", "Manager", 90_000.0);
    service.add_employee("Alice", "Tester", 50_000.0);
    service
}

#[test]
fn sample_scenario_produces_expected_views_and_stats() {
    let mut service = demo_service();

    assert_eq!(service.find_by_id(1002).unwrap().name(), "Bob");
    assert_eq!(service.find_by_name("Alice").len(), 2);
    assert_eq!(service.find_by_role("Developer").len(), 1);

    service.soft_delete(1002).unwrap();
    service.hard_delete(1003).unwrap();

    assert_eq!(
        service.render_active(),
        "• [ID=1001, Name='Alice', Role='Developer', Salary=$70000.00, Status=Active]\n\
         • [ID=1004, Name='Alice', Role='Tester', Salary=$50000.00, Status=Active]\n"
    );
    assert_eq!(service.render_ordered_by_id(), service.render_active());

    let stats = service.stats();
    assert_eq!(stats.total_employees, 3);
    assert_eq!(stats.active_employees, 2);
    assert_eq!(stats.operations, 9);
    assert_eq!(stats.reusable_ids, 2);
    assert_eq!(stats.name_index_keys, 2);
    assert_eq!(stats.role_index_keys, 3);
}

#[test]
fn failed_operations_are_reported_and_still_counted() {
    let mut service = demo_service();

    assert_eq!(
        service.soft_delete(4242).unwrap_err(),
        RegistryError::NotFound(4242)
    );
    assert_eq!(
        service.reactivate(1001).unwrap_err(),
        RegistryError::AlreadyActive(1001)
    );
    assert!(service.find_by_id(4242).is_none());

    assert_eq!(service.stats().operations, 7);
    assert_eq!(service.registry().len(), 4);
}

#[test]
fn setters_route_through_registry_indexes() {
    let mut service = demo_service();
    service.rename(1002, "Robert").unwrap();
    service.reassign_role(1002, "Architect").unwrap();
    service.set_salary(1002, 80_000.0).unwrap();

    let found = service.find_by_role("architect");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name(), "Robert");
    assert_eq!(found[0].salary(), 80_000.0);
}

#[test]
fn stats_serialize_with_snake_case_fields() {
    let service = demo_service();
    let json = serde_json::to_value(service.stats()).unwrap();

    assert_eq!(json["total_employees"], 4);
    assert_eq!(json["active_employees"], 4);
    assert_eq!(json["operations"], 4);
    assert_eq!(json["reusable_ids"], 0);
}

#[test]
fn employees_serialize_with_expected_wire_fields() {
    let service = demo_service();
    let alice = service.registry().find_by_id(1001).unwrap();
    let json = serde_json::to_value(alice).unwrap();

    assert_eq!(json["id"], 1001);
    assert_eq!(json["name"], "Alice");
    assert_eq!(json["role"], "Developer");
    assert_eq!(json["salary"], 70_000.0);
    assert_eq!(json["is_active"], true);
}

#[test]
fn service_works_over_custom_registry_options() {
    let registry = InMemoryEmployeeRegistry::with_options(RegistryOptions { first_id: 1 });
    let mut service = EmployeeService::new(registry);
    assert_eq!(service.add_employee("Solo", "Founder", 1.0), 1);

    let registry = service.into_registry();
    assert_eq!(registry.len(), 1);
}
