//! Employee registry contract and multi-index in-memory implementation.
//!
//! # Responsibility
//! - Own every `Employee` record and hand out read-only views.
//! - Keep the id, name, role and ordered-by-id indexes in lockstep.
//! - Recycle identifiers released by soft or hard deletes.
//!
//! # Invariants
//! - No two live records share an identifier.
//! - A record sits in the name/role indexes until it is hard-deleted or its
//!   identifier is handed to a new record, whichever comes first.
//! - The ordered index holds exactly the ids of records not hard-deleted.
//! - The reuse pool never holds an identifier twice, nor the identifier of an
//!   active record.

use crate::model::employee::{Employee, EmployeeId};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// First identifier handed out by a registry with default options.
pub const DEFAULT_FIRST_ID: EmployeeId = 1001;

/// Largest accepted `RegistryOptions::first_id`; larger values are clamped.
/// Capping the start keeps the counter far from `EmployeeId::MAX`.
pub const MAX_FIRST_ID: EmployeeId = u32::MAX as EmployeeId;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

pub type RegistryResult<T> = Result<T, RegistryError>;

/// Reportable outcome of an operation that targeted a missing or
/// wrong-state record. None of these leave the registry modified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryError {
    NotFound(EmployeeId),
    AlreadyInactive(EmployeeId),
    AlreadyActive(EmployeeId),
}

impl RegistryError {
    /// Stable short code used in log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::AlreadyInactive(_) => "already_inactive",
            Self::AlreadyActive(_) => "already_active",
        }
    }

    pub fn id(&self) -> EmployeeId {
        match self {
            Self::NotFound(id) | Self::AlreadyInactive(id) | Self::AlreadyActive(id) => *id,
        }
    }
}

impl Display for RegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "employee not found: {id}"),
            Self::AlreadyInactive(id) => write!(f, "employee already inactive: {id}"),
            Self::AlreadyActive(id) => write!(f, "employee already active: {id}"),
        }
    }
}

impl Error for RegistryError {}

/// Construction options for [`InMemoryEmployeeRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryOptions {
    /// Value of the identifier counter before any record is added.
    /// Clamped to [`MAX_FIRST_ID`].
    pub first_id: EmployeeId,
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self {
            first_id: DEFAULT_FIRST_ID,
        }
    }
}

/// Storage contract for employee registries.
///
/// Lookups by name/role are case-insensitive and return records in ascending
/// identifier order.
pub trait EmployeeRegistry {
    /// Inserts a new active record and returns its identifier.
    fn add(&mut self, name: &str, role: &str, salary: f64) -> EmployeeId;
    /// Marks an active record inactive and releases its identifier.
    fn soft_delete(&mut self, id: EmployeeId) -> RegistryResult<()>;
    /// Restores a soft-deleted record whose identifier was not reassigned.
    fn reactivate(&mut self, id: EmployeeId) -> RegistryResult<()>;
    /// Removes a record from every index and releases its identifier.
    fn hard_delete(&mut self, id: EmployeeId) -> RegistryResult<Employee>;
    fn rename(&mut self, id: EmployeeId, name: &str) -> RegistryResult<()>;
    fn reassign_role(&mut self, id: EmployeeId, role: &str) -> RegistryResult<()>;
    fn set_salary(&mut self, id: EmployeeId, salary: f64) -> RegistryResult<()>;

    /// Returns the record with `id`, active or not.
    fn find_by_id(&self, id: EmployeeId) -> Option<&Employee>;
    fn find_by_name(&self, name: &str) -> Vec<&Employee>;
    fn find_by_role(&self, role: &str) -> Vec<&Employee>;
    /// Raw name index contents, inactive records included.
    fn indexed_by_name(&self, name: &str) -> Vec<&Employee>;
    /// Raw role index contents, inactive records included.
    fn indexed_by_role(&self, role: &str) -> Vec<&Employee>;
    /// Active records in insertion order.
    fn list_active(&self) -> Vec<&Employee>;
    /// Active records in ascending identifier order.
    fn list_ordered_by_id(&self) -> Vec<&Employee>;

    /// Number of records not hard-deleted.
    fn len(&self) -> usize;
    fn active_len(&self) -> usize;
    /// Identifiers waiting for reuse, in the order they will be handed out.
    fn reusable_ids(&self) -> Vec<EmployeeId>;
    fn name_key_count(&self) -> usize;
    fn role_key_count(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Normalizes a name/role value into its index key.
///
/// Trims, collapses interior whitespace runs to one space and lowercases.
pub fn normalize_index_key(value: &str) -> String {
    WHITESPACE_RE
        .replace_all(value.trim(), " ")
        .to_lowercase()
}

/// FIFO queue of released identifiers with O(1) membership checks.
#[derive(Debug, Default)]
struct ReusePool {
    queue: VecDeque<EmployeeId>,
    members: HashSet<EmployeeId>,
}

impl ReusePool {
    fn release(&mut self, id: EmployeeId) {
        if self.members.insert(id) {
            self.queue.push_back(id);
        }
    }

    fn take(&mut self) -> Option<EmployeeId> {
        let id = self.queue.pop_front()?;
        self.members.remove(&id);
        Some(id)
    }

    fn reclaim(&mut self, id: EmployeeId) -> bool {
        if !self.members.remove(&id) {
            return false;
        }
        self.queue.retain(|queued| *queued != id);
        true
    }

    fn snapshot(&self) -> Vec<EmployeeId> {
        self.queue.iter().copied().collect()
    }
}

#[derive(Debug)]
struct Slot {
    employee: Employee,
    /// Position in the insertion-order log.
    seq: u64,
}

/// Multi-index in-memory registry.
#[derive(Debug)]
pub struct InMemoryEmployeeRegistry {
    by_id: HashMap<EmployeeId, Slot>,
    by_name: HashMap<String, BTreeSet<EmployeeId>>,
    by_role: HashMap<String, BTreeSet<EmployeeId>>,
    ordered: BTreeSet<EmployeeId>,
    insertion: BTreeMap<u64, EmployeeId>,
    reuse_pool: ReusePool,
    next_id: EmployeeId,
    next_seq: u64,
}

impl Default for InMemoryEmployeeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryEmployeeRegistry {
    pub fn new() -> Self {
        Self::with_options(RegistryOptions::default())
    }

    pub fn with_options(options: RegistryOptions) -> Self {
        Self {
            by_id: HashMap::new(),
            by_name: HashMap::new(),
            by_role: HashMap::new(),
            ordered: BTreeSet::new(),
            insertion: BTreeMap::new(),
            reuse_pool: ReusePool::default(),
            next_id: options.first_id.min(MAX_FIRST_ID),
            next_seq: 0,
        }
    }

    fn allocate_id(&mut self) -> EmployeeId {
        if let Some(id) = self.reuse_pool.take() {
            // A soft-deleted record still occupies the slot; its logical
            // identity ends here.
            if let Some(stale) = self.by_id.remove(&id) {
                self.detach(&stale);
            }
            return id;
        }

        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Drops `slot` from every secondary index. The caller owns `by_id`.
    fn detach(&mut self, slot: &Slot) {
        let id = slot.employee.id();
        bucket_remove(&mut self.by_name, &normalize_index_key(slot.employee.name()), id);
        bucket_remove(&mut self.by_role, &normalize_index_key(slot.employee.role()), id);
        self.ordered.remove(&id);
        self.insertion.remove(&slot.seq);
    }

    fn collect_bucket<'a>(
        &'a self,
        index: &'a HashMap<String, BTreeSet<EmployeeId>>,
        value: &str,
        include_inactive: bool,
    ) -> Vec<&'a Employee> {
        let Some(ids) = index.get(&normalize_index_key(value)) else {
            return Vec::new();
        };

        ids.iter()
            .filter_map(|id| self.by_id.get(id))
            .map(|slot| &slot.employee)
            .filter(|employee| include_inactive || employee.is_active())
            .collect()
    }
}

impl EmployeeRegistry for InMemoryEmployeeRegistry {
    fn add(&mut self, name: &str, role: &str, salary: f64) -> EmployeeId {
        let id = self.allocate_id();
        let seq = self.next_seq;
        self.next_seq += 1;

        bucket_insert(&mut self.by_name, normalize_index_key(name), id);
        bucket_insert(&mut self.by_role, normalize_index_key(role), id);
        self.ordered.insert(id);
        self.insertion.insert(seq, id);
        self.by_id.insert(
            id,
            Slot {
                employee: Employee::new(id, name, role, salary),
                seq,
            },
        );

        id
    }

    fn soft_delete(&mut self, id: EmployeeId) -> RegistryResult<()> {
        let slot = self.by_id.get_mut(&id).ok_or(RegistryError::NotFound(id))?;
        if !slot.employee.is_active() {
            return Err(RegistryError::AlreadyInactive(id));
        }

        slot.employee.deactivate();
        self.reuse_pool.release(id);
        Ok(())
    }

    fn reactivate(&mut self, id: EmployeeId) -> RegistryResult<()> {
        let slot = self.by_id.get_mut(&id).ok_or(RegistryError::NotFound(id))?;
        if slot.employee.is_active() {
            return Err(RegistryError::AlreadyActive(id));
        }

        slot.employee.activate();
        self.reuse_pool.reclaim(id);
        Ok(())
    }

    fn hard_delete(&mut self, id: EmployeeId) -> RegistryResult<Employee> {
        let slot = self.by_id.remove(&id).ok_or(RegistryError::NotFound(id))?;
        self.detach(&slot);
        self.reuse_pool.release(id);
        Ok(slot.employee)
    }

    fn rename(&mut self, id: EmployeeId, name: &str) -> RegistryResult<()> {
        let slot = self.by_id.get_mut(&id).ok_or(RegistryError::NotFound(id))?;
        let old_key = normalize_index_key(slot.employee.name());
        let new_key = normalize_index_key(name);
        if old_key != new_key {
            bucket_remove(&mut self.by_name, &old_key, id);
            bucket_insert(&mut self.by_name, new_key, id);
        }

        slot.employee.set_name(name.to_string());
        Ok(())
    }

    fn reassign_role(&mut self, id: EmployeeId, role: &str) -> RegistryResult<()> {
        let slot = self.by_id.get_mut(&id).ok_or(RegistryError::NotFound(id))?;
        let old_key = normalize_index_key(slot.employee.role());
        let new_key = normalize_index_key(role);
        if old_key != new_key {
            bucket_remove(&mut self.by_role, &old_key, id);
            bucket_insert(&mut self.by_role, new_key, id);
        }

        slot.employee.set_role(role.to_string());
        Ok(())
    }

    fn set_salary(&mut self, id: EmployeeId, salary: f64) -> RegistryResult<()> {
        let slot = self.by_id.get_mut(&id).ok_or(RegistryError::NotFound(id))?;
        slot.employee.set_salary(salary);
        Ok(())
    }

    fn find_by_id(&self, id: EmployeeId) -> Option<&Employee> {
        self.by_id.get(&id).map(|slot| &slot.employee)
    }

    fn find_by_name(&self, name: &str) -> Vec<&Employee> {
        self.collect_bucket(&self.by_name, name, false)
    }

    fn find_by_role(&self, role: &str) -> Vec<&Employee> {
        self.collect_bucket(&self.by_role, role, false)
    }

    fn indexed_by_name(&self, name: &str) -> Vec<&Employee> {
        self.collect_bucket(&self.by_name, name, true)
    }

    fn indexed_by_role(&self, role: &str) -> Vec<&Employee> {
        self.collect_bucket(&self.by_role, role, true)
    }

    fn list_active(&self) -> Vec<&Employee> {
        self.insertion
            .values()
            .filter_map(|id| self.by_id.get(id))
            .map(|slot| &slot.employee)
            .filter(|employee| employee.is_active())
            .collect()
    }

    fn list_ordered_by_id(&self) -> Vec<&Employee> {
        self.ordered
            .iter()
            .filter_map(|id| self.by_id.get(id))
            .map(|slot| &slot.employee)
            .filter(|employee| employee.is_active())
            .collect()
    }

    fn len(&self) -> usize {
        self.by_id.len()
    }

    fn active_len(&self) -> usize {
        self.by_id
            .values()
            .filter(|slot| slot.employee.is_active())
            .count()
    }

    fn reusable_ids(&self) -> Vec<EmployeeId> {
        self.reuse_pool.snapshot()
    }

    fn name_key_count(&self) -> usize {
        self.by_name.len()
    }

    fn role_key_count(&self) -> usize {
        self.by_role.len()
    }
}

fn bucket_insert(index: &mut HashMap<String, BTreeSet<EmployeeId>>, key: String, id: EmployeeId) {
    index.entry(key).or_default().insert(id);
}

fn bucket_remove(index: &mut HashMap<String, BTreeSet<EmployeeId>>, key: &str, id: EmployeeId) {
    if let Some(bucket) = index.get_mut(key) {
        bucket.remove(&id);
        if bucket.is_empty() {
            index.remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        normalize_index_key, EmployeeRegistry, InMemoryEmployeeRegistry, RegistryError,
        RegistryOptions, ReusePool, MAX_FIRST_ID,
    };
    use crate::model::employee::EmployeeId;

    fn assert_consistent(registry: &InMemoryEmployeeRegistry) {
        assert_eq!(registry.ordered.len(), registry.by_id.len());
        assert_eq!(registry.insertion.len(), registry.by_id.len());
        for (id, slot) in &registry.by_id {
            assert_eq!(slot.employee.id(), *id);
            assert!(registry.ordered.contains(id));
            assert_eq!(registry.insertion.get(&slot.seq), Some(id));
            let name_key = normalize_index_key(slot.employee.name());
            assert!(registry.by_name[&name_key].contains(id));
            let role_key = normalize_index_key(slot.employee.role());
            assert!(registry.by_role[&role_key].contains(id));
            if slot.employee.is_active() {
                assert!(!registry.reuse_pool.members.contains(id));
            }
        }
        let indexed: usize = registry.by_name.values().map(|bucket| bucket.len()).sum();
        assert_eq!(indexed, registry.by_id.len());
        assert_eq!(registry.reuse_pool.queue.len(), registry.reuse_pool.members.len());
    }

    #[test]
    fn normalize_index_key_folds_case_and_whitespace() {
        assert_eq!(normalize_index_key("  Mary   Ann\tLee "), "mary ann lee");
        assert_eq!(normalize_index_key("DEVELOPER"), "developer");
    }

    #[test]
    fn reuse_pool_ignores_duplicate_release() {
        let mut pool = ReusePool::default();
        pool.release(7);
        pool.release(8);
        pool.release(7);
        assert_eq!(pool.snapshot(), vec![7, 8]);

        assert!(pool.reclaim(7));
        assert!(!pool.reclaim(7));
        assert_eq!(pool.take(), Some(8));
        assert_eq!(pool.take(), None);
    }

    #[test]
    fn indexes_stay_consistent_across_mixed_operations() {
        let mut registry = InMemoryEmployeeRegistry::new();
        let alice = registry.add("Alice", "Developer", 70_000.0);
        let bob = registry.add("Bob", "Designer", 65_000.0);
        let charlie = registry.add("Charlie", "Manager", 90_000.0);
        assert_consistent(&registry);

        registry.soft_delete(bob).unwrap();
        registry.hard_delete(charlie).unwrap();
        assert_consistent(&registry);

        registry.rename(alice, "Alicia").unwrap();
        registry.reassign_role(alice, "Lead").unwrap();
        assert_consistent(&registry);

        let reused = registry.add("Dana", "Developer", 60_000.0);
        assert_eq!(reused, bob);
        assert_consistent(&registry);

        let reused_again = registry.add("Eve", "Tester", 55_000.0);
        assert_eq!(reused_again, charlie);
        assert_consistent(&registry);
    }

    #[test]
    fn hard_delete_after_soft_delete_releases_id_once() {
        let mut registry = InMemoryEmployeeRegistry::new();
        let id = registry.add("Bob", "Designer", 65_000.0);
        registry.soft_delete(id).unwrap();
        registry.hard_delete(id).unwrap();

        assert_eq!(registry.reusable_ids(), vec![id]);
        assert_consistent(&registry);
    }

    #[test]
    fn first_id_follows_options() {
        let mut registry = InMemoryEmployeeRegistry::with_options(RegistryOptions { first_id: 1 });
        assert_eq!(registry.add("Alice", "Developer", 1.0), 1);
        assert_eq!(registry.add("Bob", "Designer", 1.0), 2);
    }

    #[test]
    fn oversized_first_id_is_clamped_and_add_keeps_counting() {
        let mut registry = InMemoryEmployeeRegistry::with_options(RegistryOptions {
            first_id: EmployeeId::MAX,
        });
        assert_eq!(registry.add("Alice", "Developer", 1.0), MAX_FIRST_ID);
        assert_eq!(registry.add("Bob", "Designer", 1.0), MAX_FIRST_ID + 1);
        assert_consistent(&registry);
    }

    #[test]
    fn errors_report_target_id_and_code() {
        let mut registry = InMemoryEmployeeRegistry::new();
        let err = registry.soft_delete(42).unwrap_err();
        assert_eq!(err, RegistryError::NotFound(42));
        assert_eq!(err.id(), 42);
        assert_eq!(err.code(), "not_found");
        assert_eq!(err.to_string(), "employee not found: 42");
    }
}
