/// NameTable - bidirectional ApplicationName ↔ DriverName mapping for one
/// category within one sharing scope.
///
/// Names are allocated lazily: `allocate` only reserves application names,
/// the driver object is created by the first `resolve` of that name.
///
/// Invariants:
/// - the mapping is a bijection over realized live entries;
/// - application name 0 is never a key and always resolves to driver name 0;
/// - application names come from a monotonic counter and are never handed
///   out twice while the table lives.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use rustc_hash::{FxHashMap, FxHashSet};
use crate::category::Category;
use crate::driver::Driver;
use crate::error::{Error, Result};
use crate::names::{ApplicationName, DriverName};
use crate::utils::NameAllocator;
use crate::{glvirt_bail, glvirt_err, glvirt_trace};

/// Name table shared between the contexts of a sharing group
///
/// Mutating operations (allocate, adopt, resolve, release) take the write
/// lock; lookups (translate_back, is_live, driver_name) the read lock.
pub type SharedNameTable = Arc<RwLock<NameTable>>;

pub struct NameTable {
    category: Category,
    allocator: NameAllocator,
    /// Live application names; None until realized on the driver
    entries: FxHashMap<ApplicationName, Option<DriverName>>,
    /// Reverse mapping of realized entries
    driver_to_app: FxHashMap<DriverName, ApplicationName>,
}

impl NameTable {
    /// Create an empty table for a category
    pub fn new(category: Category) -> Self {
        Self {
            category,
            allocator: NameAllocator::new(),
            entries: FxHashMap::default(),
            driver_to_app: FxHashMap::default(),
        }
    }

    /// Create an empty table wrapped for sharing
    pub fn new_shared(category: Category) -> SharedNameTable {
        Arc::new(RwLock::new(Self::new(category)))
    }

    pub fn category(&self) -> Category {
        self.category
    }

    // ===== ALLOCATION =====

    /// Reserve `count` fresh application names (no driver call)
    ///
    /// On exhaustion nothing is reserved and `OutOfNames` is returned.
    pub fn allocate(&mut self, count: usize) -> Result<Vec<ApplicationName>> {
        let mut names = Vec::with_capacity(count);
        for _ in 0..count {
            let entries = &self.entries;
            let id = self.allocator.alloc_with(|id| entries.contains_key(&ApplicationName(id)));
            match id {
                Some(id) => {
                    let name = ApplicationName(id);
                    self.entries.insert(name, None);
                    names.push(name);
                }
                None => {
                    for name in &names {
                        self.entries.remove(name);
                    }
                    glvirt_bail!("glvirt::NameTable", Error::OutOfNames(self.category));
                }
            }
        }

        glvirt_trace!("glvirt::NameTable", "{}: allocated {:?}", self.category.name(), names);
        Ok(names)
    }

    /// Register an application-chosen name that was never generated
    ///
    /// Returns true if the name was newly adopted, false if it was already
    /// live (or is 0).
    pub fn adopt(&mut self, name: ApplicationName) -> bool {
        if name.is_none() || self.entries.contains_key(&name) {
            return false;
        }
        self.entries.insert(name, None);
        glvirt_trace!("glvirt::NameTable", "{}: adopted {}", self.category.name(), name);
        true
    }

    // ===== TRANSLATION =====

    /// Translate an application name to its driver name, creating the
    /// driver object on first use
    ///
    /// # Errors
    ///
    /// - `UnknownName` if the name was never allocated or has been deleted
    /// - `DriverFailure` if the driver fails, or returns 0 or a name already mapped
    pub fn resolve(&mut self, name: ApplicationName, driver: &mut dyn Driver) -> Result<DriverName> {
        if name.is_none() {
            return Ok(DriverName::NONE);
        }

        match self.entries.get(&name).copied() {
            None => Err(Error::UnknownName { category: self.category, name }),
            Some(Some(driver_name)) => Ok(driver_name),
            Some(None) => {
                let driver_name = driver.create(self.category)?;
                if driver_name.is_none() {
                    glvirt_bail!("glvirt::NameTable", Error::DriverFailure(format!(
                        "driver created {} object with name 0", self.category.name()
                    )));
                }
                if let Some(existing) = self.driver_to_app.get(&driver_name) {
                    glvirt_bail!("glvirt::NameTable", Error::DriverFailure(format!(
                        "driver reused {} name {} still mapped to {}",
                        self.category.name(), driver_name, existing
                    )));
                }

                self.entries.insert(name, Some(driver_name));
                self.driver_to_app.insert(driver_name, name);
                glvirt_trace!("glvirt::NameTable", "{}: realized {} as {}",
                    self.category.name(), name, driver_name);
                Ok(driver_name)
            }
        }
    }

    /// Reverse lookup: the application name mapped to a driver name
    ///
    /// Driver name 0 and unmapped names yield None.
    pub fn translate_back(&self, driver_name: DriverName) -> Option<ApplicationName> {
        if driver_name.is_none() {
            return None;
        }
        self.driver_to_app.get(&driver_name).copied()
    }

    /// Driver name of a realized live name, without creating anything
    ///
    /// Name 0 maps to driver name 0.
    pub fn driver_name(&self, name: ApplicationName) -> Option<DriverName> {
        if name.is_none() {
            return Some(DriverName::NONE);
        }
        self.entries.get(&name).copied().flatten()
    }

    // ===== STATE QUERIES =====

    /// Whether the name is currently allocated (false for 0 and never-issued names)
    pub fn is_live(&self, name: ApplicationName) -> bool {
        !name.is_none() && self.entries.contains_key(&name)
    }

    /// Whether the name is live and has a driver counterpart
    pub fn is_realized(&self, name: ApplicationName) -> bool {
        matches!(self.entries.get(&name), Some(Some(_)))
    }

    /// Number of live names
    pub fn live_count(&self) -> usize {
        self.entries.len()
    }

    /// Number of live names with a driver counterpart
    pub fn realized_count(&self) -> usize {
        self.driver_to_app.len()
    }

    /// Live names in ascending order
    pub fn live_names(&self) -> Vec<ApplicationName> {
        let mut names: Vec<ApplicationName> = self.entries.keys().copied().collect();
        names.sort();
        names
    }

    /// Whether this table ever issued a name (allocated or adopted)
    pub fn has_issued(&self) -> bool {
        !self.allocator.is_pristine() || !self.entries.is_empty()
    }

    // ===== RELEASE =====

    /// Delete a batch of names
    ///
    /// Realized names are destroyed on the driver in one call, then removed.
    /// Unknown, already deleted and 0 names are ignored. If the driver fails,
    /// the table is left untouched. Returns the number of driver objects
    /// destroyed.
    pub fn release(&mut self, names: &[ApplicationName], driver: &mut dyn Driver) -> Result<usize> {
        let mut doomed: Vec<ApplicationName> = Vec::with_capacity(names.len());
        let mut driver_names: Vec<DriverName> = Vec::new();
        let mut seen = FxHashSet::default();

        for name in names {
            if name.is_none() || !seen.insert(*name) {
                continue;
            }
            match self.entries.get(name) {
                Some(Some(driver_name)) => {
                    doomed.push(*name);
                    driver_names.push(*driver_name);
                }
                Some(None) => doomed.push(*name),
                None => {}
            }
        }

        if !driver_names.is_empty() {
            driver.destroy(self.category, &driver_names)
                .map_err(|e| glvirt_err!("glvirt::NameTable", e))?;
        }

        for name in &doomed {
            if let Some(Some(driver_name)) = self.entries.remove(name) {
                self.driver_to_app.remove(&driver_name);
            }
        }

        glvirt_trace!("glvirt::NameTable", "{}: released {:?} (driver {:?})",
            self.category.name(), doomed, driver_names);
        Ok(driver_names.len())
    }

    /// Release every live name and restart the allocator (table teardown)
    pub fn release_all(&mut self, driver: &mut dyn Driver) -> Result<usize> {
        let mut driver_names: Vec<DriverName> = self.driver_to_app.keys().copied().collect();
        driver_names.sort();

        if !driver_names.is_empty() {
            driver.destroy(self.category, &driver_names)
                .map_err(|e| glvirt_err!("glvirt::NameTable", e))?;
        }

        self.entries.clear();
        self.driver_to_app.clear();
        self.allocator.reset();
        Ok(driver_names.len())
    }

    #[cfg(test)]
    pub(crate) fn allocator_mut(&mut self) -> &mut NameAllocator {
        &mut self.allocator
    }
}

// ===== LOCK HELPERS =====

/// Take the shared table's read lock, mapping poisoning to BackendError
pub(crate) fn read_table(table: &SharedNameTable) -> Result<RwLockReadGuard<'_, NameTable>> {
    table.read()
        .map_err(|_| glvirt_err!("glvirt::NameTable", Error::BackendError("NameTable lock poisoned".to_string())))
}

/// Take the shared table's write lock, mapping poisoning to BackendError
pub(crate) fn write_table(table: &SharedNameTable) -> Result<RwLockWriteGuard<'_, NameTable>> {
    table.write()
        .map_err(|_| glvirt_err!("glvirt::NameTable", Error::BackendError("NameTable lock poisoned".to_string())))
}

#[cfg(test)]
#[path = "name_table_tests.rs"]
mod tests;
