/// ObjectCategoryManager - one per category per context.
///
/// Wraps the (possibly shared) NameTable of its category and keeps the
/// owning context's bindings for that category. All driver traffic of the
/// four canonical operations (gen, delete, bind, is-object) goes through here.

use std::sync::Arc;
use rustc_hash::{FxHashMap, FxHashSet};
use crate::category::{Category, CategoryFlags};
use crate::driver::{lock_driver, SharedDriver};
use crate::error::{Error, Result};
use crate::names::{ApplicationName, DriverName, GLenum};
use crate::stats::StatsTracker;
use crate::{glvirt_bail, glvirt_debug, glvirt_trace, glvirt_warn};
use super::name_table::{read_table, write_table, SharedNameTable};

pub struct ObjectCategoryManager {
    category: Category,
    flags: CategoryFlags,
    table: SharedNameTable,
    /// Current binding per target in the owning context
    bindings: FxHashMap<GLenum, ApplicationName>,
    stats: Arc<StatsTracker>,
}

impl ObjectCategoryManager {
    pub(crate) fn new(
        category: Category,
        flags: CategoryFlags,
        table: SharedNameTable,
        stats: Arc<StatsTracker>,
    ) -> Self {
        Self {
            category,
            flags,
            table,
            bindings: FxHashMap::default(),
            stats,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn flags(&self) -> CategoryFlags {
        self.flags
    }

    /// The name table backing this manager (shared or private)
    pub fn table(&self) -> &SharedNameTable {
        &self.table
    }

    // ===== GEN =====

    /// Reserve `count` application names (lazy: no driver call)
    pub fn gen(&mut self, count: usize) -> Result<Vec<ApplicationName>> {
        let names = write_table(&self.table)?.allocate(count)?;
        self.stats.add_generated(names.len());
        Ok(names)
    }

    // ===== DELETE =====

    /// Delete a batch of names
    ///
    /// Targets of the owning context bound to a deleted name are reset to 0
    /// (on the driver too when the category asks for it) before the driver
    /// objects are destroyed. Unknown, already deleted and 0 names are ignored.
    pub fn delete(&mut self, driver: &SharedDriver, names: &[ApplicationName]) -> Result<()> {
        let doomed: FxHashSet<ApplicationName> = names.iter()
            .copied()
            .filter(|name| !name.is_none())
            .collect();
        if doomed.is_empty() {
            return Ok(());
        }

        // Table lock held across unbind + destroy: no other context can
        // realize or rebind a doomed name in between
        let mut table = write_table(&self.table)?;
        let mut driver = lock_driver(driver)?;

        let mut bound_targets: Vec<GLenum> = self.bindings.iter()
            .filter(|(_, name)| doomed.contains(name))
            .map(|(target, _)| *target)
            .collect();
        bound_targets.sort();

        for target in bound_targets {
            if self.flags.contains(CategoryFlags::UNBIND_ON_DELETE) {
                driver.bind(self.category, target, DriverName::NONE)?;
                self.stats.add_bind();
            }
            self.bindings.remove(&target);
            glvirt_debug!("glvirt::ObjectCategoryManager", "{}: target {:#06x} unbound before delete",
                self.category.name(), target);
        }

        let destroyed = table.release(names, &mut *driver)?;
        self.stats.add_destroyed(destroyed);
        glvirt_trace!("glvirt::ObjectCategoryManager", "{}: deleted {:?}", self.category.name(), names);
        Ok(())
    }

    // ===== BIND =====

    /// Bind an application name to a target
    ///
    /// The name is realized on the driver if this is its first use. Binding 0
    /// always succeeds and clears the binding. A name that was never
    /// generated is rejected under STRICT_NAMES and adopted otherwise.
    pub fn bind(&mut self, driver: &SharedDriver, target: GLenum, name: ApplicationName) -> Result<()> {
        if name.is_none() {
            lock_driver(driver)?.bind(self.category, target, DriverName::NONE)?;
            self.stats.add_bind();
            self.bindings.remove(&target);
            return Ok(());
        }

        let mut table = write_table(&self.table)?;
        let adopted = !table.is_live(name);
        if adopted {
            if self.flags.contains(CategoryFlags::STRICT_NAMES) {
                glvirt_bail!("glvirt::ObjectCategoryManager", Error::UnknownName {
                    category: self.category,
                    name,
                });
            }
            table.adopt(name);
            glvirt_debug!("glvirt::ObjectCategoryManager", "{}: adopted application-chosen name {}",
                self.category.name(), name);
        }

        let mut driver = lock_driver(driver)?;
        let was_realized = table.is_realized(name);
        let bound = table.resolve(name, &mut *driver).and_then(|driver_name| {
            if !was_realized {
                self.stats.add_realized();
            }
            driver.bind(self.category, target, driver_name).map(|_| driver_name)
        });
        let driver_name = match bound {
            Ok(driver_name) => driver_name,
            Err(err) => {
                // A name adopted by this call must not outlive the failed bind
                if adopted {
                    match table.release(&[name], &mut *driver) {
                        Ok(destroyed) => self.stats.add_destroyed(destroyed),
                        Err(cleanup) => glvirt_warn!("glvirt::ObjectCategoryManager",
                            "{}: could not drop adopted name {}: {}", self.category.name(), name, cleanup),
                    }
                }
                return Err(err);
            }
        };
        self.stats.add_bind();
        self.bindings.insert(target, name);
        glvirt_trace!("glvirt::ObjectCategoryManager", "{}: bound {} ({}) to {:#06x}",
            self.category.name(), name, driver_name, target);
        Ok(())
    }

    // ===== QUERIES =====

    /// glIs* semantics
    ///
    /// True if the name is live and, when the category requires it, has
    /// been realized on the driver at least once. Always false for 0.
    pub fn is_object(&self, name: ApplicationName) -> Result<bool> {
        if name.is_none() {
            return Ok(false);
        }
        let table = read_table(&self.table)?;
        if self.flags.contains(CategoryFlags::REALIZE_FOR_IS_OBJECT) {
            Ok(table.is_realized(name))
        } else {
            Ok(table.is_live(name))
        }
    }

    /// Application name currently bound to `target` in the owning context
    pub fn binding(&self, target: GLenum) -> ApplicationName {
        self.bindings.get(&target).copied().unwrap_or(ApplicationName::NONE)
    }

    /// Number of targets with a non-default binding
    pub fn bound_target_count(&self) -> usize {
        self.bindings.len()
    }

    /// Forget every binding (context teardown, no driver call)
    pub(crate) fn clear_bindings(&mut self) {
        self.bindings.clear();
    }
}

#[cfg(test)]
#[path = "object_manager_tests.rs"]
mod tests;
