/// Context - one rendering context as seen by the interception layer.
///
/// Owns one ObjectCategoryManager per category (indexed by
/// `Category::index()`) and routes the canonical operations to them.
/// Shareable categories use the tables of the context's SharingGroup;
/// the others get a table private to the context.

use std::sync::Arc;
use crate::category::{Category, CategoryFlags};
use crate::driver::{lock_driver, SharedDriver};
use crate::error::{Error, Result};
use crate::names::{ApplicationName, DriverName, GLenum};
use crate::objects::name_table::{read_table, write_table};
use crate::objects::{NameTable, ObjectCategoryManager};
use crate::stats::StatsTracker;
use crate::virtualizer::Runtime;
use crate::{glvirt_bail, glvirt_debug, glvirt_error, glvirt_info, glvirt_warn};
use super::call_guard::CallGuard;
use super::sharing_group::{MemberKey, SharingGroup};

pub struct Context {
    runtime: Arc<Runtime>,
    group: Arc<SharingGroup>,
    member: MemberKey,
    managers: Vec<ObjectCategoryManager>,
    destroyed: bool,
}

impl Context {
    /// Create a context as a new member of `group`
    pub(crate) fn new(runtime: Arc<Runtime>, group: Arc<SharingGroup>) -> Result<Self> {
        let member = group.add_member()?;
        match Self::build_managers(&runtime, &group, member) {
            Ok(managers) => {
                glvirt_info!("glvirt::Context", "context created ({} members in sharing group)",
                    group.member_count());
                Ok(Self {
                    runtime,
                    group,
                    member,
                    managers,
                    destroyed: false,
                })
            }
            Err(err) => {
                Self::abandon_member(&group, member, &runtime.driver);
                Err(err)
            }
        }
    }

    fn build_managers(
        runtime: &Arc<Runtime>,
        group: &SharingGroup,
        member: MemberKey,
    ) -> Result<Vec<ObjectCategoryManager>> {
        let mut managers = Vec::with_capacity(Category::COUNT);
        for category in Category::ALL {
            let Some(config) = runtime.config.category(category) else {
                glvirt_bail!("glvirt::Context", Error::InitializationFailed(format!(
                    "no configuration for category {}", category.name()
                )));
            };
            let table = if config.flags.contains(CategoryFlags::SHAREABLE) {
                group.join(member, category)?
            } else {
                NameTable::new_shared(category)
            };
            managers.push(ObjectCategoryManager::new(
                category,
                config.flags,
                table,
                runtime.stats.clone(),
            ));
        }
        Ok(managers)
    }

    // ===== ACCESSORS =====

    pub fn manager(&self, category: Category) -> &ObjectCategoryManager {
        &self.managers[category.index()]
    }

    pub fn manager_mut(&mut self, category: Category) -> &mut ObjectCategoryManager {
        &mut self.managers[category.index()]
    }

    pub fn sharing_group(&self) -> &Arc<SharingGroup> {
        &self.group
    }

    pub(crate) fn runtime(&self) -> &Arc<Runtime> {
        &self.runtime
    }

    pub(crate) fn driver(&self) -> &SharedDriver {
        &self.runtime.driver
    }

    pub(crate) fn stats(&self) -> &StatsTracker {
        &self.runtime.stats
    }

    fn is_shareable(&self, category: Category) -> bool {
        self.manager(category).flags().contains(CategoryFlags::SHAREABLE)
    }

    // ===== CANONICAL OPERATIONS =====

    /// glGen*: reserve `count` application names
    pub fn gen(&mut self, category: Category, count: usize) -> Result<Vec<ApplicationName>> {
        let _guard = CallGuard::enter("gen")?;
        self.managers[category.index()].gen(count)
    }

    /// glDelete*: delete a batch of names, ignoring unknown ones and 0
    pub fn delete(&mut self, category: Category, names: &[ApplicationName]) -> Result<()> {
        let _guard = CallGuard::enter("delete")?;
        self.managers[category.index()].delete(&self.runtime.driver, names)
    }

    /// glBind*: bind `name` (or 0) to `target`
    pub fn bind(&mut self, category: Category, target: GLenum, name: ApplicationName) -> Result<()> {
        let _guard = CallGuard::enter("bind")?;
        self.managers[category.index()].bind(&self.runtime.driver, target, name)
    }

    /// glIs*
    pub fn is_object(&self, category: Category, name: ApplicationName) -> Result<bool> {
        let _guard = CallGuard::enter("is_object")?;
        self.manager(category).is_object(name)
    }

    /// Application name bound to `target` in this context (0 if none)
    pub fn binding(&self, category: Category, target: GLenum) -> ApplicationName {
        self.manager(category).binding(target)
    }

    // ===== TRANSLATION =====

    /// Driver name for `name`, creating the driver object on first use
    pub fn to_driver_name(&mut self, category: Category, name: ApplicationName) -> Result<DriverName> {
        let _guard = CallGuard::enter("to_driver_name")?;
        self.realize(category, name)
    }

    /// Application name that owns `driver_name` in this context's view
    pub fn to_app_name(&self, category: Category, driver_name: DriverName) -> Result<Option<ApplicationName>> {
        let _guard = CallGuard::enter("to_app_name")?;
        self.lookup_app_name(category, driver_name)
    }

    pub(crate) fn realize(&mut self, category: Category, name: ApplicationName) -> Result<DriverName> {
        if name.is_none() {
            return Ok(DriverName::NONE);
        }
        let mut table = write_table(self.managers[category.index()].table())?;
        let mut driver = lock_driver(&self.runtime.driver)?;
        let was_realized = table.is_realized(name);
        let driver_name = table.resolve(name, &mut *driver)?;
        if !was_realized {
            self.runtime.stats.add_realized();
        }
        Ok(driver_name)
    }

    pub(crate) fn lookup_app_name(&self, category: Category, driver_name: DriverName) -> Result<Option<ApplicationName>> {
        let table = read_table(self.manager(category).table())?;
        Ok(table.translate_back(driver_name))
    }

    // ===== SHARING =====

    /// True if both contexts are members of the same sharing group
    pub fn is_sharing_with(&self, other: &Context) -> bool {
        Arc::ptr_eq(&self.group, &other.group)
    }

    /// True if both contexts see the same table for `category`
    pub fn shares_table(&self, other: &Context, category: Category) -> bool {
        Arc::ptr_eq(self.manager(category).table(), other.manager(category).table())
    }

    /// Move this context into `other`'s sharing group
    ///
    /// Only allowed while the context has not diverged: it must be alone in
    /// its group and must not have issued names of any shareable category.
    pub fn share_with(&mut self, other: &Context) -> Result<()> {
        let _guard = CallGuard::enter("share_with")?;
        if self.is_sharing_with(other) {
            return Ok(());
        }
        if !Arc::ptr_eq(&self.runtime, &other.runtime) {
            glvirt_bail!("glvirt::Context", Error::SharingViolation(
                "contexts belong to different virtualizers".to_string()
            ));
        }
        if self.group.member_count() > 1 {
            glvirt_bail!("glvirt::Context", Error::SharingViolation(
                "context already shares objects with another context".to_string()
            ));
        }
        for category in Category::ALL {
            if self.is_shareable(category) && read_table(self.manager(category).table())?.has_issued() {
                glvirt_bail!("glvirt::Context", Error::SharingViolation(format!(
                    "context already generated private {} names", category.name()
                )));
            }
        }

        let member = other.group.add_member()?;
        let mut tables = Vec::new();
        for category in Category::ALL {
            if !self.is_shareable(category) {
                continue;
            }
            match other.group.join(member, category) {
                Ok(table) => tables.push((category, table)),
                Err(err) => {
                    Self::abandon_member(&other.group, member, &self.runtime.driver);
                    return Err(err);
                }
            }
        }

        // Nothing was issued in the old tables: leaving destroys no object
        if let Err(err) = self.group.leave(self.member, &self.runtime.driver) {
            Self::abandon_member(&other.group, member, &self.runtime.driver);
            return Err(err);
        }
        for (category, table) in tables {
            let flags = self.manager(category).flags();
            self.managers[category.index()] = ObjectCategoryManager::new(
                category,
                flags,
                table,
                self.runtime.stats.clone(),
            );
        }
        self.group = other.group.clone();
        self.member = member;
        glvirt_debug!("glvirt::Context", "context joined a sharing group ({} members)",
            self.group.member_count());
        Ok(())
    }

    /// Undo a membership taken by a call that is failing
    fn abandon_member(group: &SharingGroup, member: MemberKey, driver: &SharedDriver) {
        if let Err(err) = group.leave(member, driver) {
            glvirt_warn!("glvirt::Context", "could not leave sharing group after failure: {}", err);
        }
    }

    // ===== TEARDOWN =====

    /// Destroy the context, releasing its share of every table
    ///
    /// Objects of private tables, and of shared tables this context was the
    /// last holder of, are destroyed on the driver.
    ///
    /// Fails with `Error::Reentrant` when called from inside a driver
    /// callback on the same thread. The context then stays a member of its
    /// sharing group and its private objects are not destroyed.
    pub fn destroy(mut self) -> Result<()> {
        self.teardown()
    }

    fn teardown(&mut self) -> Result<()> {
        if self.destroyed {
            return Ok(());
        }
        let _guard = CallGuard::enter("destroy")?;
        self.destroyed = true;

        for manager in &mut self.managers {
            manager.clear_bindings();
        }

        let mut first_error = None;
        for category in Category::TEARDOWN_ORDER {
            let released = if self.is_shareable(category) {
                self.group.release(self.member, category, &self.runtime.driver)
                    .map(|destroyed| destroyed.unwrap_or(0))
            } else {
                self.release_private(category)
            };
            match released {
                Ok(destroyed) => self.runtime.stats.add_destroyed(destroyed),
                Err(err) => {
                    first_error.get_or_insert(err);
                }
            }
        }
        if let Err(err) = self.group.leave(self.member, &self.runtime.driver) {
            first_error.get_or_insert(err);
        }

        glvirt_info!("glvirt::Context", "context destroyed");
        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn release_private(&self, category: Category) -> Result<usize> {
        let mut table = write_table(self.manager(category).table())?;
        let mut driver = lock_driver(&self.runtime.driver)?;
        table.release_all(&mut *driver)
    }
}

/// Dropping a context inside a driver callback cannot tear it down (the
/// driver lock is held by the caller). The error is logged, the context's
/// membership stays in its group and its private driver objects leak.
impl Drop for Context {
    fn drop(&mut self) {
        if let Err(err) = self.teardown() {
            glvirt_error!("glvirt::Context", "context teardown failed: {}", err);
        }
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
