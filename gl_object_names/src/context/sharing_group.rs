/// SharingGroup - the contexts that share one NameTable per shareable category.
///
/// Membership and the per-category tables live behind one mutex. Tables are
/// created on first join and torn down (driver objects released) when their
/// last member leaves; teardown happens while the membership lock is held, so
/// a context joining concurrently either sees the old table fully alive or
/// gets a brand new one.

use std::sync::{Mutex, MutexGuard};
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use crate::category::Category;
use crate::driver::{lock_driver, SharedDriver};
use crate::error::{Error, Result};
use crate::objects::name_table::write_table;
use crate::objects::{NameTable, SharedNameTable};
use crate::{glvirt_bail, glvirt_debug, glvirt_err};

// ===== SLOT MAP KEY =====

new_key_type! {
    /// Membership of one context in a SharingGroup
    pub struct MemberKey;
}

/// Categories a member currently holds a table reference for
#[derive(Debug, Default)]
struct Member {
    joined: Vec<Category>,
}

struct GroupTable {
    table: SharedNameTable,
    refs: u32,
}

struct GroupState {
    members: SlotMap<MemberKey, Member>,
    tables: FxHashMap<Category, GroupTable>,
}

pub struct SharingGroup {
    state: Mutex<GroupState>,
}

impl SharingGroup {
    /// Create an empty group
    pub fn new() -> Self {
        Self {
            state: Mutex::new(GroupState {
                members: SlotMap::with_key(),
                tables: FxHashMap::default(),
            }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, GroupState>> {
        self.state.lock()
            .map_err(|_| glvirt_err!("glvirt::SharingGroup", Error::BackendError("SharingGroup lock poisoned".to_string())))
    }

    /// Register a new member (no table reference yet)
    pub fn add_member(&self) -> Result<MemberKey> {
        let mut state = self.lock()?;
        Ok(state.members.insert(Member::default()))
    }

    /// Return the group's table for `category`, creating it on first join
    ///
    /// Joining a category twice returns the same table without taking a
    /// second reference.
    pub fn join(&self, member: MemberKey, category: Category) -> Result<SharedNameTable> {
        let mut state = self.lock()?;
        let GroupState { members, tables } = &mut *state;

        let Some(entry) = members.get_mut(member) else {
            glvirt_bail!("glvirt::SharingGroup", Error::SharingViolation(format!(
                "{:?} is not a member of this sharing group", member
            )));
        };

        let group_table = tables.entry(category).or_insert_with(|| {
            glvirt_debug!("glvirt::SharingGroup", "created shared {} table", category.name());
            GroupTable {
                table: NameTable::new_shared(category),
                refs: 0,
            }
        });

        if !entry.joined.contains(&category) {
            entry.joined.push(category);
            group_table.refs += 1;
        }
        Ok(group_table.table.clone())
    }

    /// Drop `member`'s reference to one category's table
    ///
    /// When the last reference goes, every live driver object of the table
    /// is released. Returns the number of driver objects destroyed if the
    /// table was torn down. If the driver fails, the reference is kept.
    pub fn release(&self, member: MemberKey, category: Category, driver: &SharedDriver) -> Result<Option<usize>> {
        let mut state = self.lock()?;
        Self::release_locked(&mut state, member, category, driver)
    }

    fn release_locked(
        state: &mut GroupState,
        member: MemberKey,
        category: Category,
        driver: &SharedDriver,
    ) -> Result<Option<usize>> {
        let Some(position) = state.members.get(member)
            .and_then(|entry| entry.joined.iter().position(|c| *c == category))
        else {
            return Ok(None);
        };

        // Last holder: tear the table down before touching the bookkeeping,
        // so a failing driver leaves membership and table in place for a retry
        let mut destroyed = None;
        if let Some(group_table) = state.tables.get(&category) {
            if group_table.refs == 1 {
                let mut table = write_table(&group_table.table)?;
                let mut driver = lock_driver(driver)?;
                destroyed = Some(table.release_all(&mut *driver)?);
            }
        }

        if let Some(entry) = state.members.get_mut(member) {
            entry.joined.remove(position);
        }
        match destroyed {
            Some(count) => {
                state.tables.remove(&category);
                glvirt_debug!("glvirt::SharingGroup", "tore down shared {} table ({} driver objects)",
                    category.name(), count);
            }
            None => {
                if let Some(group_table) = state.tables.get_mut(&category) {
                    group_table.refs -= 1;
                }
            }
        }
        Ok(destroyed)
    }

    /// Remove a member, releasing its remaining table references in
    /// `Category::TEARDOWN_ORDER`
    ///
    /// Every category is attempted even if one teardown fails; the first
    /// error is returned and the member stays registered with the tables
    /// that could not be torn down, so `leave` can be retried. Otherwise
    /// returns the number of driver objects destroyed.
    pub fn leave(&self, member: MemberKey, driver: &SharedDriver) -> Result<usize> {
        let mut state = self.lock()?;
        let mut first_error = None;
        let mut destroyed = 0;

        for category in Category::TEARDOWN_ORDER {
            match Self::release_locked(&mut state, member, category, driver) {
                Ok(count) => destroyed += count.unwrap_or(0),
                Err(err) => {
                    first_error.get_or_insert(err);
                }
            }
        }
        match first_error {
            Some(err) => Err(err),
            None => {
                state.members.remove(member);
                Ok(destroyed)
            }
        }
    }

    // ===== QUERIES =====

    pub fn member_count(&self) -> usize {
        self.lock().map(|s| s.members.len()).unwrap_or(0)
    }

    /// Number of members holding the category's table (0 if no table)
    pub fn table_refs(&self, category: Category) -> u32 {
        self.lock()
            .ok()
            .and_then(|s| s.tables.get(&category).map(|t| t.refs))
            .unwrap_or(0)
    }

    pub fn contains(&self, member: MemberKey) -> bool {
        self.lock().map(|s| s.members.contains_key(member)).unwrap_or(false)
    }
}

impl Default for SharingGroup {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "sharing_group_tests.rs"]
mod tests;
