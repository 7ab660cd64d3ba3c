/// Mock Driver for unit tests (no GL context required)
///
/// Hands out driver names starting at 100 so they never coincide with the
/// application names a fresh table issues, records every call in order, and
/// can be told to fail any operation.

use rustc_hash::{FxHashMap, FxHashSet};
use crate::category::Category;
use crate::error::{Error, Result};
use crate::names::{DriverName, GLenum};
use super::driver::Driver;
use super::framebuffer::FramebufferTextureCall;

/// First name handed out by a fresh MockDriver
pub const FIRST_DRIVER_NAME: u32 = 100;

/// One recorded driver call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverCall {
    Create(Category, DriverName),
    Destroy(Category, Vec<DriverName>),
    Bind(Category, GLenum, DriverName),
    FramebufferTexture(FramebufferTextureCall<DriverName>),
    AttachmentParameter {
        target: GLenum,
        attachment: GLenum,
        pname: GLenum,
    },
}

pub struct MockDriver {
    pub calls: Vec<DriverCall>,
    next_name: u32,
    live: FxHashSet<(Category, DriverName)>,
    attachment_params: FxHashMap<(GLenum, GLenum, GLenum), i32>,
    pub fail_create: bool,
    pub fail_destroy: bool,
    pub fail_bind: bool,
    /// Return name 0 from create (a broken driver)
    pub create_returns_zero: bool,
}

impl MockDriver {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            next_name: FIRST_DRIVER_NAME,
            live: FxHashSet::default(),
            attachment_params: FxHashMap::default(),
            fail_create: false,
            fail_destroy: false,
            fail_bind: false,
            create_returns_zero: false,
        }
    }

    /// Mock whose first created object is `first`
    pub fn starting_at(first: u32) -> Self {
        Self {
            next_name: first,
            ..Self::new()
        }
    }

    /// Answer glGetFramebufferAttachmentParameteriv(target, attachment, pname) with `value`
    pub fn set_attachment_parameter(&mut self, target: GLenum, attachment: GLenum, pname: GLenum, value: i32) {
        self.attachment_params.insert((target, attachment, pname), value);
    }

    /// Whether the driver currently holds this object
    pub fn is_live(&self, category: Category, name: DriverName) -> bool {
        self.live.contains(&(category, name))
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn creates(&self) -> usize {
        self.calls.iter().filter(|c| matches!(c, DriverCall::Create(..))).count()
    }

    pub fn binds(&self) -> Vec<(Category, GLenum, DriverName)> {
        self.calls.iter()
            .filter_map(|c| match c {
                DriverCall::Bind(category, target, name) => Some((*category, *target, *name)),
                _ => None,
            })
            .collect()
    }

    pub fn destroyed(&self) -> Vec<DriverName> {
        self.calls.iter()
            .filter_map(|c| match c {
                DriverCall::Destroy(_, names) => Some(names.clone()),
                _ => None,
            })
            .flatten()
            .collect()
    }
}

impl Driver for MockDriver {
    fn create(&mut self, category: Category) -> Result<DriverName> {
        if self.fail_create {
            return Err(Error::DriverFailure(format!("create {} failed", category.name())));
        }
        if self.create_returns_zero {
            return Ok(DriverName::NONE);
        }
        let name = DriverName(self.next_name);
        self.next_name += 1;
        self.live.insert((category, name));
        self.calls.push(DriverCall::Create(category, name));
        Ok(name)
    }

    fn destroy(&mut self, category: Category, names: &[DriverName]) -> Result<()> {
        if self.fail_destroy {
            return Err(Error::DriverFailure(format!("destroy {} failed", category.name())));
        }
        for name in names {
            self.live.remove(&(category, *name));
        }
        self.calls.push(DriverCall::Destroy(category, names.to_vec()));
        Ok(())
    }

    fn bind(&mut self, category: Category, target: GLenum, name: DriverName) -> Result<()> {
        if self.fail_bind {
            return Err(Error::DriverFailure(format!("bind {} failed", category.name())));
        }
        self.calls.push(DriverCall::Bind(category, target, name));
        Ok(())
    }

    fn framebuffer_texture(&mut self, call: &FramebufferTextureCall<DriverName>) -> Result<()> {
        self.calls.push(DriverCall::FramebufferTexture(*call));
        Ok(())
    }

    fn framebuffer_attachment_parameter(
        &mut self,
        target: GLenum,
        attachment: GLenum,
        pname: GLenum,
    ) -> Result<i32> {
        self.calls.push(DriverCall::AttachmentParameter { target, attachment, pname });
        Ok(self.attachment_params.get(&(target, attachment, pname)).copied().unwrap_or(0))
    }
}

#[cfg(test)]
#[path = "mock_driver_tests.rs"]
mod tests;
