/// Virtualizer - entry point of the name virtualization layer.
///
/// Holds what every context of one interception layer instance shares: the
/// driver, the validated category table and the statistics counters. Contexts
/// are created here and owned by the caller.

use std::sync::{Arc, Mutex};
use crate::config::VirtualizerConfig;
use crate::context::{Context, SharingGroup};
use crate::driver::{Driver, SharedDriver};
use crate::error::{Error, Result};
use crate::stats::{StatsTracker, VirtualizerStats};
use crate::{glvirt_bail, glvirt_info};

/// State shared by a virtualizer and all of its contexts
pub(crate) struct Runtime {
    pub(crate) driver: SharedDriver,
    pub(crate) config: VirtualizerConfig,
    pub(crate) stats: Arc<StatsTracker>,
}

pub struct Virtualizer {
    runtime: Arc<Runtime>,
}

impl Virtualizer {
    /// Create a virtualizer that owns `driver`
    pub fn new<D: Driver + 'static>(driver: D, config: VirtualizerConfig) -> Result<Self> {
        Self::with_driver(Arc::new(Mutex::new(driver)), config)
    }

    /// Create a virtualizer over an already shared driver
    pub fn with_driver(driver: SharedDriver, config: VirtualizerConfig) -> Result<Self> {
        config.validate()?;
        glvirt_info!("glvirt::Virtualizer", "virtualizer initialized ({} categories)",
            config.categories.len());
        Ok(Self {
            runtime: Arc::new(Runtime {
                driver,
                config,
                stats: Arc::new(StatsTracker::new()),
            }),
        })
    }

    /// Create a context, optionally sharing objects with an existing one
    ///
    /// Without `share_with` the context starts a new sharing group of its own.
    pub fn create_context(&self, share_with: Option<&Context>) -> Result<Context> {
        let group = match share_with {
            Some(other) => {
                if !Arc::ptr_eq(other.runtime(), &self.runtime) {
                    glvirt_bail!("glvirt::Virtualizer", Error::SharingViolation(
                        "cannot share with a context of another virtualizer".to_string()
                    ));
                }
                other.sharing_group().clone()
            }
            None => Arc::new(SharingGroup::new()),
        };
        Context::new(self.runtime.clone(), group)
    }

    pub fn config(&self) -> &VirtualizerConfig {
        &self.runtime.config
    }

    pub fn driver(&self) -> &SharedDriver {
        &self.runtime.driver
    }

    pub fn stats(&self) -> VirtualizerStats {
        self.runtime.stats.snapshot()
    }
}

#[cfg(test)]
#[path = "virtualizer_tests.rs"]
mod tests;
