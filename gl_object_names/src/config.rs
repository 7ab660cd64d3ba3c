/// Static category table supplied when the virtualizer is created.
///
/// Each entry ties a category to the intercepted GL entry points that route
/// into it, the policy flags governing its names, and the driver entry points
/// the layer itself originates (the layer generates and deletes driver names
/// on its own schedule, never on the application's).

use rustc_hash::FxHashSet;
use crate::category::{Category, CategoryFlags};
use crate::error::{Error, Result};
use crate::glvirt_bail;

/// Configuration of one object category
#[derive(Debug, Clone)]
pub struct CategoryConfig {
    pub category: Category,
    pub flags: CategoryFlags,
    /// Intercepted entry points (core and extension-suffixed spellings)
    pub entry_points: &'static [&'static str],
    /// Driver entry points the layer calls itself to create/destroy names
    pub originates: &'static [&'static str],
}

impl CategoryConfig {
    /// Built-in configuration for a category
    pub fn builtin(category: Category) -> Self {
        match category {
            Category::Buffers => Self {
                category,
                flags: CategoryFlags::SHAREABLE
                    | CategoryFlags::REALIZE_FOR_IS_OBJECT
                    | CategoryFlags::UNBIND_ON_DELETE,
                entry_points: &[
                    "glGenBuffers", "glGenBuffersARB",
                    "glDeleteBuffers", "glDeleteBuffersARB",
                    "glBindBuffer", "glBindBufferARB",
                    "glIsBuffer", "glIsBufferARB",
                ],
                originates: &["glGenBuffers", "glDeleteBuffers"],
            },
            // Vertex arrays are container objects: never shared between contexts
            Category::VertexArrays => Self {
                category,
                flags: CategoryFlags::REALIZE_FOR_IS_OBJECT
                    | CategoryFlags::STRICT_NAMES
                    | CategoryFlags::UNBIND_ON_DELETE,
                entry_points: &[
                    "glGenVertexArrays", "glGenVertexArraysARB",
                    "glDeleteVertexArrays", "glDeleteVertexArraysARB",
                    "glBindVertexArray", "glBindVertexArrayARB",
                    "glIsVertexArray", "glIsVertexArrayARB",
                ],
                originates: &["glGenVertexArrays", "glDeleteVertexArrays"],
            },
            Category::Textures => Self {
                category,
                flags: CategoryFlags::SHAREABLE
                    | CategoryFlags::REALIZE_FOR_IS_OBJECT
                    | CategoryFlags::UNBIND_ON_DELETE,
                entry_points: &[
                    "glGenTextures",
                    "glDeleteTextures",
                    "glBindTexture",
                    "glIsTexture",
                ],
                originates: &["glGenTextures", "glDeleteTextures"],
            },
        }
    }

    pub fn with_flags(mut self, flags: CategoryFlags) -> Self {
        self.flags = flags;
        self
    }
}

/// Virtualizer configuration: one CategoryConfig per category
#[derive(Debug, Clone)]
pub struct VirtualizerConfig {
    pub categories: Vec<CategoryConfig>,
}

impl VirtualizerConfig {
    /// Look up the configuration of a category
    pub fn category(&self, category: Category) -> Option<&CategoryConfig> {
        self.categories.iter().find(|c| c.category == category)
    }

    /// Replace the flags of one category (builder style)
    pub fn with_flags(mut self, category: Category, flags: CategoryFlags) -> Self {
        for config in self.categories.iter_mut().filter(|c| c.category == category) {
            config.flags = flags;
        }
        self
    }

    /// Check that every category is configured exactly once and that no
    /// entry point routes into two categories
    pub fn validate(&self) -> Result<()> {
        for category in Category::ALL {
            let count = self.categories.iter().filter(|c| c.category == category).count();
            if count != 1 {
                glvirt_bail!("glvirt::Config", Error::InitializationFailed(format!(
                    "category {} configured {} times (expected exactly once)",
                    category.name(), count
                )));
            }
        }

        let mut seen = FxHashSet::default();
        for config in &self.categories {
            for entry_point in config.entry_points {
                if !seen.insert(*entry_point) {
                    glvirt_bail!("glvirt::Config", Error::InitializationFailed(format!(
                        "entry point '{}' routed to more than one category", entry_point
                    )));
                }
            }
        }

        Ok(())
    }
}

impl Default for VirtualizerConfig {
    fn default() -> Self {
        Self {
            categories: Category::ALL.iter().map(|c| CategoryConfig::builtin(*c)).collect(),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
