/// Object categories and their naming/lifecycle policy flags.

use bitflags::bitflags;

/// A class of GL objects sharing one naming and lifecycle policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// glGenBuffers / glBindBuffer / glDeleteBuffers / glIsBuffer
    Buffers,
    /// glGenVertexArrays / glBindVertexArray / glDeleteVertexArrays / glIsVertexArray
    VertexArrays,
    /// glGenTextures / glBindTexture / glDeleteTextures / glIsTexture
    Textures,
}

impl Category {
    /// Number of categories
    pub const COUNT: usize = 3;

    /// All categories, in index order
    pub const ALL: [Category; Category::COUNT] = [
        Category::Buffers,
        Category::VertexArrays,
        Category::Textures,
    ];

    /// Order in which a context's tables are torn down.
    ///
    /// Vertex arrays reference buffers, framebuffers reference textures:
    /// containers go first, then textures, buffers last.
    pub const TEARDOWN_ORDER: [Category; Category::COUNT] = [
        Category::VertexArrays,
        Category::Textures,
        Category::Buffers,
    ];

    /// Dense index for per-category arrays
    pub fn index(self) -> usize {
        match self {
            Category::Buffers => 0,
            Category::VertexArrays => 1,
            Category::Textures => 2,
        }
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            Category::Buffers => "Buffers",
            Category::VertexArrays => "VAOs",
            Category::Textures => "Textures",
        }
    }
}

bitflags! {
    /// Per-category translation policy
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CategoryFlags: u32 {
        /// Objects are shared between the contexts of one sharing group
        const SHAREABLE = 1 << 0;
        /// glIs* reports false until the name has been bound at least once
        const REALIZE_FOR_IS_OBJECT = 1 << 1;
        /// Binding a name that was never generated fails with UnknownName
        /// (core profile); without it the name is adopted (compatibility profile)
        const STRICT_NAMES = 1 << 2;
        /// Deleting a bound name first rebinds the target to 0 on the driver
        const UNBIND_ON_DELETE = 1 << 3;
    }
}

#[cfg(test)]
#[path = "category_tests.rs"]
mod tests;
