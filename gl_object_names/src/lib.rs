/*!
# GL Object Names

Object-name virtualization for a GL interception layer.

The names an application sees for buffers, vertex arrays and textures are
decoupled from the names the driver allocates. Generation is lazy (names are
reserved locally, driver objects are created on first use), deletion keeps
bindings consistent, and contexts may or may not share objects.

## Architecture

- **NameTable**: bidirectional application ↔ driver name map for one category
- **ObjectCategoryManager**: gen / delete / bind / is-object for one category of one context
- **SharingGroup**: contexts sharing one NameTable per shareable category
- **Context**: one manager per category, routes intercepted calls
- **AttachmentResolver**: framebuffer attachment names in both directions
- **Virtualizer**: owns the driver and configuration, creates contexts

The driver is an external collaborator reached through the `Driver` trait.
*/

// Internal modules
pub mod log;
mod error;
mod attachment;
mod category;
mod config;
mod context;
mod dispatch;
mod driver;
mod gl;
mod names;
mod objects;
mod stats;
mod utils;
mod virtualizer;

// Main glvirt namespace module
pub mod glvirt {
    // Error types
    pub use crate::error::{Error, Result};

    // Entry point
    pub use crate::virtualizer::Virtualizer;

    // Names and categories
    pub use crate::names::{ApplicationName, DriverName, GLenum};
    pub use crate::category::{Category, CategoryFlags};

    // Configuration
    pub use crate::config::{CategoryConfig, VirtualizerConfig};

    // Statistics
    pub use crate::stats::VirtualizerStats;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::*;
    }

    // Outbound driver interface
    pub mod driver {
        pub use crate::driver::{Driver, SharedDriver, FramebufferTextureCall, TextureDimension};
    }

    // Name tables and per-category managers
    pub mod objects {
        pub use crate::objects::{NameTable, SharedNameTable, ObjectCategoryManager};
        pub use crate::utils::NameAllocator;
    }

    // Contexts and sharing
    pub mod context {
        pub use crate::context::{Context, MemberKey, SharingGroup};
        pub use crate::attachment::AttachmentResolver;
    }

    // Inbound dispatch
    pub mod dispatch {
        pub use crate::dispatch::{CallResult, EntryPoint, InterceptedCall, Operation};
    }

    // GL enumerants
    pub mod gl {
        pub use crate::gl::*;
    }
}
