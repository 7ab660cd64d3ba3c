//! Contexts and the sharing groups that connect them

pub mod context;
pub mod sharing_group;
pub(crate) mod call_guard;

pub use context::Context;
pub use sharing_group::{MemberKey, SharingGroup};
