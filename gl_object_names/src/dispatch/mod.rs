//! Dispatch of intercepted entry points

pub mod call;
pub mod entry_point;

pub use call::{CallResult, InterceptedCall};
pub use entry_point::{EntryPoint, Operation};
