//! Small shared utilities

pub mod name_allocator;

pub use name_allocator::NameAllocator;
