//! Object naming: name tables and per-category managers

pub mod name_table;
pub mod object_manager;

pub use name_table::{NameTable, SharedNameTable};
pub use object_manager::ObjectCategoryManager;
