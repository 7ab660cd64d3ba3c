//! Error types for the name virtualization layer
//!
//! This module defines the errors returned by name tables, category managers,
//! sharing groups and contexts, plus the macros that log an error before
//! handing it back to the caller.

use std::fmt;
use crate::category::Category;
use crate::names::ApplicationName;

/// Result type for name virtualization operations
pub type Result<T> = std::result::Result<T, Error>;

/// Name virtualization errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The application referenced a name that was never generated or has been deleted
    UnknownName {
        category: Category,
        name: ApplicationName,
    },

    /// The underlying driver reported a failure (propagated unchanged)
    DriverFailure(String),

    /// A context tried to join a sharing group after diverging privately
    SharingViolation(String),

    /// The 32-bit application name space of a category is exhausted
    OutOfNames(Category),

    /// A call entered the layer while another call was in flight on the same thread
    Reentrant(String),

    /// Internal failure (poisoned lock, etc.)
    BackendError(String),

    /// Invalid configuration or virtualizer setup
    InitializationFailed(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownName { category, name } => {
                write!(f, "Unknown {} name: {}", category.name(), name)
            }
            Error::DriverFailure(msg) => write!(f, "Driver failure: {}", msg),
            Error::SharingViolation(msg) => write!(f, "Sharing violation: {}", msg),
            Error::OutOfNames(category) => write!(f, "Out of {} names", category.name()),
            Error::Reentrant(msg) => write!(f, "Reentrant call: {}", msg),
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Log an error at ERROR severity and evaluate to it
///
/// # Example
///
/// ```ignore
/// let err = glvirt_err!("glvirt::NameTable", Error::OutOfNames(category));
/// ```
#[macro_export]
macro_rules! glvirt_err {
    ($source:expr, $err:expr) => {{
        let err: $crate::glvirt::Error = $err;
        $crate::glvirt_error!($source, "{}", err);
        err
    }};
}

/// Log an error at ERROR severity and return it from the current function
///
/// # Example
///
/// ```ignore
/// glvirt_bail!("glvirt::Context", Error::SharingViolation("already shared".to_string()));
/// ```
#[macro_export]
macro_rules! glvirt_bail {
    ($source:expr, $err:expr) => {
        return Err($crate::glvirt_err!($source, $err))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
