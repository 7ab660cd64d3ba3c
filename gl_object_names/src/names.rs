/// Object names in the two namespaces bridged by the layer.
///
/// ApplicationName values are what the application sees (returned by
/// glGen*, passed to glBind*), DriverName values are what the underlying
/// driver allocated. Keeping them as distinct types makes it impossible
/// to forward an application name to the driver without translation.

use std::fmt;

/// GL enumerant (binding targets, attachment points, query parameters)
pub type GLenum = u32;

/// Object name visible to the application
///
/// Zero is the "no object" / default object sentinel and is never translated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct ApplicationName(pub u32);

impl ApplicationName {
    /// The default object (name 0)
    pub const NONE: Self = Self(0);

    /// Whether this is the default object sentinel
    pub fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Raw integer value
    pub fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for ApplicationName {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for ApplicationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Object name allocated by the underlying driver, never exposed to the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct DriverName(pub u32);

impl DriverName {
    /// The driver's default object (name 0)
    pub const NONE: Self = Self(0);

    pub fn is_none(self) -> bool {
        self.0 == 0
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for DriverName {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for DriverName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{}", self.0)
    }
}
