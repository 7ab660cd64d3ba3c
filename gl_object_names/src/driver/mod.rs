/// Driver module - the outbound capability the layer forwards to

pub mod driver;
pub mod framebuffer;

pub use driver::*;
pub use framebuffer::*;

// Mock driver for tests (records every call, no GL context required)
#[cfg(test)]
pub mod mock_driver;
