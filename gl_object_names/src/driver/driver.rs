/// Driver trait - the real GL implementation behind the layer
///
/// Calls on this trait are already dispatched to the underlying
/// implementation: an implementation must never route back through the
/// interception layer, or every call would be translated a second time.

use std::sync::{Arc, Mutex, MutexGuard};
use crate::category::Category;
use crate::error::{Error, Result};
use crate::names::{DriverName, GLenum};
use super::framebuffer::FramebufferTextureCall;

/// Outbound driver capability
///
/// Failures are reported as `Error::DriverFailure` and propagated to the
/// application unchanged.
pub trait Driver: Send {
    /// Create one object of `category` (glGenBuffers(1, ..) etc.) and return its name
    fn create(&mut self, category: Category) -> Result<DriverName>;

    /// Destroy a batch of objects (glDeleteBuffers etc.)
    fn destroy(&mut self, category: Category, names: &[DriverName]) -> Result<()>;

    /// Bind `name` to `target` (glBindBuffer, glBindVertexArray, glBindTexture)
    ///
    /// `target` is ignored for categories without binding targets (vertex arrays).
    fn bind(&mut self, category: Category, target: GLenum, name: DriverName) -> Result<()>;

    /// Attach a texture level to a framebuffer (glFramebufferTexture* family)
    fn framebuffer_texture(&mut self, call: &FramebufferTextureCall<DriverName>) -> Result<()>;

    /// Query one framebuffer attachment parameter (glGetFramebufferAttachmentParameteriv)
    fn framebuffer_attachment_parameter(
        &mut self,
        target: GLenum,
        attachment: GLenum,
        pname: GLenum,
    ) -> Result<i32>;
}

/// Driver shared by every context of a virtualizer
pub type SharedDriver = Arc<Mutex<dyn Driver>>;

/// Lock the shared driver, mapping a poisoned lock to BackendError
pub(crate) fn lock_driver(driver: &SharedDriver) -> Result<MutexGuard<'_, dyn Driver + 'static>> {
    driver.lock()
        .map_err(|_| crate::glvirt_err!("glvirt::Driver", Error::BackendError("Driver lock poisoned".to_string())))
}
