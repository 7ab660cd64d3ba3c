/// AttachmentResolver - framebuffer attachment traffic.
///
/// glGetFramebufferAttachmentParameteriv(OBJECT_NAME) returns whatever name
/// the driver has attached, which may be a texture (a virtualized driver
/// name that must be translated back) or a renderbuffer (not virtualized,
/// passed through). The glFramebufferTexture* family goes the other way and
/// needs its texture argument translated before it reaches the driver.

use crate::category::Category;
use crate::context::call_guard::CallGuard;
use crate::context::Context;
use crate::driver::{lock_driver, FramebufferTextureCall};
use crate::error::Result;
use crate::gl::{GL_FRAMEBUFFER_ATTACHMENT_OBJECT_NAME, GL_FRAMEBUFFER_ATTACHMENT_OBJECT_TYPE, GL_TEXTURE};
use crate::names::{ApplicationName, DriverName, GLenum};
use crate::{glvirt_trace, glvirt_warn};

pub struct AttachmentResolver;

impl AttachmentResolver {
    /// Category whose names an attachment of `attachment_type` carries,
    /// None if such names are not virtualized
    pub fn translated_category(attachment_type: GLenum) -> Option<Category> {
        match attachment_type {
            GL_TEXTURE => Some(Category::Textures),
            _ => None,
        }
    }

    /// Convert the raw OBJECT_NAME value of an attachment to an application name
    ///
    /// `raw` is returned unchanged unless the attachment is a texture. When
    /// `attachment_type` is None, the driver is asked for
    /// GL_FRAMEBUFFER_ATTACHMENT_OBJECT_TYPE first. A texture driver name
    /// with no application counterpart yields 0.
    pub fn resolve_attachment_object_name(
        ctx: &Context,
        target: GLenum,
        attachment: GLenum,
        raw: i32,
        attachment_type: Option<GLenum>,
    ) -> Result<i32> {
        let _guard = CallGuard::enter("resolve_attachment_object_name")?;
        Self::resolve_object_name(ctx, target, attachment, raw, attachment_type)
    }

    /// glGetFramebufferAttachmentParameteriv as seen by the application
    ///
    /// Only GL_FRAMEBUFFER_ATTACHMENT_OBJECT_NAME results are translated.
    pub fn get_framebuffer_attachment_parameter(
        ctx: &Context,
        target: GLenum,
        attachment: GLenum,
        pname: GLenum,
    ) -> Result<i32> {
        let _guard = CallGuard::enter("get_framebuffer_attachment_parameter")?;
        let raw = lock_driver(ctx.driver())?.framebuffer_attachment_parameter(target, attachment, pname)?;
        if pname != GL_FRAMEBUFFER_ATTACHMENT_OBJECT_NAME {
            return Ok(raw);
        }
        Self::resolve_object_name(ctx, target, attachment, raw, None)
    }

    /// glFramebufferTexture*: forward with the texture translated
    ///
    /// The texture is realized on the driver if this is its first use.
    /// Texture 0 detaches and is forwarded as 0.
    pub fn framebuffer_texture(ctx: &mut Context, call: FramebufferTextureCall<ApplicationName>) -> Result<()> {
        let _guard = CallGuard::enter("framebuffer_texture")?;
        let texture = ctx.realize(Category::Textures, call.texture)?;
        glvirt_trace!("glvirt::AttachmentResolver", "attach texture {} ({}) to {:#06x}",
            call.texture, texture, call.attachment);
        lock_driver(ctx.driver())?.framebuffer_texture(&call.with_texture(texture))
    }

    fn resolve_object_name(
        ctx: &Context,
        target: GLenum,
        attachment: GLenum,
        raw: i32,
        attachment_type: Option<GLenum>,
    ) -> Result<i32> {
        let attachment_type = match attachment_type {
            Some(attachment_type) => attachment_type,
            None => lock_driver(ctx.driver())?
                .framebuffer_attachment_parameter(target, attachment, GL_FRAMEBUFFER_ATTACHMENT_OBJECT_TYPE)?
                as GLenum,
        };

        let Some(category) = Self::translated_category(attachment_type) else {
            return Ok(raw);
        };
        if raw == 0 {
            return Ok(0);
        }

        match ctx.lookup_app_name(category, DriverName(raw as u32))? {
            Some(name) => {
                ctx.stats().add_translated_back();
                Ok(name.get() as i32)
            }
            None => {
                glvirt_warn!("glvirt::AttachmentResolver",
                    "attachment {:#06x} of {:#06x} holds unknown {} driver name {}",
                    attachment, target, category.name(), raw);
                Ok(0)
            }
        }
    }
}

#[cfg(test)]
#[path = "attachment_tests.rs"]
mod tests;
