/// Arguments of the glFramebufferTexture* family.

use crate::names::{ApplicationName, GLenum};

/// Which glFramebufferTexture variant was called
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureDimension {
    /// glFramebufferTexture1D(EXT)
    Tex1D,
    /// glFramebufferTexture2D(EXT|OES)
    Tex2D,
    /// glFramebufferTexture2DMultisample(EXT|OES)
    Tex2DMultisample,
    /// glFramebufferTexture3D(EXT|OES)
    Tex3D,
}

/// One glFramebufferTexture* call
///
/// `N` is the namespace of the texture argument: ApplicationName as
/// intercepted, DriverName once translated for the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramebufferTextureCall<N> {
    pub dimension: TextureDimension,
    pub target: GLenum,
    pub attachment: GLenum,
    pub textarget: GLenum,
    pub texture: N,
    pub level: i32,
    /// Layer of a 3D texture (Tex3D only)
    pub zoffset: i32,
    /// Sample count (Tex2DMultisample only)
    pub samples: i32,
}

impl<N> FramebufferTextureCall<N> {
    /// Same call with the texture argument replaced
    pub fn with_texture<M>(self, texture: M) -> FramebufferTextureCall<M> {
        FramebufferTextureCall {
            dimension: self.dimension,
            target: self.target,
            attachment: self.attachment,
            textarget: self.textarget,
            texture,
            level: self.level,
            zoffset: self.zoffset,
            samples: self.samples,
        }
    }
}

impl FramebufferTextureCall<ApplicationName> {
    /// glFramebufferTexture2D(target, attachment, textarget, texture, level)
    pub fn texture_2d(
        target: GLenum,
        attachment: GLenum,
        textarget: GLenum,
        texture: ApplicationName,
        level: i32,
    ) -> Self {
        Self {
            dimension: TextureDimension::Tex2D,
            target,
            attachment,
            textarget,
            texture,
            level,
            zoffset: 0,
            samples: 0,
        }
    }
}
