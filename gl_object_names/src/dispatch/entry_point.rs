/// Entry-point routing: intercepted GL function name -> (category, operation).
///
/// The four canonical operations are routed through the category table of
/// the VirtualizerConfig, so a custom configuration can add or remove
/// spellings. The framebuffer entry points are fixed.

use crate::category::Category;
use crate::config::VirtualizerConfig;
use crate::driver::TextureDimension;

/// What an intercepted entry point does to object names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Gen,
    Delete,
    Bind,
    IsObject,
    /// glFramebufferTexture*: texture argument translated to a driver name
    FramebufferTexture(TextureDimension),
    /// glGetFramebufferAttachmentParameteriv: OBJECT_NAME result translated back
    GetFramebufferAttachmentParameter,
}

impl Operation {
    /// Canonical operation named by a glGen/glDelete/glBind/glIs prefix
    fn from_prefix(entry_point: &str) -> Option<Self> {
        const PREFIXES: [(&str, Operation); 4] = [
            ("glGen", Operation::Gen),
            ("glDelete", Operation::Delete),
            ("glBind", Operation::Bind),
            ("glIs", Operation::IsObject),
        ];
        PREFIXES.iter()
            .find(|(prefix, _)| entry_point.starts_with(prefix))
            .map(|(_, operation)| *operation)
    }
}

const FRAMEBUFFER_TEXTURE_ENTRY_POINTS: &[(&str, TextureDimension)] = &[
    ("glFramebufferTexture1D", TextureDimension::Tex1D),
    ("glFramebufferTexture1DEXT", TextureDimension::Tex1D),
    ("glFramebufferTexture2D", TextureDimension::Tex2D),
    ("glFramebufferTexture2DEXT", TextureDimension::Tex2D),
    ("glFramebufferTexture2DOES", TextureDimension::Tex2D),
    ("glFramebufferTexture2DMultisampleEXT", TextureDimension::Tex2DMultisample),
    ("glFramebufferTexture2DMultisampleOES", TextureDimension::Tex2DMultisample),
    ("glFramebufferTexture3D", TextureDimension::Tex3D),
    ("glFramebufferTexture3DEXT", TextureDimension::Tex3D),
    ("glFramebufferTexture3DOES", TextureDimension::Tex3D),
];

const ATTACHMENT_QUERY_ENTRY_POINTS: &[&str] = &[
    "glGetFramebufferAttachmentParameteriv",
    "glGetFramebufferAttachmentParameterivEXT",
    "glGetFramebufferAttachmentParameterivOES",
];

/// Routing of one intercepted entry point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryPoint {
    /// Category whose names the call carries (None: decided per call)
    pub category: Option<Category>,
    pub operation: Operation,
}

impl EntryPoint {
    /// Route an entry point name, None if the layer does not intercept it
    pub fn lookup(config: &VirtualizerConfig, name: &str) -> Option<Self> {
        if let Some(category_config) = config.categories.iter()
            .find(|c| c.entry_points.contains(&name))
        {
            return Operation::from_prefix(name).map(|operation| Self {
                category: Some(category_config.category),
                operation,
            });
        }

        if let Some((_, dimension)) = FRAMEBUFFER_TEXTURE_ENTRY_POINTS.iter()
            .find(|(entry_point, _)| *entry_point == name)
        {
            return Some(Self {
                category: Some(Category::Textures),
                operation: Operation::FramebufferTexture(*dimension),
            });
        }

        if ATTACHMENT_QUERY_ENTRY_POINTS.contains(&name) {
            return Some(Self {
                category: None,
                operation: Operation::GetFramebufferAttachmentParameter,
            });
        }

        None
    }

    /// Category whose driver objects the layer creates or destroys through
    /// the driver entry point `name`
    pub fn originator(config: &VirtualizerConfig, name: &str) -> Option<Category> {
        config.categories.iter()
            .find(|c| c.originates.contains(&name))
            .map(|c| c.category)
    }
}

#[cfg(test)]
#[path = "entry_point_tests.rs"]
mod tests;
