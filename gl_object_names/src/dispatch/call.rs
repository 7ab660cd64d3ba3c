/// InterceptedCall - one intercepted entry point with its arguments,
/// routed to the owning context's managers by `Context::dispatch`.

use crate::attachment::AttachmentResolver;
use crate::category::Category;
use crate::context::Context;
use crate::driver::FramebufferTextureCall;
use crate::error::Result;
use crate::names::{ApplicationName, GLenum};
use super::entry_point::Operation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterceptedCall<'a> {
    Gen {
        category: Category,
        count: usize,
    },
    Delete {
        category: Category,
        names: &'a [ApplicationName],
    },
    Bind {
        category: Category,
        target: GLenum,
        name: ApplicationName,
    },
    IsObject {
        category: Category,
        name: ApplicationName,
    },
    FramebufferTexture(FramebufferTextureCall<ApplicationName>),
    GetFramebufferAttachmentParameter {
        target: GLenum,
        attachment: GLenum,
        pname: GLenum,
    },
}

impl InterceptedCall<'_> {
    pub fn operation(&self) -> Operation {
        match self {
            InterceptedCall::Gen { .. } => Operation::Gen,
            InterceptedCall::Delete { .. } => Operation::Delete,
            InterceptedCall::Bind { .. } => Operation::Bind,
            InterceptedCall::IsObject { .. } => Operation::IsObject,
            InterceptedCall::FramebufferTexture(call) => Operation::FramebufferTexture(call.dimension),
            InterceptedCall::GetFramebufferAttachmentParameter { .. } => Operation::GetFramebufferAttachmentParameter,
        }
    }

    /// Category whose names the call carries, if fixed
    pub fn category(&self) -> Option<Category> {
        match self {
            InterceptedCall::Gen { category, .. }
            | InterceptedCall::Delete { category, .. }
            | InterceptedCall::Bind { category, .. }
            | InterceptedCall::IsObject { category, .. } => Some(*category),
            InterceptedCall::FramebufferTexture(_) => Some(Category::Textures),
            InterceptedCall::GetFramebufferAttachmentParameter { .. } => None,
        }
    }
}

/// What the application receives back from an intercepted call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallResult {
    None,
    Names(Vec<ApplicationName>),
    Boolean(bool),
    Integer(i32),
}

impl Context {
    /// Route one intercepted call
    pub fn dispatch(&mut self, call: InterceptedCall<'_>) -> Result<CallResult> {
        match call {
            InterceptedCall::Gen { category, count } => {
                self.gen(category, count).map(CallResult::Names)
            }
            InterceptedCall::Delete { category, names } => {
                self.delete(category, names).map(|_| CallResult::None)
            }
            InterceptedCall::Bind { category, target, name } => {
                self.bind(category, target, name).map(|_| CallResult::None)
            }
            InterceptedCall::IsObject { category, name } => {
                self.is_object(category, name).map(CallResult::Boolean)
            }
            InterceptedCall::FramebufferTexture(call) => {
                AttachmentResolver::framebuffer_texture(self, call).map(|_| CallResult::None)
            }
            InterceptedCall::GetFramebufferAttachmentParameter { target, attachment, pname } => {
                AttachmentResolver::get_framebuffer_attachment_parameter(self, target, attachment, pname)
                    .map(CallResult::Integer)
            }
        }
    }
}

#[cfg(test)]
#[path = "call_tests.rs"]
mod tests;
