pub mod attachment;
pub mod buffer;
mod error;
pub mod framebuffer;
pub mod glfw;
pub mod info;
pub mod renderbuffer;
pub mod status;
pub mod texture;

pub use attachment::{Attachment, AttachmentPoint, AttachmentSpec};
pub use buffer::{Buffer, IndexBuffer, VertexBuffer};
pub use error::{GlError, GlErrorGuard};
pub use framebuffer::{Framebuffer, FramebufferError};
pub use renderbuffer::Renderbuffer;
pub use status::{FramebufferStatus, FramebufferTarget};
pub use texture::{Texture, TextureTarget};

pub use gl;

#[macro_export]
macro_rules! transmutable_u32 {
    ($name: ident) => {
        impl $name {
            pub const fn to_u32(self) -> u32 {
                unsafe { std::mem::transmute(self) }
            }
        }

        impl From<$name> for u32 {
            fn from(value: $name) -> Self {
                value.to_u32()
            }
        }
    };
}

/// Adds `as_handle` for wrappers storing their GL name in `handle`.
#[macro_export]
macro_rules! has_handle {
    ($name: ident $(< $($generic: ident $(: $bound: path)?),* >)?) => {
        impl $(< $($generic $(: $bound)?),* >)? $name $(< $($generic),* >)? {
            pub fn as_handle(&self) -> $crate::gl::types::GLuint {
                self.handle
            }
        }
    };
}
