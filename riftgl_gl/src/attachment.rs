//! Framebuffer attachments and the parameter tables they are allocated from.

use crate::transmutable_u32;
use gl::types::*;
use glam::IVec2;

/// Storage and sampling parameters for a lazily created attachment.
///
/// Filter and wrap only apply to single-sample textures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttachmentSpec {
    pub internal_format: GLenum,
    pub pixel_format: GLenum,
    pub pixel_type: GLenum,
    pub filter: GLenum,
    pub wrap: GLenum,
}

impl AttachmentSpec {
    pub const COLOR: Self = Self {
        internal_format: gl::RGBA8,
        pixel_format: gl::RGBA,
        pixel_type: gl::FLOAT,
        filter: gl::LINEAR,
        wrap: gl::CLAMP_TO_EDGE,
    };

    pub const DEPTH: Self = Self {
        internal_format: gl::DEPTH_COMPONENT16,
        pixel_format: gl::DEPTH_COMPONENT,
        pixel_type: gl::FLOAT,
        filter: gl::NEAREST,
        wrap: gl::CLAMP_TO_BORDER,
    };
}

#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentPoint {
    Color0 = gl::COLOR_ATTACHMENT0,
    Depth = gl::DEPTH_ATTACHMENT,
}
transmutable_u32!(AttachmentPoint);

/// Something a [`Framebuffer`](crate::Framebuffer) can render into.
pub trait Attachment {
    /// Creates storage of `size`. `samples` of `None` means single-sample.
    fn allocate(spec: &AttachmentSpec, size: IVec2, samples: Option<GLsizei>) -> Self
    where
        Self: Sized;

    /// Attaches to the currently bound `FRAMEBUFFER`.
    fn attach(&self, point: AttachmentPoint, multisample: bool);

    fn bind(&self, multisample: bool);

    fn unbind(multisample: bool)
    where
        Self: Sized;

    fn as_handle(&self) -> GLuint;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_table_is_linear_and_clamped() {
        let spec = AttachmentSpec::COLOR;
        assert_eq!(spec.internal_format, gl::RGBA8);
        assert_eq!(spec.filter, gl::LINEAR);
        assert_eq!(spec.wrap, gl::CLAMP_TO_EDGE);
    }

    #[test]
    fn depth_table_is_nearest_and_border_clamped() {
        let spec = AttachmentSpec::DEPTH;
        assert_eq!(spec.internal_format, gl::DEPTH_COMPONENT16);
        assert_eq!(spec.pixel_format, gl::DEPTH_COMPONENT);
        assert_eq!(spec.filter, gl::NEAREST);
        assert_eq!(spec.wrap, gl::CLAMP_TO_BORDER);
    }

    #[test]
    fn attachment_points_map_to_gl() {
        assert_eq!(AttachmentPoint::Color0.to_u32(), gl::COLOR_ATTACHMENT0);
        assert_eq!(u32::from(AttachmentPoint::Depth), gl::DEPTH_ATTACHMENT);
    }
}
