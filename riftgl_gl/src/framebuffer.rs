use std::rc::Rc;

use crate::{
    attachment::{Attachment, AttachmentPoint, AttachmentSpec},
    has_handle,
    info::GlInteger,
    status::{FramebufferStatus, FramebufferTarget},
    texture::Texture,
    GlErrorGuard,
};
use gl::types::*;
use glam::IVec2;
use thiserror::Error;

/// Sample counts reported by the driver are clamped to this.
pub const MAX_SAMPLE_CEILING: GLsizei = 8;

pub const fn clamp_samples(driver_max: GLint) -> GLsizei {
    if driver_max < MAX_SAMPLE_CEILING {
        driver_max
    } else {
        MAX_SAMPLE_CEILING
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FramebufferError {
    #[error("Bad framebuffer creation: {0}")]
    Incomplete(FramebufferStatus),
}

/// Render target with one color and one depth attachment.
///
/// Attachments passed in by the caller are shared through `Rc`. Missing ones
/// are created by [`Framebuffer::init`] from [`AttachmentSpec::COLOR`] and
/// [`AttachmentSpec::DEPTH`].
pub struct Framebuffer<C: Attachment = Texture, D: Attachment = Texture> {
    handle: GLuint,
    size: IVec2,
    multisample: bool,
    color: Option<Rc<C>>,
    depth: Option<Rc<D>>,
}
has_handle!(Framebuffer<C: Attachment, D: Attachment>);

impl<C: Attachment, D: Attachment> Drop for Framebuffer<C, D> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<C: Attachment, D: Attachment> Default for Framebuffer<C, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Attachment, D: Attachment> Framebuffer<C, D> {
    pub fn new() -> Self {
        Self::with_attachments(None, None)
    }

    pub fn with_attachments(color: Option<Rc<C>>, depth: Option<Rc<D>>) -> Self {
        Self {
            handle: 0,
            size: IVec2::ZERO,
            multisample: false,
            color,
            depth,
        }
    }

    pub fn init(&mut self, size: IVec2, multisample: bool) -> Result<(), FramebufferError> {
        let mut handle = 0;
        unsafe { gl::GenFramebuffers(1, &mut handle) };
        assert_ne!(handle, 0, "Framebuffer generation failed.");
        // Generated before the old name is freed, so a re-init never reuses it.
        self.release();
        self.handle = handle;
        self.size = size;
        self.multisample = multisample;

        self.bind();
        GlErrorGuard::guard_named("framebuffer default size", || unsafe {
            gl::FramebufferParameteri(gl::FRAMEBUFFER, gl::FRAMEBUFFER_DEFAULT_WIDTH, size.x);
            gl::FramebufferParameteri(gl::FRAMEBUFFER, gl::FRAMEBUFFER_DEFAULT_HEIGHT, size.y);
        });

        let samples = multisample.then(|| clamp_samples(GlInteger::MaxSamples.get_gl()));

        let color = self
            .color
            .get_or_insert_with(|| Rc::new(C::allocate(&AttachmentSpec::COLOR, size, samples)));
        GlErrorGuard::guard_named("framebuffer color attachment", || {
            color.attach(AttachmentPoint::Color0, multisample);
            let bufs = gl::COLOR_ATTACHMENT0;
            unsafe { gl::DrawBuffers(1, &bufs) };
        });

        let depth = self
            .depth
            .get_or_insert_with(|| Rc::new(D::allocate(&AttachmentSpec::DEPTH, size, samples)));
        GlErrorGuard::guard_named("framebuffer depth attachment", || {
            depth.attach(AttachmentPoint::Depth, multisample);
        });

        let status = FramebufferStatus::query(FramebufferTarget::Both);
        let complete = status.report();
        Self::unbind();
        if !complete {
            return Err(FramebufferError::Incomplete(status));
        }

        log::debug!(
            "framebuffer {handle} ready: {}x{}, samples {samples:?}",
            size.x,
            size.y
        );
        Ok(())
    }

    fn release(&mut self) {
        if self.handle != 0 {
            log::trace!("deleting framebuffer {}", self.handle);
            unsafe { gl::DeleteFramebuffers(1, &self.handle) };
            self.handle = 0;
        }
    }

    pub fn bind(&self) {
        unsafe { gl::BindFramebuffer(gl::FRAMEBUFFER, self.handle) };
    }

    pub fn unbind() {
        unsafe { gl::BindFramebuffer(gl::FRAMEBUFFER, 0) };
    }

    pub fn activate(&self) {
        unsafe {
            gl::BindFramebuffer(gl::FRAMEBUFFER, self.handle);
            gl::Viewport(0, 0, self.size.x, self.size.y);
        }
    }

    pub fn deactivate(&self) {
        Self::unbind();
    }

    pub fn bind_color(&self) {
        match &self.color {
            Some(color) => color.bind(self.multisample),
            None => log::warn!(
                "framebuffer {} has no color attachment to bind",
                self.handle
            ),
        }
    }

    pub fn unbind_color(&self) {
        C::unbind(self.multisample);
    }

    pub fn color(&self) -> Option<&Rc<C>> {
        self.color.as_ref()
    }

    pub fn depth(&self) -> Option<&Rc<D>> {
        self.depth.as_ref()
    }

    /// Hands the color attachment to the caller. The framebuffer stops
    /// managing it and [`Framebuffer::bind_color`] becomes a no-op.
    pub fn detach_color(&mut self) -> Option<Rc<C>> {
        self.color.take()
    }

    pub fn size(&self) -> IVec2 {
        self.size
    }

    pub fn is_multisample(&self) -> bool {
        self.multisample
    }

    /// Copies the color buffer into the default framebuffer.
    ///
    /// Multisampled sources resolve here, which GL only allows when
    /// `dest_size` equals [`Framebuffer::size`].
    pub fn blit_to_default(&self, dest_size: IVec2) {
        let filter = if self.multisample {
            gl::NEAREST
        } else {
            gl::LINEAR
        };
        unsafe {
            gl::BindFramebuffer(gl::READ_FRAMEBUFFER, self.handle);
            gl::BindFramebuffer(gl::DRAW_FRAMEBUFFER, 0);
            gl::BlitFramebuffer(
                0,
                0,
                self.size.x,
                self.size.y,
                0,
                0,
                dest_size.x,
                dest_size.y,
                gl::COLOR_BUFFER_BIT,
                filter,
            );
        }
        Self::unbind();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Renderbuffer;
    use pretty_assertions::assert_eq;

    #[test]
    fn sample_count_is_clamped_to_ceiling() {
        assert_eq!(clamp_samples(32), 8);
        assert_eq!(clamp_samples(8), 8);
        assert_eq!(clamp_samples(4), 4);
    }

    #[test]
    fn incomplete_error_names_the_status() {
        let err = FramebufferError::Incomplete(FramebufferStatus::MissingAttachment);
        assert_eq!(
            err.to_string(),
            "Bad framebuffer creation: framebuffer missing attachment"
        );
    }

    #[test]
    fn new_framebuffer_owns_nothing() {
        let framebuffer: Framebuffer<Texture, Renderbuffer> = Framebuffer::new();
        assert_eq!(framebuffer.as_handle(), 0);
        assert!(framebuffer.color().is_none());
        assert!(framebuffer.depth().is_none());
        assert!(!framebuffer.is_multisample());
    }

    #[test]
    fn detach_hands_color_to_caller() {
        let color = Rc::new(unsafe { Texture::from_raw(11) });
        let mut framebuffer: Framebuffer = Framebuffer::with_attachments(Some(color.clone()), None);
        assert_eq!(Rc::strong_count(&color), 2);

        let detached = framebuffer.detach_color();
        assert!(framebuffer.color().is_none());
        assert!(Rc::ptr_eq(detached.as_ref().unwrap(), &color));

        drop(detached);
        drop(framebuffer);
        assert_eq!(Rc::strong_count(&color), 1);

        let texture = Rc::try_unwrap(color).ok().unwrap();
        assert_eq!(texture.into_raw(), 11);
    }

    #[test]
    fn shared_attachment_outlives_one_framebuffer() {
        let depth = Rc::new(unsafe { Texture::from_raw(5) });
        let first: Framebuffer = Framebuffer::with_attachments(None, Some(depth.clone()));
        let second: Framebuffer = Framebuffer::with_attachments(None, Some(depth.clone()));
        assert_eq!(Rc::strong_count(&depth), 3);

        drop(first);
        assert_eq!(second.depth().map(|d| d.as_handle()), Some(5));
        drop(second);

        let texture = Rc::try_unwrap(depth).ok().unwrap();
        assert_eq!(texture.into_raw(), 5);
    }
}
