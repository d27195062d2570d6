use std::{marker::PhantomData, mem};

use crate::{
    attachment::{Attachment, AttachmentPoint, AttachmentSpec},
    has_handle,
};
use gl::types::*;
use glam::IVec2;

/// Render-only attachment storage. Cannot be sampled, only blitted.
pub struct Renderbuffer {
    handle: GLuint,
    _not_send: PhantomData<*const ()>,
}
has_handle!(Renderbuffer);

impl Drop for Renderbuffer {
    fn drop(&mut self) {
        if self.handle != 0 {
            log::trace!("deleting renderbuffer {}", self.handle);
            unsafe {
                gl::DeleteRenderbuffers(1, &self.handle);
            }
        }
    }
}

impl Default for Renderbuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderbuffer {
    pub fn new() -> Self {
        let mut handle = 0;
        unsafe { gl::GenRenderbuffers(1, &mut handle) };
        assert_ne!(handle, 0, "Renderbuffer generation failed.");
        Self {
            handle,
            _not_send: PhantomData,
        }
    }

    pub fn into_raw(self) -> GLuint {
        let handle = self.handle;
        mem::forget(self);
        handle
    }
}

impl Attachment for Renderbuffer {
    fn allocate(spec: &AttachmentSpec, size: IVec2, samples: Option<GLsizei>) -> Self {
        let renderbuffer = Self::new();
        unsafe {
            gl::BindRenderbuffer(gl::RENDERBUFFER, renderbuffer.handle);
            match samples {
                Some(samples) => gl::RenderbufferStorageMultisample(
                    gl::RENDERBUFFER,
                    samples,
                    spec.internal_format,
                    size.x,
                    size.y,
                ),
                None => {
                    gl::RenderbufferStorage(gl::RENDERBUFFER, spec.internal_format, size.x, size.y)
                }
            }
            gl::BindRenderbuffer(gl::RENDERBUFFER, 0);
        }
        log::debug!(
            "allocated renderbuffer {} ({}x{}, samples {samples:?})",
            renderbuffer.handle,
            size.x,
            size.y
        );
        renderbuffer
    }

    fn attach(&self, point: AttachmentPoint, _multisample: bool) {
        unsafe {
            gl::FramebufferRenderbuffer(
                gl::FRAMEBUFFER,
                point.to_u32(),
                gl::RENDERBUFFER,
                self.handle,
            );
        }
    }

    fn bind(&self, _multisample: bool) {
        unsafe { gl::BindRenderbuffer(gl::RENDERBUFFER, self.handle) };
    }

    fn unbind(_multisample: bool) {
        unsafe { gl::BindRenderbuffer(gl::RENDERBUFFER, 0) };
    }

    fn as_handle(&self) -> GLuint {
        self.handle
    }
}
