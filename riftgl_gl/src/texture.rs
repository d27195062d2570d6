use std::{marker::PhantomData, mem, ptr};

use crate::{
    attachment::{Attachment, AttachmentPoint, AttachmentSpec},
    has_handle, transmutable_u32,
};
use gl::types::*;
use glam::IVec2;

#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureTarget {
    Texture2D = gl::TEXTURE_2D,
    Multisample2D = gl::TEXTURE_2D_MULTISAMPLE,
}
transmutable_u32!(TextureTarget);

impl TextureTarget {
    pub const fn for_multisample(multisample: bool) -> Self {
        if multisample {
            Self::Multisample2D
        } else {
            Self::Texture2D
        }
    }
}

pub struct Texture {
    handle: GLuint,
    _not_send: PhantomData<*const ()>,
}
has_handle!(Texture);

impl Drop for Texture {
    fn drop(&mut self) {
        if self.handle != 0 {
            log::trace!("deleting texture {}", self.handle);
            unsafe {
                gl::DeleteTextures(1, &self.handle);
            }
        }
    }
}

impl Default for Texture {
    fn default() -> Self {
        Self::new()
    }
}

impl Texture {
    pub fn new() -> Self {
        let mut handle = 0;
        unsafe { gl::GenTextures(1, &mut handle) };
        assert_ne!(handle, 0, "Texture generation failed.");
        Self {
            handle,
            _not_send: PhantomData,
        }
    }

    /// # Safety
    /// `handle` must be 0 or a texture name owned by nothing else.
    pub unsafe fn from_raw(handle: GLuint) -> Self {
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

    pub fn bind(&self, target: TextureTarget) {
        unsafe { gl::BindTexture(target.to_u32(), self.handle) };
    }

    pub fn unbind(target: TextureTarget) {
        unsafe { gl::BindTexture(target.to_u32(), 0) };
    }
}

impl Attachment for Texture {
    fn allocate(spec: &AttachmentSpec, size: IVec2, samples: Option<GLsizei>) -> Self {
        let texture = Self::new();
        match samples {
            Some(samples) => {
                let target = TextureTarget::Multisample2D;
                texture.bind(target);
                unsafe {
                    gl::TexImage2DMultisample(
                        target.to_u32(),
                        samples,
                        spec.internal_format,
                        size.x,
                        size.y,
                        gl::FALSE,
                    );
                }
                Self::unbind(target);
            }
            None => {
                let target = TextureTarget::Texture2D;
                texture.bind(target);
                unsafe {
                    let t = target.to_u32();
                    gl::TexParameteri(t, gl::TEXTURE_MIN_FILTER, spec.filter as GLint);
                    gl::TexParameteri(t, gl::TEXTURE_MAG_FILTER, spec.filter as GLint);
                    gl::TexParameteri(t, gl::TEXTURE_WRAP_S, spec.wrap as GLint);
                    gl::TexParameteri(t, gl::TEXTURE_WRAP_T, spec.wrap as GLint);
                    gl::TexImage2D(
                        t,
                        0,
                        spec.internal_format as GLint,
                        size.x,
                        size.y,
                        0,
                        spec.pixel_format,
                        spec.pixel_type,
                        ptr::null(),
                    );
                }
                Self::unbind(target);
            }
        }
        log::debug!(
            "allocated texture {} ({}x{}, samples {samples:?})",
            texture.handle,
            size.x,
            size.y
        );
        texture
    }

    fn attach(&self, point: AttachmentPoint, multisample: bool) {
        unsafe {
            gl::FramebufferTexture2D(
                gl::FRAMEBUFFER,
                point.to_u32(),
                TextureTarget::for_multisample(multisample).to_u32(),
                self.handle,
                0,
            );
        }
    }

    fn bind(&self, multisample: bool) {
        Texture::bind(self, TextureTarget::for_multisample(multisample));
    }

    fn unbind(multisample: bool) {
        Texture::unbind(TextureTarget::for_multisample(multisample));
    }

    fn as_handle(&self) -> GLuint {
        self.handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multisample_flag_picks_target() {
        assert_eq!(
            TextureTarget::for_multisample(true).to_u32(),
            gl::TEXTURE_2D_MULTISAMPLE
        );
        assert_eq!(
            TextureTarget::for_multisample(false).to_u32(),
            gl::TEXTURE_2D
        );
    }

    #[test]
    fn raw_handle_round_trips_without_context() {
        let texture = unsafe { Texture::from_raw(3) };
        assert_eq!(texture.as_handle(), 3);
        assert_eq!(texture.into_raw(), 3);
    }
}
