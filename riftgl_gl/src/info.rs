use std::ffi::CStr;

use crate::transmutable_u32;

#[repr(u32)]
#[derive(Debug, Clone, Copy)]
pub enum GlString {
    Vendor = gl::VENDOR,
    Renderer = gl::RENDERER,
    Version = gl::VERSION,
    ShadingLanguageVersion = gl::SHADING_LANGUAGE_VERSION,
}
transmutable_u32!(GlString);

impl GlString {
    /// Returns `None` if the driver gives back a null or non-UTF-8 string.
    pub fn get_gl(&self) -> Option<&'static str> {
        let str_ptr = unsafe { gl::GetString(self.to_u32()) };
        if str_ptr.is_null() {
            return None;
        }
        unsafe { CStr::from_ptr(str_ptr.cast()).to_str().ok() }
    }
}

#[repr(u32)]
#[derive(Debug, Clone, Copy)]
pub enum GlInteger {
    /// Upper bound on multisample sample counts
    MaxSamples = gl::MAX_SAMPLES,
    MaxTextureSize = gl::MAX_TEXTURE_SIZE,
    MaxColorAttachments = gl::MAX_COLOR_ATTACHMENTS,
}
transmutable_u32!(GlInteger);

impl GlInteger {
    pub fn get_gl(&self) -> i32 {
        let mut value = 0;
        unsafe { gl::GetIntegerv(self.to_u32(), &mut value) };
        value
    }
}
