//! Just enough GLFW to get a core-profile context for the demo and the
//! context tests.

use glam::IVec2;
use riftgl_utils::{OptExt, ResExt};
use std::{
    cell::RefCell,
    ffi::{c_void, CStr, CString, NulError},
    ptr::{self, NonNull},
};
use thiserror::Error;

use glfw::ffi;
pub use glfw::Key;

#[repr(i32)]
#[derive(Debug, Clone, Copy)]
pub enum GlfwError {
    NotInitialized,
    NoCurrentContext,
    InvalidEnum,
    InvalidValue,
    OutOfMemory,
    ApiUnavailable,
    VersionUnavailable,
    PlatformError,
    FormatUnavailable,
    NoWindowContext,
    Unknown,
}

impl GlfwError {
    pub fn from_num(err: i32) -> Option<Self> {
        Some(match err {
            0 => return None,
            0x00010001 => Self::NotInitialized,
            0x00010002 => Self::NoCurrentContext,
            0x00010003 => Self::InvalidEnum,
            0x00010004 => Self::InvalidValue,
            0x00010005 => Self::OutOfMemory,
            0x00010006 => Self::ApiUnavailable,
            0x00010007 => Self::VersionUnavailable,
            0x00010008 => Self::PlatformError,
            0x00010009 => Self::FormatUnavailable,
            0x0001000a => Self::NoWindowContext,
            _ => Self::Unknown,
        })
    }
}

extern "C" fn err_callback(err: i32, desc: *const std::os::raw::c_char) {
    let err = GlfwError::from_num(err);
    let desc = unsafe { CStr::from_ptr(desc) }
        .to_str()
        .ok_or_log("glfw error description")
        .unwrap_or("<invalid utf-8>");
    log::error!("glfw error {err:?}: {desc}");
}

pub fn init() -> Option<()> {
    let err = unsafe { ffi::glfwInit() };
    (err == ffi::TRUE).then_some(())
}

pub fn terminate() {
    unsafe { ffi::glfwTerminate() }
}

pub fn install_errors() {
    unsafe { ffi::glfwSetErrorCallback(Some(err_callback)) };
}

/// Requests a forward-compatible core context of `major.minor` for the next
/// window created.
pub fn hint_core_profile(major: i32, minor: i32) {
    unsafe {
        ffi::glfwWindowHint(ffi::CONTEXT_VERSION_MAJOR, major);
        ffi::glfwWindowHint(ffi::CONTEXT_VERSION_MINOR, minor);
        ffi::glfwWindowHint(ffi::OPENGL_PROFILE, ffi::OPENGL_CORE_PROFILE);
        ffi::glfwWindowHint(ffi::OPENGL_FORWARD_COMPAT, ffi::TRUE);
    }
}

pub fn hint_visible(visible: bool) {
    let value = if visible { ffi::TRUE } else { ffi::FALSE };
    unsafe { ffi::glfwWindowHint(ffi::VISIBLE, value) };
}

pub fn get_proc_address(name: &str) -> *const c_void {
    let name = CString::new(name).unwrap_unreach();
    unsafe { ffi::glfwGetProcAddress(name.as_ptr()) }
}

/// Makes the window current and loads GL function pointers through it.
pub fn load_gl(window: &Window) {
    window.make_current();
    gl::load_with(get_proc_address);
}

pub fn poll_events() {
    unsafe { ffi::glfwPollEvents() }
}

#[derive(Debug, Error)]
pub enum WindowError {
    #[error("window title contains a nul byte")]
    BadTitle(#[from] NulError),
    #[error("Window creation failed: nullptr")]
    CreationFailed,
}

pub struct Window {
    window: NonNull<ffi::GLFWwindow>,
}

impl Drop for Window {
    fn drop(&mut self) {
        unsafe { ffi::glfwDestroyWindow(self.window.as_ptr()) };
    }
}

impl Window {
    pub fn create(size: IVec2, title: &str) -> Result<Self, WindowError> {
        let as_c_str = CString::new(title)?;
        let window = unsafe {
            ffi::glfwCreateWindow(
                size.x,
                size.y,
                as_c_str.as_ptr(),
                ptr::null_mut(),
                ptr::null_mut(),
            )
        };

        NonNull::new(window)
            .map(|window| Self { window })
            .ok_or(WindowError::CreationFailed)
    }

    pub fn should_close(&self) -> bool {
        (unsafe { ffi::glfwWindowShouldClose(self.window.as_ptr()) }) > 0
    }

    pub fn swap_buffers(&self) {
        unsafe { ffi::glfwSwapBuffers(self.window.as_ptr()) }
    }

    pub fn make_current(&self) {
        unsafe { ffi::glfwMakeContextCurrent(self.window.as_ptr()) };
    }

    pub fn is_key_down(&self, key: Key) -> bool {
        let state = unsafe { ffi::glfwGetKey(self.window.as_ptr(), key as i32) };
        state == ffi::PRESS
    }

    pub fn get_framebuffer_size(&self) -> IVec2 {
        let mut result = IVec2::ZERO;
        unsafe { ffi::glfwGetFramebufferSize(self.window.as_ptr(), &mut result.x, &mut result.y) };
        result
    }

    pub fn install_framebuffer_size_callback(&self, callback: impl FramebufferSizeCallback) {
        FRAMEBUFFER_SIZE_CALLBACK.with_borrow_mut(|value| *value = Some(Box::new(callback)));
        unsafe {
            ffi::glfwSetFramebufferSizeCallback(
                self.window.as_ptr(),
                Some(framebuffer_size_callback),
            )
        };
    }
}

extern "C" fn framebuffer_size_callback(_window: *mut ffi::GLFWwindow, x: i32, y: i32) {
    let size = IVec2::new(x, y);
    FRAMEBUFFER_SIZE_CALLBACK.with_borrow_mut(|callback| {
        if let Some(callback) = callback.as_mut() {
            callback(size);
        }
    })
}

pub trait FramebufferSizeCallback: FnMut(IVec2) + 'static {}
impl<T: FnMut(IVec2) + 'static> FramebufferSizeCallback for T {}

thread_local! {
    static FRAMEBUFFER_SIZE_CALLBACK: RefCell<Option<Box<dyn FramebufferSizeCallback>>> = const { RefCell::new(None) };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nul_in_title_is_rejected_before_glfw() {
        let err = Window::create(IVec2::ONE, "bad\0title").err();
        assert!(matches!(err, Some(WindowError::BadTitle(_))));
    }

    #[test]
    fn error_codes_decode() {
        assert!(GlfwError::from_num(0).is_none());
        assert!(matches!(
            GlfwError::from_num(0x00010007),
            Some(GlfwError::VersionUnavailable)
        ));
        assert!(matches!(
            GlfwError::from_num(0x00010099),
            Some(GlfwError::Unknown)
        ));
    }
}
