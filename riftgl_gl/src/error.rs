use crate::transmutable_u32;
use gl::types::GLenum;

#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlError {
    InvalidEnum = gl::INVALID_ENUM,
    InvalidValue = gl::INVALID_VALUE,
    InvalidOperation = gl::INVALID_OPERATION,
    InvalidFramebufferOperation = gl::INVALID_FRAMEBUFFER_OPERATION,
    OutOfMemory = gl::OUT_OF_MEMORY,
    StackUnderflow = gl::STACK_UNDERFLOW,
    StackOverflow = gl::STACK_OVERFLOW,
}
transmutable_u32!(GlError);

impl GlError {
    /// Decodes a `glGetError` value. `NO_ERROR` and unknown codes give `None`.
    pub const fn from_code(code: GLenum) -> Option<Self> {
        Some(match code {
            gl::INVALID_ENUM => Self::InvalidEnum,
            gl::INVALID_VALUE => Self::InvalidValue,
            gl::INVALID_OPERATION => Self::InvalidOperation,
            gl::INVALID_FRAMEBUFFER_OPERATION => Self::InvalidFramebufferOperation,
            gl::OUT_OF_MEMORY => Self::OutOfMemory,
            gl::STACK_UNDERFLOW => Self::StackUnderflow,
            gl::STACK_OVERFLOW => Self::StackOverflow,
            _ => return None,
        })
    }

    pub fn try_get() -> Option<Self> {
        let code = unsafe { gl::GetError() };
        if code == gl::NO_ERROR {
            return None;
        }
        let err = Self::from_code(code);
        if err.is_none() {
            log::warn!("unrecognized GL error code {code:#06x}");
        }
        err
    }
}

/// Named checkpoint over the GL error channel.
///
/// Errors raised before the guard exists are logged and discarded. Any error
/// raised while it is alive panics on `Drop`, tagged with the checkpoint name.
pub struct GlErrorGuard {
    name: &'static str,
}

impl Drop for GlErrorGuard {
    fn drop(&mut self) {
        if let Some(err) = GlError::try_get() {
            panic!("GL error in \"{}\": {err:?}", self.name);
        }
    }
}

impl GlErrorGuard {
    pub fn named(name: &'static str) -> Self {
        if let Some(stale) = GlError::try_get() {
            log::warn!("discarding GL error raised before \"{name}\": {stale:?}");
        }
        Self { name }
    }

    /// Runs `run` inside a guard called `name`.
    pub fn guard_named<T>(name: &'static str, run: impl FnOnce() -> T) -> T {
        let _guard = Self::named(name);
        run()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_every_error_code() {
        for err in [
            GlError::InvalidEnum,
            GlError::InvalidValue,
            GlError::InvalidOperation,
            GlError::InvalidFramebufferOperation,
            GlError::OutOfMemory,
            GlError::StackUnderflow,
            GlError::StackOverflow,
        ] {
            assert_eq!(GlError::from_code(err.to_u32()), Some(err));
        }
    }

    #[test]
    fn no_error_and_unknown_codes_decode_to_none() {
        assert_eq!(GlError::from_code(gl::NO_ERROR), None);
        assert_eq!(GlError::from_code(0xdead), None);
    }
}
