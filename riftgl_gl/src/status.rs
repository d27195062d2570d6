use crate::transmutable_u32;
use gl::types::GLenum;

// EXT_framebuffer_object codes, not exported by core profile bindings.
const FRAMEBUFFER_INCOMPLETE_DIMENSIONS_EXT: GLenum = 0x8CD9;
const FRAMEBUFFER_INCOMPLETE_FORMATS_EXT: GLenum = 0x8CDA;

#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramebufferTarget {
    Draw = gl::DRAW_FRAMEBUFFER,
    Read = gl::READ_FRAMEBUFFER,
    Both = gl::FRAMEBUFFER,
}
transmutable_u32!(FramebufferTarget);

/// Result of `glCheckFramebufferStatus`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramebufferStatus {
    Complete,
    Undefined,
    IncompleteAttachment,
    MissingAttachment,
    IncompleteDimensions,
    IncompleteFormats,
    IncompleteDrawBuffer,
    IncompleteReadBuffer,
    IncompleteMultisample,
    IncompleteLayerTargets,
    Unsupported,
    Other(GLenum),
}

impl FramebufferStatus {
    pub const fn from_u32(code: GLenum) -> Self {
        match code {
            gl::FRAMEBUFFER_COMPLETE => Self::Complete,
            gl::FRAMEBUFFER_UNDEFINED => Self::Undefined,
            gl::FRAMEBUFFER_INCOMPLETE_ATTACHMENT => Self::IncompleteAttachment,
            gl::FRAMEBUFFER_INCOMPLETE_MISSING_ATTACHMENT => Self::MissingAttachment,
            FRAMEBUFFER_INCOMPLETE_DIMENSIONS_EXT => Self::IncompleteDimensions,
            FRAMEBUFFER_INCOMPLETE_FORMATS_EXT => Self::IncompleteFormats,
            gl::FRAMEBUFFER_INCOMPLETE_DRAW_BUFFER => Self::IncompleteDrawBuffer,
            gl::FRAMEBUFFER_INCOMPLETE_READ_BUFFER => Self::IncompleteReadBuffer,
            gl::FRAMEBUFFER_INCOMPLETE_MULTISAMPLE => Self::IncompleteMultisample,
            gl::FRAMEBUFFER_INCOMPLETE_LAYER_TARGETS => Self::IncompleteLayerTargets,
            gl::FRAMEBUFFER_UNSUPPORTED => Self::Unsupported,
            other => Self::Other(other),
        }
    }

    /// Queries the framebuffer bound at `target`.
    pub fn query(target: FramebufferTarget) -> Self {
        Self::from_u32(unsafe { gl::CheckFramebufferStatus(target.to_u32()) })
    }

    /// Logs the status of the framebuffer bound at `target` and reports
    /// whether it is complete.
    pub fn check(target: FramebufferTarget) -> bool {
        Self::query(target).report()
    }

    pub const fn is_complete(self) -> bool {
        matches!(self, Self::Complete)
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Complete => "framebuffer check ok",
            Self::Undefined => "framebuffer undefined",
            Self::IncompleteAttachment => "framebuffer incomplete attachment",
            Self::MissingAttachment => "framebuffer missing attachment",
            Self::IncompleteDimensions => "framebuffer incomplete dimensions",
            Self::IncompleteFormats => "framebuffer incomplete formats",
            Self::IncompleteDrawBuffer => "framebuffer incomplete draw buffer",
            Self::IncompleteReadBuffer => "framebuffer incomplete read buffer",
            Self::IncompleteMultisample => "framebuffer incomplete multisample",
            Self::IncompleteLayerTargets => "framebuffer incomplete layer targets",
            Self::Unsupported => "framebuffer unsupported internal format or image",
            Self::Other(_) => "other framebuffer error",
        }
    }

    /// Logs the status line and reports whether it is complete.
    pub fn report(self) -> bool {
        match self {
            Self::Complete => log::trace!("{}", self.description()),
            Self::Other(code) => log::error!("{} ({code:#06x})", self.description()),
            _ => log::error!("{}", self.description()),
        }
        self.is_complete()
    }
}

impl std::fmt::Display for FramebufferStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const KNOWN: [(GLenum, FramebufferStatus); 11] = [
        (gl::FRAMEBUFFER_COMPLETE, FramebufferStatus::Complete),
        (gl::FRAMEBUFFER_UNDEFINED, FramebufferStatus::Undefined),
        (
            gl::FRAMEBUFFER_INCOMPLETE_ATTACHMENT,
            FramebufferStatus::IncompleteAttachment,
        ),
        (
            gl::FRAMEBUFFER_INCOMPLETE_MISSING_ATTACHMENT,
            FramebufferStatus::MissingAttachment,
        ),
        (0x8CD9, FramebufferStatus::IncompleteDimensions),
        (0x8CDA, FramebufferStatus::IncompleteFormats),
        (
            gl::FRAMEBUFFER_INCOMPLETE_DRAW_BUFFER,
            FramebufferStatus::IncompleteDrawBuffer,
        ),
        (
            gl::FRAMEBUFFER_INCOMPLETE_READ_BUFFER,
            FramebufferStatus::IncompleteReadBuffer,
        ),
        (
            gl::FRAMEBUFFER_INCOMPLETE_MULTISAMPLE,
            FramebufferStatus::IncompleteMultisample,
        ),
        (
            gl::FRAMEBUFFER_INCOMPLETE_LAYER_TARGETS,
            FramebufferStatus::IncompleteLayerTargets,
        ),
        (gl::FRAMEBUFFER_UNSUPPORTED, FramebufferStatus::Unsupported),
    ];

    #[test]
    fn decodes_standard_codes() {
        for (code, status) in KNOWN {
            assert_eq!(FramebufferStatus::from_u32(code), status);
        }
    }

    #[test]
    fn only_complete_reports_true() {
        for (_, status) in KNOWN {
            assert_eq!(status.report(), status == FramebufferStatus::Complete);
        }
        assert!(!FramebufferStatus::Other(0x1234).report());
    }

    #[test]
    fn unknown_codes_fall_through() {
        let status = FramebufferStatus::from_u32(0);
        assert_eq!(status, FramebufferStatus::Other(0));
        assert_eq!(status.description(), "other framebuffer error");
    }

    #[test]
    fn every_failure_has_its_own_line() {
        let mut lines: Vec<_> = KNOWN.iter().map(|(_, s)| s.description()).collect();
        lines.sort_unstable();
        lines.dedup();
        assert_eq!(lines.len(), KNOWN.len());
        assert_eq!(
            FramebufferStatus::Unsupported.to_string(),
            "framebuffer unsupported internal format or image"
        );
    }
}
