// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Framebuffer errors.

use core::fmt;
use std::path::PathBuf;

use rustix::io::Errno;
use vellum_render::PixelFormat;

/// Errors from opening or writing a Linux framebuffer.
#[derive(Debug)]
pub enum FbdevError {
    /// The device node could not be opened.
    Open {
        /// The device path.
        path: PathBuf,
        /// The OS error.
        errno: Errno,
    },
    /// A sysfs attribute could not be read.
    Sysfs {
        /// The attribute path.
        path: PathBuf,
        /// The I/O error.
        source: std::io::Error,
    },
    /// A sysfs attribute did not have the expected shape.
    Parse {
        /// Which attribute.
        what: &'static str,
        /// The text that failed to parse.
        value: String,
    },
    /// The framebuffer depth has no matching [`PixelFormat`].
    UnsupportedDepth(u32),
    /// A surface of the wrong format was handed to the backend.
    FormatMismatch {
        /// The framebuffer's format.
        expected: PixelFormat,
        /// The surface's format.
        actual: PixelFormat,
    },
    /// Writing to the device failed.
    Write {
        /// Byte offset of the failed write.
        offset: u64,
        /// The OS error.
        errno: Errno,
    },
    /// The device accepted zero bytes (the offset is past its end).
    ShortWrite {
        /// Byte offset of the failed write.
        offset: u64,
    },
}

impl fmt::Display for FbdevError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open { path, errno } => {
                write!(f, "cannot open framebuffer {}: {errno}", path.display())
            }
            Self::Sysfs { path, source } => {
                write!(f, "cannot read {}: {source}", path.display())
            }
            Self::Parse { what, value } => write!(f, "malformed {what}: {value:?}"),
            Self::UnsupportedDepth(bits) => {
                write!(f, "unsupported framebuffer depth ({bits} bits per pixel)")
            }
            Self::FormatMismatch { expected, actual } => {
                write!(f, "surface is {actual}, framebuffer is {expected}")
            }
            Self::Write { offset, errno } => {
                write!(f, "framebuffer write at byte {offset} failed: {errno}")
            }
            Self::ShortWrite { offset } => {
                write!(f, "framebuffer write at byte {offset} made no progress")
            }
        }
    }
}

impl core::error::Error for FbdevError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Sysfs { source, .. } => Some(source),
            Self::Open { errno, .. } | Self::Write { errno, .. } => Some(errno),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        let e = FbdevError::FormatMismatch {
            expected: PixelFormat::Rgb565,
            actual: PixelFormat::Xrgb8888,
        };
        assert_eq!(e.to_string(), "surface is xrgb8888, framebuffer is rgb565");
        assert_eq!(
            FbdevError::UnsupportedDepth(24).to_string(),
            "unsupported framebuffer depth (24 bits per pixel)"
        );
    }

    #[test]
    fn io_errors_are_chained() {
        use core::error::Error;

        let e = FbdevError::Sysfs {
            path: PathBuf::from("/sys/class/graphics/fb0/stride"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(e.source().is_some());
        assert!(FbdevError::ShortWrite { offset: 0 }.source().is_none());
    }
}
