// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Framebuffer geometry from `/sys/class/graphics/fbN`.

use std::path::{Path, PathBuf};

use vellum_core::geometry::Size;
use vellum_render::PixelFormat;

use crate::error::FbdevError;

/// Size, depth, and row pitch of a framebuffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FbGeometry {
    /// Visible size in pixels.
    pub size: Size,
    /// Pixel format derived from the depth.
    pub format: PixelFormat,
    /// Bytes per row in device memory (may exceed `width * bytes_per_pixel`).
    pub stride: usize,
}

impl FbGeometry {
    /// Builds geometry from the contents of the `virtual_size`,
    /// `bits_per_pixel`, and (optional) `stride` attributes.
    ///
    /// A missing stride is taken to be tightly packed.
    ///
    /// # Errors
    ///
    /// Returns [`FbdevError::Parse`] for malformed text and
    /// [`FbdevError::UnsupportedDepth`] for depths other than 16 and 32.
    pub fn parse(
        virtual_size: &str,
        bits_per_pixel: &str,
        stride: Option<&str>,
    ) -> Result<Self, FbdevError> {
        let size = parse_virtual_size(virtual_size)?;
        let bits = parse_number("bits_per_pixel", bits_per_pixel)?;
        let format = PixelFormat::from_bits_per_pixel(bits).ok_or(FbdevError::UnsupportedDepth(bits))?;
        let packed = size.width.unsigned_abs() as usize * format.bytes_per_pixel();
        let stride = match stride {
            Some(text) => parse_number("stride", text)? as usize,
            None => packed,
        };
        if stride < packed {
            return Err(FbdevError::Parse {
                what: "stride",
                value: stride.to_string(),
            });
        }
        Ok(Self {
            size,
            format,
            stride,
        })
    }

    /// Reads geometry from a sysfs directory such as
    /// `/sys/class/graphics/fb0`.
    ///
    /// # Errors
    ///
    /// Returns [`FbdevError::Sysfs`] if a required attribute cannot be read,
    /// or any error from [`parse`](Self::parse).
    pub fn read(dir: &Path) -> Result<Self, FbdevError> {
        let virtual_size = read_attr(dir, "virtual_size")?;
        let bits = read_attr(dir, "bits_per_pixel")?;
        let stride = read_attr(dir, "stride").ok();
        Self::parse(&virtual_size, &bits, stride.as_deref())
    }

    /// Byte offset of pixel `(x, y)` in device memory.
    #[must_use]
    pub fn offset(&self, x: i32, y: i32) -> u64 {
        let x = x.max(0).unsigned_abs() as usize;
        let y = y.max(0).unsigned_abs() as usize;
        (y * self.stride + x * self.format.bytes_per_pixel()) as u64
    }
}

/// The sysfs directory of framebuffer `index`.
#[must_use]
pub fn sysfs_dir(index: u32) -> PathBuf {
    PathBuf::from(format!("/sys/class/graphics/fb{index}"))
}

fn read_attr(dir: &Path, name: &str) -> Result<String, FbdevError> {
    let path = dir.join(name);
    std::fs::read_to_string(&path).map_err(|source| FbdevError::Sysfs { path, source })
}

fn parse_number(what: &'static str, text: &str) -> Result<u32, FbdevError> {
    text.trim().parse().map_err(|_| FbdevError::Parse {
        what,
        value: text.trim().to_string(),
    })
}

/// Parses `virtual_size`, which the kernel writes as `"<width>,<height>\n"`.
fn parse_virtual_size(text: &str) -> Result<Size, FbdevError> {
    let malformed = || FbdevError::Parse {
        what: "virtual_size",
        value: text.trim().to_string(),
    };
    let (w, h) = text.trim().split_once(',').ok_or_else(malformed)?;
    let width: i32 = w.trim().parse().map_err(|_| malformed())?;
    let height: i32 = h.trim().parse().map_err(|_| malformed())?;
    if width <= 0 || height <= 0 {
        return Err(malformed());
    }
    Ok(Size::new(width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_kernel_attributes() {
        let g = FbGeometry::parse("800,480\n", "16\n", Some("1600\n")).unwrap();
        assert_eq!(g.size, Size::new(800, 480));
        assert_eq!(g.format, PixelFormat::Rgb565);
        assert_eq!(g.stride, 1600);
        assert_eq!(g.offset(2, 1), 1604);
    }

    #[test]
    fn missing_stride_is_packed() {
        let g = FbGeometry::parse("320,240", "32", None).unwrap();
        assert_eq!(g.format, PixelFormat::Xrgb8888);
        assert_eq!(g.stride, 1280);
    }

    #[test]
    fn padded_stride_is_kept() {
        let g = FbGeometry::parse("100,10", "16", Some("256")).unwrap();
        assert_eq!(g.stride, 256);
        assert_eq!(g.offset(0, 2), 512);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(
            FbGeometry::parse("800x480", "16", None),
            Err(FbdevError::Parse { what: "virtual_size", .. })
        ));
        assert!(matches!(
            FbGeometry::parse("0,480", "16", None),
            Err(FbdevError::Parse { what: "virtual_size", .. })
        ));
        assert!(matches!(
            FbGeometry::parse("800,480", "24", None),
            Err(FbdevError::UnsupportedDepth(24))
        ));
        assert!(matches!(
            FbGeometry::parse("800,480", "16", Some("100")),
            Err(FbdevError::Parse { what: "stride", .. })
        ));
    }

    #[test]
    fn reads_from_directory() {
        let dir = std::env::temp_dir().join(format!("vellum-sysfs-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("virtual_size"), "64,32\n").unwrap();
        std::fs::write(dir.join("bits_per_pixel"), "32\n").unwrap();
        let g = FbGeometry::read(&dir).unwrap();
        assert_eq!(g.size, Size::new(64, 32));
        assert_eq!(g.stride, 256);

        std::fs::remove_file(dir.join("bits_per_pixel")).unwrap();
        assert!(matches!(
            FbGeometry::read(&dir),
            Err(FbdevError::Sysfs { .. })
        ));
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn sysfs_dir_names_device() {
        assert_eq!(sysfs_dir(1), PathBuf::from("/sys/class/graphics/fb1"));
    }
}
