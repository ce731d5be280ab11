// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw framebuffer presentation.
//!
//! The framebuffer is single-buffered: the display scans out device memory
//! directly, so [`index`](Backend::index) is always `0` and a flip is a
//! synchronous write of the copied rects, row by row, at the device's stride.

use std::os::fd::OwnedFd;
use std::path::{Path, PathBuf};

use rustix::fs::{Mode, OFlags, open};
use rustix::io::pwrite;
use vellum_core::geometry::Rect;
use vellum_render::{Backend, PresentRequest, ScreenConfig, Surface};

use crate::error::FbdevError;
use crate::sysfs::{FbGeometry, sysfs_dir};

/// Presents display buffers by writing them into `/dev/fbN`.
///
/// [`Backend::schedule_flip`] cannot fail by contract, so write errors are
/// recorded on the backend instead: see [`last_error`](Self::last_error) and
/// [`failed_writes`](Self::failed_writes).
#[derive(Debug)]
pub struct FramebufferBackend {
    fd: OwnedFd,
    path: PathBuf,
    geometry: FbGeometry,
    last_error: Option<FbdevError>,
    failed_writes: u64,
    bytes_written: u64,
}

impl FramebufferBackend {
    /// Opens `/dev/fb{index}` and reads its geometry from sysfs.
    ///
    /// # Errors
    ///
    /// Returns an error if the device cannot be opened or its geometry read.
    pub fn open(index: u32) -> Result<Self, FbdevError> {
        let device = PathBuf::from(format!("/dev/fb{index}"));
        Self::open_paths(&device, &sysfs_dir(index))
    }

    /// Opens `device` with geometry read from the sysfs directory `sysfs`.
    ///
    /// # Errors
    ///
    /// Returns an error if the device cannot be opened or its geometry read.
    pub fn open_paths(device: &Path, sysfs: &Path) -> Result<Self, FbdevError> {
        let geometry = FbGeometry::read(sysfs)?;
        Self::with_geometry(device, geometry)
    }

    /// Opens `device` with known geometry.
    ///
    /// # Errors
    ///
    /// Returns [`FbdevError::Open`] if the device cannot be opened.
    pub fn with_geometry(device: &Path, geometry: FbGeometry) -> Result<Self, FbdevError> {
        let fd = open(device, OFlags::RDWR | OFlags::CLOEXEC, Mode::empty()).map_err(|errno| {
            FbdevError::Open {
                path: device.to_path_buf(),
                errno,
            }
        })?;
        Ok(Self {
            fd,
            path: device.to_path_buf(),
            geometry,
            last_error: None,
            failed_writes: 0,
            bytes_written: 0,
        })
    }

    /// The device geometry.
    #[must_use]
    pub fn geometry(&self) -> FbGeometry {
        self.geometry
    }

    /// The device path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A single-buffered screen configuration matching the device.
    #[must_use]
    pub fn screen_config(&self) -> ScreenConfig {
        ScreenConfig::new(self.geometry.size).with_format(self.geometry.format)
    }

    /// The most recent write error, if any.
    #[must_use]
    pub fn last_error(&self) -> Option<&FbdevError> {
        self.last_error.as_ref()
    }

    /// Takes the most recent write error, clearing it.
    pub fn take_error(&mut self) -> Option<FbdevError> {
        self.last_error.take()
    }

    /// Number of flips that failed to reach the device completely.
    #[must_use]
    pub fn failed_writes(&self) -> u64 {
        self.failed_writes
    }

    /// Total bytes written to the device.
    #[must_use]
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Writes `rects` of `surface` to the device.
    ///
    /// # Errors
    ///
    /// Returns the first error; rows before it have been written.
    pub fn write_rects(&mut self, surface: &Surface, rects: &[Rect]) -> Result<(), FbdevError> {
        if surface.format() != self.geometry.format {
            return Err(FbdevError::FormatMismatch {
                expected: self.geometry.format,
                actual: surface.format(),
            });
        }
        let device = Rect::new(0, 0, self.geometry.size.width, self.geometry.size.height);
        for rect in rects {
            let r = rect.intersection(&device).intersection(&surface.bounds());
            for y in r.y..r.bottom() {
                let row = surface.row_span(y, r.x, r.width);
                self.write_all_at(row, self.geometry.offset(r.x, y))?;
            }
        }
        Ok(())
    }

    fn write_all_at(&mut self, mut buf: &[u8], mut offset: u64) -> Result<(), FbdevError> {
        while !buf.is_empty() {
            match pwrite(&self.fd, buf, offset) {
                Ok(0) => return Err(FbdevError::ShortWrite { offset }),
                Ok(n) => {
                    buf = &buf[n..];
                    offset += n as u64;
                    self.bytes_written += n as u64;
                }
                Err(rustix::io::Errno::INTR) => {}
                Err(errno) => return Err(FbdevError::Write { offset, errno }),
            }
        }
        Ok(())
    }
}

impl Backend for FramebufferBackend {
    fn schedule_flip(&mut self, request: PresentRequest<'_>) {
        if let Err(err) = self.write_rects(request.surface, request.copied) {
            self.failed_writes += 1;
            self.last_error = Some(err);
        }
    }
}

#[cfg(test)]
mod tests {
    use vellum_core::geometry::{Point, Size};
    use vellum_render::{Color, PixelFormat};

    use super::*;

    /// A regular file standing in for device memory.
    struct FakeDevice {
        path: PathBuf,
    }

    impl FakeDevice {
        fn new(name: &str, len: usize) -> Self {
            let path = std::env::temp_dir()
                .join(format!("vellum-fb-{name}-{}", std::process::id()));
            std::fs::write(&path, vec![0_u8; len]).unwrap();
            Self { path }
        }

        fn bytes(&self) -> Vec<u8> {
            std::fs::read(&self.path).unwrap()
        }
    }

    impl Drop for FakeDevice {
        fn drop(&mut self) {
            let _ = std::fs::remove_file(&self.path);
        }
    }

    fn geometry(stride: usize) -> FbGeometry {
        FbGeometry {
            size: Size::new(4, 3),
            format: PixelFormat::Rgb565,
            stride,
        }
    }

    #[test]
    fn writes_only_copied_rows_at_device_stride() {
        let dev = FakeDevice::new("stride", 16 * 3);
        let mut fb = FramebufferBackend::with_geometry(&dev.path, geometry(16)).unwrap();
        let mut surface = Surface::new(Size::new(4, 3), PixelFormat::Rgb565);
        surface.fill(Rect::new(1, 1, 2, 1), Color::WHITE);

        fb.schedule_flip(PresentRequest {
            index: 0,
            surface: &surface,
            copied: &[Rect::new(1, 1, 2, 1)],
        });
        assert!(fb.last_error().is_none());
        assert_eq!(fb.bytes_written(), 4);

        let bytes = dev.bytes();
        assert_eq!(&bytes[16 + 2..16 + 6], &[0xff; 4]);
        assert!(bytes[..16].iter().all(|&b| b == 0), "row 0 untouched");
        assert!(bytes[16 + 6..].iter().all(|&b| b == 0), "rest untouched");
        assert_eq!(surface.pixel(Point::new(1, 1)), Some(Color::WHITE));
    }

    #[test]
    fn format_mismatch_is_recorded() {
        let dev = FakeDevice::new("format", 8 * 3);
        let mut fb = FramebufferBackend::with_geometry(&dev.path, geometry(8)).unwrap();
        let surface = Surface::new(Size::new(4, 3), PixelFormat::Xrgb8888);
        fb.schedule_flip(PresentRequest {
            index: 0,
            surface: &surface,
            copied: &[Rect::new(0, 0, 4, 3)],
        });
        assert_eq!(fb.failed_writes(), 1);
        assert!(matches!(
            fb.take_error(),
            Some(FbdevError::FormatMismatch { .. })
        ));
        assert!(fb.last_error().is_none());
    }

    #[test]
    fn screen_config_matches_device() {
        let dev = FakeDevice::new("config", 8 * 3);
        let fb = FramebufferBackend::with_geometry(&dev.path, geometry(8)).unwrap();
        let config = fb.screen_config();
        assert_eq!(config.size, Size::new(4, 3));
        assert_eq!(config.format, PixelFormat::Rgb565);
        assert_eq!(config.buffer_count, 1);
        assert_eq!(fb.index(), 0);
    }

    #[test]
    fn missing_device_fails_to_open() {
        let err = FramebufferBackend::with_geometry(
            Path::new("/nonexistent/vellum/fb9"),
            geometry(8),
        )
        .unwrap_err();
        assert!(matches!(err, FbdevError::Open { .. }));
    }
}
