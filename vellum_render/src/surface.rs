// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pixel surfaces and the painter that draws into them.
//!
//! A [`Surface`] is a tightly packed byte buffer in one [`PixelFormat`]. The
//! composition surface, every display buffer, and test fixtures are all
//! surfaces. Widgets never touch one directly: they receive a [`Painter`],
//! whose clip keeps them inside the damage rect they were asked to draw.
//!
//! All operations use source-copy semantics. Destination pixels are replaced,
//! never blended.

use alloc::vec;
use alloc::vec::Vec;

use vellum_core::geometry::{Point, Rect, Size};

use crate::format::{Color, PixelFormat};

/// Converts a coordinate already clipped to a surface into an index.
#[inline]
fn to_index(v: i32) -> usize {
    v.max(0).unsigned_abs() as usize
}

/// An owned pixel buffer.
#[derive(Clone, PartialEq, Eq)]
pub struct Surface {
    data: Vec<u8>,
    size: Size,
    stride: usize,
    format: PixelFormat,
}

impl core::fmt::Debug for Surface {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Surface")
            .field("size", &self.size)
            .field("stride", &self.stride)
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}

impl Surface {
    /// Creates a surface with every byte zeroed.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is negative.
    #[must_use]
    pub fn new(size: Size, format: PixelFormat) -> Self {
        assert!(
            size.width >= 0 && size.height >= 0,
            "surface has negative size: {size:?}"
        );
        let stride = to_index(size.width) * format.bytes_per_pixel();
        Self {
            data: vec![0; stride * to_index(size.height)],
            size,
            stride,
            format,
        }
    }

    /// Creates a surface filled with `color`.
    #[must_use]
    pub fn filled(size: Size, format: PixelFormat, color: Color) -> Self {
        let mut surface = Self::new(size, format);
        surface.clear(color);
        surface
    }

    /// Width and height in pixels.
    #[inline]
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    /// The rect covering the whole surface, anchored at the origin.
    #[inline]
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(Point::default(), self.size)
    }

    /// The surface's pixel format.
    #[inline]
    #[must_use]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Bytes per row.
    #[inline]
    #[must_use]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// The raw pixel bytes.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    fn offset(&self, x: i32, y: i32) -> usize {
        to_index(y) * self.stride + to_index(x) * self.format.bytes_per_pixel()
    }

    /// Returns the bytes for `width` pixels of row `y` starting at `x`,
    /// clipped to the surface. Out-of-range requests yield an empty slice.
    #[must_use]
    pub fn row_span(&self, y: i32, x: i32, width: i32) -> &[u8] {
        let r = Rect::from_edges(x, y, x.saturating_add(width), y + 1).intersection(&self.bounds());
        if r.is_empty() {
            return &[];
        }
        let start = self.offset(r.x, r.y);
        let len = to_index(r.width) * self.format.bytes_per_pixel();
        &self.data[start..start + len]
    }

    /// Reads the pixel at `point`, or `None` if it is outside the surface.
    #[must_use]
    pub fn pixel(&self, point: Point) -> Option<Color> {
        if !self.bounds().contains(point) {
            return None;
        }
        let start = self.offset(point.x, point.y);
        let bpp = self.format.bytes_per_pixel();
        Some(self.format.decode(&self.data[start..start + bpp]))
    }

    /// Returns `true` if every pixel of `rect` (clipped to the surface) reads
    /// back as `color`.
    #[must_use]
    pub fn is_filled_with(&self, rect: Rect, color: Color) -> bool {
        let r = rect.intersection(&self.bounds());
        (r.y..r.bottom()).all(|y| {
            (r.x..r.right()).all(|x| self.pixel(Point::new(x, y)) == Some(color))
        })
    }

    /// Fills the whole surface.
    pub fn clear(&mut self, color: Color) {
        let bounds = self.bounds();
        self.painter().fill_rect(bounds, color);
    }

    /// Fills `rect` (clipped to the surface).
    pub fn fill(&mut self, rect: Rect, color: Color) {
        self.painter().fill_rect(rect, color);
    }

    /// Copies `rect` from `src` into the same position in `self`, replacing
    /// the destination pixels. Returns the number of pixels copied.
    ///
    /// The rect is clipped to both surfaces.
    ///
    /// # Panics
    ///
    /// Panics if the surfaces have different pixel formats.
    pub fn copy_from(&mut self, src: &Self, rect: Rect) -> u64 {
        assert_eq!(
            self.format, src.format,
            "surface formats differ; source-copy needs matching formats"
        );
        let r = rect
            .intersection(&self.bounds())
            .intersection(&src.bounds());
        if r.is_empty() {
            return 0;
        }

        let len = to_index(r.width) * self.format.bytes_per_pixel();
        for y in r.y..r.bottom() {
            let s = src.offset(r.x, y);
            let d = self.offset(r.x, y);
            self.data[d..d + len].copy_from_slice(&src.data[s..s + len]);
        }
        r.area()
    }

    /// Returns a painter covering the whole surface.
    #[must_use]
    pub fn painter(&mut self) -> Painter<'_> {
        Painter::new(self)
    }
}

/// A drawing context over a [`Surface`] with a clip rectangle.
///
/// Every operation is clipped to the surface bounds and the current clip.
#[derive(Debug)]
pub struct Painter<'a> {
    surface: &'a mut Surface,
    clip: Rect,
}

impl<'a> Painter<'a> {
    /// Creates a painter whose clip is the whole surface.
    #[must_use]
    pub fn new(surface: &'a mut Surface) -> Self {
        let clip = surface.bounds();
        Self { surface, clip }
    }

    /// The current clip.
    #[inline]
    #[must_use]
    pub fn clip(&self) -> Rect {
        self.clip
    }

    /// Restricts drawing to `rect` (intersected with the surface).
    pub fn set_clip(&mut self, rect: Rect) {
        self.clip = rect.intersection(&self.surface.bounds());
    }

    /// Restores the clip to the whole surface.
    pub fn reset_clip(&mut self) {
        self.clip = self.surface.bounds();
    }

    /// Size of the target surface.
    #[must_use]
    pub fn size(&self) -> Size {
        self.surface.size()
    }

    /// Format of the target surface.
    #[must_use]
    pub fn format(&self) -> PixelFormat {
        self.surface.format()
    }

    /// Replaces every pixel of `rect` with `color`.
    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let r = rect.intersection(&self.clip);
        if r.is_empty() {
            return;
        }

        let format = self.surface.format;
        let bpp = format.bytes_per_pixel();
        let mut px = [0_u8; 4];
        format.encode(color, &mut px[..bpp]);

        let len = to_index(r.width) * bpp;
        for y in r.y..r.bottom() {
            let start = self.surface.offset(r.x, y);
            for chunk in self.surface.data[start..start + len].chunks_exact_mut(bpp) {
                chunk.copy_from_slice(&px[..bpp]);
            }
        }
    }

    /// Draws a one-pixel outline just inside `rect`.
    pub fn stroke_rect(&mut self, rect: Rect, color: Color) {
        if rect.is_empty() {
            return;
        }
        let Rect {
            x,
            y,
            width,
            height,
        } = rect;
        self.fill_rect(Rect::new(x, y, width, 1), color);
        self.fill_rect(Rect::new(x, rect.bottom() - 1, width, 1), color);
        self.fill_rect(Rect::new(x, y, 1, height), color);
        self.fill_rect(Rect::new(rect.right() - 1, y, 1, height), color);
    }

    /// Sets a single pixel.
    pub fn set_pixel(&mut self, point: Point, color: Color) {
        self.fill_rect(Rect::new(point.x, point.y, 1, 1), color);
    }
}
