// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pixel formats and colors.
//!
//! Display hardware on the targets vellum cares about speaks a small closed
//! set of packed formats. Pixels are stored little-endian, matching Linux
//! framebuffer and DRM dumb-buffer layouts.

use core::fmt;
use core::str::FromStr;

/// An 8-bit-per-channel color.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha (stored only by formats that carry it).
    pub a: u8,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(0xff, 0xff, 0xff);
    /// Opaque green, used for greenscreen outlines.
    pub const GREEN: Self = Self::rgb(0, 0xff, 0);
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    /// Creates an opaque color.
    #[inline]
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    /// Creates a color with alpha.
    #[inline]
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:02x}{:02x}{:02x}{:02x}",
            self.r, self.g, self.b, self.a
        )
    }
}

/// A packed pixel format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum PixelFormat {
    /// 16-bit `RRRRRGGG GGGBBBBB`.
    Rgb565,
    /// 32-bit `AARRGGBB`.
    Argb8888,
    /// 32-bit `xxRRGGBB`; the top byte is ignored on read and written as `0xff`.
    #[default]
    Xrgb8888,
}

impl PixelFormat {
    /// Bytes occupied by one pixel.
    #[inline]
    #[must_use]
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Rgb565 => 2,
            Self::Argb8888 | Self::Xrgb8888 => 4,
        }
    }

    /// Maps a framebuffer depth to a format.
    ///
    /// A 32-bit framebuffer does not say whether it honors alpha, so it maps
    /// to [`Xrgb8888`](Self::Xrgb8888).
    #[must_use]
    pub const fn from_bits_per_pixel(bits: u32) -> Option<Self> {
        match bits {
            16 => Some(Self::Rgb565),
            32 => Some(Self::Xrgb8888),
            _ => None,
        }
    }

    /// Returns `true` if the format stores alpha.
    #[inline]
    #[must_use]
    pub const fn has_alpha(self) -> bool {
        matches!(self, Self::Argb8888)
    }

    /// Packs `color` into the format's integer representation.
    #[must_use]
    pub const fn pack(self, color: Color) -> u32 {
        let (r, g, b, a) = (
            color.r as u32,
            color.g as u32,
            color.b as u32,
            color.a as u32,
        );
        match self {
            Self::Rgb565 => ((r >> 3) << 11) | ((g >> 2) << 5) | (b >> 3),
            Self::Argb8888 => (a << 24) | (r << 16) | (g << 8) | b,
            Self::Xrgb8888 => (0xff << 24) | (r << 16) | (g << 8) | b,
        }
    }

    /// Unpacks a pixel value produced by [`pack`](Self::pack).
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "each channel is masked to 8 bits before the cast"
    )]
    pub const fn unpack(self, value: u32) -> Color {
        match self {
            Self::Rgb565 => {
                let r5 = (value >> 11) & 0x1f;
                let g6 = (value >> 5) & 0x3f;
                let b5 = value & 0x1f;
                Color::rgb(
                    ((r5 << 3) | (r5 >> 2)) as u8,
                    ((g6 << 2) | (g6 >> 4)) as u8,
                    ((b5 << 3) | (b5 >> 2)) as u8,
                )
            }
            Self::Argb8888 => Color::rgba(
                ((value >> 16) & 0xff) as u8,
                ((value >> 8) & 0xff) as u8,
                (value & 0xff) as u8,
                ((value >> 24) & 0xff) as u8,
            ),
            Self::Xrgb8888 => Color::rgb(
                ((value >> 16) & 0xff) as u8,
                ((value >> 8) & 0xff) as u8,
                (value & 0xff) as u8,
            ),
        }
    }

    /// Writes `color` into `out` (which must be exactly one pixel long).
    pub fn encode(self, color: Color, out: &mut [u8]) {
        let bytes = self.pack(color).to_le_bytes();
        out.copy_from_slice(&bytes[..self.bytes_per_pixel()]);
    }

    /// Reads one pixel from `bytes` (which must be exactly one pixel long).
    #[must_use]
    pub fn decode(self, bytes: &[u8]) -> Color {
        let mut wide = [0_u8; 4];
        wide[..bytes.len()].copy_from_slice(bytes);
        self.unpack(u32::from_le_bytes(wide))
    }

    /// Lowercase name, as accepted by [`FromStr`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rgb565 => "rgb565",
            Self::Argb8888 => "argb8888",
            Self::Xrgb8888 => "xrgb8888",
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a pixel format name is not recognized.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseFormatError;

impl fmt::Display for ParseFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown pixel format (expected rgb565, argb8888, or xrgb8888)")
    }
}

impl core::error::Error for ParseFormatError {}

impl FromStr for PixelFormat {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        [Self::Rgb565, Self::Argb8888, Self::Xrgb8888]
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(s))
            .ok_or(ParseFormatError)
    }
}
