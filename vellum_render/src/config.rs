// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Screen configuration.

use vellum_core::geometry::Size;

use crate::format::PixelFormat;

/// Most display buffers a [`Screen`](crate::screen::Screen) will flip between.
pub const MAX_BUFFERS: u8 = 3;

/// Environment variable that turns on greenscreen outlines.
pub const GREENSCREEN_VAR: &str = "VELLUM_GREENSCREEN";

/// Environment variable that overrides the pixel format.
pub const FORMAT_VAR: &str = "VELLUM_FORMAT";

/// Parameters for creating a [`Screen`](crate::screen::Screen).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenConfig {
    /// Screen size in pixels.
    pub size: Size,
    /// Pixel format of the composition surface and every display buffer.
    pub format: PixelFormat,
    /// Number of display buffers, `1..=MAX_BUFFERS`.
    pub buffer_count: u8,
    /// Outline rects that were damaged in consecutive flips.
    pub greenscreen: bool,
    /// Optional cap on the number of rects each display buffer's damage list
    /// holds before collapsing to its bounding box.
    pub damage_limit: Option<usize>,
}

impl ScreenConfig {
    /// A single-buffered `Xrgb8888` screen of `size` with diagnostics off.
    #[must_use]
    pub const fn new(size: Size) -> Self {
        Self {
            size,
            format: PixelFormat::Xrgb8888,
            buffer_count: 1,
            greenscreen: false,
            damage_limit: None,
        }
    }

    /// Sets the pixel format.
    #[must_use]
    pub const fn with_format(mut self, format: PixelFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets the number of display buffers.
    #[must_use]
    pub const fn with_buffers(mut self, count: u8) -> Self {
        self.buffer_count = count;
        self
    }

    /// Enables or disables greenscreen outlines.
    #[must_use]
    pub const fn with_greenscreen(mut self, enabled: bool) -> Self {
        self.greenscreen = enabled;
        self
    }

    /// Caps the per-buffer damage list length.
    #[must_use]
    pub const fn with_damage_limit(mut self, limit: Option<usize>) -> Self {
        self.damage_limit = limit;
        self
    }

    /// Applies overrides from `lookup`, which maps a variable name to its
    /// value.
    ///
    /// An unparseable format is ignored and the configured one kept.
    #[must_use]
    pub fn apply_lookup<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<alloc::string::String>,
    {
        if let Some(value) = lookup(GREENSCREEN_VAR) {
            self.greenscreen = parse_flag(&value);
        }
        if let Some(format) = lookup(FORMAT_VAR).and_then(|v| v.parse().ok()) {
            self.format = format;
        }
        self
    }

    /// Applies overrides from the process environment.
    #[cfg(feature = "std")]
    #[must_use]
    pub fn apply_env(self) -> Self {
        self.apply_lookup(|name| std::env::var(name).ok())
    }
}

/// Interprets an environment flag. Empty, `0`, and `false` (any case) are
/// off; everything else is on.
#[must_use]
pub fn parse_flag(value: &str) -> bool {
    let value = value.trim();
    !(value.is_empty() || value == "0" || value.eq_ignore_ascii_case("false"))
}

#[cfg(test)]
mod tests {
    use alloc::string::{String, ToString};

    use super::*;

    #[test]
    fn defaults() {
        let config = ScreenConfig::new(Size::new(800, 480));
        assert_eq!(config.format, PixelFormat::Xrgb8888);
        assert_eq!(config.buffer_count, 1);
        assert!(!config.greenscreen);
        assert_eq!(config.damage_limit, None);
    }

    #[test]
    fn builder_chain() {
        let config = ScreenConfig::new(Size::new(320, 240))
            .with_format(PixelFormat::Rgb565)
            .with_buffers(2)
            .with_greenscreen(true)
            .with_damage_limit(Some(8));
        assert_eq!(config.format, PixelFormat::Rgb565);
        assert_eq!(config.buffer_count, 2);
        assert!(config.greenscreen);
        assert_eq!(config.damage_limit, Some(8));
    }

    #[test]
    fn flags() {
        for off in ["", "0", "false", "FALSE", "  "] {
            assert!(!parse_flag(off), "{off:?} should be off");
        }
        for on in ["1", "yes", "true", "on"] {
            assert!(parse_flag(on), "{on:?} should be on");
        }
    }

    #[test]
    fn lookup_overrides() {
        let env = |name: &str| -> Option<String> {
            match name {
                GREENSCREEN_VAR => Some("1".to_string()),
                FORMAT_VAR => Some("rgb565".to_string()),
                _ => None,
            }
        };
        let config = ScreenConfig::new(Size::new(10, 10)).apply_lookup(env);
        assert!(config.greenscreen);
        assert_eq!(config.format, PixelFormat::Rgb565);
    }

    #[test]
    fn bad_format_keeps_configured() {
        let config = ScreenConfig::new(Size::new(10, 10))
            .with_format(PixelFormat::Argb8888)
            .apply_lookup(|name| (name == FORMAT_VAR).then(|| "yuv420".to_string()));
        assert_eq!(config.format, PixelFormat::Argb8888);
        assert!(!config.greenscreen);
    }
}
