// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The paint capability of leaf widgets.

use core::fmt;

use vellum_core::geometry::Rect;
use vellum_render::{Color, Painter};

/// Draws a widget's content.
///
/// `widget_box` is the widget's full box in screen coordinates. `rect` is the
/// part of it being redrawn, always contained in `widget_box`. The painter is
/// already clipped to `rect`, so an implementation may draw its whole box and
/// let the clip discard the rest, or restrict itself to `rect` when that is
/// cheaper.
pub trait Paint {
    /// Paints the part of the widget inside `rect`.
    fn paint(&mut self, painter: &mut Painter<'_>, widget_box: Rect, rect: Rect);

    /// A short name for diagnostics (tree dumps, traces).
    fn name(&self) -> &'static str {
        "widget"
    }
}

impl fmt::Debug for dyn Paint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Paint({})", self.name())
    }
}

/// A widget that fills its box with one color, optionally with a border.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SolidFill {
    /// Fill color.
    pub color: Color,
    /// 1px border color, if any.
    pub border: Option<Color>,
}

impl SolidFill {
    /// A borderless fill.
    #[must_use]
    pub const fn new(color: Color) -> Self {
        Self {
            color,
            border: None,
        }
    }

    /// Adds a 1px border.
    #[must_use]
    pub const fn with_border(mut self, border: Color) -> Self {
        self.border = Some(border);
        self
    }
}

impl Paint for SolidFill {
    fn paint(&mut self, painter: &mut Painter<'_>, widget_box: Rect, rect: Rect) {
        painter.fill_rect(rect, self.color);
        if let Some(border) = self.border {
            painter.stroke_rect(widget_box, border);
        }
    }

    fn name(&self) -> &'static str {
        "solid_fill"
    }
}
