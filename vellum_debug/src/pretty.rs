// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use vellum_core::geometry::Rect;
use vellum_core::trace::{
    DamageEvent, DrawBeginEvent, DrawEndEvent, FlipEvent, FlipSkipReason, FlipSkippedEvent,
    GreenscreenEvent, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
    rect_details: bool,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink")
            .field("rect_details", &self.rect_details)
            .finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self::with_writer(Box::new(std::io::stderr()))
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self {
            writer,
            rect_details: false,
        }
    }

    /// Also print every copied rect, one line each.
    #[must_use]
    pub fn with_rect_details(mut self, enabled: bool) -> Self {
        self.rect_details = enabled;
        self
    }

    /// Consumes the sink and returns the writer.
    pub fn into_writer(self) -> W {
        self.writer
    }
}

fn skip_reason(reason: FlipSkipReason) -> &'static str {
    match reason {
        FlipSkipReason::NoDamage => "no damage",
        FlipSkipReason::InvalidIndex => "invalid buffer index",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_damage(&mut self, e: &DamageEvent) {
        let _ = writeln!(
            self.writer,
            "[damage] root={} rect={:?} regions={}",
            e.root, e.rect, e.list_len,
        );
    }

    fn on_draw_begin(&mut self, e: &DrawBeginEvent) {
        let _ = writeln!(
            self.writer,
            "[draw:begin] pass={} root={} rects={} area={}px",
            e.pass_index, e.root, e.rect_count, e.damaged_area,
        );
    }

    fn on_draw_end(&mut self, e: &DrawEndEvent) {
        let _ = writeln!(
            self.writer,
            "[draw:end] pass={} paints={}",
            e.pass_index, e.paint_calls,
        );
    }

    fn on_flip(&mut self, e: &FlipEvent) {
        let _ = writeln!(
            self.writer,
            "[flip] flip={} buffer={}/{} copied={}px",
            e.flip_index, e.buffer_index, e.buffer_count, e.copied_area,
        );
    }

    fn on_copy_rects(&mut self, flip_index: u64, rects: &[Rect]) {
        if !self.rect_details {
            return;
        }
        for rect in rects {
            let _ = writeln!(self.writer, "[copy] flip={flip_index} rect={rect:?}");
        }
    }

    fn on_flip_skipped(&mut self, e: &FlipSkippedEvent) {
        let _ = writeln!(
            self.writer,
            "[flip:skip] flip={} reason={}",
            e.flip_index,
            skip_reason(e.reason),
        );
    }

    fn on_greenscreen(&mut self, e: &GreenscreenEvent) {
        let _ = writeln!(
            self.writer,
            "[greenscreen] flip={} rect={:?}",
            e.flip_index, e.rect,
        );
    }
}
