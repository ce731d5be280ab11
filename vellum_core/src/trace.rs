// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for draw passes and flips.
//!
//! Compositor bugs are silent: a lost damage rect shows up as stale pixels,
//! not as an error. This module gives the draw loop a way to report what it
//! did so those bugs can be seen.
//!
//! [`TraceSink`] has one method per event, each defaulting to a no-op.
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. With the `trace` feature
//! **off**, every `Tracer` method compiles to nothing; with it **on**, each
//! method costs a single `Option` branch.
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies.

use crate::geometry::Rect;

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when damage reaches a root frame's list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DamageEvent {
    /// Slot index of the root widget that accumulated the damage.
    pub root: u32,
    /// The rect as requested (before merging).
    pub rect: Rect,
    /// Number of regions in the root's list after merging.
    pub list_len: u32,
}

/// Emitted when a draw pass starts on a root frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawBeginEvent {
    /// Monotonic draw-pass counter.
    pub pass_index: u64,
    /// Slot index of the root widget.
    pub root: u32,
    /// Number of damage regions to draw.
    pub rect_count: u32,
    /// Total damaged pixels.
    pub damaged_area: u64,
}

/// Emitted when a draw pass finishes, before the flip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawEndEvent {
    /// Monotonic draw-pass counter.
    pub pass_index: u64,
    /// Number of widget paint calls made during the pass.
    pub paint_calls: u32,
}

/// Emitted when a flip copies damage into a display buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlipEvent {
    /// Monotonic flip counter.
    pub flip_index: u64,
    /// The buffer that was updated and handed to the backend.
    pub buffer_index: u32,
    /// Number of buffers in the set.
    pub buffer_count: u32,
    /// Pixels copied from the composition surface.
    pub copied_area: u64,
}

/// Why a flip did nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlipSkipReason {
    /// The damage list was empty.
    NoDamage,
    /// The backend reported a buffer index outside the set.
    InvalidIndex,
}

/// Emitted when a flip is a no-op.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlipSkippedEvent {
    /// Monotonic flip counter.
    pub flip_index: u64,
    /// Why nothing happened.
    pub reason: FlipSkipReason,
}

/// Emitted for each greenscreen outline (repeated-damage diagnostics).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GreenscreenEvent {
    /// Monotonic flip counter.
    pub flip_index: u64,
    /// The rect that was damaged in consecutive flips.
    pub rect: Rect,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the draw loop.
///
/// Every method has a no-op default; override only what you need.
pub trait TraceSink {
    /// Called when damage reaches a root's list.
    fn on_damage(&mut self, e: &DamageEvent) {
        _ = e;
    }

    /// Called when a draw pass starts.
    fn on_draw_begin(&mut self, e: &DrawBeginEvent) {
        _ = e;
    }

    /// Called when a draw pass finishes.
    fn on_draw_end(&mut self, e: &DrawEndEvent) {
        _ = e;
    }

    /// Called after a flip has updated a buffer.
    fn on_flip(&mut self, e: &FlipEvent) {
        _ = e;
    }

    /// Called with the rects a flip copied.
    fn on_copy_rects(&mut self, flip_index: u64, rects: &[Rect]) {
        _ = (flip_index, rects);
    }

    /// Called when a flip does nothing.
    fn on_flip_skipped(&mut self, e: &FlipSkippedEvent) {
        _ = e;
    }

    /// Called for each greenscreen outline.
    fn on_greenscreen(&mut self, e: &GreenscreenEvent) {
        _ = e;
    }
}

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl Default for Tracer<'_> {
    fn default() -> Self {
        Self::none()
    }
}

/// Expands to a `Tracer` method that forwards one event to the sink.
macro_rules! forward {
    ($(#[$doc:meta])* $name:ident => $method:ident($($arg:ident: $ty:ty),*)) => {
        $(#[$doc])*
        #[inline]
        pub fn $name(&mut self, $($arg: $ty),*) {
            #[cfg(feature = "trace")]
            if let Some(s) = &mut self.sink {
                s.$method($($arg),*);
            }
            #[cfg(not(feature = "trace"))]
            {
                _ = ($($arg),*);
            }
        }
    };
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    forward!(
        /// Emits a [`DamageEvent`].
        damage => on_damage(e: &DamageEvent)
    );
    forward!(
        /// Emits a [`DrawBeginEvent`].
        draw_begin => on_draw_begin(e: &DrawBeginEvent)
    );
    forward!(
        /// Emits a [`DrawEndEvent`].
        draw_end => on_draw_end(e: &DrawEndEvent)
    );
    forward!(
        /// Emits a [`FlipEvent`].
        flip => on_flip(e: &FlipEvent)
    );
    forward!(
        /// Emits the rects copied by a flip.
        copy_rects => on_copy_rects(flip_index: u64, rects: &[Rect])
    );
    forward!(
        /// Emits a [`FlipSkippedEvent`].
        flip_skipped => on_flip_skipped(e: &FlipSkippedEvent)
    );
    forward!(
        /// Emits a [`GreenscreenEvent`].
        greenscreen => on_greenscreen(e: &GreenscreenEvent)
    );
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_flip() -> FlipEvent {
        FlipEvent {
            flip_index: 3,
            buffer_index: 1,
            buffer_count: 2,
            copied_area: 2_500,
        }
    }

    #[test]
    fn noop_sink_accepts_everything() {
        let mut sink = NoopSink;
        sink.on_flip(&sample_flip());
        sink.on_copy_rects(3, &[Rect::new(0, 0, 50, 50)]);
        sink.on_flip_skipped(&FlipSkippedEvent {
            flip_index: 4,
            reason: FlipSkipReason::NoDamage,
        });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.flip(&sample_flip());
        tracer.copy_rects(3, &[]);
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            flips: Vec<u64>,
            rects: usize,
        }
        impl TraceSink for RecordingSink {
            fn on_flip(&mut self, e: &FlipEvent) {
                self.flips.push(e.flip_index);
            }
            fn on_copy_rects(&mut self, _flip_index: u64, rects: &[Rect]) {
                self.rects += rects.len();
            }
        }

        let mut sink = RecordingSink {
            flips: Vec::new(),
            rects: 0,
        };
        let mut tracer = Tracer::new(&mut sink);
        tracer.flip(&sample_flip());
        tracer.copy_rects(3, &[Rect::new(0, 0, 1, 1), Rect::new(5, 5, 1, 1)]);
        drop(tracer);
        assert_eq!(sink.flips, &[3]);
        assert_eq!(sink.rects, 2);
    }
}
