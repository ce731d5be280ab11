// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for presentation.
//!
//! A [`Screen`](crate::screen::Screen) does the damage bookkeeping and the
//! copy from the composition surface; everything after that belongs to a
//! *backend*. Backends differ in how many buffers they flip between and in
//! how a finished buffer reaches the glass:
//!
//! - A raw framebuffer has one buffer and writes the copied rects straight to
//!   the device ([`index`](Backend::index) stays `0`).
//! - A page-flipping pipeline (DRM/KMS) reports the slot the display is *not*
//!   scanning out, and queues a flip to it.
//! - A windowed backend (X11) exposes and flushes the damaged area.
//!
//! [`Headless`] is an in-memory backend for tests, demos, and offscreen
//! rendering.

use alloc::boxed::Box;
use alloc::vec::Vec;

use vellum_core::geometry::Rect;

use crate::surface::Surface;

/// A finished buffer handed to [`Backend::schedule_flip`].
#[derive(Clone, Copy, Debug)]
pub struct PresentRequest<'a> {
    /// The buffer slot that was updated (the backend's own [`Backend::index`]).
    pub index: usize,
    /// The buffer's pixels, fully up to date.
    pub surface: &'a Surface,
    /// The rects copied into the buffer for this flip. Partial-update
    /// backends only need to push these.
    pub copied: &'a [Rect],
}

/// Presents display buffers on a platform.
///
/// Implementations must not block for visual-only backends; simple
/// framebuffer backends may write synchronously.
pub trait Backend {
    /// The buffer slot the next flip should update.
    ///
    /// Single-buffered backends keep the default of `0`. Multi-buffered
    /// backends report the slot that is not currently being scanned out.
    fn index(&self) -> usize {
        0
    }

    /// Signals that the buffer in `request` is ready to be shown.
    fn schedule_flip(&mut self, request: PresentRequest<'_>);

    /// Returns `true` if the backend composites several planes itself.
    fn is_composer(&self) -> bool {
        false
    }

    /// Returns `true` if the backend offers hardware overlay planes.
    fn have_planes(&self) -> bool {
        false
    }
}

impl<B: Backend + ?Sized> Backend for Box<B> {
    fn index(&self) -> usize {
        (**self).index()
    }

    fn schedule_flip(&mut self, request: PresentRequest<'_>) {
        (**self).schedule_flip(request);
    }

    fn is_composer(&self) -> bool {
        (**self).is_composer()
    }

    fn have_planes(&self) -> bool {
        (**self).have_planes()
    }
}

/// One presented buffer, as recorded by [`Headless`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PresentRecord {
    /// The slot that was presented.
    pub index: usize,
    /// The rects that were copied into it.
    pub copied: Vec<Rect>,
}

/// An in-memory backend that rotates through buffer slots and records what
/// it was asked to present.
#[derive(Clone, Debug)]
pub struct Headless {
    slots: usize,
    current: usize,
    rotate: bool,
    log: Vec<PresentRecord>,
}

impl Headless {
    /// A backend that flips through `slots` buffers in order, like a
    /// page-flipping display pipeline.
    ///
    /// # Panics
    ///
    /// Panics if `slots` is zero.
    #[must_use]
    pub fn new(slots: usize) -> Self {
        assert!(slots > 0, "headless backend needs at least one slot");
        Self {
            slots,
            current: 0,
            rotate: true,
            log: Vec::new(),
        }
    }

    /// A backend that always reports `index`, regardless of flips.
    ///
    /// Useful to pin a screen to one buffer, or to model a backend whose
    /// index is out of range.
    #[must_use]
    pub fn pinned(index: usize) -> Self {
        Self {
            slots: index + 1,
            current: index,
            rotate: false,
            log: Vec::new(),
        }
    }

    /// Every flip presented so far, oldest first.
    #[must_use]
    pub fn presented(&self) -> &[PresentRecord] {
        &self.log
    }

    /// Forgets the recorded flips.
    pub fn clear_log(&mut self) {
        self.log.clear();
    }
}

impl Backend for Headless {
    fn index(&self) -> usize {
        self.current
    }

    fn schedule_flip(&mut self, request: PresentRequest<'_>) {
        self.log.push(PresentRecord {
            index: request.index,
            copied: request.copied.to_vec(),
        });
        if self.rotate {
            self.current = (self.current + 1) % self.slots;
        }
    }
}
