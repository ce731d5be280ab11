// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The screen: a composition surface, its display buffers, and a backend.
//!
//! All drawing goes into the composition surface, which always holds the
//! current frame. [`Screen::flip`] moves the damaged part of it into the
//! display buffer the backend is targeting and hands that buffer over for
//! presentation.
//!
//! ```text
//!                    flip(damage)
//!                         │
//!        ┌────────────────┼────────────────┐
//!        ▼                ▼                ▼
//!   buffer 0 damage   buffer 1 damage   buffer 2 damage    (merge into all)
//!        │
//!        ▼  (only the target, backend.index())
//!   copy rects from composition ──► clear ──► schedule_flip
//! ```

use vellum_core::damage::DamageList;
use vellum_core::geometry::{Rect, Size};
use vellum_core::trace::{
    FlipEvent, FlipSkipReason, FlipSkippedEvent, GreenscreenEvent, Tracer,
};

use crate::backend::{Backend, PresentRequest};
use crate::buffer::DisplayBufferSet;
use crate::config::{MAX_BUFFERS, ScreenConfig};
use crate::format::{Color, PixelFormat};
use crate::surface::{Painter, Surface};

/// Owns the composition surface, the display buffers, and the backend.
#[derive(Debug)]
pub struct Screen<B> {
    composition: Surface,
    buffers: DisplayBufferSet,
    backend: B,
    greenscreen: bool,
    previous_damage: DamageList,
    flip_count: u64,
}

impl<B: Backend> Screen<B> {
    /// Allocates the composition surface and display buffers described by
    /// `config`.
    ///
    /// # Panics
    ///
    /// Panics if `config.buffer_count` is outside `1..=MAX_BUFFERS`.
    #[must_use]
    pub fn new(config: &ScreenConfig, backend: B) -> Self {
        assert!(
            (1..=MAX_BUFFERS).contains(&config.buffer_count),
            "buffer count must be between 1 and {MAX_BUFFERS}, got {}",
            config.buffer_count
        );
        Self {
            composition: Surface::new(config.size, config.format),
            buffers: DisplayBufferSet::new(
                usize::from(config.buffer_count),
                config.size,
                config.format,
                config.damage_limit,
            ),
            backend,
            greenscreen: config.greenscreen,
            previous_damage: DamageList::new(),
            flip_count: 0,
        }
    }

    /// Presents `damage`. See [`flip_traced`](Self::flip_traced).
    pub fn flip(&mut self, damage: &DamageList) {
        self.flip_traced(damage, &mut Tracer::none());
    }

    /// Presents `damage`, reporting what happened to `tracer`.
    ///
    /// `damage` is merged into every display buffer's own list, so a buffer
    /// that misses this flip still catches up on the next one that targets
    /// it. The buffer at the backend's current index then has its whole
    /// accumulated damage copied from the composition surface, its list
    /// cleared, and is passed to [`Backend::schedule_flip`].
    ///
    /// Empty damage or an out-of-range backend index does nothing, and the
    /// backend is not called.
    pub fn flip_traced(&mut self, damage: &DamageList, tracer: &mut Tracer<'_>) {
        let flip_index = self.flip_count;
        if damage.is_empty() {
            tracer.flip_skipped(&FlipSkippedEvent {
                flip_index,
                reason: FlipSkipReason::NoDamage,
            });
            return;
        }
        let index = self.backend.index();
        let buffer_count = self.buffers.len();
        if index >= buffer_count {
            tracer.flip_skipped(&FlipSkippedEvent {
                flip_index,
                reason: FlipSkipReason::InvalidIndex,
            });
            return;
        }

        self.buffers.add_damage(damage);
        let Some(buffer) = self.buffers.get_mut(index) else {
            return;
        };

        let copied = buffer.damage.take();
        let mut copied_area = 0;
        for rect in &copied {
            copied_area += buffer.surface.copy_from(&self.composition, *rect);
        }

        if self.greenscreen {
            let mut painter = buffer.surface.painter();
            for rect in damage {
                if self.previous_damage.iter().any(|p| p.intersects(rect)) {
                    painter.stroke_rect(*rect, Color::GREEN);
                    buffer.damage.add(*rect);
                    tracer.greenscreen(&GreenscreenEvent {
                        flip_index,
                        rect: *rect,
                    });
                }
            }
        }
        self.previous_damage.clone_from(damage);

        tracer.flip(&FlipEvent {
            flip_index,
            buffer_index: u32::try_from(index).unwrap_or(u32::MAX),
            buffer_count: u32::try_from(buffer_count).unwrap_or(u32::MAX),
            copied_area,
        });
        tracer.copy_rects(flip_index, copied.as_slice());
        self.flip_count += 1;

        self.backend.schedule_flip(PresentRequest {
            index,
            surface: &buffer.surface,
            copied: copied.as_slice(),
        });
    }

    /// A damage list covering the whole screen.
    #[must_use]
    pub fn damage_full(&self) -> DamageList {
        DamageList::from_rect(self.bounds())
    }

    /// Screen size in pixels.
    #[must_use]
    pub fn size(&self) -> Size {
        self.composition.size()
    }

    /// The screen rect, at the origin.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.composition.bounds()
    }

    /// Pixel format shared by every surface of the screen.
    #[must_use]
    pub fn format(&self) -> PixelFormat {
        self.composition.format()
    }

    /// The composition surface.
    #[must_use]
    pub fn composition(&self) -> &Surface {
        &self.composition
    }

    /// The composition surface, for drawing.
    #[must_use]
    pub fn composition_mut(&mut self) -> &mut Surface {
        &mut self.composition
    }

    /// A painter over the composition surface.
    #[must_use]
    pub fn painter(&mut self) -> Painter<'_> {
        self.composition.painter()
    }

    /// The display buffers.
    #[must_use]
    pub fn buffers(&self) -> &DisplayBufferSet {
        &self.buffers
    }

    /// The backend.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The backend, mutably.
    #[must_use]
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Whether greenscreen outlines are drawn.
    #[must_use]
    pub fn greenscreen(&self) -> bool {
        self.greenscreen
    }

    /// Turns greenscreen outlines on or off.
    pub fn set_greenscreen(&mut self, enabled: bool) {
        self.greenscreen = enabled;
    }

    /// Number of flips that reached the backend.
    #[must_use]
    pub fn flip_count(&self) -> u64 {
        self.flip_count
    }

    /// See [`Backend::is_composer`].
    #[must_use]
    pub fn is_composer(&self) -> bool {
        self.backend.is_composer()
    }

    /// See [`Backend::have_planes`].
    #[must_use]
    pub fn have_planes(&self) -> bool {
        self.backend.have_planes()
    }
}
