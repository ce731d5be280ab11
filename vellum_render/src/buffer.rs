// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Display buffers and their independent damage lists.
//!
//! With double or triple buffering, a buffer that was not the flip target for
//! the last N frames is N frames stale. Each [`DisplayBuffer`] therefore keeps
//! its own [`DamageList`] that accumulates *all* damage since it was last
//! brought up to date. No swap-chain-wide list is needed.

use alloc::vec::Vec;

use vellum_core::damage::DamageList;
use vellum_core::geometry::Size;

use crate::format::PixelFormat;
use crate::surface::Surface;

/// One hardware-facing buffer slot.
#[derive(Clone, Debug)]
pub struct DisplayBuffer {
    /// The buffer's pixels.
    pub surface: Surface,
    /// Damage accumulated since this buffer was last updated.
    pub damage: DamageList,
}

impl DisplayBuffer {
    /// Creates a zeroed buffer with no pending damage.
    #[must_use]
    pub fn new(size: Size, format: PixelFormat, damage_limit: Option<usize>) -> Self {
        let mut damage = DamageList::new();
        damage.set_limit(damage_limit);
        Self {
            surface: Surface::new(size, format),
            damage,
        }
    }
}

/// The fixed set of display buffers owned by a screen.
#[derive(Clone, Debug)]
pub struct DisplayBufferSet {
    buffers: Vec<DisplayBuffer>,
}

impl DisplayBufferSet {
    /// Allocates `count` buffers of the same size and format.
    ///
    /// # Panics
    ///
    /// Panics if `count` is zero.
    #[must_use]
    pub fn new(count: usize, size: Size, format: PixelFormat, damage_limit: Option<usize>) -> Self {
        assert!(count > 0, "a screen needs at least one display buffer");
        Self {
            buffers: (0..count)
                .map(|_| DisplayBuffer::new(size, format, damage_limit))
                .collect(),
        }
    }

    /// Number of buffers.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    /// Always `false`; a set holds at least one buffer.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    /// Returns the buffer at `index`, if it exists.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&DisplayBuffer> {
        self.buffers.get(index)
    }

    /// Returns the buffer at `index` mutably, if it exists.
    #[must_use]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut DisplayBuffer> {
        self.buffers.get_mut(index)
    }

    /// Iterates over the buffers in slot order.
    pub fn iter(&self) -> core::slice::Iter<'_, DisplayBuffer> {
        self.buffers.iter()
    }

    /// Merges `damage` into every buffer's own list.
    pub fn add_damage(&mut self, damage: &DamageList) {
        for buffer in &mut self.buffers {
            buffer.damage.extend_from(damage);
        }
    }
}

#[cfg(test)]
mod tests {
    use vellum_core::geometry::Rect;

    use super::*;

    #[test]
    fn buffers_start_clean() {
        let set = DisplayBufferSet::new(3, Size::new(16, 16), PixelFormat::Rgb565, None);
        assert_eq!(set.len(), 3);
        assert!(set.iter().all(|b| b.damage.is_empty()));
        assert!(set.get(3).is_none());
    }

    #[test]
    #[should_panic(expected = "at least one display buffer")]
    fn zero_buffers_panics() {
        let _ = DisplayBufferSet::new(0, Size::new(1, 1), PixelFormat::Rgb565, None);
    }

    #[test]
    fn damage_reaches_every_buffer() {
        let mut set = DisplayBufferSet::new(2, Size::new(100, 100), PixelFormat::Xrgb8888, None);
        set.add_damage(&DamageList::from_rect(Rect::new(0, 0, 10, 10)));
        set.add_damage(&DamageList::from_rect(Rect::new(50, 50, 10, 10)));
        for buffer in set.iter() {
            assert_eq!(buffer.damage.len(), 2);
        }
    }

    #[test]
    fn damage_limit_applies_per_buffer() {
        let mut set = DisplayBufferSet::new(1, Size::new(100, 100), PixelFormat::Xrgb8888, Some(1));
        set.add_damage(
            &[Rect::new(0, 0, 10, 10), Rect::new(50, 50, 10, 10)]
                .into_iter()
                .collect(),
        );
        assert_eq!(
            set.get(0).map(|b| b.damage.as_slice()),
            Some(&[Rect::new(0, 0, 60, 60)][..])
        );
    }
}
