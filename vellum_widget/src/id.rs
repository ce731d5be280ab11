// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Widget identity.

use core::fmt;

/// Sentinel for "no widget" in the store's link arrays.
pub(crate) const INVALID: u32 = u32::MAX;

/// A handle to a widget in a [`WidgetStore`](crate::WidgetStore).
///
/// Carries the slot index and a generation counter. Destroying a widget bumps
/// its slot's generation, so handles kept past a destroy are caught instead
/// of silently addressing whatever reuses the slot.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetId {
    pub(crate) idx: u32,
    pub(crate) generation: u32,
}

impl WidgetId {
    /// The raw slot index (diagnostics only).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }

    /// The generation counter.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WidgetId({}@gen{})", self.idx, self.generation)
    }
}
