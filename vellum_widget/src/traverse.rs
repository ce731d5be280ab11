// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Child iteration.

use crate::id::{INVALID, WidgetId};
use crate::store::WidgetStore;

/// The direct children of a widget, bottom of the z-order first.
///
/// Created by [`WidgetStore::children`].
#[derive(Debug)]
pub struct Children<'a> {
    store: &'a WidgetStore,
    current: u32,
}

impl<'a> Children<'a> {
    pub(crate) fn new(store: &'a WidgetStore, first: u32) -> Self {
        Self {
            store,
            current: first,
        }
    }
}

impl Iterator for Children<'_> {
    type Item = WidgetId;

    fn next(&mut self) -> Option<WidgetId> {
        if self.current == INVALID {
            return None;
        }
        let idx = self.current;
        self.current = self.store.next_sibling[idx as usize];
        Some(self.store.handle(idx))
    }
}
