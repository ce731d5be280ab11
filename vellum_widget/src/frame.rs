// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Draw dispatch.
//!
//! A draw pass walks a root's tree once per damage rect, painting into the
//! screen's composition surface, then flips the damage to the display.
//!
//! ```text
//! for rect in root damage:
//!     draw(root, rect)
//!       ├─ background: fill rect ∩ box        (frames, unless NO_BACKGROUND)
//!       ├─ paint(box, rect)                   (widgets with content)
//!       └─ for child in z-order:
//!            skip hidden / PLANE_WINDOW
//!            draw(child, rect ∩ child.box)    (skipped when empty)
//! screen.flip(damage); clear damage
//! ```
//!
//! A widget is never asked to draw outside its own box, and the painter it
//! receives is clipped to the rect it was asked to draw.

use vellum_core::geometry::Rect;
use vellum_core::trace::{DrawBeginEvent, DrawEndEvent, Tracer};
use vellum_render::{Backend, Painter, Screen};

use crate::id::{INVALID, WidgetId};
use crate::store::{WidgetFlags, WidgetStore};

/// Runs one draw pass on `root` and flips the result.
///
/// Returns `false` without touching the screen if `root` has no pending
/// damage.
///
/// # Panics
///
/// Panics if the handle is stale or `root` has a parent.
pub fn draw<B: Backend>(store: &mut WidgetStore, root: WidgetId, screen: &mut Screen<B>) -> bool {
    draw_traced(store, root, screen, &mut Tracer::none())
}

/// [`draw`], reporting the pass and the flip to `tracer`.
pub fn draw_traced<B: Backend>(
    store: &mut WidgetStore,
    root: WidgetId,
    screen: &mut Screen<B>,
    tracer: &mut Tracer<'_>,
) -> bool {
    store.validate(root);
    assert!(
        store.parent[root.idx as usize] == INVALID,
        "draw must start at a root widget"
    );
    let idx = root.idx as usize;
    if store.damage[idx].is_empty() {
        return false;
    }

    let pass_index = store.draw_passes;
    store.draw_passes += 1;
    let damage = store.damage[idx].take();
    tracer.draw_begin(&DrawBeginEvent {
        pass_index,
        root: root.idx,
        rect_count: u32::try_from(damage.len()).unwrap_or(u32::MAX),
        damaged_area: damage.covered_area(),
    });

    let mut paint_calls = 0_u32;
    {
        let mut painter = screen.painter();
        for rect in &damage {
            draw_widget(store, root.idx, *rect, &mut painter, &mut paint_calls);
        }
    }

    tracer.draw_end(&DrawEndEvent {
        pass_index,
        paint_calls,
    });
    screen.flip_traced(&damage, tracer);
    true
}

fn draw_widget(
    store: &mut WidgetStore,
    idx: u32,
    rect: Rect,
    painter: &mut Painter<'_>,
    paint_calls: &mut u32,
) {
    let i = idx as usize;
    let widget_box = store.bbox[i];
    let flags = store.flags[i];
    let visible = rect.intersection(&widget_box);
    painter.set_clip(visible);

    if flags.contains(WidgetFlags::FRAME)
        && !flags.contains(WidgetFlags::NO_BACKGROUND)
        && let Some(color) = store.background[i]
    {
        painter.fill_rect(visible, color);
    }
    if !visible.is_empty()
        && let Some(paint) = store.paint[i].as_mut()
    {
        paint.paint(painter, widget_box, visible);
        *paint_calls = paint_calls.saturating_add(1);
    }

    let mut c = store.first_child[i];
    while c != INVALID {
        let ci = c as usize;
        let next = store.next_sibling[ci];
        if store.visible[ci] && !store.flags[ci].contains(WidgetFlags::PLANE_WINDOW) {
            let r = rect.intersection(&store.bbox[ci]);
            if !r.is_empty() {
                draw_widget(store, c, r, painter, paint_calls);
            }
        }
        c = next;
    }
}
