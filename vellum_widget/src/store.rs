// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays widget storage: allocation, topology, properties, and
//! damage propagation.
//!
//! Boxes are in screen coordinates. A widget with no parent is a *root*; every
//! root owns a [`DamageList`], and damage reported anywhere in a tree is
//! forwarded, unchanged, up to that list.

use vellum_core::damage::DamageList;
use vellum_core::geometry::Rect;
use vellum_core::trace::{DamageEvent, Tracer};
use vellum_render::Color;

use crate::id::{INVALID, WidgetId};
use crate::paint::Paint;
use crate::traverse::Children;

bitflags::bitflags! {
    /// Per-widget behavior flags.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct WidgetFlags: u8 {
        /// The widget is a frame and may have children. Fixed at creation.
        const FRAME = 1 << 0;
        /// Skip the frame's background fill (a child covers it).
        const NO_BACKGROUND = 1 << 1;
        /// Composited on its own hardware plane; never drawn into the parent.
        const PLANE_WINDOW = 1 << 2;
    }
}

/// Storage for all widgets.
///
/// Widgets are addressed by [`WidgetId`] handles. Destroyed slots are recycled
/// through a free list, and generation counters reject stale handles.
#[derive(Debug, Default)]
pub struct WidgetStore {
    // -- Topology --
    pub(crate) parent: Vec<u32>,
    pub(crate) first_child: Vec<u32>,
    pub(crate) next_sibling: Vec<u32>,
    pub(crate) prev_sibling: Vec<u32>,

    // -- Properties --
    pub(crate) bbox: Vec<Rect>,
    pub(crate) visible: Vec<bool>,
    pub(crate) flags: Vec<WidgetFlags>,
    pub(crate) background: Vec<Option<Color>>,
    pub(crate) paint: Vec<Option<Box<dyn Paint>>>,

    // -- Damage (meaningful on roots only) --
    pub(crate) damage: Vec<DamageList>,
    damage_limit: Option<usize>,

    // -- Allocation --
    generation: Vec<u32>,
    free_list: Vec<u32>,
    len: u32,

    pub(crate) draw_passes: u64,
}

impl WidgetStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store whose root damage lists collapse to their
    /// bounding box past `limit` rects.
    #[must_use]
    pub fn with_damage_limit(limit: usize) -> Self {
        Self {
            damage_limit: Some(limit.max(1)),
            ..Self::default()
        }
    }

    // -- Allocation API --

    /// Creates a frame with `rect` as its box.
    ///
    /// A new frame is a root and starts with its whole box damaged, so the
    /// first draw paints it completely.
    pub fn create_frame(&mut self, rect: Rect) -> WidgetId {
        let id = self.alloc(rect, WidgetFlags::FRAME, None);
        self.damage(id, rect);
        id
    }

    /// Creates a leaf widget drawn by `paint`.
    ///
    /// The widget is damaged when it is added to a frame.
    pub fn create_widget(&mut self, rect: Rect, paint: impl Paint + 'static) -> WidgetId {
        self.alloc(rect, WidgetFlags::empty(), Some(Box::new(paint)))
    }

    fn alloc(&mut self, rect: Rect, flags: WidgetFlags, paint: Option<Box<dyn Paint>>) -> WidgetId {
        let mut damage = DamageList::new();
        damage.set_limit(self.damage_limit);

        let idx = if let Some(idx) = self.free_list.pop() {
            let i = idx as usize;
            self.parent[i] = INVALID;
            self.first_child[i] = INVALID;
            self.next_sibling[i] = INVALID;
            self.prev_sibling[i] = INVALID;
            self.bbox[i] = rect;
            self.visible[i] = true;
            self.flags[i] = flags;
            self.background[i] = None;
            self.paint[i] = paint;
            self.damage[i] = damage;
            idx
        } else {
            let idx = self.len;
            self.len += 1;
            self.parent.push(INVALID);
            self.first_child.push(INVALID);
            self.next_sibling.push(INVALID);
            self.prev_sibling.push(INVALID);
            self.bbox.push(rect);
            self.visible.push(true);
            self.flags.push(flags);
            self.background.push(None);
            self.paint.push(paint);
            self.damage.push(damage);
            self.generation.push(0);
            idx
        };
        self.handle(idx)
    }

    /// Destroys a widget and, for frames, its whole subtree.
    ///
    /// If the widget is attached and visible, its box is damaged first.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn destroy(&mut self, id: WidgetId) {
        self.validate(id);
        if self.parent[id.idx as usize] != INVALID {
            self.detach(id.idx);
        }

        let mut stack = vec![id.idx];
        while let Some(idx) = stack.pop() {
            let mut c = self.first_child[idx as usize];
            while c != INVALID {
                stack.push(c);
                c = self.next_sibling[c as usize];
            }
            let i = idx as usize;
            self.parent[i] = INVALID;
            self.first_child[i] = INVALID;
            self.next_sibling[i] = INVALID;
            self.prev_sibling[i] = INVALID;
            self.paint[i] = None;
            self.damage[i].clear();
            self.generation[i] += 1;
            self.free_list.push(idx);
        }
    }

    /// Destroys every child of `frame`.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn remove_all(&mut self, frame: WidgetId) {
        let children: Vec<_> = self.children(frame).collect();
        for child in children {
            self.destroy(child);
        }
    }

    /// Returns whether `id` refers to a live widget.
    #[must_use]
    pub fn is_alive(&self, id: WidgetId) -> bool {
        id.idx < self.len
            && self.generation[id.idx as usize] == id.generation
            && !self.free_list.contains(&id.idx)
    }

    /// Number of live widgets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len as usize - self.free_list.len()
    }

    /// Returns `true` if no widgets are alive.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // -- Topology API --

    /// Adds `child` on top of `parent`'s existing children.
    ///
    /// Any damage `child` had pending as a root is dropped; its visible box is
    /// damaged in `parent`'s tree instead.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale, `parent` is not a frame, `child`
    /// already has a parent, or `parent` lies inside `child`'s subtree.
    pub fn add_child(&mut self, parent: WidgetId, child: WidgetId) {
        self.validate(parent);
        self.validate(child);
        let p = parent.idx;
        let c = child.idx;
        assert!(
            self.flags[p as usize].contains(WidgetFlags::FRAME),
            "parent is not a frame"
        );
        assert!(
            self.parent[c as usize] == INVALID,
            "child already has a parent"
        );
        assert!(
            self.root_idx(p) != c,
            "cannot add a widget to its own subtree"
        );

        self.parent[c as usize] = p;
        if self.first_child[p as usize] == INVALID {
            self.first_child[p as usize] = c;
        } else {
            let mut last = self.first_child[p as usize];
            while self.next_sibling[last as usize] != INVALID {
                last = self.next_sibling[last as usize];
            }
            self.next_sibling[last as usize] = c;
            self.prev_sibling[c as usize] = last;
        }

        self.damage[c as usize].clear();
        if self.visible[c as usize] {
            self.damage_widget(child);
        }
    }

    /// Detaches `child` from `parent`, damaging its box if visible.
    ///
    /// The detached widget becomes a root with no pending damage.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale or `child` is not a child of `parent`.
    pub fn remove_child(&mut self, parent: WidgetId, child: WidgetId) {
        self.validate(parent);
        self.validate(child);
        assert!(
            self.parent[child.idx as usize] == parent.idx,
            "widget is not a child of this frame"
        );
        self.detach(child.idx);
    }

    /// Returns the parent of a widget, if any.
    #[must_use]
    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.validate(id);
        let p = self.parent[id.idx as usize];
        (p != INVALID).then(|| self.handle(p))
    }

    /// Returns the root of the tree containing `id`.
    #[must_use]
    pub fn root_of(&self, id: WidgetId) -> WidgetId {
        self.validate(id);
        self.handle(self.root_idx(id.idx))
    }

    /// Returns the children of a widget, bottom of the z-order first.
    #[must_use]
    pub fn children(&self, id: WidgetId) -> Children<'_> {
        self.validate(id);
        Children::new(self, self.first_child[id.idx as usize])
    }

    /// Returns every live root widget.
    #[must_use]
    pub fn roots(&self) -> Vec<WidgetId> {
        (0..self.len)
            .filter(|&idx| {
                self.parent[idx as usize] == INVALID && !self.free_list.contains(&idx)
            })
            .map(|idx| self.handle(idx))
            .collect()
    }

    // -- Properties --

    /// The widget's box.
    #[must_use]
    pub fn widget_box(&self, id: WidgetId) -> Rect {
        self.validate(id);
        self.bbox[id.idx as usize]
    }

    /// Moves or resizes a widget, damaging both the old and the new box.
    pub fn set_box(&mut self, id: WidgetId, rect: Rect) {
        self.validate(id);
        let old = self.bbox[id.idx as usize];
        if old == rect {
            return;
        }
        self.bbox[id.idx as usize] = rect;
        if self.visible[id.idx as usize] {
            self.damage(id, old);
            self.damage(id, rect);
        }
    }

    /// Whether the widget is visible.
    #[must_use]
    pub fn is_visible(&self, id: WidgetId) -> bool {
        self.validate(id);
        self.visible[id.idx as usize]
    }

    /// Shows or hides a widget. A change damages its box.
    pub fn set_visible(&mut self, id: WidgetId, visible: bool) {
        self.validate(id);
        if self.visible[id.idx as usize] == visible {
            return;
        }
        self.visible[id.idx as usize] = visible;
        self.damage_widget(id);
    }

    /// Shorthand for `set_visible(id, true)`.
    pub fn show(&mut self, id: WidgetId) {
        self.set_visible(id, true);
    }

    /// Shorthand for `set_visible(id, false)`.
    pub fn hide(&mut self, id: WidgetId) {
        self.set_visible(id, false);
    }

    /// The widget's flags.
    #[must_use]
    pub fn flags(&self, id: WidgetId) -> WidgetFlags {
        self.validate(id);
        self.flags[id.idx as usize]
    }

    /// Replaces the widget's flags. A change damages its box.
    ///
    /// # Panics
    ///
    /// Panics if the change would add or remove [`WidgetFlags::FRAME`].
    pub fn set_flags(&mut self, id: WidgetId, flags: WidgetFlags) {
        self.validate(id);
        let old = self.flags[id.idx as usize];
        assert!(
            old.contains(WidgetFlags::FRAME) == flags.contains(WidgetFlags::FRAME),
            "the FRAME flag is fixed at creation"
        );
        if old != flags {
            self.flags[id.idx as usize] = flags;
            self.damage_widget(id);
        }
    }

    /// The frame background color, if any.
    #[must_use]
    pub fn background(&self, id: WidgetId) -> Option<Color> {
        self.validate(id);
        self.background[id.idx as usize]
    }

    /// Sets the background painted by a frame. A change damages its box.
    pub fn set_background(&mut self, id: WidgetId, color: Option<Color>) {
        self.validate(id);
        if self.background[id.idx as usize] != color {
            self.background[id.idx as usize] = color;
            self.damage_widget(id);
        }
    }

    /// Replaces the widget's content and damages its box.
    pub fn set_paint(&mut self, id: WidgetId, paint: impl Paint + 'static) {
        self.validate(id);
        self.paint[id.idx as usize] = Some(Box::new(paint));
        self.damage_widget(id);
    }

    /// The diagnostic name of the widget's content, if it has any.
    #[must_use]
    pub fn paint_name(&self, id: WidgetId) -> Option<&'static str> {
        self.validate(id);
        self.paint[id.idx as usize].as_ref().map(|p| p.name())
    }

    // -- Damage --

    /// Reports that `rect` of the screen changed because of `id`.
    ///
    /// Empty rects are ignored. Otherwise the rect is forwarded unchanged to
    /// the root of `id`'s tree and merged into its damage list.
    pub fn damage(&mut self, id: WidgetId, rect: Rect) {
        self.damage_traced(id, rect, &mut Tracer::none());
    }

    /// [`damage`](Self::damage), reporting the merge to `tracer`.
    pub fn damage_traced(&mut self, id: WidgetId, rect: Rect, tracer: &mut Tracer<'_>) {
        self.validate(id);
        if rect.is_empty() {
            return;
        }
        let root = self.root_idx(id.idx);
        let list = &mut self.damage[root as usize];
        list.add(rect);
        tracer.damage(&DamageEvent {
            root,
            rect,
            list_len: u32::try_from(list.len()).unwrap_or(u32::MAX),
        });
    }

    /// Damages the widget's whole box.
    pub fn damage_widget(&mut self, id: WidgetId) {
        let rect = self.widget_box(id);
        self.damage(id, rect);
    }

    /// Damage accumulated on `root` since its last draw.
    ///
    /// Always empty for widgets that have a parent.
    #[must_use]
    pub fn pending_damage(&self, root: WidgetId) -> &DamageList {
        self.validate(root);
        &self.damage[root.idx as usize]
    }

    /// Number of draw passes run on this store.
    #[must_use]
    pub fn draw_passes(&self) -> u64 {
        self.draw_passes
    }

    // -- Internal helpers --

    pub(crate) fn handle(&self, idx: u32) -> WidgetId {
        WidgetId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    pub(crate) fn validate(&self, id: WidgetId) {
        assert!(
            id.idx < self.len && self.generation[id.idx as usize] == id.generation,
            "stale WidgetId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }

    fn root_idx(&self, mut idx: u32) -> u32 {
        while self.parent[idx as usize] != INVALID {
            idx = self.parent[idx as usize];
        }
        idx
    }

    /// Damages a visible attached widget's box, then unlinks it.
    fn detach(&mut self, idx: u32) {
        if self.visible[idx as usize] {
            let rect = self.bbox[idx as usize];
            let root = self.handle(self.root_idx(idx));
            self.damage(root, rect);
        }

        let p = self.parent[idx as usize];
        let prev = self.prev_sibling[idx as usize];
        let next = self.next_sibling[idx as usize];
        if prev != INVALID {
            self.next_sibling[prev as usize] = next;
        } else {
            self.first_child[p as usize] = next;
        }
        if next != INVALID {
            self.prev_sibling[next as usize] = prev;
        }
        self.parent[idx as usize] = INVALID;
        self.prev_sibling[idx as usize] = INVALID;
        self.next_sibling[idx as usize] = INVALID;
        self.damage[idx as usize].clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::SolidFill;

    fn leaf(store: &mut WidgetStore, rect: Rect) -> WidgetId {
        store.create_widget(rect, SolidFill::new(Color::WHITE))
    }

    /// A root frame with its creation damage already consumed.
    fn clean_root(store: &mut WidgetStore, rect: Rect) -> WidgetId {
        let root = store.create_frame(rect);
        store.damage[root.idx as usize].clear();
        root
    }

    #[test]
    fn create_and_destroy() {
        let mut store = WidgetStore::new();
        let id = leaf(&mut store, Rect::new(0, 0, 10, 10));
        assert!(store.is_alive(id));
        assert_eq!(store.len(), 1);
        store.destroy(id);
        assert!(!store.is_alive(id));
        assert!(store.is_empty());
    }

    #[test]
    fn generation_prevents_stale_access() {
        let mut store = WidgetStore::new();
        let a = leaf(&mut store, Rect::new(0, 0, 1, 1));
        store.destroy(a);
        let b = leaf(&mut store, Rect::new(0, 0, 1, 1));
        assert_eq!(a.idx, b.idx, "slot should be reused");
        assert_ne!(a.generation, b.generation);
        assert!(!store.is_alive(a));
        assert!(store.is_alive(b));
    }

    #[test]
    #[should_panic(expected = "stale WidgetId")]
    fn stale_handle_panics() {
        let mut store = WidgetStore::new();
        let a = leaf(&mut store, Rect::new(0, 0, 1, 1));
        store.destroy(a);
        let _ = leaf(&mut store, Rect::new(0, 0, 1, 1));
        let _ = store.widget_box(a);
    }

    #[test]
    fn new_frame_damages_its_box() {
        let mut store = WidgetStore::new();
        let root = store.create_frame(Rect::new(0, 0, 320, 240));
        assert_eq!(
            store.pending_damage(root).as_slice(),
            &[Rect::new(0, 0, 320, 240)]
        );
    }

    #[test]
    fn children_keep_insertion_order() {
        let mut store = WidgetStore::new();
        let root = clean_root(&mut store, Rect::new(0, 0, 100, 100));
        let a = leaf(&mut store, Rect::new(0, 0, 10, 10));
        let b = leaf(&mut store, Rect::new(5, 5, 10, 10));
        let c = leaf(&mut store, Rect::new(50, 50, 10, 10));
        store.add_child(root, a);
        store.add_child(root, b);
        store.add_child(root, c);
        assert_eq!(store.children(root).collect::<Vec<_>>(), [a, b, c]);

        store.remove_child(root, b);
        assert_eq!(store.children(root).collect::<Vec<_>>(), [a, c]);
        assert_eq!(store.parent(b), None);
        assert_eq!(store.parent(a), Some(root));
    }

    #[test]
    fn damage_is_forwarded_to_root() {
        let mut store = WidgetStore::new();
        let root = clean_root(&mut store, Rect::new(0, 0, 100, 100));
        let inner = clean_root(&mut store, Rect::new(10, 10, 50, 50));
        store.add_child(root, inner);
        store.damage[root.idx as usize].clear();
        let w = leaf(&mut store, Rect::new(20, 20, 5, 5));
        store.add_child(inner, w);

        assert_eq!(store.root_of(w), root);
        assert_eq!(
            store.pending_damage(root).as_slice(),
            &[Rect::new(20, 20, 5, 5)]
        );
        assert!(store.pending_damage(inner).is_empty());
        assert!(store.pending_damage(w).is_empty());

        // Forwarded unchanged, even outside the widget's own box.
        store.damage(w, Rect::new(90, 90, 5, 5));
        assert_eq!(store.pending_damage(root).len(), 2);
    }

    #[test]
    fn empty_damage_is_ignored() {
        let mut store = WidgetStore::new();
        let root = clean_root(&mut store, Rect::new(0, 0, 100, 100));
        store.damage(root, Rect::new(5, 5, 0, 10));
        assert!(store.pending_damage(root).is_empty());
    }

    #[test]
    fn set_box_damages_old_and_new() {
        let mut store = WidgetStore::new();
        let root = clean_root(&mut store, Rect::new(0, 0, 100, 100));
        let w = leaf(&mut store, Rect::new(0, 0, 10, 10));
        store.add_child(root, w);
        store.damage[root.idx as usize].clear();

        store.set_box(w, Rect::new(50, 50, 10, 10));
        assert_eq!(
            store.pending_damage(root).as_slice(),
            &[Rect::new(0, 0, 10, 10), Rect::new(50, 50, 10, 10)]
        );

        store.damage[root.idx as usize].clear();
        store.set_box(w, Rect::new(50, 50, 10, 10));
        assert!(
            store.pending_damage(root).is_empty(),
            "an unchanged box must not damage"
        );
    }

    #[test]
    fn visibility_changes_damage() {
        let mut store = WidgetStore::new();
        let root = clean_root(&mut store, Rect::new(0, 0, 100, 100));
        let w = leaf(&mut store, Rect::new(0, 0, 10, 10));
        store.add_child(root, w);
        store.damage[root.idx as usize].clear();

        store.hide(w);
        assert!(!store.is_visible(w));
        assert_eq!(store.pending_damage(root).len(), 1);

        store.damage[root.idx as usize].clear();
        store.hide(w);
        assert!(store.pending_damage(root).is_empty());

        store.show(w);
        assert_eq!(store.pending_damage(root).len(), 1);
    }

    #[test]
    fn hidden_child_added_without_damage() {
        let mut store = WidgetStore::new();
        let root = clean_root(&mut store, Rect::new(0, 0, 100, 100));
        let w = leaf(&mut store, Rect::new(0, 0, 10, 10));
        store.hide(w);
        store.add_child(root, w);
        assert!(store.pending_damage(root).is_empty());
    }

    #[test]
    fn destroy_frame_frees_subtree() {
        let mut store = WidgetStore::new();
        let root = clean_root(&mut store, Rect::new(0, 0, 100, 100));
        let panel = clean_root(&mut store, Rect::new(0, 0, 50, 50));
        let a = leaf(&mut store, Rect::new(0, 0, 10, 10));
        let b = leaf(&mut store, Rect::new(10, 10, 10, 10));
        store.add_child(panel, a);
        store.add_child(panel, b);
        store.add_child(root, panel);
        store.damage[root.idx as usize].clear();

        store.destroy(panel);
        assert!(!store.is_alive(panel));
        assert!(!store.is_alive(a));
        assert!(!store.is_alive(b));
        assert_eq!(store.len(), 1);
        assert_eq!(store.children(root).count(), 0);
        assert_eq!(
            store.pending_damage(root).as_slice(),
            &[Rect::new(0, 0, 50, 50)]
        );
    }

    #[test]
    fn remove_all_clears_children() {
        let mut store = WidgetStore::new();
        let root = clean_root(&mut store, Rect::new(0, 0, 100, 100));
        let kids: Vec<_> = (0..4)
            .map(|i| leaf(&mut store, Rect::new(i * 20, 0, 10, 10)))
            .collect();
        for &k in &kids {
            store.add_child(root, k);
        }
        store.remove_all(root);
        assert_eq!(store.children(root).count(), 0);
        assert!(kids.iter().all(|&k| !store.is_alive(k)));
        assert_eq!(store.roots(), [root]);
    }

    #[test]
    #[should_panic(expected = "parent is not a frame")]
    fn leaf_cannot_have_children() {
        let mut store = WidgetStore::new();
        let a = leaf(&mut store, Rect::new(0, 0, 10, 10));
        let b = leaf(&mut store, Rect::new(0, 0, 10, 10));
        store.add_child(a, b);
    }

    #[test]
    #[should_panic(expected = "child already has a parent")]
    fn double_add_panics() {
        let mut store = WidgetStore::new();
        let root = store.create_frame(Rect::new(0, 0, 10, 10));
        let w = leaf(&mut store, Rect::new(0, 0, 10, 10));
        store.add_child(root, w);
        store.add_child(root, w);
    }

    #[test]
    #[should_panic(expected = "own subtree")]
    fn cycle_panics() {
        let mut store = WidgetStore::new();
        let outer = store.create_frame(Rect::new(0, 0, 10, 10));
        let inner = store.create_frame(Rect::new(0, 0, 10, 10));
        store.add_child(outer, inner);
        store.add_child(inner, outer);
    }

    #[test]
    #[should_panic(expected = "not a child of this frame")]
    fn remove_foreign_child_panics() {
        let mut store = WidgetStore::new();
        let a = store.create_frame(Rect::new(0, 0, 10, 10));
        let b = store.create_frame(Rect::new(0, 0, 10, 10));
        let w = leaf(&mut store, Rect::new(0, 0, 10, 10));
        store.add_child(a, w);
        store.remove_child(b, w);
    }

    #[test]
    #[should_panic(expected = "FRAME flag is fixed")]
    fn frame_flag_is_fixed() {
        let mut store = WidgetStore::new();
        let root = store.create_frame(Rect::new(0, 0, 10, 10));
        store.set_flags(root, WidgetFlags::NO_BACKGROUND);
    }

    #[test]
    fn damage_limit_collapses_root_list() {
        let mut store = WidgetStore::with_damage_limit(2);
        let root = clean_root(&mut store, Rect::new(0, 0, 100, 100));
        store.damage(root, Rect::new(0, 0, 5, 5));
        store.damage(root, Rect::new(20, 20, 5, 5));
        store.damage(root, Rect::new(40, 40, 5, 5));
        assert_eq!(
            store.pending_damage(root).as_slice(),
            &[Rect::new(0, 0, 45, 45)]
        );
    }

    #[cfg(feature = "trace")]
    #[test]
    fn damage_emits_trace_event() {
        use vellum_core::trace::TraceSink;

        #[derive(Default)]
        struct Sink(Vec<DamageEvent>);
        impl TraceSink for Sink {
            fn on_damage(&mut self, e: &DamageEvent) {
                self.0.push(*e);
            }
        }

        let mut store = WidgetStore::new();
        let root = clean_root(&mut store, Rect::new(0, 0, 100, 100));
        let mut sink = Sink::default();
        store.damage_traced(root, Rect::new(1, 2, 3, 4), &mut Tracer::new(&mut sink));
        assert_eq!(
            sink.0,
            [DamageEvent {
                root: root.index(),
                rect: Rect::new(1, 2, 3, 4),
                list_len: 1,
            }]
        );
    }
}
