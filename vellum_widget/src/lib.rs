// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Widget tree, damage propagation, and draw dispatch for vellum.
//!
//! Widgets live in a [`WidgetStore`] and are addressed by [`WidgetId`]
//! handles. A frame holds an ordered list of children; the order is the
//! z-order, bottom first. Children keep a non-owning back-index to their
//! parent, and destroying a frame destroys its subtree.
//!
//! Any change that alters pixels reports damage. Damage always accumulates
//! on the root of the tree, and [`draw`] consumes it:
//!
//! ```text
//! store.set_box(w, ..) ──► store.damage(w, old) + store.damage(w, new)
//!                                     │
//!                                     ▼
//!                            root DamageList
//!                                     │
//!                    draw(store, root, screen) ──► Screen::flip
//! ```
//!
//! [`EventLoop`] drives the periodic redraw on a single thread, and
//! [`LoopProxy`] lets worker threads hand work back to it.
//!
//! # Crate features
//!
//! - `trace` (disabled by default): Delivers damage and draw-pass events to
//!   the `Tracer` passed to the `*_traced` entry points.

pub mod event_loop;
pub mod frame;
pub mod id;
pub mod paint;
pub mod signal;
pub mod store;
pub mod traverse;

pub use event_loop::{EventLoop, LoopClosed, LoopProxy, TimerId};
pub use frame::{draw, draw_traced};
pub use id::WidgetId;
pub use paint::{Paint, SolidFill};
pub use signal::{Signal, SlotId};
pub use store::{WidgetFlags, WidgetStore};
pub use traverse::Children;
