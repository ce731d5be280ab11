// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry, damage lists, and tracing for damage-tracking composition.
//!
//! `vellum_core` holds the pieces of the compositor that do not touch pixels.
//! It is `no_std` compatible (with `alloc`).
//!
//! # Architecture
//!
//! Damage flows from widgets to the display in one direction:
//!
//! ```text
//!   widget changes ──► damage(rect) ──► root DamageList
//!                                            │
//!                 ┌──────────────────────────┘
//!                 ▼
//!   draw pass (paint into composition surface, clipped per rect)
//!                 │
//!                 ▼
//!   Screen::flip ──► per-buffer DamageList ──► copy ──► Backend::schedule_flip
//! ```
//!
//! **[`geometry`]**: [`Rect`](geometry::Rect), the integer rectangle that
//! every damage region, clip, and blit is expressed in.
//!
//! **[`damage`]**: [`DamageList`](damage::DamageList), a small set of
//! non-overlapping rectangles maintained by merge-on-insert.
//!
//! **[`time`]**: Monotonic nanosecond timestamps for timers and traces.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! draw-pass and flip instrumentation, with a zero-overhead
//! [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod damage;
pub mod geometry;
pub mod time;
pub mod trace;
