// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pixels, display buffers, and presentation for vellum.
//!
//! This crate turns the damage lists produced by [`vellum_core`] into pixels
//! on a display. It defines:
//!
//! - [`Surface`] and [`Painter`]: packed pixel buffers and a clipped drawing
//!   context over them
//! - [`PixelFormat`] and [`Color`]
//! - [`DisplayBufferSet`]: the display buffers, each with its own damage list
//! - [`Backend`]: the presentation contract, and [`Headless`], an in-memory
//!   implementation
//! - [`Screen`]: composition surface plus buffers plus backend, with `flip`
//! - [`ScreenConfig`]
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `ScreenConfig::apply_env`.
//! - `trace` (disabled by default): Enables trace event delivery.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod backend;
pub mod buffer;
pub mod config;
pub mod format;
pub mod screen;
pub mod surface;

pub use backend::{Backend, Headless, PresentRecord, PresentRequest};
pub use buffer::{DisplayBuffer, DisplayBufferSet};
pub use config::ScreenConfig;
pub use format::{Color, PixelFormat};
pub use screen::Screen;
pub use surface::{Painter, Surface};
