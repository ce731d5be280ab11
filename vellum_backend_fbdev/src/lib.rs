// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Linux framebuffer backend for vellum.
//!
//! [`FramebufferBackend`] implements [`vellum_render::Backend`] over
//! `/dev/fbN`. Geometry (size, depth, row pitch) comes from
//! `/sys/class/graphics/fbN`. Each flip writes only the rects the screen
//! copied, so a small change costs a small write.
//!
//! ```no_run
//! use vellum_backend_fbdev::FramebufferBackend;
//! use vellum_render::Screen;
//!
//! let backend = FramebufferBackend::open(0)?;
//! let config = backend.screen_config().apply_env();
//! let mut screen = Screen::new(&config, backend);
//! screen.composition_mut().clear(vellum_render::Color::BLACK);
//! screen.flip(&screen.damage_full());
//! # Ok::<(), vellum_backend_fbdev::FbdevError>(())
//! ```
//!
//! [`time::now`] reads `CLOCK_MONOTONIC` for driving the event loop.

pub mod error;
pub mod framebuffer;
pub mod sysfs;
pub mod time;

pub use error::FbdevError;
pub use framebuffer::FramebufferBackend;
pub use sysfs::FbGeometry;
