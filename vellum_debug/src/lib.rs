// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pretty-printing, JSON recording, and widget-tree dumps for vellum
//! diagnostics.
//!
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event output.
//! - [`recorder::RecorderSink`]: events kept as JSON values, written as JSON
//!   lines.
//! - [`tree::dump`]: a widget tree as nested JSON, with pending damage.

pub mod pretty;
pub mod recorder;
pub mod tree;
