// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON event recording.
//!
//! [`RecorderSink`] implements [`TraceSink`] and keeps every event as a
//! [`serde_json::Value`]. [`RecorderSink::write_json_lines`] writes them one
//! object per line, for diffing runs or loading into a notebook.
//!
//! Every record has an `"event"` field naming its kind; the remaining fields
//! mirror the event struct. Rects are `[x, y, width, height]` arrays.

use std::io::{self, Write};

use serde_json::{Value, json};

use vellum_core::geometry::Rect;
use vellum_core::trace::{
    DamageEvent, DrawBeginEvent, DrawEndEvent, FlipEvent, FlipSkipReason, FlipSkippedEvent,
    GreenscreenEvent, TraceSink,
};

/// A [`TraceSink`] that records events as JSON values.
#[derive(Debug, Default)]
pub struct RecorderSink {
    events: Vec<Value>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded events, oldest first.
    #[must_use]
    pub fn events(&self) -> &[Value] {
        &self.events
    }

    /// Number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns `true` if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Recorded events of one kind (the `"event"` field).
    pub fn of_kind<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        self.events
            .iter()
            .filter(move |e| e.get("event").and_then(Value::as_str) == Some(kind))
    }

    /// Writes every event as one JSON object per line.
    ///
    /// # Errors
    ///
    /// Returns any error from `writer`.
    pub fn write_json_lines(&self, writer: &mut dyn Write) -> io::Result<()> {
        for event in &self.events {
            serde_json::to_writer(&mut *writer, event)?;
            writer.write_all(b"\n")?;
        }
        Ok(())
    }

    /// Consumes the recorder and returns the events.
    #[must_use]
    pub fn into_events(self) -> Vec<Value> {
        self.events
    }
}

pub(crate) fn rect_json(rect: Rect) -> Value {
    json!([rect.x, rect.y, rect.width, rect.height])
}

impl TraceSink for RecorderSink {
    fn on_damage(&mut self, e: &DamageEvent) {
        self.events.push(json!({
            "event": "damage",
            "root": e.root,
            "rect": rect_json(e.rect),
            "list_len": e.list_len,
        }));
    }

    fn on_draw_begin(&mut self, e: &DrawBeginEvent) {
        self.events.push(json!({
            "event": "draw_begin",
            "pass_index": e.pass_index,
            "root": e.root,
            "rect_count": e.rect_count,
            "damaged_area": e.damaged_area,
        }));
    }

    fn on_draw_end(&mut self, e: &DrawEndEvent) {
        self.events.push(json!({
            "event": "draw_end",
            "pass_index": e.pass_index,
            "paint_calls": e.paint_calls,
        }));
    }

    fn on_flip(&mut self, e: &FlipEvent) {
        self.events.push(json!({
            "event": "flip",
            "flip_index": e.flip_index,
            "buffer_index": e.buffer_index,
            "buffer_count": e.buffer_count,
            "copied_area": e.copied_area,
        }));
    }

    fn on_copy_rects(&mut self, flip_index: u64, rects: &[Rect]) {
        self.events.push(json!({
            "event": "copy_rects",
            "flip_index": flip_index,
            "rects": rects.iter().copied().map(rect_json).collect::<Vec<_>>(),
        }));
    }

    fn on_flip_skipped(&mut self, e: &FlipSkippedEvent) {
        let reason = match e.reason {
            FlipSkipReason::NoDamage => "no_damage",
            FlipSkipReason::InvalidIndex => "invalid_index",
        };
        self.events.push(json!({
            "event": "flip_skipped",
            "flip_index": e.flip_index,
            "reason": reason,
        }));
    }

    fn on_greenscreen(&mut self, e: &GreenscreenEvent) {
        self.events.push(json!({
            "event": "greenscreen",
            "flip_index": e.flip_index,
            "rect": rect_json(e.rect),
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_copy_rects_as_arrays() {
        let mut sink = RecorderSink::new();
        sink.on_copy_rects(3, &[Rect::new(1, 2, 3, 4)]);
        assert_eq!(
            sink.events()[0],
            json!({"event": "copy_rects", "flip_index": 3, "rects": [[1, 2, 3, 4]]})
        );
    }

    #[test]
    fn json_lines_round_trip() {
        let mut sink = RecorderSink::new();
        sink.on_damage(&DamageEvent {
            root: 0,
            rect: Rect::new(0, 0, 10, 10),
            list_len: 1,
        });
        sink.on_flip_skipped(&FlipSkippedEvent {
            flip_index: 0,
            reason: FlipSkipReason::NoDamage,
        });

        let mut out = Vec::new();
        sink.write_json_lines(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let parsed: Vec<Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(parsed, sink.events());
        assert_eq!(parsed[1]["reason"], "no_damage");
    }

    #[test]
    fn filters_by_kind() {
        let mut sink = RecorderSink::new();
        for flip_index in 0..3 {
            sink.on_flip(&FlipEvent {
                flip_index,
                buffer_index: 0,
                buffer_count: 1,
                copied_area: 1,
            });
            sink.on_copy_rects(flip_index, &[]);
        }
        assert_eq!(sink.len(), 6);
        assert_eq!(sink.of_kind("flip").count(), 3);
        assert_eq!(sink.of_kind("damage").count(), 0);
    }
}
