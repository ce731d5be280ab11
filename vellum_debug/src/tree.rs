// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Widget-tree dumps.
//!
//! [`dump`] turns a tree into nested JSON objects:
//!
//! ```json
//! {
//!   "id": 0, "kind": "frame", "box": [0, 0, 800, 480], "visible": true,
//!   "flags": ["FRAME"], "background": "#202020ff", "pending_damage": [[0, 0, 800, 480]],
//!   "children": [ { "id": 1, "kind": "solid_fill", ... } ]
//! }
//! ```
//!
//! `pending_damage` appears on roots only.

use std::io::{self, Write};

use serde_json::{Map, Value, json};

use vellum_widget::{WidgetFlags, WidgetId, WidgetStore};

use crate::recorder::rect_json;

/// Dumps the tree rooted at `id`.
#[must_use]
pub fn dump(store: &WidgetStore, id: WidgetId) -> Value {
    let flags = store.flags(id);
    let kind = if flags.contains(WidgetFlags::FRAME) {
        "frame"
    } else {
        store.paint_name(id).unwrap_or("widget")
    };

    let mut node = Map::new();
    node.insert("id".into(), json!(id.index()));
    node.insert("kind".into(), json!(kind));
    node.insert("box".into(), rect_json(store.widget_box(id)));
    node.insert("visible".into(), json!(store.is_visible(id)));
    node.insert(
        "flags".into(),
        flags.iter_names().map(|(name, _)| json!(name)).collect(),
    );
    if let Some(color) = store.background(id) {
        node.insert("background".into(), json!(format!("{color:?}")));
    }
    if store.parent(id).is_none() {
        node.insert(
            "pending_damage".into(),
            store
                .pending_damage(id)
                .iter()
                .copied()
                .map(rect_json)
                .collect(),
        );
    }
    let children: Vec<Value> = store.children(id).map(|c| dump(store, c)).collect();
    if !children.is_empty() {
        node.insert("children".into(), Value::Array(children));
    }
    Value::Object(node)
}

/// Dumps every root tree in the store.
#[must_use]
pub fn dump_all(store: &WidgetStore) -> Value {
    store.roots().into_iter().map(|r| dump(store, r)).collect()
}

/// Writes [`dump`] as indented JSON.
///
/// # Errors
///
/// Returns any error from `writer`.
pub fn write_pretty(store: &WidgetStore, id: WidgetId, writer: &mut dyn Write) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, &dump(store, id))?;
    writer.write_all(b"\n")
}
