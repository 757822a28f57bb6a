// Copyright (C) 2025 Ryan Daum <ryan.daum@gmail.com> This program is free
// software: you can redistribute it and/or modify it under the terms of the GNU
// General Public License as published by the Free Software Foundation, version
// 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

//! Structural queries over the serialized form of a tree.
//!
//! These work on the `serde_json::Value` produced from any node, so they see exactly the
//! node shape that consumers of the generated trees see.

use serde::Serialize;
use serde_json::Value;

/// Depth of the node nesting, counting only objects that carry a `"type"` tag. Arrays and
/// optional wrappers do not add a level.
pub fn node_depth<T: Serialize>(node: &T) -> Result<usize, serde_json::Error> {
    Ok(value_depth(&serde_json::to_value(node)?))
}

pub fn value_depth(value: &Value) -> usize {
    match value {
        Value::Object(map) => {
            let child = map.values().map(value_depth).max().unwrap_or(0);
            if map.contains_key("type") {
                child + 1
            } else {
                child
            }
        }
        Value::Array(items) => items.iter().map(value_depth).max().unwrap_or(0),
        _ => 0,
    }
}

/// The kind name of a serialized node, if it is one.
pub fn node_type(value: &Value) -> Option<&str> {
    value.get("type").and_then(Value::as_str)
}

/// Every node of kind `kind` under `value`, in pre-order.
pub fn collect_nodes<'a>(value: &'a Value, kind: &str) -> Vec<&'a Value> {
    let mut out = vec![];
    visit(value, &mut |v| {
        if node_type(v) == Some(kind) {
            out.push(v);
        }
    });
    out
}

/// Calls `f` on every JSON value under `value` (objects, arrays and scalars), pre-order.
pub fn visit<'a, F: FnMut(&'a Value)>(value: &'a Value, f: &mut F) {
    f(value);
    match value {
        Value::Object(map) => map.values().for_each(|v| visit(v, f)),
        Value::Array(items) => items.iter().for_each(|v| visit(v, f)),
        _ => {}
    }
}
