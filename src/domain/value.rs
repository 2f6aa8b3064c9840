//! Structured Input Values
//!
//! Every document is reduced to one of three shapes before traversal starts,
//! so the builder never meets an unclassified value mid-walk.
//!
//! Nesting depth is not limited here: deserializing, converting and dropping
//! a [`Value`] never recurse once per level on the call stack.

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde_json::{Map, Number};
use std::collections::HashMap;
use std::fmt;

/// A node of the input document.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Key/value pairs in insertion order. Keys are unique.
    Mapping(Vec<(String, Value)>),
    /// Positional elements.
    Sequence(Vec<Value>),
    /// Terminal value.
    Scalar(Scalar),
}

/// Terminal values, each with a canonical textual form.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
}

impl Scalar {
    /// Text used as the label of the scalar's node.
    ///
    /// Strings render without quotes, numbers as they were parsed.
    pub fn canonical_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => f.write_str("null"),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Number(n) => write!(f, "{}", n),
            Scalar::String(s) => f.write_str(s),
        }
    }
}

impl Drop for Value {
    fn drop(&mut self) {
        // Detach children onto a heap stack so each one drops childless.
        let mut orphans = match self {
            Value::Mapping(entries) => entries.drain(..).map(|(_, v)| v).collect(),
            Value::Sequence(items) => std::mem::take(items),
            Value::Scalar(_) => return,
        };
        while let Some(mut value) = orphans.pop() {
            match &mut value {
                Value::Mapping(entries) => orphans.extend(entries.drain(..).map(|(_, v)| v)),
                Value::Sequence(items) => orphans.append(items),
                Value::Scalar(_) => {}
            }
        }
    }
}

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        Value::Scalar(scalar)
    }
}

/// A container whose children are still being converted.
enum Frame {
    Mapping {
        entries: Vec<(String, Value)>,
        key: String,
        rest: serde_json::map::IntoIter,
    },
    Sequence {
        items: Vec<Value>,
        rest: std::vec::IntoIter<serde_json::Value>,
    },
}

enum Opened {
    Container(Frame),
    Leaf(Scalar),
}

impl Frame {
    fn open(json: serde_json::Value) -> Opened {
        match json {
            serde_json::Value::Object(map) => Opened::Container(Frame::Mapping {
                entries: Vec::with_capacity(map.len()),
                key: String::new(),
                rest: map.into_iter(),
            }),
            serde_json::Value::Array(items) => Opened::Container(Frame::Sequence {
                items: Vec::with_capacity(items.len()),
                rest: items.into_iter(),
            }),
            serde_json::Value::String(s) => Opened::Leaf(Scalar::String(s)),
            serde_json::Value::Number(n) => Opened::Leaf(Scalar::Number(n)),
            serde_json::Value::Bool(b) => Opened::Leaf(Scalar::Bool(b)),
            serde_json::Value::Null => Opened::Leaf(Scalar::Null),
        }
    }

    fn next_child(&mut self) -> Option<serde_json::Value> {
        match self {
            Frame::Mapping { key, rest, .. } => rest.next().map(|(k, v)| {
                *key = k;
                v
            }),
            Frame::Sequence { rest, .. } => rest.next(),
        }
    }

    fn accept(&mut self, child: Value) {
        match self {
            Frame::Mapping { entries, key, .. } => entries.push((std::mem::take(key), child)),
            Frame::Sequence { items, .. } => items.push(child),
        }
    }

    fn finish(self) -> Value {
        match self {
            Frame::Mapping { entries, .. } => Value::Mapping(entries),
            Frame::Sequence { items, .. } => Value::Sequence(items),
        }
    }
}

impl From<serde_json::Value> for Value {
    /// Converts on an explicit stack; `json` is taken apart as it goes.
    fn from(json: serde_json::Value) -> Self {
        let mut frame = match Frame::open(json) {
            Opened::Container(frame) => frame,
            Opened::Leaf(scalar) => return Value::Scalar(scalar),
        };
        let mut ancestors: Vec<Frame> = Vec::new();

        loop {
            match frame.next_child() {
                Some(child) => match Frame::open(child) {
                    Opened::Container(inner) => ancestors.push(std::mem::replace(&mut frame, inner)),
                    Opened::Leaf(scalar) => frame.accept(Value::Scalar(scalar)),
                },
                None => {
                    let done = frame.finish();
                    match ancestors.pop() {
                        Some(parent) => {
                            frame = parent;
                            frame.accept(done);
                        }
                        None => return done,
                    }
                }
            }
        }
    }
}

impl From<Map<String, serde_json::Value>> for Value {
    fn from(map: Map<String, serde_json::Value>) -> Self {
        Value::from(serde_json::Value::Object(map))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON value")
    }

    fn visit_bool<E: de::Error>(self, b: bool) -> Result<Value, E> {
        Ok(Value::Scalar(Scalar::Bool(b)))
    }

    fn visit_i64<E: de::Error>(self, n: i64) -> Result<Value, E> {
        Ok(Value::Scalar(Scalar::Number(n.into())))
    }

    fn visit_u64<E: de::Error>(self, n: u64) -> Result<Value, E> {
        Ok(Value::Scalar(Scalar::Number(n.into())))
    }

    fn visit_f64<E: de::Error>(self, n: f64) -> Result<Value, E> {
        Number::from_f64(n)
            .map(|n| Value::Scalar(Scalar::Number(n)))
            .ok_or_else(|| E::custom(format!("non-finite number {}", n)))
    }

    fn visit_str<E: de::Error>(self, s: &str) -> Result<Value, E> {
        Ok(Value::Scalar(Scalar::String(s.to_string())))
    }

    fn visit_string<E: de::Error>(self, s: String) -> Result<Value, E> {
        Ok(Value::Scalar(Scalar::String(s)))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Scalar(Scalar::Null))
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Scalar(Scalar::Null))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<Value>()? {
            items.push(item);
        }
        Ok(Value::Sequence(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Value, A::Error> {
        let mut entries: Vec<(String, Value)> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();
        while let Some(key) = map.next_key::<String>()? {
            let value = map.next_value::<Value>()?;
            // A repeated key keeps its first position and its last value.
            match positions.get(&key) {
                Some(&at) => entries[at].1 = value,
                None => {
                    positions.insert(key.clone(), entries.len());
                    entries.push((key, value));
                }
            }
        }
        Ok(Value::Mapping(entries))
    }
}
