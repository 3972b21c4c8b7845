//! Pretty JSON laid out the way a browser's `JSON.stringify(v, null, 2)`
//! lays it out.
//!
//! Two things differ from `serde_json::to_string_pretty`:
//! - Object keys that are array indices (`"0"`, `"17"`, ...) come first in
//!   ascending order, the remaining keys keep their received order.
//! - Numbers use the ECMAScript number-to-string rules: `1.0` prints as
//!   `1`, `1e21` as `1e+21`, `1e-7` as `1e-7`. Integers beyond 2^53 lose
//!   precision as they would in the browser.

use std::io;

use serde::{Serialize, Serializer};
use serde_json::ser::{Formatter, PrettyFormatter};
use serde_json::Value;

/// Largest integer an IEEE double represents exactly.
const MAX_SAFE_INTEGER: u64 = (1 << 53) - 1;

/// Two-space indented rendering of `value`.
pub fn to_js_pretty(value: &Value) -> String {
    let mut out = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, JsFormatter::default());
    match JsOrder(value).serialize(&mut serializer) {
        Ok(()) => String::from_utf8(out).unwrap_or_else(|_| value.to_string()),
        Err(_) => value.to_string(),
    }
}

/// Serializes a `Value` with object keys in property-enumeration order.
struct JsOrder<'a>(&'a Value);

impl Serialize for JsOrder<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Value::Array(items) => serializer.collect_seq(items.iter().map(JsOrder)),
            Value::Object(map) => {
                let mut entries: Vec<(&String, &Value)> = map.iter().collect();
                // Stable: non-index keys all share one sort key.
                entries.sort_by_key(|(key, _)| match array_index(key) {
                    Some(index) => (0, index),
                    None => (1, 0),
                });
                serializer.collect_map(entries.into_iter().map(|(key, value)| (key, JsOrder(value))))
            }
            other => other.serialize(serializer),
        }
    }
}

/// A canonical decimal `u32` below `2^32 - 1`.
fn array_index(key: &str) -> Option<u32> {
    if key.is_empty() || (key.len() > 1 && key.starts_with('0')) {
        return None;
    }
    if !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    key.parse::<u32>().ok().filter(|index| *index != u32::MAX)
}

fn js_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let formatted = format!("{value:e}");
        return match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => formatted,
        };
    }
    // `Display` for f64 is the shortest round-trip form without a trailing
    // `.0`, which is what the browser prints in this range.
    format!("{value}")
}

/// `PrettyFormatter` layout with browser number rendering.
#[derive(Default)]
struct JsFormatter<'a> {
    pretty: PrettyFormatter<'a>,
}

impl Formatter for JsFormatter<'_> {
    fn write_i64<W: ?Sized + io::Write>(&mut self, writer: &mut W, value: i64) -> io::Result<()> {
        if value.unsigned_abs() > MAX_SAFE_INTEGER {
            writer.write_all(js_number(value as f64).as_bytes())
        } else {
            write!(writer, "{value}")
        }
    }

    fn write_u64<W: ?Sized + io::Write>(&mut self, writer: &mut W, value: u64) -> io::Result<()> {
        if value > MAX_SAFE_INTEGER {
            writer.write_all(js_number(value as f64).as_bytes())
        } else {
            write!(writer, "{value}")
        }
    }

    fn write_f64<W: ?Sized + io::Write>(&mut self, writer: &mut W, value: f64) -> io::Result<()> {
        writer.write_all(js_number(value).as_bytes())
    }

    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.begin_array(writer)
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.pretty.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.begin_object(writer)
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.pretty.begin_object_key(writer, first)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_object_value(writer)
    }
}
