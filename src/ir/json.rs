//! Minimal deterministic JSON writer.
//!
//! Emits the wire form of a document with insertion-order keys and a fixed
//! escape set (backslash, double quote, newline, carriage return, tab) so
//! equal documents always produce byte-identical text. The closed [`Value`]
//! union means every value is writable; there is no unsupported-type case.

use super::value::Value;

/// Serialize a wire value to minimal JSON.
pub fn to_json(value: &Value) -> String {
    let mut out = String::new();
    append_value(&mut out, value);
    out
}

fn append_value(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Int(n) => out.push_str(&n.to_string()),
        Value::Float(n) => out.push_str(&n.to_string()),
        Value::String(s) => append_string(out, s),
        Value::Array(items) => {
            out.push('[');
            for (index, item) in items.iter().enumerate() {
                if index > 0 {
                    out.push(',');
                }
                append_value(out, item);
            }
            out.push(']');
        }
        Value::Object(map) => {
            out.push('{');
            for (index, (key, item)) in map.iter().enumerate() {
                if index > 0 {
                    out.push(',');
                }
                append_string(out, key);
                out.push(':');
                append_value(out, item);
            }
            out.push('}');
        }
    }
}

fn append_string(out: &mut String, s: &str) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::value::ValueMap;

    #[test]
    fn test_writes_scalars() {
        assert_eq!(to_json(&Value::Null), "null");
        assert_eq!(to_json(&Value::Bool(true)), "true");
        assert_eq!(to_json(&Value::Int(-7)), "-7");
        assert_eq!(to_json(&Value::Float(1.5)), "1.5");
        assert_eq!(to_json(&Value::string("ok")), "\"ok\"");
    }

    #[test]
    fn test_writes_object_with_insertion_order_keys() {
        let mut map = ValueMap::new();
        map.insert("a", 1i64);
        map.insert(
            "b",
            vec![Value::Int(1), Value::string("x"), Value::Bool(true), Value::Null],
        );

        insta::assert_snapshot!(
            to_json(&Value::Object(map)),
            @r#"{"a":1,"b":[1,"x",true,null]}"#
        );
    }

    #[test]
    fn test_escapes_only_the_fixed_set() {
        let json = to_json(&Value::string("a\tb\"c\\d\ne\rf"));
        assert_eq!(json, "\"a\\tb\\\"c\\\\d\\ne\\rf\"");
    }

    #[test]
    fn test_other_characters_pass_through() {
        let json = to_json(&Value::string("café <&> 日本語"));
        assert_eq!(json, "\"café <&> 日本語\"");
    }

    #[test]
    fn test_nested_structures() {
        let mut span = ValueMap::new();
        span.insert("start", 0i64);
        span.insert("end", 0i64);
        let mut node = ValueMap::new();
        node.insert("id", "G::Start");
        node.insert("span", span);

        assert_eq!(
            to_json(&Value::Object(node)),
            r#"{"id":"G::Start","span":{"start":0,"end":0}}"#
        );
    }
}
