//! Native coercion of raw values into scalar kinds.

use alloc::string::{String, ToString};

use serde_json::Value as Json;

use crate::Value;
use crate::info::ScalarKind;

/// Coerces `value` into `kind`, `None` when the value has no sensible
/// representation of that kind.
pub(crate) fn coerce(value: Value, kind: ScalarKind) -> Option<Value> {
    let value = match value {
        Value::Json(json) if !(json.is_array() || json.is_object()) => Value::from(json),
        value => value,
    };

    if kind == ScalarKind::Null || value.is_null() {
        return Some(Value::Null);
    }

    match kind {
        ScalarKind::Bool => Some(Value::Bool(truthy(&value))),
        ScalarKind::Int => to_int(&value).map(Value::Int),
        ScalarKind::Float => to_float(&value).map(Value::Float),
        ScalarKind::String => to_text(value).map(Value::String),
        ScalarKind::Array => to_array(value),
        ScalarKind::Object => to_object(value),
        ScalarKind::Null => Some(Value::Null),
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Int(i) => *i != 0,
        Value::Float(f) => *f != 0.0,
        Value::String(s) => !(s.is_empty() || s == "0"),
        Value::List(items) => !items.is_empty(),
        Value::Json(Json::Array(items)) => !items.is_empty(),
        Value::Json(Json::Object(map)) => !map.is_empty(),
        Value::Json(_) | Value::Object(_) => true,
    }
}

fn parse_number(text: &str) -> Option<Value> {
    let text = text.trim();
    if let Ok(i) = text.parse::<i64>() {
        return Some(Value::Int(i));
    }
    text.parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .map(Value::Float)
}

fn float_to_int(f: f64) -> Option<i64> {
    (f.is_finite() && f >= i64::MIN as f64 && f < i64::MAX as f64).then_some(f as i64)
}

fn to_int(value: &Value) -> Option<i64> {
    match value {
        Value::Int(i) => Some(*i),
        Value::Float(f) => float_to_int(*f),
        Value::Bool(b) => Some(i64::from(*b)),
        Value::String(s) => match parse_number(s)? {
            Value::Int(i) => Some(i),
            Value::Float(f) => float_to_int(f),
            _ => None,
        },
        _ => None,
    }
}

fn to_float(value: &Value) -> Option<f64> {
    match value {
        Value::Float(f) => Some(*f),
        Value::Int(i) => Some(*i as f64),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => match parse_number(s)? {
            Value::Int(i) => Some(i as f64),
            Value::Float(f) => Some(f),
            _ => None,
        },
        _ => None,
    }
}

fn to_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Int(i) => Some(i.to_string()),
        Value::Float(f) => Some(f.to_string()),
        Value::Bool(b) => Some(if b { String::from("1") } else { String::new() }),
        _ => None,
    }
}

fn to_array(value: Value) -> Option<Value> {
    match value {
        Value::Json(json) => Some(Value::Json(json)),
        Value::List(items) => Some(Value::List(items)),
        Value::Object(_) => None,
        scalar => Some(Value::Json(Json::Array(alloc::vec![scalar.into_json()?]))),
    }
}

fn to_object(value: Value) -> Option<Value> {
    let json = match value {
        Value::Object(object) => return Some(Value::Object(object)),
        Value::Json(Json::Object(map)) => return Some(Value::Json(Json::Object(map))),
        value => value.into_json()?,
    };

    let map = match json {
        Json::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| (index.to_string(), item))
            .collect(),
        scalar => {
            let mut map = serde_json::Map::new();
            map.insert(String::from("scalar"), scalar);
            map
        }
    };
    Some(Value::Json(Json::Object(map)))
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn coerce_json(raw: Json, kind: ScalarKind) -> Option<Json> {
        coerce(Value::from(raw), kind).and_then(Value::into_json)
    }

    #[test]
    fn to_int_kind() {
        assert_eq!(coerce_json(json!(7), ScalarKind::Int), Some(json!(7)));
        assert_eq!(coerce_json(json!(7.9), ScalarKind::Int), Some(json!(7)));
        assert_eq!(coerce_json(json!("42"), ScalarKind::Int), Some(json!(42)));
        assert_eq!(coerce_json(json!(" 3.5 "), ScalarKind::Int), Some(json!(3)));
        assert_eq!(coerce_json(json!(true), ScalarKind::Int), Some(json!(1)));
        assert_eq!(coerce_json(json!("abc"), ScalarKind::Int), None);
        assert_eq!(coerce_json(json!([1]), ScalarKind::Int), None);
    }

    #[test]
    fn to_float_kind() {
        assert_eq!(coerce_json(json!(0.0049), ScalarKind::Float), Some(json!(0.0049)));
        assert_eq!(coerce_json(json!(2), ScalarKind::Float), Some(json!(2.0)));
        assert_eq!(coerce_json(json!("1e3"), ScalarKind::Float), Some(json!(1000.0)));
        assert_eq!(coerce_json(json!("NaN"), ScalarKind::Float), None);
    }

    #[test]
    fn to_string_kind() {
        assert_eq!(coerce_json(json!(9), ScalarKind::String), Some(json!("9")));
        assert_eq!(coerce_json(json!(1.5), ScalarKind::String), Some(json!("1.5")));
        assert_eq!(coerce_json(json!(true), ScalarKind::String), Some(json!("1")));
        assert_eq!(coerce_json(json!(false), ScalarKind::String), Some(json!("")));
        assert_eq!(coerce_json(json!({"a": 1}), ScalarKind::String), None);
    }

    #[test]
    fn to_bool_kind() {
        assert_eq!(coerce_json(json!("0"), ScalarKind::Bool), Some(json!(false)));
        assert_eq!(coerce_json(json!("no"), ScalarKind::Bool), Some(json!(true)));
        assert_eq!(coerce_json(json!([]), ScalarKind::Bool), Some(json!(false)));
        assert_eq!(coerce_json(json!(0.0), ScalarKind::Bool), Some(json!(false)));
    }

    #[test]
    fn to_structured_kinds() {
        assert_eq!(coerce_json(json!([1, 2]), ScalarKind::Array), Some(json!([1, 2])));
        assert_eq!(coerce_json(json!("x"), ScalarKind::Array), Some(json!(["x"])));
        assert_eq!(coerce_json(json!({"a": 1}), ScalarKind::Object), Some(json!({"a": 1})));
        assert_eq!(coerce_json(json!(["a"]), ScalarKind::Object), Some(json!({"0": "a"})));
        assert_eq!(coerce_json(json!(5), ScalarKind::Object), Some(json!({"scalar": 5})));
    }

    #[test]
    fn null_kind_and_null_input() {
        assert_eq!(coerce_json(json!(5), ScalarKind::Null), Some(Json::Null));
        assert!(coerce(Value::Null, ScalarKind::Int).unwrap().is_null());
    }
}
