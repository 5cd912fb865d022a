use indexmap::IndexMap;
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::core::value_path::{PathSegment, ValuePath};

/// A live JSON-like document edited in place by the object editor.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    None,
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<Value>),
    Object(IndexMap<String, Value>),
}

impl Value {
    pub fn object() -> Self {
        Self::Object(IndexMap::new())
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    pub fn is_container(&self) -> bool {
        matches!(self, Self::Object(_) | Self::List(_))
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&Vec<Value>> {
        match self {
            Self::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Scalar rendered the way a text input shows it.
    pub fn to_text_scalar(&self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text.clone()),
            Self::Number(n) => Some(format_number(*n)),
            Self::Bool(flag) => Some(flag.to_string()),
            Self::None | Self::List(_) | Self::Object(_) => None,
        }
    }

    pub fn get_segment(&self, segment: &PathSegment) -> Option<&Value> {
        match (self, segment) {
            (Self::Object(map), PathSegment::Key(key)) => map.get(key.as_str()),
            (Self::List(list), PathSegment::Index(index)) => list.get(*index),
            _ => None,
        }
    }

    pub fn get_segment_mut(&mut self, segment: &PathSegment) -> Option<&mut Value> {
        match (self, segment) {
            (Self::Object(map), PathSegment::Key(key)) => map.get_mut(key.as_str()),
            (Self::List(list), PathSegment::Index(index)) => list.get_mut(*index),
            _ => None,
        }
    }

    pub fn get_path(&self, path: &ValuePath) -> Option<&Value> {
        path.segments()
            .iter()
            .try_fold(self, |current, segment| current.get_segment(segment))
    }

    pub fn get_path_mut(&mut self, path: &ValuePath) -> Option<&mut Value> {
        let mut current = self;
        for segment in path.segments() {
            current = current.get_segment_mut(segment)?;
        }
        Some(current)
    }
}

pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Self::List(value)
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(value: IndexMap<String, Value>) -> Self {
        Self::Object(value)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::None,
            serde_json::Value::Bool(flag) => Self::Bool(flag),
            serde_json::Value::Number(n) => Self::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(text) => Self::Text(text),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => Self::Object(
                map.into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<&Value> for serde_json::Value {
    fn from(value: &Value) -> Self {
        match value {
            Value::None => serde_json::Value::Null,
            Value::Bool(flag) => serde_json::Value::Bool(*flag),
            Value::Number(n) => number_to_json(*n),
            Value::Text(text) => serde_json::Value::String(text.clone()),
            Value::List(items) => {
                serde_json::Value::Array(items.iter().map(serde_json::Value::from).collect())
            }
            Value::Object(map) => serde_json::Value::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), serde_json::Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        serde_json::Value::from(&value)
    }
}

fn number_to_json(n: f64) -> serde_json::Value {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        return serde_json::Value::from(n as i64);
    }
    serde_json::Number::from_f64(n)
        .map(serde_json::Value::Number)
        .unwrap_or(serde_json::Value::Null)
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::None => serializer.serialize_none(),
            Self::Bool(flag) => serializer.serialize_bool(*flag),
            Self::Number(n) if !n.is_finite() => serializer.serialize_none(),
            Self::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                serializer.serialize_i64(*n as i64)
            }
            Self::Number(n) => serializer.serialize_f64(*n),
            Self::Text(text) => serializer.serialize_str(text),
            Self::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Object(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Value::from)
    }
}

#[cfg(test)]
mod tests {
    use super::Value;
    use crate::core::value_path::ValuePath;

    #[test]
    fn json_conversion_keeps_key_order() {
        let json = serde_json::json!({"b": 1, "a": [true, null, "x"], "c": {"z": 1.5}});
        let value = Value::from(json.clone());
        let Value::Object(map) = &value else {
            panic!("expected object");
        };
        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
        assert_eq!(serde_json::Value::from(&value), json);
    }

    #[test]
    fn nan_serializes_as_null() {
        let value = Value::Number(f64::NAN);
        let text = serde_json::to_string(&value).expect("serialize");
        assert_eq!(text, "null");
    }

    #[test]
    fn get_path_walks_lists_and_objects() {
        let value = Value::from(serde_json::json!({"Networks": [{"Tag": "n1"}]}));
        let path = ValuePath::empty().key("Networks").index(0).key("Tag");
        assert_eq!(value.get_path(&path).and_then(Value::as_text), Some("n1"));
    }

    #[test]
    fn integral_numbers_format_without_fraction() {
        assert_eq!(Value::Number(53.0).to_text_scalar().as_deref(), Some("53"));
        assert_eq!(Value::Number(0.25).to_text_scalar().as_deref(), Some("0.25"));
    }
}
