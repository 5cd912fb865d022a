use serde::Serialize;

use crate::core::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarType {
    Text,
    Number,
    Boolean,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    Object,
    Array,
    Scalar(ScalarType),
}

impl Kind {
    pub fn is_container(self) -> bool {
        matches!(self, Self::Object | Self::Array)
    }

    pub fn is_boolean(self) -> bool {
        matches!(self, Self::Scalar(ScalarType::Boolean))
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Object => "object",
            Self::Array => "array",
            Self::Scalar(ScalarType::Text) => "string",
            Self::Scalar(ScalarType::Number) => "number",
            Self::Scalar(ScalarType::Boolean) => "boolean",
        }
    }
}

/// Nulls and anything that is neither a bool nor a number edit as text.
pub fn classify(value: &Value) -> Kind {
    match value {
        Value::List(_) => Kind::Array,
        Value::Object(_) => Kind::Object,
        Value::Bool(_) => Kind::Scalar(ScalarType::Boolean),
        Value::Number(_) => Kind::Scalar(ScalarType::Number),
        Value::Text(_) | Value::None => Kind::Scalar(ScalarType::Text),
    }
}

/// Null leaves are kept in the meta tree but get no input.
pub fn is_absent(value: &Value) -> bool {
    matches!(value, Value::None)
}

/// One level of lookahead: true when an immediate member is itself an
/// object or array.
pub fn has_nested(value: &Value) -> bool {
    match value {
        Value::List(items) => items.iter().any(|item| classify(item).is_container()),
        Value::Object(map) => map.values().any(|item| classify(item).is_container()),
        _ => false,
    }
}
