use crate::error::{Result, TsutaError};
use serde_json::Value as JsonValue;
use std::collections::HashMap;

/// Runtime value type at the evaluator boundary
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    String(String),
    Array(Vec<Value>),
    Object(HashMap<String, Value>),
    /// Text already encoded for one or more content types
    Safe(SafeString),
}

/// A string tagged as safe for specific content types, exempting it from
/// re-escaping for those types
#[derive(Debug, Clone, PartialEq)]
pub struct SafeString {
    pub content: String,
    pub content_types: Vec<String>,
}

impl Value {
    /// Construct a value marked safe for the given content type
    pub fn safe(content: impl Into<String>, content_type: impl Into<String>) -> Self {
        Value::Safe(SafeString {
            content: content.into(),
            content_types: vec![content_type.into()],
        })
    }

    /// Whether the value is already marked safe for the given content type
    pub fn is_safe(&self, content_type: &str) -> bool {
        match self {
            Value::Safe(s) => s.content_types.iter().any(|ct| ct == content_type),
            _ => false,
        }
    }

    /// Convert a JSON value to a Tsuta Value
    pub fn from_json(json: JsonValue) -> Result<Self> {
        match json {
            JsonValue::Null => Ok(Value::Null),
            JsonValue::Bool(b) => Ok(Value::Bool(b)),
            JsonValue::Number(n) => n.as_i64().map(Value::Integer).ok_or_else(|| {
                TsutaError::TypeError {
                    message: format!("Unsupported number: {}", n),
                }
            }),
            JsonValue::String(s) => Ok(Value::String(s)),
            JsonValue::Array(arr) => {
                let values: Result<Vec<Value>> = arr.into_iter().map(Value::from_json).collect();
                Ok(Value::Array(values?))
            }
            JsonValue::Object(obj) => {
                let mut map = HashMap::new();
                for (k, v) in obj {
                    map.insert(k, Value::from_json(v)?);
                }
                Ok(Value::Object(map))
            }
        }
    }

    /// Coerce the value to output text.
    ///
    /// Only strings, integers, null and safe strings are printable.
    pub fn stringify(&self) -> Result<String> {
        match self {
            Value::String(s) => Ok(s.clone()),
            Value::Safe(s) => Ok(s.content.clone()),
            Value::Integer(n) => Ok(n.to_string()),
            Value::Null => Ok(String::new()),
            Value::Bool(_) | Value::Array(_) | Value::Object(_) => Err(TsutaError::TypeError {
                message: format!("Cannot stringify {}", self.type_name()),
            }),
        }
    }

    /// Get the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Safe(_) => "safe string",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_stringify() {
        assert_eq!(
            Value::String("hello".to_string()).stringify().unwrap(),
            "hello"
        );
        assert_eq!(Value::Integer(42).stringify().unwrap(), "42");
        assert_eq!(Value::Null.stringify().unwrap(), "");
        assert_eq!(Value::safe("<b>", "html").stringify().unwrap(), "<b>");

        assert!(Value::Bool(true).stringify().is_err());
        assert!(Value::Array(vec![]).stringify().is_err());
        assert!(Value::Object(HashMap::new()).stringify().is_err());
    }

    #[test]
    fn test_safe_marking_is_per_content_type() {
        let value = Value::safe("alert(1)", "js");
        assert!(value.is_safe("js"));
        assert!(!value.is_safe("html"));
    }

    #[test]
    fn test_plain_values_are_never_safe() {
        assert!(!Value::String("<b>".to_string()).is_safe("html"));
        assert!(!Value::Null.is_safe("html"));
    }

    #[test]
    fn test_from_json() {
        let value = Value::from_json(json!({"name": "test", "count": 42})).unwrap();
        if let Value::Object(obj) = value {
            assert_eq!(obj.get("name"), Some(&Value::String("test".to_string())));
            assert_eq!(obj.get("count"), Some(&Value::Integer(42)));
        } else {
            panic!("Expected Object");
        }
    }

    #[test]
    fn test_from_json_rejects_floats() {
        assert!(Value::from_json(json!(1.5)).is_err());
    }
}
