//! Prop values.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::http::response::Response;

/// Producer for a lazy prop.
pub type LazyFn = Arc<dyn Fn() -> Value + Send + Sync>;

/// String-keyed prop mapping.
pub type Props = BTreeMap<String, Prop>;

/// A single page prop.
///
/// Lazy producers run only when the prop survives partial-reload filtering,
/// at most once per response build.
#[derive(Clone)]
pub enum Prop {
    /// Plain data, emitted as-is.
    Value(Value),
    /// Computed on demand.
    Lazy(LazyFn),
    /// A composed fragment, emitted as its own page object.
    Nested(Box<Response>),
}

impl Prop {
    /// Build a lazy prop from a closure.
    pub fn lazy<F>(f: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Prop::Lazy(Arc::new(f))
    }

    /// Serialize any value into an immediate prop.
    pub fn serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self, serde_json::Error> {
        serde_json::to_value(value).map(Prop::Value)
    }

    pub fn is_lazy(&self) -> bool {
        matches!(self, Prop::Lazy(_))
    }

    /// The immediate value, if this prop holds one.
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Prop::Value(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Debug for Prop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prop::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Prop::Lazy(_) => f.write_str("Lazy(..)"),
            Prop::Nested(r) => f.debug_tuple("Nested").field(&r.component()).finish(),
        }
    }
}

impl From<Value> for Prop {
    fn from(value: Value) -> Self {
        Prop::Value(value)
    }
}

impl From<Response> for Prop {
    fn from(response: Response) -> Self {
        Prop::Nested(Box::new(response))
    }
}

impl From<&str> for Prop {
    fn from(value: &str) -> Self {
        Prop::Value(Value::from(value))
    }
}

impl From<String> for Prop {
    fn from(value: String) -> Self {
        Prop::Value(Value::from(value))
    }
}

impl From<bool> for Prop {
    fn from(value: bool) -> Self {
        Prop::Value(Value::from(value))
    }
}

impl From<i64> for Prop {
    fn from(value: i64) -> Self {
        Prop::Value(Value::from(value))
    }
}

impl From<u64> for Prop {
    fn from(value: u64) -> Self {
        Prop::Value(Value::from(value))
    }
}

impl From<f64> for Prop {
    fn from(value: f64) -> Self {
        Prop::Value(Value::from(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_conversions() {
        assert_eq!(Prop::from("alice").as_value(), Some(&json!("alice")));
        assert_eq!(Prop::from(3i64).as_value(), Some(&json!(3)));
        assert_eq!(Prop::from(json!({"a": [1, 2]})).as_value(), Some(&json!({"a": [1, 2]})));
        assert!(Prop::lazy(|| json!(1)).is_lazy());
    }

    #[test]
    fn test_serialize() {
        #[derive(Serialize)]
        struct User {
            name: &'static str,
        }

        let prop = Prop::serialize(&User { name: "bob" }).unwrap();
        assert_eq!(prop.as_value(), Some(&json!({"name": "bob"})));
    }

    #[test]
    fn test_debug_hides_closure() {
        let prop = Prop::lazy(|| json!(null));
        assert_eq!(format!("{:?}", prop), "Lazy(..)");
    }
}
