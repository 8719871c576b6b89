//! Runtime values the engine matches against and hands to handlers.
//!
//! Scalars and lists are plain data. Objects are opaque: the matcher only ever
//! looks at their type name, never at the payload.
use std::any::Any;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexSet;
use once_cell::sync::Lazy;

// ————————————————————————————————————————————————————————————————————————————
// VALUES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Clone, Debug)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Object(Object),
}

/// A type that can be wrapped in an [`Object`] and matched by name.
pub trait Named: Any {
    const NAME: &'static str;
}

/// Opaque reference to a host value tagged with its type name.
#[derive(Clone)]
pub struct Object {
    name: &'static str,
    inner: Rc<dyn Any>,
}

impl Object {
    pub fn new<T: Named>(value: T) -> Self {
        Self { name: T::NAME, inner: Rc::new(value) }
    }

    /// Wrap a value under an explicit type name (for types outside this crate).
    pub fn named<T: Any>(name: &'static str, value: T) -> Self {
        Self { name, inner: Rc::new(value) }
    }

    pub fn type_name(&self) -> &'static str {
        self.name
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Object({})", self.name)
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => (*a as f64) == *b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            _ => false,
        }
    }
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Absent or empty scalars never match a literal.
    pub fn is_empty_scalar(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Str(s) => s.is_empty(),
            _ => false,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive
            Value::Float(f) if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64 => Some(*f as i64),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(xs) => Some(xs),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as Json;
        match self {
            Value::Null => Json::Null,
            Value::Bool(b) => Json::Bool(*b),
            Value::Int(i) => Json::from(*i),
            Value::Float(f) => serde_json::Number::from_f64(*f).map(Json::Number).unwrap_or(Json::Null),
            Value::Str(s) => Json::String(s.clone()),
            Value::List(xs) => Json::Array(xs.iter().map(Value::to_json).collect()),
            Value::Object(o) => match o.downcast_ref::<JsonMap>() {
                Some(map) => Json::Object(map.clone()),
                None => serde_json::json!({ "$object": o.type_name() }),
            },
        }
    }
}

// ------------------------------ Conversions ------------------------------- //

/// JSON objects travel through the engine as `Map` objects.
pub type JsonMap = serde_json::Map<String, serde_json::Value>;

impl Named for JsonMap {
    const NAME: &'static str = "Map";
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        use serde_json::Value as Json;
        match v {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Json::String(s) => Value::Str(s),
            Json::Array(xs) => Value::List(xs.into_iter().map(Value::from).collect()),
            Json::Object(m) => Value::Object(Object::new(m)),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self { Value::Bool(b) }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self { Value::Int(i) }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self { Value::Int(i64::from(i)) }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self { Value::Float(f) }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self { Value::Str(s.to_string()) }
}

impl From<String> for Value {
    fn from(s: String) -> Self { Value::Str(s) }
}

impl From<Object> for Value {
    fn from(o: Object) -> Self { Value::Object(o) }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(xs: Vec<T>) -> Self {
        Value::List(xs.into_iter().map(Into::into).collect())
    }
}

// ————————————————————————————————————————————————————————————————————————————
// SUBJECT CLASSIFICATION
// ————————————————————————————————————————————————————————————————————————————

/// The three shapes the matcher dispatches on.
#[derive(Clone, Copy, Debug)]
pub enum Subject<'v> {
    Scalar(&'v Value),
    List(&'v [Value]),
    Object(&'v Object),
}

impl<'v> Subject<'v> {
    pub fn classify(v: &'v Value) -> Self {
        match v {
            Value::List(xs) => Subject::List(xs),
            Value::Object(o) => Subject::Object(o),
            scalar => Subject::Scalar(scalar),
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TYPE REGISTRY
// ————————————————————————————————————————————————————————————————————————————

/// Names of the object types that object patterns may refer to.
#[derive(Clone, Debug, Default)]
pub struct TypeRegistry {
    names: IndexSet<String>,
}

static DEFAULT_REGISTRY: Lazy<TypeRegistry> = Lazy::new(TypeRegistry::builtin);

impl TypeRegistry {
    pub fn empty() -> Self { Self::default() }

    /// The monad family plus JSON maps.
    pub fn builtin() -> Self {
        use crate::monad::{IO, ListMonad, Maybe, Reader, State};
        Self::empty()
            .register::<IO<Value>>()
            .register::<State<Value, Value>>()
            .register::<Reader<Value, Value>>()
            .register::<Maybe<Value>>()
            .register::<ListMonad<Value>>()
            .register::<JsonMap>()
    }

    /// Shared read-only registry used by [`crate::match_value`].
    pub fn global() -> &'static TypeRegistry {
        &DEFAULT_REGISTRY
    }

    pub fn register<T: Named>(self) -> Self {
        self.register_name(T::NAME)
    }

    pub fn register_name(mut self, name: &str) -> Self {
        self.names.insert(name.to_string());
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_shapes_classify() {
        let list = Value::from(json!(["a", 1]));
        assert!(matches!(Subject::classify(&list), Subject::List(xs) if xs.len() == 2));

        let obj = Value::from(json!({"k": 1}));
        match Subject::classify(&obj) {
            Subject::Object(o) => assert_eq!(o.type_name(), "Map"),
            other => panic!("expected object, got {other:?}"),
        }

        let null = Value::from(json!(null));
        assert!(matches!(Subject::classify(&null), Subject::Scalar(Value::Null)));
    }

    #[test]
    fn numbers_compare_across_int_and_float() {
        assert_eq!(Value::Int(2), Value::Float(2.0));
        assert_ne!(Value::Int(2), Value::Str("2".into()));
    }

    #[test]
    fn whole_floats_outside_i64_are_not_integers() {
        assert_eq!(Value::Float(-3.0).as_i64(), Some(-3));
        assert_eq!(Value::Float(i64::MIN as f64).as_i64(), Some(i64::MIN));
        assert_eq!(Value::Float(1e300).as_i64(), None);
        assert_eq!(Value::Float(9_223_372_036_854_775_808.0).as_i64(), None);
        assert_eq!(Value::Float(-1e19).as_i64(), None);
        assert_eq!(Value::Float(1e300).as_f64(), Some(1e300));
    }

    #[test]
    fn empty_scalars() {
        assert!(Value::Null.is_empty_scalar());
        assert!(Value::from("").is_empty_scalar());
        assert!(!Value::Int(0).is_empty_scalar());
        assert!(!Value::Bool(false).is_empty_scalar());
    }

    #[test]
    fn json_round_trip_keeps_maps() {
        let src = json!({"a": [1, 2.5, "x", null, true]});
        assert_eq!(Value::from(src.clone()).to_json(), src);
    }

    #[test]
    fn registry_is_extensible() {
        struct Point;
        impl Named for Point {
            const NAME: &'static str = "Point";
        }
        let reg = TypeRegistry::builtin().register::<Point>();
        assert!(reg.contains("Point"));
        assert!(reg.contains("IO"));
        assert!(!TypeRegistry::global().contains("Point"));
    }

    #[test]
    fn objects_compare_by_identity() {
        let a = Object::named("Thing", 1u8);
        let b = Object::named("Thing", 1u8);
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
        assert_eq!(a.downcast_ref::<u8>(), Some(&1));
    }
}
