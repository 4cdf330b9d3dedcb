//! Nested value representation.
//!
//! This module provides the tree side of the transform:
//!
//! - [`Value`]: a mapping, a sequence, a scalar payload or null
//! - [`Leaf`]: the closed leaf variant stored in a [`FlatMap`](crate::FlatMap), scalar or null
//! - [`Scalar`]: the default payload (bool, number, string, date, big integer)
//! - [`Number`]: an integer or a float
//!
//! `Value` and `Leaf` are generic over the scalar payload `S`. Flattening and
//! unflattening only move payloads around and never look inside them, so any
//! `S: Clone` works. The default `Scalar` payload is what the serde bridge
//! ([`to_value`](crate::to_value), [`from_value`](crate::from_value)) and the
//! [`value!`](crate::value) macro produce.
//!
//! ## Creating Values
//!
//! ```rust
//! use flattery::{value, Value};
//!
//! let null: Value = Value::Null;
//! let number = Value::from(42);
//! let text = Value::from("hello");
//!
//! let obj = value!({
//!     "name": "Alice",
//!     "tags": ["admin", "dev"]
//! });
//! assert!(obj.is_mapping());
//! ```
//!
//! ## Custom Payloads
//!
//! ```rust
//! use flattery::{flatten, Leaf, Value};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Cell(u8);
//!
//! let tree = Value::Sequence(vec![Value::Scalar(Cell(7)), Value::Null]);
//! let flat = flatten(&tree);
//! assert_eq!(flat.get("0"), Some(&Leaf::Scalar(Cell(7))));
//! assert_eq!(flat.get("1"), Some(&Leaf::Null));
//! ```

use crate::Map;
use chrono::{DateTime, Utc};
use num_bigint::BigInt;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A nested value: mapping, sequence, scalar or null.
///
/// Sequences are dense. A gap is an explicit [`Value::Null`] slot.
#[derive(Clone, Debug, PartialEq)]
pub enum Value<S = Scalar> {
    Null,
    Scalar(S),
    Sequence(Vec<Value<S>>),
    Mapping(Map<Value<S>>),
}

/// A leaf of a flat mapping: a scalar payload or null.
#[derive(Clone, Debug, PartialEq)]
pub enum Leaf<S = Scalar> {
    Null,
    Scalar(S),
}

/// The default scalar payload.
///
/// # Examples
///
/// ```rust
/// use flattery::{Number, Scalar};
///
/// let s = Scalar::from(42);
/// assert_eq!(s, Scalar::Number(Number::Integer(42)));
/// assert_eq!(s.as_i64(), Some(42));
/// assert_eq!(Scalar::from("x").as_str(), Some("x"));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    Bool(bool),
    Number(Number),
    String(String),
    Date(DateTime<Utc>),
    BigInt(BigInt),
}

/// A numeric scalar.
///
/// # Examples
///
/// ```rust
/// use flattery::Number;
///
/// assert_eq!(Number::Integer(42).as_i64(), Some(42));
/// assert_eq!(Number::Float(42.0).as_i64(), Some(42));
/// assert_eq!(Number::Float(42.5).as_i64(), None);
/// assert_eq!(Number::Integer(2).as_f64(), 2.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    /// Returns `true` if this is an integer value.
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_))
    }

    /// Returns `true` if this is a floating-point value.
    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Number::Float(_))
    }

    /// Converts this number to an `i64` if it is an integer or a whole float in range.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Integer(i) => Some(*i),
            Number::Float(f) => {
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                    Some(*f as i64)
                } else {
                    None
                }
            }
        }
    }

    /// Converts this number to an `f64`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => *i as f64,
            Number::Float(f) => *f,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Float(fl) => write!(f, "{}", fl),
        }
    }
}

impl Scalar {
    /// If the scalar is a boolean, returns it.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Scalar::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If the scalar is a string, returns a reference to it.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the scalar is an integer (or whole float, or small big integer), returns it.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Scalar::Number(n) => n.as_i64(),
            Scalar::BigInt(bi) => i64::try_from(bi).ok(),
            _ => None,
        }
    }

    /// If the scalar is numeric, returns it as an `f64`.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Number(n) => Some(n.as_f64()),
            _ => None,
        }
    }

    /// If the scalar is a date, returns a reference to it.
    #[inline]
    #[must_use]
    pub fn as_date(&self) -> Option<&DateTime<Utc>> {
        match self {
            Scalar::Date(dt) => Some(dt),
            _ => None,
        }
    }

    /// If the scalar is a big integer, returns a reference to it.
    #[inline]
    #[must_use]
    pub fn as_bigint(&self) -> Option<&BigInt> {
        match self {
            Scalar::BigInt(bi) => Some(bi),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Number(n) => write!(f, "{}", n),
            Scalar::String(s) => f.write_str(s),
            Scalar::Date(dt) => f.write_str(&dt.to_rfc3339()),
            Scalar::BigInt(bi) => write!(f, "{}", bi),
        }
    }
}

impl<S> Leaf<S> {
    /// Returns `true` if the leaf is null.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Leaf::Null)
    }

    /// Returns the scalar payload, if any.
    #[inline]
    #[must_use]
    pub fn as_scalar(&self) -> Option<&S> {
        match self {
            Leaf::Scalar(s) => Some(s),
            Leaf::Null => None,
        }
    }

    /// Converts the leaf into an `Option` of its payload.
    #[must_use]
    pub fn into_option(self) -> Option<S> {
        match self {
            Leaf::Scalar(s) => Some(s),
            Leaf::Null => None,
        }
    }
}

impl<S> Default for Leaf<S> {
    fn default() -> Self {
        Leaf::Null
    }
}

impl<S: fmt::Display> fmt::Display for Leaf<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Leaf::Null => f.write_str("null"),
            Leaf::Scalar(s) => s.fmt(f),
        }
    }
}

impl<S> From<Option<S>> for Leaf<S> {
    fn from(value: Option<S>) -> Self {
        match value {
            Some(s) => Leaf::Scalar(s),
            None => Leaf::Null,
        }
    }
}

impl<S> From<Leaf<S>> for Value<S> {
    fn from(leaf: Leaf<S>) -> Self {
        match leaf {
            Leaf::Null => Value::Null,
            Leaf::Scalar(s) => Value::Scalar(s),
        }
    }
}

impl<S> Value<S> {
    /// Returns `true` if the value is null.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` if the value is a scalar payload.
    #[inline]
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(self, Value::Scalar(_))
    }

    /// Returns `true` if the value is a sequence.
    #[inline]
    #[must_use]
    pub const fn is_sequence(&self) -> bool {
        matches!(self, Value::Sequence(_))
    }

    /// Returns `true` if the value is a mapping.
    #[inline]
    #[must_use]
    pub const fn is_mapping(&self) -> bool {
        matches!(self, Value::Mapping(_))
    }

    /// Returns `true` for a scalar or null, the values that flatten to a single leaf.
    #[inline]
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        matches!(self, Value::Null | Value::Scalar(_))
    }

    /// If the value is a scalar, returns a reference to its payload.
    #[inline]
    #[must_use]
    pub fn as_scalar(&self) -> Option<&S> {
        match self {
            Value::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is a sequence, returns a reference to it.
    #[inline]
    #[must_use]
    pub fn as_sequence(&self) -> Option<&Vec<Value<S>>> {
        match self {
            Value::Sequence(seq) => Some(seq),
            _ => None,
        }
    }

    /// If the value is a mapping, returns a reference to it.
    #[inline]
    #[must_use]
    pub fn as_mapping(&self) -> Option<&Map<Value<S>>> {
        match self {
            Value::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Looks up a child by mapping key or sequence index.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flattery::value;
    ///
    /// let data = value!({ "a": [10, 20] });
    /// let second = data.get("a").and_then(|a| a.get("1"));
    /// assert_eq!(second.and_then(|v| v.as_i64()), Some(20));
    /// ```
    #[must_use]
    pub fn get(&self, segment: &str) -> Option<&Value<S>> {
        match self {
            Value::Mapping(map) => map.get(segment),
            Value::Sequence(seq) => crate::path::Segment::classify(segment)
                .index()
                .and_then(|i| seq.get(i)),
            _ => None,
        }
    }
}

impl Value {
    /// If the value is a boolean, returns it.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        self.as_scalar().and_then(Scalar::as_bool)
    }

    /// If the value is a string, returns a reference to it.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.as_scalar().and_then(Scalar::as_str)
    }

    /// If the value is an integer, returns it.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        self.as_scalar().and_then(Scalar::as_i64)
    }

    /// If the value is numeric, returns it as an `f64`.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        self.as_scalar().and_then(Scalar::as_f64)
    }
}

impl<S> Default for Value<S> {
    fn default() -> Self {
        Value::Null
    }
}

impl<S> From<Vec<Value<S>>> for Value<S> {
    fn from(value: Vec<Value<S>>) -> Self {
        Value::Sequence(value)
    }
}

impl<S> From<Map<Value<S>>> for Value<S> {
    fn from(value: Map<Value<S>>) -> Self {
        Value::Mapping(value)
    }
}

impl From<Scalar> for Value {
    fn from(value: Scalar) -> Self {
        Value::Scalar(value)
    }
}

impl From<Scalar> for Leaf {
    fn from(value: Scalar) -> Self {
        Leaf::Scalar(value)
    }
}

macro_rules! impl_from_number {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Number {
                fn from(value: $ty) -> Self {
                    Number::$variant(value.into())
                }
            }

            impl From<$ty> for Scalar {
                fn from(value: $ty) -> Self {
                    Scalar::Number(Number::from(value))
                }
            }
        )*
    };
}

impl_from_number! {
    i8 => Integer,
    i16 => Integer,
    i32 => Integer,
    i64 => Integer,
    u8 => Integer,
    u16 => Integer,
    u32 => Integer,
    f32 => Float,
    f64 => Float,
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::String(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::String(value.to_string())
    }
}

impl From<DateTime<Utc>> for Scalar {
    fn from(value: DateTime<Utc>) -> Self {
        Scalar::Date(value)
    }
}

impl From<BigInt> for Scalar {
    fn from(value: BigInt) -> Self {
        Scalar::BigInt(value)
    }
}

// Primitives convert straight into values and leaves through `Scalar`.
macro_rules! impl_from_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Scalar(Scalar::from(value))
                }
            }

            impl From<$ty> for Leaf {
                fn from(value: $ty) -> Self {
                    Leaf::Scalar(Scalar::from(value))
                }
            }
        )*
    };
}

impl_from_scalar!(
    bool,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    f32,
    f64,
    String,
    &str,
    DateTime<Utc>,
    BigInt,
);

impl Serialize for Number {
    fn serialize<Se>(&self, serializer: Se) -> Result<Se::Ok, Se::Error>
    where
        Se: Serializer,
    {
        match self {
            Number::Integer(i) => serializer.serialize_i64(*i),
            Number::Float(f) => serializer.serialize_f64(*f),
        }
    }
}

impl Serialize for Scalar {
    fn serialize<Se>(&self, serializer: Se) -> Result<Se::Ok, Se::Error>
    where
        Se: Serializer,
    {
        match self {
            Scalar::Bool(b) => serializer.serialize_bool(*b),
            Scalar::Number(n) => n.serialize(serializer),
            Scalar::String(s) => serializer.serialize_str(s),
            Scalar::Date(dt) => serializer.serialize_str(&dt.to_rfc3339()),
            Scalar::BigInt(bi) => serializer.serialize_str(&bi.to_string()),
        }
    }
}

impl<S: Serialize> Serialize for Leaf<S> {
    fn serialize<Se>(&self, serializer: Se) -> Result<Se::Ok, Se::Error>
    where
        Se: Serializer,
    {
        match self {
            Leaf::Null => serializer.serialize_unit(),
            Leaf::Scalar(s) => s.serialize(serializer),
        }
    }
}

impl<S: Serialize> Serialize for Value<S> {
    fn serialize<Se>(&self, serializer: Se) -> Result<Se::Ok, Se::Error>
    where
        Se: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Scalar(s) => s.serialize(serializer),
            Value::Sequence(seq) => serializer.collect_seq(seq),
            Value::Mapping(map) => map.serialize(serializer),
        }
    }
}

/// Integers outside `i64` become big integers rather than lossy floats.
fn wide_integer<T>(value: T) -> Scalar
where
    T: Copy,
    i64: TryFrom<T>,
    BigInt: From<T>,
{
    match i64::try_from(value) {
        Ok(i) => Scalar::Number(Number::Integer(i)),
        Err(_) => Scalar::BigInt(BigInt::from(value)),
    }
}

struct ScalarVisitor;

impl<'de> serde::de::Visitor<'de> for ScalarVisitor {
    type Value = Scalar;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a boolean, number or string")
    }

    fn visit_bool<E>(self, value: bool) -> Result<Scalar, E> {
        Ok(Scalar::Bool(value))
    }

    fn visit_i64<E>(self, value: i64) -> Result<Scalar, E> {
        Ok(Scalar::Number(Number::Integer(value)))
    }

    fn visit_u64<E>(self, value: u64) -> Result<Scalar, E> {
        Ok(wide_integer(value))
    }

    fn visit_i128<E>(self, value: i128) -> Result<Scalar, E> {
        Ok(wide_integer(value))
    }

    fn visit_u128<E>(self, value: u128) -> Result<Scalar, E> {
        Ok(wide_integer(value))
    }

    fn visit_f64<E>(self, value: f64) -> Result<Scalar, E> {
        Ok(Scalar::Number(Number::Float(value)))
    }

    fn visit_str<E>(self, value: &str) -> Result<Scalar, E> {
        Ok(Scalar::String(value.to_string()))
    }

    fn visit_string<E>(self, value: String) -> Result<Scalar, E> {
        Ok(Scalar::String(value))
    }
}

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ScalarVisitor)
    }
}

impl<'de, S: Deserialize<'de>> Deserialize<'de> for Leaf<S> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<S>::deserialize(deserializer).map(Leaf::from)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any nested value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Value, E> {
                Ok(Value::Scalar(Scalar::Bool(value)))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Value, E> {
                Ok(Value::Scalar(Scalar::Number(Number::Integer(value))))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Value, E> {
                Ok(Value::Scalar(wide_integer(value)))
            }

            fn visit_i128<E>(self, value: i128) -> Result<Value, E> {
                Ok(Value::Scalar(wide_integer(value)))
            }

            fn visit_u128<E>(self, value: u128) -> Result<Value, E> {
                Ok(Value::Scalar(wide_integer(value)))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Value, E> {
                Ok(Value::Scalar(Scalar::Number(Number::Float(value))))
            }

            fn visit_str<E>(self, value: &str) -> Result<Value, E> {
                Ok(Value::Scalar(Scalar::String(value.to_string())))
            }

            fn visit_string<E>(self, value: String) -> Result<Value, E> {
                Ok(Value::Scalar(Scalar::String(value)))
            }

            fn visit_unit<E>(self) -> Result<Value, E> {
                Ok(Value::Null)
            }

            fn visit_none<E>(self) -> Result<Value, E> {
                Ok(Value::Null)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut vec = Vec::new();
                while let Some(elem) = seq.next_element()? {
                    vec.push(elem);
                }
                Ok(Value::Sequence(vec))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut values = Map::new();
                while let Some((key, value)) = map.next_entry()? {
                    values.insert(key, value);
                }
                Ok(Value::Mapping(values))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}
