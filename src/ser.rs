//! Serialization of Rust types into [`Value`].
//!
//! [`ValueSerializer`] turns any `T: Serialize` into a nested value, which can
//! then be flattened. Structs and maps become mappings, sequences and tuples
//! become sequences, `None` and `()` become null.
//!
//! Enum variants carrying data become a single-entry mapping keyed by the
//! variant name, so `Shape::Circle { r: 1 }` flattens to `Circle.r = 1`.
//!
//! ## Examples
//!
//! ```rust
//! use flattery::{to_value, Value};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Point { x: i32, y: i32 }
//!
//! let value = to_value(&Point { x: 1, y: 2 }).unwrap();
//! assert_eq!(value.get("x").and_then(Value::as_i64), Some(1));
//! ```

use crate::{Error, Map, Number, Result, Scalar, Value};
use num_bigint::BigInt;
use serde::ser::{self, Serialize};

/// A serializer producing a [`Value`] tree instead of text.
pub struct ValueSerializer;

pub struct SerializeVec {
    vec: Vec<Value>,
    variant: Option<&'static str>,
}

pub struct SerializeMap {
    map: Map<Value>,
    current_key: Option<String>,
    variant: Option<&'static str>,
}

fn scalar(s: impl Into<Scalar>) -> Result<Value> {
    Ok(Value::Scalar(s.into()))
}

/// Wraps `value` as `{variant: value}` for data-carrying enum variants.
fn tagged(variant: Option<&'static str>, value: Value) -> Value {
    match variant {
        Some(name) => {
            let mut map = Map::with_capacity(1);
            map.insert(name.to_string(), value);
            Value::Mapping(map)
        }
        None => value,
    }
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeVec;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeMap;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        scalar(v)
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        scalar(v)
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        scalar(v)
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        scalar(v)
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        scalar(v)
    }

    fn serialize_i128(self, v: i128) -> Result<Value> {
        match i64::try_from(v) {
            Ok(i) => scalar(i),
            Err(_) => scalar(BigInt::from(v)),
        }
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        scalar(v)
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        scalar(v)
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        scalar(v)
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        match i64::try_from(v) {
            Ok(i) => scalar(i),
            Err(_) => scalar(BigInt::from(v)),
        }
    }

    fn serialize_u128(self, v: u128) -> Result<Value> {
        match i64::try_from(v) {
            Ok(i) => scalar(i),
            Err(_) => scalar(BigInt::from(v)),
        }
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        scalar(v)
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        scalar(v)
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        scalar(v.to_string())
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        scalar(v)
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        let vec = v
            .iter()
            .map(|&b| Value::Scalar(Scalar::Number(Number::Integer(b as i64))))
            .collect();
        Ok(Value::Sequence(vec))
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        scalar(variant)
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        Ok(tagged(Some(variant), to_value(value)?))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len.unwrap_or(0), None))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, None))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, None))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, Some(variant)))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap::new(len.unwrap_or(0), None))
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<SerializeMap> {
        Ok(SerializeMap::new(len, None))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeMap> {
        Ok(SerializeMap::new(len, Some(variant)))
    }
}

impl SerializeVec {
    fn new(capacity: usize, variant: Option<&'static str>) -> Self {
        SerializeVec {
            vec: Vec::with_capacity(capacity),
            variant,
        }
    }

    fn push<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn finish(self) -> Result<Value> {
        Ok(tagged(self.variant, Value::Sequence(self.vec)))
    }
}

impl SerializeMap {
    fn new(capacity: usize, variant: Option<&'static str>) -> Self {
        SerializeMap {
            map: Map::with_capacity(capacity),
            current_key: None,
            variant,
        }
    }

    fn finish(self) -> Result<Value> {
        Ok(tagged(self.variant, Value::Mapping(self.map)))
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        self.finish()
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        self.finish()
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        self.finish()
    }
}

impl ser::SerializeTupleVariant for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        self.finish()
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        // Integer keys are accepted and stringified; they flatten like any other key.
        let key = match to_value(key)? {
            Value::Scalar(Scalar::String(s)) => s,
            Value::Scalar(Scalar::Number(Number::Integer(i))) => i.to_string(),
            Value::Scalar(Scalar::BigInt(bi)) => bi.to_string(),
            Value::Scalar(Scalar::Bool(b)) => b.to_string(),
            _ => return Err(Error::unsupported_type("map keys must be strings or integers")),
        };
        self.current_key = Some(key);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.map.insert(key, to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        self.finish()
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        self.finish()
    }
}

impl ser::SerializeStructVariant for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        self.finish()
    }
}

/// Converts any `T: Serialize` into a [`Value`].
///
/// # Errors
///
/// Returns an error if `T` serializes a map whose keys are not strings or
/// integers, or if its `Serialize` impl reports a custom error.
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use std::collections::BTreeMap;

    #[derive(Serialize)]
    enum Shape {
        Unit,
        Circle(u32),
        Line(i32, i32),
        Rect { w: u32, h: u32 },
    }

    #[test]
    fn test_enum_variants() {
        assert_eq!(to_value(&Shape::Unit).unwrap(), Value::from("Unit"));
        assert_eq!(
            to_value(&Shape::Circle(3)).unwrap(),
            crate::value!({ "Circle": 3 })
        );
        assert_eq!(
            to_value(&Shape::Line(1, 2)).unwrap(),
            crate::value!({ "Line": [1, 2] })
        );
        assert_eq!(
            to_value(&Shape::Rect { w: 4, h: 5 }).unwrap(),
            crate::value!({ "Rect": { "w": 4, "h": 5 } })
        );
    }

    #[test]
    fn test_wide_integers() {
        assert_eq!(to_value(&u64::MAX).unwrap(), Value::from(BigInt::from(u64::MAX)));
        assert_eq!(to_value(&7u64).unwrap(), Value::from(7i64));
        assert_eq!(to_value(&-5i128).unwrap(), Value::from(-5i64));
    }

    #[test]
    fn test_integer_map_keys() {
        let mut map = BTreeMap::new();
        map.insert(2u32, "b");
        map.insert(1u32, "a");

        let value = to_value(&map).unwrap();
        let keys: Vec<_> = value.as_mapping().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["1", "2"]);
    }

    #[test]
    fn test_rejects_structured_keys() {
        let mut map = BTreeMap::new();
        map.insert(vec![1u8], 1);
        assert!(matches!(to_value(&map), Err(Error::UnsupportedType(_))));
    }

    #[test]
    fn test_option_and_unit() {
        assert_eq!(to_value(&None::<i32>).unwrap(), Value::Null);
        assert_eq!(to_value(&Some(1)).unwrap(), Value::from(1));
        assert_eq!(to_value(&()).unwrap(), Value::Null);
    }
}
