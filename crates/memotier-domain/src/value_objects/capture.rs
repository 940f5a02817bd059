//! Canonical argument capture
//!
//! A `serde` serializer that renders any `Serialize` value as JSON, including
//! maps whose keys JSON cannot express directly. A non-string key is replaced
//! by its canonical JSON text, so a `HashMap<(i32, i32), _>` captures the same
//! way regardless of its iteration order.
//!
//! | Rust value | Captured as |
//! |------------|-------------|
//! | `()`, unit struct, `None` | `null` |
//! | unit variant | `"Variant"` |
//! | newtype variant, struct variant, tuple variant | `{"Variant": ...}` |
//! | bytes | array of numbers |
//! | `i128` / `u128` outside the 64-bit range | decimal string |
//! | non-finite float | `null` |
//! | map key that is not a string | canonical JSON text of the key |

use super::cache_key::canonical_json;
use serde::Serialize;
use serde::ser::{self, SerializeMap as _};
use serde_json::{Map, Number, Value};
use std::fmt;

/// Error raised by a `Serialize` implementation during capture
#[derive(Debug)]
pub struct CaptureError(String);

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for CaptureError {}

impl ser::Error for CaptureError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Self(msg.to_string())
    }
}

/// Capture `value` as JSON with canonical map keys
///
/// Fails only when the value's own `Serialize` implementation reports an
/// error.
pub fn capture_canonical<T: Serialize + ?Sized>(value: &T) -> Result<Value, CaptureError> {
    value.serialize(CanonicalSerializer)
}

fn key_text(key: Value) -> String {
    match key {
        Value::String(text) => text,
        other => canonical_json(&other),
    }
}

fn variant_object(variant: &str, inner: Value) -> Value {
    let mut object = Map::new();
    object.insert(variant.to_string(), inner);
    Value::Object(object)
}

struct CanonicalSerializer;

impl ser::Serializer for CanonicalSerializer {
    type Ok = Value;
    type Error = CaptureError;

    type SerializeSeq = SeqCapture;
    type SerializeTuple = SeqCapture;
    type SerializeTupleStruct = SeqCapture;
    type SerializeTupleVariant = SeqCapture;
    type SerializeMap = MapCapture;
    type SerializeStruct = MapCapture;
    type SerializeStructVariant = MapCapture;

    fn serialize_bool(self, v: bool) -> Result<Value, CaptureError> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value, CaptureError> {
        Ok(Value::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Value, CaptureError> {
        Ok(Value::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Value, CaptureError> {
        Ok(Value::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Value, CaptureError> {
        Ok(Value::from(v))
    }

    fn serialize_i128(self, v: i128) -> Result<Value, CaptureError> {
        Ok(i64::try_from(v).map_or_else(|_| Value::String(v.to_string()), Value::from))
    }

    fn serialize_u8(self, v: u8) -> Result<Value, CaptureError> {
        Ok(Value::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Value, CaptureError> {
        Ok(Value::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Value, CaptureError> {
        Ok(Value::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Value, CaptureError> {
        Ok(Value::from(v))
    }

    fn serialize_u128(self, v: u128) -> Result<Value, CaptureError> {
        Ok(u64::try_from(v).map_or_else(|_| Value::String(v.to_string()), Value::from))
    }

    fn serialize_f32(self, v: f32) -> Result<Value, CaptureError> {
        self.serialize_f64(f64::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Value, CaptureError> {
        Ok(Number::from_f64(v).map_or(Value::Null, Value::Number))
    }

    fn serialize_char(self, v: char) -> Result<Value, CaptureError> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value, CaptureError> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value, CaptureError> {
        Ok(Value::Array(v.iter().copied().map(Value::from).collect()))
    }

    fn serialize_none(self) -> Result<Value, CaptureError> {
        Ok(Value::Null)
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<Value, CaptureError> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value, CaptureError> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value, CaptureError> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
    ) -> Result<Value, CaptureError> {
        Ok(Value::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Value, CaptureError> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value, CaptureError> {
        Ok(variant_object(variant, value.serialize(self)?))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SeqCapture, CaptureError> {
        Ok(SeqCapture::new(None, len.unwrap_or(0)))
    }

    fn serialize_tuple(self, len: usize) -> Result<SeqCapture, CaptureError> {
        Ok(SeqCapture::new(None, len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<SeqCapture, CaptureError> {
        Ok(SeqCapture::new(None, len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SeqCapture, CaptureError> {
        Ok(SeqCapture::new(Some(variant), len))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<MapCapture, CaptureError> {
        Ok(MapCapture::new(None))
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<MapCapture, CaptureError> {
        Ok(MapCapture::new(None))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<MapCapture, CaptureError> {
        Ok(MapCapture::new(Some(variant)))
    }
}

/// Sequence, tuple and tuple variant in progress
struct SeqCapture {
    variant: Option<&'static str>,
    items: Vec<Value>,
}

impl SeqCapture {
    fn new(variant: Option<&'static str>, len: usize) -> Self {
        Self {
            variant,
            items: Vec::with_capacity(len),
        }
    }

    fn push<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), CaptureError> {
        self.items.push(value.serialize(CanonicalSerializer)?);
        Ok(())
    }

    fn finish(self) -> Value {
        let array = Value::Array(self.items);
        match self.variant {
            Some(variant) => variant_object(variant, array),
            None => array,
        }
    }
}

impl ser::SerializeSeq for SeqCapture {
    type Ok = Value;
    type Error = CaptureError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), CaptureError> {
        self.push(value)
    }

    fn end(self) -> Result<Value, CaptureError> {
        Ok(self.finish())
    }
}

impl ser::SerializeTuple for SeqCapture {
    type Ok = Value;
    type Error = CaptureError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), CaptureError> {
        self.push(value)
    }

    fn end(self) -> Result<Value, CaptureError> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleStruct for SeqCapture {
    type Ok = Value;
    type Error = CaptureError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), CaptureError> {
        self.push(value)
    }

    fn end(self) -> Result<Value, CaptureError> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleVariant for SeqCapture {
    type Ok = Value;
    type Error = CaptureError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), CaptureError> {
        self.push(value)
    }

    fn end(self) -> Result<Value, CaptureError> {
        Ok(self.finish())
    }
}

/// Map, struct and struct variant in progress
struct MapCapture {
    variant: Option<&'static str>,
    object: Map<String, Value>,
    pending_key: Option<String>,
}

impl MapCapture {
    fn new(variant: Option<&'static str>) -> Self {
        Self {
            variant,
            object: Map::new(),
            pending_key: None,
        }
    }

    fn finish(self) -> Value {
        let object = Value::Object(self.object);
        match self.variant {
            Some(variant) => variant_object(variant, object),
            None => object,
        }
    }
}

impl ser::SerializeMap for MapCapture {
    type Ok = Value;
    type Error = CaptureError;

    fn serialize_key<T: Serialize + ?Sized>(&mut self, key: &T) -> Result<(), CaptureError> {
        self.pending_key = Some(key_text(key.serialize(CanonicalSerializer)?));
        Ok(())
    }

    fn serialize_value<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), CaptureError> {
        let key = self
            .pending_key
            .take()
            .ok_or_else(|| <CaptureError as ser::Error>::custom("map value without a key"))?;
        self.object.insert(key, value.serialize(CanonicalSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value, CaptureError> {
        Ok(self.finish())
    }
}

impl ser::SerializeStruct for MapCapture {
    type Ok = Value;
    type Error = CaptureError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), CaptureError> {
        self.serialize_entry(key, value)
    }

    fn end(self) -> Result<Value, CaptureError> {
        Ok(self.finish())
    }
}

impl ser::SerializeStructVariant for MapCapture {
    type Ok = Value;
    type Error = CaptureError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), CaptureError> {
        self.serialize_entry(key, value)
    }

    fn end(self) -> Result<Value, CaptureError> {
        Ok(self.finish())
    }
}
