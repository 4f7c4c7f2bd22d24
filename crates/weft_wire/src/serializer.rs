//! Top-level entry points.
//!
//! Every call owns a fresh [`Session`](crate::Session); nothing carries
//! over between calls, so a [`Serializer`] can be shared freely.

use std::io::{Read, Write};

use weft_reflect::info::TypeRef;
use weft_reflect::types;
use weft_reflect::value::Value;

use crate::dispatch::{ValueReader, ValueWriter};
use crate::error::Result;
use crate::options::SerializerOptions;

/// Writes and reads complete object graphs.
///
/// # Examples
///
/// ```
/// use weft_reflect::collections::ImmutableList;
/// use weft_reflect::info::Typed;
/// use weft_reflect::value::Value;
/// use weft_wire::Serializer;
///
/// let list = Value::from(ImmutableList::of(
///     String::type_descriptor(),
///     [Value::from("a"), Value::Null, Value::from("c")],
/// ));
///
/// let serializer = Serializer::default();
/// let bytes = serializer.to_bytes(&list).unwrap();
/// let decoded = serializer.from_bytes(&bytes).unwrap();
///
/// let weft_reflect::collections::Collection::List(decoded) = decoded.as_collection().unwrap() else {
///     panic!("expected a list");
/// };
/// let items: Vec<_> = decoded.iter().map(Value::as_str).collect();
/// assert_eq!(items, [Some("a"), None, Some("c")]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Serializer {
    options: SerializerOptions,
}

impl Serializer {
    #[inline]
    pub const fn new(options: SerializerOptions) -> Self {
        Self { options }
    }

    #[inline]
    pub fn options(&self) -> &SerializerOptions {
        &self.options
    }

    /// Writes `value` as a self-describing root.
    #[inline]
    pub fn serialize<W: Write>(&self, value: &Value, writer: W) -> Result<()> {
        self.serialize_as(value, types::any(), writer)
    }

    /// Writes `value` through the static type `ty`.
    ///
    /// The reader must pass the same type to [`deserialize_as`].
    ///
    /// [`deserialize_as`]: Self::deserialize_as
    pub fn serialize_as<W: Write>(&self, value: &Value, ty: TypeRef, writer: W) -> Result<()> {
        let mut out = ValueWriter::new(writer, &self.options);
        if let Err(error) = out.write_value(value, ty) {
            out.report(&error);
            return Err(error);
        }
        log::debug!(
            "serialized `{}` in {} bytes ({} types, {} objects)",
            ty.short_name(),
            out.written(),
            out.session().type_count(),
            out.session().object_count(),
        );
        out.finish()?;
        Ok(())
    }

    /// Reads a root written by [`serialize`](Self::serialize).
    #[inline]
    pub fn deserialize<R: Read>(&self, reader: R) -> Result<Value> {
        self.deserialize_as(types::any(), reader)
    }

    /// Reads a root written by [`serialize_as`](Self::serialize_as) with
    /// the same static type.
    pub fn deserialize_as<R: Read>(&self, ty: TypeRef, reader: R) -> Result<Value> {
        let mut input = ValueReader::new(reader, &self.options);
        match input.read_value(ty) {
            Ok(value) => {
                log::debug!(
                    "deserialized `{}` from {} bytes ({} types, {} objects)",
                    ty.short_name(),
                    input.position(),
                    input.session().type_count(),
                    input.session().object_count(),
                );
                Ok(value)
            }
            Err(error) => {
                input.report(&error);
                Err(error)
            }
        }
    }

    pub fn to_bytes(&self, value: &Value) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.serialize(value, &mut bytes)?;
        Ok(bytes)
    }

    pub fn to_bytes_as(&self, value: &Value, ty: TypeRef) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.serialize_as(value, ty, &mut bytes)?;
        Ok(bytes)
    }

    #[inline]
    pub fn from_bytes(&self, bytes: &[u8]) -> Result<Value> {
        self.deserialize(bytes)
    }

    #[inline]
    pub fn from_bytes_as(&self, ty: TypeRef, bytes: &[u8]) -> Result<Value> {
        self.deserialize_as(ty, bytes)
    }
}

/// Serializes `value` with default options.
#[inline]
pub fn to_bytes(value: &Value) -> Result<Vec<u8>> {
    Serializer::default().to_bytes(value)
}

/// Deserializes a root written with default options.
#[inline]
pub fn from_bytes(bytes: &[u8]) -> Result<Value> {
    Serializer::default().from_bytes(bytes)
}
