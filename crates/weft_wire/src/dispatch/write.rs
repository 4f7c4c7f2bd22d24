use std::io::Write;

use weft_reflect::collections::Collection;
use weft_reflect::info::{TypeKind, TypeRef};
use weft_reflect::types;
use weft_reflect::value::{ArrayRef, ObjectRef, Value};

use super::frame::Frames;
use super::{Depth, check_assignable, mismatch, primitive};
use crate::adapter::{Entries, adapter_for};
use crate::error::{Error, Result, UnsupportedReason, UnsupportedTypeError};
use crate::manifest::{tag, write_manifest};
use crate::options::SerializerOptions;
use crate::session::Session;
use crate::stream::ByteWriter;

/// Writes values into one stream, sharing one [`Session`].
///
/// Each value is encoded into a reused buffer and reaches the sink only
/// once complete, so a failed write leaves the sink untouched.
///
/// # Examples
///
/// ```
/// use weft_reflect::info::Typed;
/// use weft_reflect::value::Value;
/// use weft_wire::manifest::tag;
/// use weft_wire::{SerializerOptions, ValueWriter};
///
/// let options = SerializerOptions::default();
/// let mut writer = ValueWriter::new(Vec::new(), &options);
/// writer.write_value(&Value::I32(7), i32::type_descriptor()).unwrap();
/// writer.write_value(&Value::Null, weft_reflect::types::any()).unwrap();
/// assert_eq!(writer.finish().unwrap(), [7, 0, 0, 0, tag::NULL]);
/// ```
pub struct ValueWriter<'o, W> {
    sink: ByteWriter<W>,
    /// The value being encoded, without its frame headers.
    out: ByteWriter<Vec<u8>>,
    frames: Frames,
    session: Session,
    options: &'o SerializerOptions,
    depth: Depth,
}

impl<'o, W: Write> ValueWriter<'o, W> {
    pub fn new(out: W, options: &'o SerializerOptions) -> Self {
        Self {
            sink: ByteWriter::new(out),
            out: ByteWriter::new(Vec::new()),
            frames: Frames::default(),
            session: Session::new(),
            options,
            depth: Depth::new(options.max_depth()),
        }
    }

    #[inline]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Bytes written so far.
    #[inline]
    pub fn written(&self) -> u64 {
        self.sink.written()
    }

    /// Flushes and returns the underlying sink.
    pub fn finish(mut self) -> Result<W> {
        self.sink.flush()?;
        Ok(self.sink.into_inner())
    }

    /// Logs a failed call.
    pub(crate) fn report(&self, error: &Error) {
        self.depth.report("serialization", error);
    }

    /// Writes `value` as seen through the static type `ty`.
    pub fn write_value(&mut self, value: &Value, ty: TypeRef) -> Result<()> {
        let result = self
            .encode(value, ty)
            .and_then(|()| Ok(self.frames.splice(self.out.get_ref(), &mut self.sink)?));
        self.out.get_mut().clear();
        self.frames.clear();
        result
    }

    #[inline]
    fn position(&self) -> usize {
        self.out.get_ref().len()
    }

    fn encode(&mut self, value: &Value, ty: TypeRef) -> Result<()> {
        match ty.kind() {
            TypeKind::Primitive(primitive) => primitive::write(&mut self.out, *primitive, ty, value),
            TypeKind::Nullable(inner) => {
                if value.is_null() {
                    return Ok(self.out.write_u8(0)?);
                }
                self.out.write_u8(1)?;
                self.encode(value, *inner)
            }
            _ => self.write_tagged(value, ty),
        }
    }

    fn write_tagged(&mut self, value: &Value, ty: TypeRef) -> Result<()> {
        let Some(runtime) = value.runtime_type() else {
            return Ok(self.out.write_u8(tag::NULL)?);
        };
        check_assignable(runtime, ty)?;
        self.depth.enter(runtime)?;
        self.write_instance(value, runtime)?;
        self.depth.leave();
        Ok(())
    }

    fn write_instance(&mut self, value: &Value, runtime: TypeRef) -> Result<()> {
        let options = self.options;
        let Some(surrogate) = options.surrogate_for(runtime) else {
            return self.write_body(value, runtime);
        };

        if self.write_back_reference(value)? {
            return Ok(());
        }
        let target = surrogate.target();
        let replacement = surrogate.to_surrogate(value)?;
        if !replacement
            .runtime_type()
            .is_some_and(|found| core::ptr::eq(found, target))
        {
            return Err(mismatch(target, &replacement));
        }
        self.write_manifest(runtime)?;
        self.encode(&replacement, target)
    }

    /// Writes a back-reference when `value` was seen before, assigning it
    /// an id otherwise.
    fn write_back_reference(&mut self, value: &Value) -> Result<bool> {
        if !self.options.preserve_object_references() {
            return Ok(false);
        }
        match self.session.intern_object(value) {
            Some((id, false)) => {
                self.out.write_u8(tag::BACK_REFERENCE)?;
                self.out.write_varint(id.into())?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Writes a non-null value whose runtime type is `ty`.
    fn write_body(&mut self, value: &Value, ty: TypeRef) -> Result<()> {
        let reason = match ty.kind() {
            TypeKind::Contract => Some(UnsupportedReason::Contract),
            TypeKind::Opaque => Some(UnsupportedReason::Opaque),
            TypeKind::Nullable(_) => Some(UnsupportedReason::NotSelfDescribing),
            TypeKind::Collection(_) if adapter_for(ty).is_none() => Some(UnsupportedReason::NoAdapter),
            _ => None,
        };
        if let Some(reason) = reason {
            return Err(UnsupportedTypeError::new(ty, reason).into());
        }

        if self.write_back_reference(value)? {
            return Ok(());
        }

        match value {
            Value::Array(array) => self.write_array(array),
            Value::Collection(collection) => {
                self.write_manifest(ty)?;
                self.write_collection(collection, ty)
            }
            Value::Object(object) => {
                self.write_manifest(ty)?;
                self.write_fields(object)
            }
            _ => {
                let primitive = ty.as_primitive().ok_or(UnsupportedTypeError::new(
                    ty,
                    UnsupportedReason::NotSelfDescribing,
                ))?;
                self.write_manifest(ty)?;
                primitive::write(&mut self.out, primitive, ty, value)
            }
        }
    }

    #[inline]
    fn write_manifest(&mut self, ty: TypeRef) -> Result<()> {
        Ok(write_manifest(&mut self.out, &mut self.session, self.options, ty)?)
    }

    fn write_array(&mut self, array: &ArrayRef) -> Result<()> {
        let element = array.element_type();
        self.out.write_u8(tag::ARRAY)?;
        self.write_manifest(element)?;
        self.out.write_len(array.len())?;
        for index in 0..array.len() {
            let item = array.get(index).unwrap_or_default();
            self.encode(&item, element)?;
        }
        Ok(())
    }

    fn write_collection(&mut self, collection: &Collection, ty: TypeRef) -> Result<()> {
        let unsupported = || UnsupportedTypeError::new(ty, UnsupportedReason::NoAdapter);
        let adapter = adapter_for(ty).ok_or_else(unsupported)?;
        let info = ty.as_collection().ok_or_else(unsupported)?;

        if adapter.has_comparer() {
            let comparer = adapter.comparer(collection).cloned().unwrap_or_default();
            self.encode(&comparer, types::comparer_of(info.element()))?;
        }

        let entries = adapter.entries(collection).ok_or_else(unsupported)?;
        self.out.write_len(entries.len())?;
        match entries {
            Entries::Items(items) => {
                for item in items {
                    self.encode(item, info.element())?;
                }
            }
            Entries::Pairs(pairs) => {
                let value_ty = info.value().ok_or_else(unsupported)?;
                for (key, value) in pairs {
                    self.encode(key, info.element())?;
                    self.encode(value, value_ty)?;
                }
            }
        }
        Ok(())
    }

    fn write_fields(&mut self, object: &ObjectRef) -> Result<()> {
        for field in object.info().fields() {
            let value = object.get_at(field.index()).unwrap_or_default();
            self.write_frame(&value, field.field_type()?)?;
        }
        Ok(())
    }

    /// Writes one field as `varint((len << 1) | tracked)` and `len` bytes.
    ///
    /// `tracked` is set when the field assigned session ids, so that a
    /// reader without the field knows it cannot simply skip it.
    fn write_frame(&mut self, value: &Value, ty: TypeRef) -> Result<()> {
        let frame = self.frames.open(self.position());
        let before = self.session.counts();
        self.encode(value, ty)?;
        let tracked = self.session.counts() != before;
        self.frames.close(frame, self.position(), tracked);
        Ok(())
    }
}
