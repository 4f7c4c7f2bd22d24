use std::io::Read;

use weft_reflect::info::{CollectionInfo, FieldDescriptor, ObjectInfo, TypeKind, TypeRef};
use weft_reflect::types;
use weft_reflect::value::{ArrayRef, ObjectRef, Value};

use super::{Depth, check_assignable, primitive};
use crate::adapter::{Decoded, Parts, adapter_for};
use crate::error::{Error, MalformedError, Result, UnsupportedReason, UnsupportedTypeError};
use crate::manifest::{read_manifest, tag};
use crate::options::SerializerOptions;
use crate::session::Session;
use crate::stream::ByteReader;

/// Upper bound on capacity reserved from a count read off the stream.
const PREALLOCATE: usize = 1024;

/// Reads values from one stream, sharing one [`Session`].
///
/// # Examples
///
/// ```
/// use weft_reflect::info::Typed;
/// use weft_wire::{SerializerOptions, ValueReader};
///
/// let options = SerializerOptions::default();
/// let mut reader = ValueReader::new(&[7, 0, 0, 0, 0][..], &options);
/// assert_eq!(reader.read_value(i32::type_descriptor()).unwrap().as_i32(), Some(7));
/// assert!(reader.read_value(weft_reflect::types::any()).unwrap().is_null());
/// ```
pub struct ValueReader<'o, R> {
    input: ByteReader<R>,
    session: Session,
    options: &'o SerializerOptions,
    depth: Depth,
}

impl<'o, R: Read> ValueReader<'o, R> {
    pub fn new(input: R, options: &'o SerializerOptions) -> Self {
        Self {
            input: ByteReader::new(input),
            session: Session::new(),
            options,
            depth: Depth::new(options.max_depth()),
        }
    }

    #[inline]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Bytes consumed so far.
    #[inline]
    pub fn position(&self) -> u64 {
        self.input.position()
    }

    #[inline]
    pub fn into_inner(self) -> R {
        self.input.into_inner()
    }

    /// Logs a failed call.
    pub(crate) fn report(&self, error: &Error) {
        self.depth.report("deserialization", error);
    }

    /// Reads a value written through the static type `ty`.
    pub fn read_value(&mut self, ty: TypeRef) -> Result<Value> {
        match ty.kind() {
            TypeKind::Primitive(primitive) => {
                primitive::read(&mut self.input, *primitive, self.options.max_length())
            }
            TypeKind::Nullable(inner) => match self.input.read_u8()? {
                0 => Ok(Value::Null),
                1 => self.read_value(*inner),
                byte => Err(MalformedError::InvalidPresence(byte).into()),
            },
            _ => self.read_tagged(ty),
        }
    }

    fn read_tagged(&mut self, ty: TypeRef) -> Result<Value> {
        match self.input.read_u8()? {
            tag::NULL => Ok(Value::Null),
            tag::BACK_REFERENCE => {
                let id = self.input.read_varint()?;
                let value = self.session.resolve_object(id)?;
                if let Some(runtime) = value.runtime_type() {
                    check_assignable(runtime, ty)?;
                }
                Ok(value)
            }
            tag::ARRAY => self.read_array(ty),
            header if tag::is_manifest(header) => {
                let (runtime, type_id) =
                    read_manifest(&mut self.input, &mut self.session, self.options, header)?;
                self.depth.enter(runtime)?;
                let value = self.read_instance(runtime, type_id, ty)?;
                self.depth.leave();
                Ok(value)
            }
            other => Err(MalformedError::UnknownTag(other).into()),
        }
    }

    fn read_instance(&mut self, runtime: TypeRef, type_id: u64, ty: TypeRef) -> Result<Value> {
        check_assignable(runtime, ty)?;
        let options = self.options;
        let Some(surrogate) = options.surrogate_for(runtime) else {
            return self.read_body(runtime, type_id, true);
        };

        // The source value owns the id; the surrogate follows as a value of
        // its own, so the source can only be referenced once rebuilt.
        let shared = options.preserve_object_references() && runtime.as_primitive().is_none();
        let slot = shared.then(|| self.session.reserve_object());
        let replacement = self.read_value(surrogate.target())?;
        let value = surrogate.from_surrogate(replacement)?;
        if let Some(id) = slot {
            self.session.fulfill_object(id, value.clone())?;
        }
        Ok(value)
    }

    /// Reads the body of a value whose manifest was already read.
    fn read_body(&mut self, ty: TypeRef, type_id: u64, shared: bool) -> Result<Value> {
        let shared = shared && self.options.preserve_object_references();
        let reason = match ty.kind() {
            TypeKind::Primitive(primitive) => {
                return primitive::read(&mut self.input, *primitive, self.options.max_length());
            }
            TypeKind::Collection(info) => return self.read_collection(ty, info, shared),
            TypeKind::Object(info) => return self.read_object(ty, info, type_id, shared),
            TypeKind::Contract => UnsupportedReason::Contract,
            TypeKind::Opaque => UnsupportedReason::Opaque,
            TypeKind::Nullable(_) | TypeKind::Array(_) => UnsupportedReason::NotSelfDescribing,
        };
        Err(UnsupportedTypeError::new(ty, reason).into())
    }

    fn read_array(&mut self, ty: TypeRef) -> Result<Value> {
        let header = self.input.read_u8()?;
        if !tag::is_manifest(header) {
            return Err(MalformedError::ExpectedManifest(header).into());
        }
        let (element, _) = read_manifest(&mut self.input, &mut self.session, self.options, header)?;
        let array_ty = types::array_of(element);
        check_assignable(array_ty, ty)?;
        self.depth.enter(array_ty)?;

        let len = self.input.read_len(self.options.max_length())?;
        let array = ArrayRef::zeroed(element, len);
        let value = Value::Array(array.clone());
        if self.options.preserve_object_references() {
            self.session.register_object(value.clone());
        }
        for index in 0..len {
            let item = self.read_value(element)?;
            array.set(index, item)?;
        }

        self.depth.leave();
        Ok(value)
    }

    /// Decodes the contents, then builds the container in one step.
    ///
    /// The container's id is reserved up front so that ids stay in write
    /// order, but it can only be referenced once built.
    fn read_collection(&mut self, ty: TypeRef, info: &CollectionInfo, shared: bool) -> Result<Value> {
        let unsupported = || UnsupportedTypeError::new(ty, UnsupportedReason::NoAdapter);
        let adapter = adapter_for(ty).ok_or_else(unsupported)?;
        let slot = shared.then(|| self.session.reserve_object());

        let comparer = if adapter.has_comparer() {
            Some(self.read_value(types::comparer_of(info.element()))?)
        } else {
            None
        };

        let len = self.input.read_len(self.options.max_length())?;
        let entries = if adapter.is_keyed() {
            let value_ty = info.value().ok_or_else(unsupported)?;
            let mut pairs = Vec::with_capacity(len.min(PREALLOCATE));
            for _ in 0..len {
                let key = self.read_value(info.element())?;
                let value = self.read_value(value_ty)?;
                pairs.push((key, value));
            }
            Decoded::Pairs(pairs)
        } else {
            let mut items = Vec::with_capacity(len.min(PREALLOCATE));
            for _ in 0..len {
                items.push(self.read_value(info.element())?);
            }
            Decoded::Items(items)
        };

        let value = Value::from(adapter.build(ty, Parts { comparer, entries })?);
        if let Some(id) = slot {
            self.session.fulfill_object(id, value.clone())?;
        }
        Ok(value)
    }

    /// Allocates the object zeroed and registers it before any field is
    /// read, so fields may refer back to it.
    fn read_object(
        &mut self,
        ty: TypeRef,
        info: &ObjectInfo,
        type_id: u64,
        shared: bool,
    ) -> Result<Value> {
        let object = ObjectRef::zeroed(ty)?;
        let value = Value::Object(object.clone());
        if shared {
            self.session.register_object(value.clone());
        }

        let layout = self.session.type_layout(type_id);
        let count = layout.as_ref().map_or(info.field_len(), |layout| layout.len());
        for position in 0..count {
            let local = match &layout {
                Some(layout) => layout.local_index(position),
                None => Some(position),
            };
            self.read_frame(&object, local.and_then(|index| info.field_at(index)))?;
        }
        Ok(value)
    }

    /// Reads one field frame into `field`, or past it when the field is
    /// not known locally.
    fn read_frame(&mut self, object: &ObjectRef, field: Option<&FieldDescriptor>) -> Result<()> {
        let header = self.input.read_varint()?;
        let (declared, tracked) = (header >> 1, header & 1 == 1);
        let start = self.input.position();

        match field {
            Some(field) => {
                let value = self.read_value(field.field_type()?)?;
                self.check_frame(start, declared)?;
                object.set_at(field.index(), value)?;
            }
            // Ids assigned inside the frame must still be assigned here.
            None if tracked => {
                log::trace!(
                    "decoding {declared} byte unknown field of `{}`",
                    object.ty().short_name(),
                );
                self.read_value(types::any())?;
                self.check_frame(start, declared)?;
            }
            None => {
                log::trace!(
                    "skipping {declared} byte unknown field of `{}`",
                    object.ty().short_name(),
                );
                self.input.skip(declared)?;
            }
        }
        Ok(())
    }

    fn check_frame(&self, start: u64, declared: u64) -> Result<()> {
        let consumed = self.input.position() - start;
        if consumed != declared {
            return Err(MalformedError::FrameLength { declared, consumed }.into());
        }
        Ok(())
    }
}
