//! Per-stream identity tables.
//!
//! A [`Session`] lives for exactly one top-level serialize or deserialize
//! call. It assigns dense ids to every type manifest and every reference
//! value in first-occurrence order, so that later occurrences can be
//! written as a short index instead.
//!
//! Writers and readers assign ids in the same order, which is what keeps
//! the two sides in step without ever writing an id explicitly.

use alloc::rc::Rc;

use weft_reflect::info::TypeRef;
use weft_reflect::value::Value;
use weft_utils::hash::{AddressMap, address_of};

use crate::error::SessionProtocolError;

// -----------------------------------------------------------------------------
// FieldLayout

/// Maps the field order of a stream payload onto the local field order.
///
/// Built once per type manifest from the field names the writer declared.
/// Payload fields that no longer exist locally map to `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldLayout {
    slots: Box<[Option<usize>]>,
}

impl FieldLayout {
    /// Aligns the writer's field names with the fields of `ty`.
    ///
    /// Returns `None` for non-object types.
    pub fn align<S: AsRef<str>>(ty: TypeRef, names: &[S]) -> Option<Self> {
        let info = ty.as_object()?;
        let slots: Box<[Option<usize>]> = names
            .iter()
            .map(|name| info.field(name.as_ref()).map(|field| field.index()))
            .collect();

        for (name, slot) in names.iter().zip(&slots) {
            if slot.is_none() {
                log::warn!(
                    "field `{}` of `{}` is not known locally and will be dropped",
                    name.as_ref(),
                    ty.short_name(),
                );
            }
        }
        for field in info.fields() {
            if !slots.contains(&Some(field.index())) {
                log::warn!(
                    "field `{}` of `{}` is absent from the stream and keeps its zero value",
                    field.name(),
                    ty.short_name(),
                );
            }
        }
        Some(Self { slots })
    }

    /// Number of fields in the payload.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// The local field index receiving payload field `position`.
    #[inline]
    pub fn local_index(&self, position: usize) -> Option<usize> {
        self.slots.get(position).copied().flatten()
    }
}

// -----------------------------------------------------------------------------
// Session

struct TypeEntry {
    ty: TypeRef,
    layout: Option<Rc<FieldLayout>>,
}

enum ObjectSlot {
    Ready(Value),
    Pending,
}

/// Identity tables for one stream.
///
/// # Examples
///
/// ```
/// use weft_reflect::info::Typed;
/// use weft_wire::Session;
///
/// let mut session = Session::new();
/// assert_eq!(session.intern_type(i32::type_descriptor()), (0, true));
/// assert_eq!(session.intern_type(String::type_descriptor()), (1, true));
/// assert_eq!(session.intern_type(i32::type_descriptor()), (0, false));
/// ```
#[derive(Default)]
pub struct Session {
    types: Vec<TypeEntry>,
    type_ids: AddressMap<u32>,
    objects: Vec<ObjectSlot>,
    object_ids: AddressMap<u32>,
}

impl Session {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    #[inline]
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Both counters, for detecting whether a payload touched the session.
    #[inline]
    pub(crate) fn counts(&self) -> (usize, usize) {
        (self.types.len(), self.objects.len())
    }

    /// Returns the id of `ty` and whether it was assigned just now.
    pub fn intern_type(&mut self, ty: TypeRef) -> (u32, bool) {
        let next = self.types.len() as u32;
        let id = *self.type_ids.entry(address_of(ty)).or_insert(next);
        if id == next {
            self.types.push(TypeEntry { ty, layout: None });
            (id, true)
        } else {
            (id, false)
        }
    }

    /// Appends a type read from a manifest and returns its id.
    pub fn push_type(&mut self, ty: TypeRef, layout: Option<FieldLayout>) -> u32 {
        let id = self.types.len() as u32;
        self.type_ids.entry(address_of(ty)).or_insert(id);
        self.types.push(TypeEntry {
            ty,
            layout: layout.map(Rc::new),
        });
        id
    }

    pub fn resolve_type(&self, id: u64) -> Result<TypeRef, SessionProtocolError> {
        self.type_entry(id).map(|entry| entry.ty)
    }

    /// The field layout recorded for type `id`, if it came with one.
    pub fn type_layout(&self, id: u64) -> Option<Rc<FieldLayout>> {
        self.type_entry(id).ok().and_then(|entry| entry.layout.clone())
    }

    fn type_entry(&self, id: u64) -> Result<&TypeEntry, SessionProtocolError> {
        usize::try_from(id)
            .ok()
            .and_then(|index| self.types.get(index))
            .ok_or(SessionProtocolError::UnknownTypeId {
                id,
                assigned: self.types.len(),
            })
    }

    /// Returns the id of a reference value and whether it was assigned
    /// just now, `None` for values without identity.
    ///
    /// The session keeps a clone of every interned value so that no
    /// address is reused while the stream is being written.
    pub fn intern_object(&mut self, value: &Value) -> Option<(u32, bool)> {
        let address = value.identity()?;
        let next = self.objects.len() as u32;
        let id = *self.object_ids.entry(address).or_insert(next);
        if id == next {
            self.objects.push(ObjectSlot::Ready(value.clone()));
            Some((id, true))
        } else {
            Some((id, false))
        }
    }

    /// Registers a decoded value under the next id.
    pub fn register_object(&mut self, value: Value) -> u32 {
        let id = self.objects.len() as u32;
        if let Some(address) = value.identity() {
            self.object_ids.entry(address).or_insert(id);
        }
        self.objects.push(ObjectSlot::Ready(value));
        id
    }

    /// Claims the next id for a value that can only be built once its
    /// contents are decoded.
    pub fn reserve_object(&mut self) -> u32 {
        let id = self.objects.len() as u32;
        self.objects.push(ObjectSlot::Pending);
        id
    }

    pub fn fulfill_object(&mut self, id: u32, value: Value) -> Result<(), SessionProtocolError> {
        let assigned = self.objects.len();
        match self.objects.get_mut(id as usize) {
            Some(slot @ ObjectSlot::Pending) => {
                if let Some(address) = value.identity() {
                    self.object_ids.entry(address).or_insert(id);
                }
                *slot = ObjectSlot::Ready(value);
                Ok(())
            }
            Some(ObjectSlot::Ready(_)) => Err(SessionProtocolError::AlreadyFulfilled { id: id.into() }),
            None => Err(SessionProtocolError::UnknownObjectId {
                id: id.into(),
                assigned,
            }),
        }
    }

    pub fn resolve_object(&self, id: u64) -> Result<Value, SessionProtocolError> {
        let slot = usize::try_from(id).ok().and_then(|index| self.objects.get(index));
        match slot {
            Some(ObjectSlot::Ready(value)) => Ok(value.clone()),
            Some(ObjectSlot::Pending) => Err(SessionProtocolError::PendingObject { id }),
            None => Err(SessionProtocolError::UnknownObjectId {
                id,
                assigned: self.objects.len(),
            }),
        }
    }
}

impl core::fmt::Debug for Session {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Session")
            .field("types", &self.types.len())
            .field("objects", &self.objects.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use weft_reflect::info::{ObjectBuilder, Typed};
    use weft_reflect::registry::TypeRegistry;
    use weft_reflect::value::ObjectRef;

    use super::*;

    fn point() -> TypeRef {
        TypeRegistry::global().register(
            ObjectBuilder::new("session_tests::Point", "weft_wire")
                .field("x", i32::type_descriptor())
                .field("y", i32::type_descriptor())
                .build(),
        )
    }

    #[test]
    fn type_ids_are_dense_and_unique() {
        let mut session = Session::new();
        let types = [
            i32::type_descriptor(),
            String::type_descriptor(),
            point(),
            bool::type_descriptor(),
        ];
        for (expected, &ty) in types.iter().enumerate() {
            assert_eq!(session.intern_type(ty), (expected as u32, true));
        }
        for (expected, &ty) in types.iter().enumerate().rev() {
            assert_eq!(session.intern_type(ty), (expected as u32, false));
            assert!(core::ptr::eq(session.resolve_type(expected as u64).unwrap(), ty));
        }
        assert_eq!(session.type_count(), 4);
        assert_eq!(
            session.resolve_type(4),
            Err(SessionProtocolError::UnknownTypeId { id: 4, assigned: 4 })
        );
    }

    #[test]
    fn object_ids_follow_identity() {
        let mut session = Session::new();
        let a = Value::Object(ObjectRef::zeroed(point()).unwrap());
        let b = Value::Object(ObjectRef::zeroed(point()).unwrap());

        assert_eq!(session.intern_object(&Value::I32(3)), None);
        assert_eq!(session.intern_object(&Value::from("text")), None);
        assert_eq!(session.intern_object(&a), Some((0, true)));
        assert_eq!(session.intern_object(&b), Some((1, true)));
        assert_eq!(session.intern_object(&a.clone()), Some((0, false)));
        assert!(session.resolve_object(1).unwrap().ptr_eq(&b));
    }

    #[test]
    fn pending_slots() {
        let mut session = Session::new();
        let id = session.reserve_object();
        assert!(matches!(
            session.resolve_object(id.into()),
            Err(SessionProtocolError::PendingObject { id: 0 })
        ));

        let value = Value::Object(ObjectRef::zeroed(point()).unwrap());
        session.fulfill_object(id, value.clone()).unwrap();
        assert!(session.resolve_object(0).unwrap().ptr_eq(&value));
        assert_eq!(
            session.fulfill_object(id, value),
            Err(SessionProtocolError::AlreadyFulfilled { id: 0 })
        );
        assert!(matches!(
            session.resolve_object(9),
            Err(SessionProtocolError::UnknownObjectId { id: 9, assigned: 1 })
        ));
    }

    #[test]
    fn layout_matches_by_name() {
        let layout = FieldLayout::align(point(), &["y", "z", "x"]).unwrap();
        assert_eq!(layout.len(), 3);
        assert_eq!(layout.local_index(0), Some(1));
        assert_eq!(layout.local_index(1), None);
        assert_eq!(layout.local_index(2), Some(0));
        assert_eq!(layout.local_index(3), None);

        assert!(FieldLayout::align(i32::type_descriptor(), &["x"]).is_none());
    }
}
