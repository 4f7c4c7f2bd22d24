use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use weft_utils::hash::address_of;

use crate::ValueError;
use crate::info::{ObjectInfo, TypeKind, TypeRef};
use crate::value::{Value, zero_value};

// -----------------------------------------------------------------------------
// Object

/// A plain-object instance: a type and one value slot per declared field.
///
/// Field slots use interior mutability so an object can be registered
/// before its fields are known, which is how cyclic graphs are rebuilt.
pub struct Object {
    ty: TypeRef,
    info: &'static ObjectInfo,
    fields: RefCell<Box<[Value]>>,
}

impl Object {
    #[inline]
    pub fn ty(&self) -> TypeRef {
        self.ty
    }

    #[inline]
    pub fn info(&self) -> &'static ObjectInfo {
        self.info
    }

    /// Value of the field at `index`.
    #[inline]
    pub fn get_at(&self, index: usize) -> Option<Value> {
        self.fields.borrow().get(index).cloned()
    }

    /// Value of the field called `name`.
    pub fn get(&self, name: &str) -> Option<Value> {
        let field = self.info().field(name)?;
        self.get_at(field.index())
    }

    /// Snapshot of every field value, in declaration order.
    pub fn values(&self) -> Vec<Value> {
        self.fields.borrow().to_vec()
    }

    /// Replaces the field at `index`.
    ///
    /// The value is not checked against the declared field type; a
    /// mismatch is reported when the object is serialized.
    pub fn set_at(&self, index: usize, value: Value) -> Result<(), ValueError> {
        let mut fields = self.fields.borrow_mut();
        match fields.get_mut(index) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(ValueError::IndexOutOfRange { ty: self.ty, index }),
        }
    }

    pub fn set(&self, name: &str, value: Value) -> Result<(), ValueError> {
        match self.info().field(name) {
            Some(field) => self.set_at(field.index(), value),
            None => Err(ValueError::UnknownField {
                ty: self.ty,
                field: name.into(),
            }),
        }
    }
}

// -----------------------------------------------------------------------------
// ObjectRef

/// A shared handle to an [`Object`].
///
/// # Examples
///
/// ```
/// use weft_reflect::info::{ObjectBuilder, Typed};
/// use weft_reflect::registry::TypeRegistry;
/// use weft_reflect::value::{ObjectRef, Value};
///
/// let ty = TypeRegistry::global().register(
///     ObjectBuilder::new("docs::Named", "docs")
///         .field("name", String::type_descriptor())
///         .field("id", u32::type_descriptor())
///         .build(),
/// );
///
/// let named = ObjectRef::with_fields(ty, [("name", Value::from("weft"))]).unwrap();
/// assert_eq!(named.get("name").unwrap().as_str(), Some("weft"));
/// assert_eq!(named.get("id").unwrap().as_u32(), Some(0));
///
/// let alias = named.clone();
/// assert!(alias.ptr_eq(&named));
/// ```
#[derive(Clone)]
pub struct ObjectRef(Rc<Object>);

impl ObjectRef {
    /// Allocates an instance with every field at its zero value.
    ///
    /// No constructor logic runs; this is the allocation used by decoders.
    pub fn zeroed(ty: TypeRef) -> Result<Self, ValueError> {
        let TypeKind::Object(info) = ty.kind() else {
            return Err(ValueError::NotInstantiable { ty });
        };
        let fields = info
            .fields()
            .iter()
            .map(|field| Ok(zero_value(field.field_type()?)))
            .collect::<Result<Box<[Value]>, ValueError>>()?;
        Ok(Self(Rc::new(Object {
            ty,
            info,
            fields: RefCell::new(fields),
        })))
    }

    /// Allocates a zeroed instance, then assigns the named fields.
    pub fn with_fields<'a>(
        ty: TypeRef,
        fields: impl IntoIterator<Item = (&'a str, Value)>,
    ) -> Result<Self, ValueError> {
        let object = Self::zeroed(ty)?;
        for (name, value) in fields {
            object.set(name, value)?;
        }
        Ok(object)
    }

    #[inline]
    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Address of the shared allocation.
    #[inline]
    pub fn address(&self) -> usize {
        address_of(&*self.0)
    }
}

impl core::ops::Deref for ObjectRef {
    type Target = Object;

    #[inline]
    fn deref(&self) -> &Object {
        &self.0
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{:#x}", self.ty.stem(), self.address())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::info::{ObjectBuilder, Typed};
    use crate::registry::TypeCell;
    use crate::types;

    fn node() -> TypeRef {
        static CELL: TypeCell = TypeCell::new();
        CELL.get_or_register(|| {
            ObjectBuilder::new("object_tests::Node", "object_tests")
                .field("id", u64::type_descriptor())
                .field("flag", bool::type_descriptor())
                .field("label", alloc::string::String::type_descriptor())
                .lazy_field("next", || Ok(node()))
                .build()
        })
    }

    #[test]
    fn zeroed_fields() {
        let node = ObjectRef::zeroed(node()).unwrap();
        assert_eq!(node.get("id").unwrap().as_u64(), Some(0));
        assert_eq!(node.get("flag").unwrap().as_bool(), Some(false));
        assert!(node.get("label").unwrap().is_null());
        assert!(node.get("next").unwrap().is_null());
        assert!(node.get("missing").is_none());
    }

    #[test]
    fn self_reference() {
        let node = ObjectRef::zeroed(node()).unwrap();
        node.set("next", Value::Object(node.clone())).unwrap();
        let next = node.get("next").unwrap();
        assert!(next.as_object().unwrap().ptr_eq(&node));
    }

    #[test]
    fn field_errors() {
        let node = ObjectRef::zeroed(node()).unwrap();
        assert!(matches!(
            node.set("nope", Value::Null),
            Err(ValueError::UnknownField { .. })
        ));
        assert!(matches!(
            node.set_at(9, Value::Null),
            Err(ValueError::IndexOutOfRange { index: 9, .. })
        ));
        assert!(matches!(
            ObjectRef::zeroed(types::list_of(u8::type_descriptor())),
            Err(ValueError::NotInstantiable { .. })
        ));
    }
}
