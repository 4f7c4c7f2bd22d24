use alloc::boxed::Box;
use alloc::rc::Rc;
use core::any::Any;
use core::fmt;

use weft_utils::hash::address_of;

use crate::ValueError;
use crate::info::{TypeKind, TypeRef};

/// A native value whose contents the serializer cannot see.
///
/// Opaque values can only be serialized through a surrogate registered
/// with the serializer.
pub struct Opaque {
    ty: TypeRef,
    data: Box<dyn Any>,
}

impl Opaque {
    #[inline]
    pub fn ty(&self) -> TypeRef {
        self.ty
    }

    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.data.downcast_ref()
    }
}

/// A shared handle to an [`Opaque`] value.
///
/// # Examples
///
/// ```
/// use weft_reflect::info::{TypeDescriptor, TypePath};
/// use weft_reflect::registry::TypeRegistry;
/// use weft_reflect::value::OpaqueRef;
///
/// let ty = TypeRegistry::global().register(TypeDescriptor::opaque(TypePath::new("docs::Handle", "docs")));
/// let handle = OpaqueRef::new(ty, 42_u64).unwrap();
/// assert_eq!(handle.downcast_ref::<u64>(), Some(&42));
/// ```
#[derive(Clone)]
pub struct OpaqueRef(Rc<Opaque>);

impl OpaqueRef {
    pub fn new<T: Any>(ty: TypeRef, data: T) -> Result<Self, ValueError> {
        if !matches!(ty.kind(), TypeKind::Opaque) {
            return Err(ValueError::KindMismatch {
                expected: "opaque",
                found: ty,
            });
        }
        Ok(Self(Rc::new(Opaque {
            ty,
            data: Box::new(data),
        })))
    }

    #[inline]
    pub fn ptr_eq(&self, other: &OpaqueRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    #[inline]
    pub fn address(&self) -> usize {
        address_of(&*self.0)
    }
}

impl core::ops::Deref for OpaqueRef {
    type Target = Opaque;

    #[inline]
    fn deref(&self) -> &Opaque {
        &self.0
    }
}

impl fmt::Debug for OpaqueRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{:#x}", self.ty.stem(), self.address())
    }
}
