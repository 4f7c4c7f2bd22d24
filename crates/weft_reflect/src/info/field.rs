use alloc::borrow::Cow;
use alloc::boxed::Box;
use core::fmt;
use std::sync::OnceLock;

use crate::TypeResolutionError;
use crate::info::TypeRef;

type TypeThunk = Box<dyn Fn() -> Result<TypeRef, TypeResolutionError> + Send + Sync>;

// -----------------------------------------------------------------------------
// FieldType

/// The declared type of a field, possibly computed on first access.
///
/// Lazy field types let recursive types refer to themselves, and mutually
/// recursive generic instantiations terminate.
enum FieldType {
    Eager(TypeRef),
    Lazy {
        cell: OnceLock<Result<TypeRef, TypeResolutionError>>,
        init: TypeThunk,
    },
}

// -----------------------------------------------------------------------------
// FieldDescriptor

/// A named field of a plain object.
///
/// The field index is the accessor: objects store field values in
/// declaration order.
///
/// # Examples
///
/// ```
/// use weft_reflect::info::{ObjectBuilder, Typed};
///
/// let desc = ObjectBuilder::new("docs::Pair", "docs")
///     .field("left", i32::type_descriptor())
///     .field("right", String::type_descriptor())
///     .build();
///
/// let info = desc.as_object().unwrap();
/// let right = info.field("right").unwrap();
/// assert_eq!(right.index(), 1);
/// assert_eq!(right.field_type().unwrap().short_name(), "str, core");
/// ```
pub struct FieldDescriptor {
    name: Cow<'static, str>,
    index: usize,
    ty: FieldType,
}

impl FieldDescriptor {
    #[inline]
    pub(crate) fn eager(name: Cow<'static, str>, index: usize, ty: TypeRef) -> Self {
        Self {
            name,
            index,
            ty: FieldType::Eager(ty),
        }
    }

    #[inline]
    pub(crate) fn lazy(name: Cow<'static, str>, index: usize, init: TypeThunk) -> Self {
        Self {
            name,
            index,
            ty: FieldType::Lazy {
                cell: OnceLock::new(),
                init,
            },
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Position of the field in its object.
    #[inline]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Returns the declared type, resolving it on first access.
    ///
    /// A failed resolution is remembered and returned on every later call.
    pub fn field_type(&self) -> Result<TypeRef, TypeResolutionError> {
        match &self.ty {
            FieldType::Eager(ty) => Ok(*ty),
            FieldType::Lazy { cell, init } => cell.get_or_init(|| init()).clone(),
        }
    }
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ty = match &self.ty {
            FieldType::Eager(ty) => Some(ty.short_name()),
            FieldType::Lazy { cell, .. } => match cell.get() {
                Some(Ok(ty)) => Some(ty.short_name()),
                _ => None,
            },
        };
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("index", &self.index)
            .field("type", &ty)
            .finish()
    }
}
