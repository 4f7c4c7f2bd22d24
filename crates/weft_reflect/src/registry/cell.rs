use std::sync::OnceLock;

use crate::info::{TypeDescriptor, TypeRef};
use crate::registry::TypeRegistry;

/// Caches the global [`TypeRef`] of a non-generic type.
///
/// The usual pattern is a function returning the type, backed by a static
/// cell:
///
/// ```
/// use weft_reflect::info::{ObjectBuilder, TypeRef, Typed};
/// use weft_reflect::registry::TypeCell;
///
/// pub fn color() -> TypeRef {
///     static CELL: TypeCell = TypeCell::new();
///     CELL.get_or_register(|| {
///         ObjectBuilder::new("docs::Color", "docs")
///             .field("rgb", u32::type_descriptor())
///             .build()
///     })
/// }
///
/// assert!(core::ptr::eq(color(), color()));
/// ```
///
/// The builder must not call the function it is building for; use
/// [`ObjectBuilder::lazy_field`](crate::info::ObjectBuilder::lazy_field) for
/// recursive fields.
pub struct TypeCell(OnceLock<TypeRef>);

impl TypeCell {
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the cached type, registering the descriptor built by `f`
    /// on first call.
    #[inline]
    pub fn get_or_register(&self, f: impl FnOnce() -> TypeDescriptor) -> TypeRef {
        *self
            .0
            .get_or_init(|| TypeRegistry::global().register(f()))
    }

    /// The cached type, if already registered.
    #[inline]
    pub fn get(&self) -> Option<TypeRef> {
        self.0.get().copied()
    }
}

impl Default for TypeCell {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
