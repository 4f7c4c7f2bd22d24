//! Static registration through the `inventory` crate.

use crate::info::TypeRef;
use crate::registry::{GenericDefinition, TypeRegistry};

/// An entry collected by [`submit_type!`](crate::submit_type).
pub enum AutoRegistration {
    /// A function returning a registered type, usually backed by a
    /// [`TypeCell`](crate::registry::TypeCell).
    Type(fn() -> TypeRef),
    /// A generic definition.
    Generic(&'static GenericDefinition),
}

impl AutoRegistration {
    #[inline]
    pub const fn ty(function: fn() -> TypeRef) -> Self {
        Self::Type(function)
    }

    #[inline]
    pub const fn generic(definition: &'static GenericDefinition) -> Self {
        Self::Generic(definition)
    }
}

inventory::collect!(AutoRegistration);

/// Applies every submitted registration to `registry`.
pub(crate) fn run(registry: &TypeRegistry) -> usize {
    let mut count = 0;
    for entry in inventory::iter::<AutoRegistration> {
        match entry {
            AutoRegistration::Type(function) => registry.insert(function()),
            AutoRegistration::Generic(definition) => {
                registry.register_generic(definition);
            }
        }
        count += 1;
    }
    count
}

/// Submits a type for registration the first time a name lookup misses.
///
/// Decoders only find types that are registered; submitting them makes
/// names resolvable before any value of the type was built locally.
///
/// - `submit_type!(path::to::function)` for `fn() -> TypeRef`
/// - `submit_type!(generic path::to::DEFINITION)` for a static
///   [`GenericDefinition`]
///
/// Registration functions must not resolve names themselves.
///
/// # Examples
///
/// ```
/// use weft_reflect::info::{ObjectBuilder, TypeRef};
/// use weft_reflect::registry::{TypeCell, TypeRegistry};
///
/// fn marker() -> TypeRef {
///     static CELL: TypeCell = TypeCell::new();
///     CELL.get_or_register(|| ObjectBuilder::new("docs::Marker", "docs").build())
/// }
///
/// weft_reflect::submit_type!(marker);
///
/// // Never called `marker()`, yet the name resolves.
/// let ty = TypeRegistry::global().resolve("docs::Marker, docs").unwrap();
/// assert!(core::ptr::eq(ty, marker()));
/// ```
#[macro_export]
macro_rules! submit_type {
    (generic $definition:path) => {
        $crate::__macro_exports::inventory::submit! {
            $crate::registry::AutoRegistration::generic(&$definition)
        }
    };
    ($function:path) => {
        $crate::__macro_exports::inventory::submit! {
            $crate::registry::AutoRegistration::ty($function)
        }
    };
}
