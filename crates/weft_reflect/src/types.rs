//! Shortcuts for the built-in types of the global registry.
//!
//! ```
//! use weft_reflect::info::Typed;
//! use weft_reflect::types;
//!
//! let key = String::type_descriptor();
//! let map = types::map_of(key, types::list_of(i32::type_descriptor()));
//! assert_eq!(map.generics().len(), 2);
//!
//! // Contracts accept any runtime type.
//! assert!(map.is_assignable_to(types::any()));
//! assert!(map.is_assignable_to(types::map_contract_of(key, i32::type_descriptor())));
//! ```

use crate::TypeResolutionError;
use crate::info::{CollectionKind, TypeRef};
use crate::registry::{TypeCell, TypeRegistry, builtin};

/// The `Any` contract, the static type of untyped roots.
pub fn any() -> TypeRef {
    static CELL: TypeCell = TypeCell::new();
    CELL.get_or_register(builtin::any_descriptor)
}

/// `Option<T>`; fails unless `inner` is a primitive.
#[inline]
pub fn option_of(inner: TypeRef) -> Result<TypeRef, TypeResolutionError> {
    TypeRegistry::global().instantiate(&builtin::OPTION, &[inner])
}

/// The mutable one-dimensional array type, `T[]`.
#[inline]
pub fn array_of(element: TypeRef) -> TypeRef {
    TypeRegistry::global().array_of(element)
}

/// The container type of `kind` over `args`.
///
/// `args` holds one element type, or key and value types for maps.
pub(crate) fn collection_of(kind: CollectionKind, args: &[TypeRef]) -> TypeRef {
    TypeRegistry::global().instantiate_builtin(builtin::collection_definition(kind), args, |inst| {
        inst.collection(kind)
    })
}

#[inline]
pub fn list_of(element: TypeRef) -> TypeRef {
    collection_of(CollectionKind::List, &[element])
}

#[inline]
pub fn stack_of(element: TypeRef) -> TypeRef {
    collection_of(CollectionKind::Stack, &[element])
}

#[inline]
pub fn queue_of(element: TypeRef) -> TypeRef {
    collection_of(CollectionKind::Queue, &[element])
}

#[inline]
pub fn hash_set_of(element: TypeRef) -> TypeRef {
    collection_of(CollectionKind::HashSet, &[element])
}

#[inline]
pub fn sorted_set_of(element: TypeRef) -> TypeRef {
    collection_of(CollectionKind::SortedSet, &[element])
}

#[inline]
pub fn map_of(key: TypeRef, value: TypeRef) -> TypeRef {
    collection_of(CollectionKind::Map, &[key, value])
}

#[inline]
pub fn immutable_array_of(element: TypeRef) -> TypeRef {
    collection_of(CollectionKind::Array, &[element])
}

fn contract(definition: &'static crate::registry::GenericDefinition, args: &[TypeRef]) -> TypeRef {
    TypeRegistry::global().instantiate_builtin(definition, args, |inst| inst.contract())
}

/// Any ordered sequence of `T`: lists, stacks, queues and arrays.
#[inline]
pub fn sequence_of(element: TypeRef) -> TypeRef {
    contract(&builtin::SEQUENCE, &[element])
}

/// Any set of `T`.
#[inline]
pub fn set_contract_of(element: TypeRef) -> TypeRef {
    contract(&builtin::SET, &[element])
}

/// Any map from `K` to `V`.
#[inline]
pub fn map_contract_of(key: TypeRef, value: TypeRef) -> TypeRef {
    contract(&builtin::MAP_CONTRACT, &[key, value])
}

/// Any comparer of `T`.
#[inline]
pub fn comparer_of(element: TypeRef) -> TypeRef {
    contract(&builtin::COMPARER, &[element])
}

/// The natural-order comparer object for `T`.
pub fn default_comparer_of(element: TypeRef) -> TypeRef {
    TypeRegistry::global().instantiate_builtin(&builtin::DEFAULT_COMPARER, &[element], |inst| {
        inst.object().comparer(builtin::default_compare).build()
    })
}
