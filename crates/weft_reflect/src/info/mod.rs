//! Provide [`TypeDescriptor`] and related items.
//!
//! A descriptor is the runtime identity of a type: its short name, its
//! classification and, for plain objects, its fields. Descriptors are built
//! once, published through the [`TypeRegistry`] and handled afterwards as
//! [`TypeRef`], a `&'static` reference compared by address.
//!
//! [`TypeRegistry`]: crate::registry::TypeRegistry

// -----------------------------------------------------------------------------
// Modules

mod descriptor;
mod field;
mod kind;
mod object;
mod type_path;
mod typed;

// -----------------------------------------------------------------------------
// Exports

pub use descriptor::{TypeDescriptor, TypeRef};
pub use field::FieldDescriptor;
pub use kind::{CollectionInfo, CollectionKind, TypeFlags, TypeKind};
pub use object::{ComparerFn, ObjectBuilder, ObjectInfo, OrderingFn};
pub use type_path::TypePath;
pub use typed::Typed;

pub(crate) use descriptor::compose_names;
