//! Provide the process-wide [`TypeRegistry`] and short-name resolution.
//!
//! ## Menu
//!
//! - [`TypeRegistry`]: short name to [`TypeRef`](crate::info::TypeRef) cache.
//! - [`TypeName`]: parser for the short-name grammar.
//! - [`GenericDefinition`]: open generic types, instantiated on demand.
//! - [`TypeCell`]: per-type cache for registration functions.
//! - [`submit_type!`](crate::submit_type): static registration.
//!
//! ## auto_register
//!
//! We use the [`inventory`] crate to collect submitted types. Not all
//! platforms support it; where it is missing, types must be registered
//! (or built once) before their names can be decoded.
//!
//! [`inventory`]: https://docs.rs/inventory

// -----------------------------------------------------------------------------
// Modules

#[cfg(feature = "auto_register")]
mod auto_register;
mod cell;
mod definition;
mod parse;
mod type_registry;

pub(crate) mod builtin;

// -----------------------------------------------------------------------------
// Exports

#[cfg(feature = "auto_register")]
pub use auto_register::AutoRegistration;
pub use cell::TypeCell;
pub use definition::{BuildFn, GenericDefinition, Instantiation};
pub use parse::TypeName;
pub use type_registry::TypeRegistry;

/// Without the `auto_register` feature submissions are ignored.
#[cfg(not(feature = "auto_register"))]
#[macro_export]
macro_rules! submit_type {
    ($($tokens:tt)*) => {};
}
