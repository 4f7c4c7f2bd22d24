//! Runtime type descriptions and values for the `weft` serializer.
//!
//! ## Menu
//!
//! - [`catalog`]: primitive type identities and classification predicates.
//! - [`info`]: [`TypeDescriptor`](info::TypeDescriptor) and friends, the
//!   shape of every type that can travel through a stream.
//! - [`registry`]: the process-wide [`TypeRegistry`](registry::TypeRegistry),
//!   which doubles as the short-name cache used by decoders.
//! - [`types`]: shortcuts for the built-in generic types.
//! - [`value`]: dynamically typed values, objects and arrays.
//! - [`collections`]: immutable containers, built once from their elements.
//!
//! # Examples
//!
//! ```
//! use weft_reflect::info::{ObjectBuilder, Typed};
//! use weft_reflect::registry::TypeRegistry;
//! use weft_reflect::value::{ObjectRef, Value};
//!
//! let point = TypeRegistry::global().register(
//!     ObjectBuilder::new("docs::Point", "docs")
//!         .field("x", i32::type_descriptor())
//!         .field("y", i32::type_descriptor())
//!         .build(),
//! );
//!
//! let resolved = TypeRegistry::global().resolve("docs::Point, docs").unwrap();
//! assert!(core::ptr::eq(point, resolved));
//!
//! let p = ObjectRef::zeroed(point).unwrap();
//! p.set("y", Value::I32(4)).unwrap();
//! assert_eq!(p.get("x").unwrap().as_i32(), Some(0));
//! assert_eq!(p.get("y").unwrap().as_i32(), Some(4));
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Self

// Lets macros and doc tests refer to `weft_reflect` from inside the crate.
extern crate self as weft_reflect;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod error;

pub mod catalog;
pub mod collections;
pub mod info;
pub mod registry;
pub mod types;
pub mod value;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use error::{FixedWidthQueryError, TypeResolutionError, ValueError};

/// Items used by exported macros, not public API.
#[doc(hidden)]
pub mod __macro_exports {
    #[cfg(feature = "auto_register")]
    pub use inventory;
}
