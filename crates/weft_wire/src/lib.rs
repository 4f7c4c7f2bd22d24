//! Binary object-graph serialization for `weft_reflect` values.
//!
//! A stream is a sequence of values, each written through a static type.
//! Self-describing values carry a type manifest the first time their type
//! shows up in a session and a compact id afterwards; values seen before are
//! written as back-references, so shared objects and cycles survive a round
//! trip.
//!
//! ## Menu
//!
//! - [`Serializer`]: one-call entry points, [`to_bytes`] and [`from_bytes`].
//! - [`ValueWriter`] / [`ValueReader`]: several values through one session.
//! - [`SerializerOptions`]: known types, surrogates and decoding limits.
//! - [`manifest`]: header tags and type manifests.
//! - [`adapter`]: how each container kind is taken apart and rebuilt.
//! - [`stream`]: byte-level readers and writers.
//!
//! # Examples
//!
//! ```
//! use weft_reflect::info::{ObjectBuilder, Typed};
//! use weft_reflect::registry::TypeRegistry;
//! use weft_reflect::value::{ObjectRef, Value};
//!
//! let node = TypeRegistry::global().register(
//!     ObjectBuilder::new("docs::Node", "docs")
//!         .field("label", String::type_descriptor())
//!         .field("next", weft_reflect::types::any())
//!         .build(),
//! );
//!
//! let head = ObjectRef::zeroed(node).unwrap();
//! head.set("label", Value::from("head")).unwrap();
//! head.set("next", Value::Object(head.clone())).unwrap();
//!
//! let bytes = weft_wire::to_bytes(&Value::Object(head)).unwrap();
//! let decoded = weft_wire::from_bytes(&bytes).unwrap();
//!
//! let object = decoded.as_object().unwrap();
//! assert_eq!(object.get("label").unwrap().as_str(), Some("head"));
//! assert!(object.get("next").unwrap().ptr_eq(&decoded));
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

pub mod adapter;
pub mod manifest;
pub mod stream;

mod dispatch;
mod error;
mod options;
mod serializer;
mod session;

#[cfg(test)]
mod testing;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use dispatch::{ValueReader, ValueWriter};
pub use error::{
    Error, MalformedError, Result, SessionProtocolError, UnsupportedReason, UnsupportedTypeError,
};
pub use options::{
    DEFAULT_MAX_DEPTH, DEFAULT_MAX_LENGTH, FromSurrogateFn, SerializerOptions, Surrogate,
    ToSurrogateFn,
};
pub use serializer::{Serializer, from_bytes, to_bytes};
pub use session::{FieldLayout, Session};

pub use weft_reflect::{FixedWidthQueryError, TypeResolutionError};
