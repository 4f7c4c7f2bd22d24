//! Polymorphic value dispatch.
//!
//! The static type a value is written through decides its framing:
//!
//! - fixed-width primitive: raw little-endian bytes, no header;
//! - text or bytes: a length field where 0 means null;
//! - nullable primitive: a presence byte, then the primitive;
//! - anything else: a one-byte [`tag`](crate::manifest::tag), then the body
//!   picked by the runtime type, first match wins:
//!   1. null;
//!   2. a value already written in this session, as a back-reference;
//!   3. a primitive, as manifest and payload;
//!   4. an array, as element manifest, count and elements;
//!   5. a container with an adapter, as manifest and adapter payload;
//!   6. an object, as manifest and one length-prefixed frame per field.
//!
//! Readers mirror writers exactly, which keeps session ids in step.

use weft_reflect::info::TypeRef;
use weft_reflect::value::Value;

use crate::error::{Error, Result};

// -----------------------------------------------------------------------------
// Modules

mod frame;
mod primitive;
mod read;
mod write;

#[cfg(all(debug_assertions, feature = "debug"))]
mod type_stack;

// -----------------------------------------------------------------------------
// Exports

pub use read::ValueReader;
pub use write::ValueWriter;

// -----------------------------------------------------------------------------
// Helpers

/// The error for a `value` that cannot be seen as `expected`.
fn mismatch(expected: TypeRef, value: &Value) -> Error {
    match value.runtime_type() {
        Some(found) => Error::TypeMismatch { expected, found },
        None => Error::UnexpectedNull { expected },
    }
}

/// Rejects a runtime type that does not fit the static type.
#[inline]
fn check_assignable(runtime: TypeRef, expected: TypeRef) -> Result<()> {
    if runtime.is_assignable_to(expected) {
        Ok(())
    } else {
        Err(Error::TypeMismatch {
            expected,
            found: runtime,
        })
    }
}

/// Nesting depth of self-describing values, with the type path leading to
/// the current one in debug builds.
///
/// A failed call leaves the path in place so it can be reported.
#[derive(Default)]
struct Depth {
    current: usize,
    limit: usize,
    #[cfg(all(debug_assertions, feature = "debug"))]
    stack: type_stack::TypeStack,
}

impl Depth {
    #[inline]
    fn new(limit: usize) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    #[inline]
    fn enter(&mut self, ty: TypeRef) -> Result<()> {
        if self.current >= self.limit {
            return Err(Error::DepthLimit { limit: self.limit });
        }
        self.current += 1;
        #[cfg(all(debug_assertions, feature = "debug"))]
        self.stack.push(ty);
        #[cfg(not(all(debug_assertions, feature = "debug")))]
        let _ = ty;
        Ok(())
    }

    #[inline]
    fn leave(&mut self) {
        self.current -= 1;
        #[cfg(all(debug_assertions, feature = "debug"))]
        self.stack.pop();
    }

    /// Logs a failed call, with the type path in debug builds.
    fn report(&self, action: &str, error: &Error) {
        #[cfg(all(debug_assertions, feature = "debug"))]
        log::error!("{action} failed: {error} (stack:\n{:?})", self.stack);
        #[cfg(not(all(debug_assertions, feature = "debug")))]
        log::error!("{action} failed: {error}");
    }
}
