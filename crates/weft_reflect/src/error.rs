use alloc::boxed::Box;

use thiserror::Error;

use crate::info::TypeRef;

// -----------------------------------------------------------------------------
// TypeResolutionError

/// A short type name could not be mapped to a [`TypeDescriptor`].
///
/// [`TypeDescriptor`]: crate::info::TypeDescriptor
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TypeResolutionError {
    #[error("no registered type matches `{name}`")]
    UnknownType { name: Box<str> },
    #[error("malformed type name `{name}` near byte {position}")]
    MalformedName { name: Box<str>, position: usize },
    #[error("`{definition}` takes {expected} generic argument(s), {found} given")]
    ArityMismatch {
        definition: Box<str>,
        expected: usize,
        found: usize,
    },
    #[error("`{argument}` is not a valid generic argument for `{definition}`")]
    InvalidArgument {
        definition: Box<str>,
        argument: Box<str>,
    },
}

// -----------------------------------------------------------------------------
// FixedWidthQueryError

/// The byte width of a type without a fixed-width encoding was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("type `{}` has no fixed byte width", .ty.short_name())]
pub struct FixedWidthQueryError {
    ty: TypeRef,
}

impl FixedWidthQueryError {
    #[inline]
    pub(crate) const fn new(ty: TypeRef) -> Self {
        Self { ty }
    }

    /// The type that was queried.
    #[inline]
    pub const fn ty(&self) -> TypeRef {
        self.ty
    }
}

// -----------------------------------------------------------------------------
// ValueError

/// Failure while building or accessing a runtime value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ValueError {
    #[error("expected {expected} type, found `{}`", .found.short_name())]
    KindMismatch {
        expected: &'static str,
        found: TypeRef,
    },
    #[error("type `{}` has no field named `{field}`", .ty.short_name())]
    UnknownField { ty: TypeRef, field: Box<str> },
    #[error("index {index} is out of range for `{}`", .ty.short_name())]
    IndexOutOfRange { ty: TypeRef, index: usize },
    #[error("`{}` cannot be used as a comparer", .ty.short_name())]
    NotAComparer { ty: TypeRef },
    #[error("`{}` cannot be instantiated", .ty.short_name())]
    NotInstantiable { ty: TypeRef },
    #[error("map `{}` received a key without a value", .ty.short_name())]
    UnpairedKey { ty: TypeRef },
    #[error(transparent)]
    Resolution(#[from] TypeResolutionError),
}
