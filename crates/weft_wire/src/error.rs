use core::fmt;
use std::io;

use thiserror::Error;
use weft_reflect::info::TypeRef;
use weft_reflect::{FixedWidthQueryError, TypeResolutionError, ValueError};

// -----------------------------------------------------------------------------
// SessionProtocolError

/// A stream referred to a session entry that does not exist, or is not
/// usable yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SessionProtocolError {
    #[error("type id {id} was never assigned ({assigned} types in session)")]
    UnknownTypeId { id: u64, assigned: usize },
    #[error("object id {id} was never assigned ({assigned} objects in session)")]
    UnknownObjectId { id: u64, assigned: usize },
    #[error("object id {id} refers to a container that is still being decoded")]
    PendingObject { id: u64 },
    #[error("object id {id} was fulfilled twice")]
    AlreadyFulfilled { id: u64 },
    #[error("known type index {index} is out of range ({count} configured)")]
    UnknownKnownType { index: u64, count: usize },
}

// -----------------------------------------------------------------------------
// UnsupportedTypeError

/// Why a type cannot travel through a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum UnsupportedReason {
    /// Contracts have no instances of their own.
    Contract,
    /// Opaque types need a surrogate.
    Opaque,
    /// No collection adapter handles the container.
    NoAdapter,
    /// The type has no self-describing header form.
    NotSelfDescribing,
}

impl fmt::Display for UnsupportedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Contract => "contracts cannot be instantiated",
            Self::Opaque => "opaque types need a registered surrogate",
            Self::NoAdapter => "no collection adapter is registered",
            Self::NotSelfDescribing => "the type cannot appear in a manifest",
        })
    }
}

/// A value's type cannot be serialized or deserialized.
///
/// Writers raise it before any byte of the offending value is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("type `{}` is not supported: {reason}", .ty.short_name())]
pub struct UnsupportedTypeError {
    ty: TypeRef,
    reason: UnsupportedReason,
}

impl UnsupportedTypeError {
    #[inline]
    pub(crate) const fn new(ty: TypeRef, reason: UnsupportedReason) -> Self {
        Self { ty, reason }
    }

    #[inline]
    pub const fn ty(&self) -> TypeRef {
        self.ty
    }

    #[inline]
    pub const fn reason(&self) -> UnsupportedReason {
        self.reason
    }
}

// -----------------------------------------------------------------------------
// MalformedError

/// The bytes do not follow the stream grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum MalformedError {
    #[error("unknown header tag {0:#04x}")]
    UnknownTag(u8),
    #[error("expected a type manifest, found tag {0:#04x}")]
    ExpectedManifest(u8),
    #[error("varint does not fit in 64 bits")]
    VarintOverflow,
    #[error("length {len} exceeds the limit of {limit}")]
    LengthLimit { len: u64, limit: usize },
    #[error("text is not valid UTF-8")]
    InvalidUtf8,
    #[error("{0:#x} is not a valid char")]
    InvalidChar(u32),
    #[error("{0} is not a valid bool byte")]
    InvalidBool(u8),
    #[error("{secs}s {nanos}ns is not a representable timestamp")]
    InvalidTimestamp { secs: i64, nanos: u32 },
    #[error("{0:#010x} are not valid decimal flags")]
    InvalidDecimal(u32),
    #[error("{0} is not a valid presence byte")]
    InvalidPresence(u8),
    #[error("field frame declared {declared} bytes but {consumed} were consumed")]
    FrameLength { declared: u64, consumed: u64 },
}

// -----------------------------------------------------------------------------
// Error

/// Everything that can go wrong while writing or reading a stream.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    TypeResolution(#[from] TypeResolutionError),
    #[error(transparent)]
    SessionProtocol(#[from] SessionProtocolError),
    #[error(transparent)]
    UnsupportedType(#[from] UnsupportedTypeError),
    #[error(transparent)]
    FixedWidthQuery(#[from] FixedWidthQueryError),
    #[error(transparent)]
    Value(#[from] ValueError),
    #[error(
        "expected a value of `{}`, found `{}`",
        .expected.short_name(),
        .found.short_name()
    )]
    TypeMismatch { expected: TypeRef, found: TypeRef },
    #[error("null is not a valid `{}`", .expected.short_name())]
    UnexpectedNull { expected: TypeRef },
    #[error("malformed stream: {0}")]
    Malformed(#[from] MalformedError),
    #[error("object graph is nested deeper than {limit} levels")]
    DepthLimit { limit: usize },
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T, E = Error> = core::result::Result<T, E>;
