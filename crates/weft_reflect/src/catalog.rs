//! Primitive type identities and O(1) classification predicates.
//!
//! The catalog is a static table; primitives need no registration and
//! resolve under names such as `i32, core` or `str, core`.
//!
//! | primitives                      | width |
//! |---------------------------------|-------|
//! | `bool` `u8` `i8`                | 1     |
//! | `i16` `u16`                     | 2     |
//! | `i32` `u32` `f32` `char`        | 4     |
//! | `i64` `u64` `f64`               | 8     |
//! | `timestamp`                     | 12    |
//! | `uuid` `decimal`                | 16    |
//! | `str` `bytes`                   | -     |

use core::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::FixedWidthQueryError;
use crate::info::{TypeDescriptor, TypeFlags, TypeRef};
use crate::value::Value;

// -----------------------------------------------------------------------------
// Primitive

/// The primitive types known to every serializer.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Bool,
    U8,
    I8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
    Char,
    /// UTF-8 text, nullable.
    String,
    /// A byte string, nullable.
    Bytes,
    /// A UTC instant with nanosecond precision.
    Timestamp,
    Uuid,
    /// A 96-bit decimal with a scale of up to 28 digits.
    Decimal,
}

static PRIMITIVES: [TypeDescriptor; 17] = [
    TypeDescriptor::primitive(Primitive::Bool, "bool", "core", "bool, core"),
    TypeDescriptor::primitive(Primitive::U8, "u8", "core", "u8, core"),
    TypeDescriptor::primitive(Primitive::I8, "i8", "core", "i8, core"),
    TypeDescriptor::primitive(Primitive::I16, "i16", "core", "i16, core"),
    TypeDescriptor::primitive(Primitive::U16, "u16", "core", "u16, core"),
    TypeDescriptor::primitive(Primitive::I32, "i32", "core", "i32, core"),
    TypeDescriptor::primitive(Primitive::U32, "u32", "core", "u32, core"),
    TypeDescriptor::primitive(Primitive::I64, "i64", "core", "i64, core"),
    TypeDescriptor::primitive(Primitive::U64, "u64", "core", "u64, core"),
    TypeDescriptor::primitive(Primitive::F32, "f32", "core", "f32, core"),
    TypeDescriptor::primitive(Primitive::F64, "f64", "core", "f64, core"),
    TypeDescriptor::primitive(Primitive::Char, "char", "core", "char, core"),
    TypeDescriptor::primitive(Primitive::String, "str", "core", "str, core"),
    TypeDescriptor::primitive(Primitive::Bytes, "bytes", "core", "bytes, core"),
    TypeDescriptor::primitive(Primitive::Timestamp, "timestamp", "chrono", "timestamp, chrono"),
    TypeDescriptor::primitive(Primitive::Uuid, "uuid", "uuid", "uuid, uuid"),
    TypeDescriptor::primitive(Primitive::Decimal, "decimal", "rust_decimal", "decimal, rust_decimal"),
];

impl Primitive {
    /// Every primitive, in table order.
    pub const ALL: [Primitive; 17] = [
        Self::Bool,
        Self::U8,
        Self::I8,
        Self::I16,
        Self::U16,
        Self::I32,
        Self::U32,
        Self::I64,
        Self::U64,
        Self::F32,
        Self::F64,
        Self::Char,
        Self::String,
        Self::Bytes,
        Self::Timestamp,
        Self::Uuid,
        Self::Decimal,
    ];

    /// Encoded width in bytes, `None` for variable-width primitives.
    #[inline]
    pub const fn fixed_width(self) -> Option<usize> {
        match self {
            Self::Bool | Self::U8 | Self::I8 => Some(1),
            Self::I16 | Self::U16 => Some(2),
            Self::I32 | Self::U32 | Self::F32 | Self::Char => Some(4),
            Self::I64 | Self::U64 | Self::F64 => Some(8),
            Self::Timestamp => Some(12),
            Self::Uuid | Self::Decimal => Some(16),
            Self::String | Self::Bytes => None,
        }
    }

    /// The catalog descriptor.
    #[inline]
    pub fn descriptor(self) -> TypeRef {
        &PRIMITIVES[self as usize]
    }

    /// The value of a freshly allocated field of this type.
    pub fn zero(self) -> Value {
        match self {
            Self::Bool => Value::Bool(false),
            Self::U8 => Value::U8(0),
            Self::I8 => Value::I8(0),
            Self::I16 => Value::I16(0),
            Self::U16 => Value::U16(0),
            Self::I32 => Value::I32(0),
            Self::U32 => Value::U32(0),
            Self::I64 => Value::I64(0),
            Self::U64 => Value::U64(0),
            Self::F32 => Value::F32(0.0),
            Self::F64 => Value::F64(0.0),
            Self::Char => Value::Char('\0'),
            Self::Timestamp => Value::Timestamp(DateTime::<Utc>::UNIX_EPOCH),
            Self::Uuid => Value::Uuid(Uuid::nil()),
            Self::Decimal => Value::Decimal(Decimal::ZERO),
            Self::String | Self::Bytes => Value::Null,
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.descriptor().stem())
    }
}

// -----------------------------------------------------------------------------
// Predicates

/// Looks up a primitive by short name, e.g. `i64, core`.
pub fn lookup(short_name: &str) -> Option<TypeRef> {
    PRIMITIVES.iter().find(|ty| ty.short_name() == short_name)
}

/// Iterates over the catalog descriptors.
pub fn primitives() -> impl ExactSizeIterator<Item = TypeRef> {
    PRIMITIVES.iter()
}

#[inline]
pub const fn is_primitive(ty: &TypeDescriptor) -> bool {
    ty.flags().contains(TypeFlags::PRIMITIVE)
}

#[inline]
pub const fn is_fixed_width(ty: &TypeDescriptor) -> bool {
    ty.flags().contains(TypeFlags::FIXED_WIDTH)
}

/// Whether `ty` is a nullable wrapper (`Option<T>`).
#[inline]
pub const fn is_nullable(ty: &TypeDescriptor) -> bool {
    ty.flags().contains(TypeFlags::NULLABLE)
}

#[inline]
pub const fn is_one_dimensional_array(ty: &TypeDescriptor) -> bool {
    ty.flags().contains(TypeFlags::ARRAY)
}

/// Encoded width of a fixed-width primitive.
///
/// # Examples
///
/// ```
/// use weft_reflect::catalog::{self, Primitive};
///
/// assert_eq!(catalog::fixed_width(Primitive::I64.descriptor()), Ok(8));
/// assert!(catalog::fixed_width(Primitive::String.descriptor()).is_err());
/// ```
pub fn fixed_width(ty: TypeRef) -> Result<usize, FixedWidthQueryError> {
    ty.as_primitive()
        .and_then(Primitive::fixed_width)
        .ok_or(FixedWidthQueryError::new(ty))
}
