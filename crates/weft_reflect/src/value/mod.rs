//! Dynamically typed runtime values.
//!
//! A [`Value`] is either a primitive, held inline, or a shared reference to
//! an [`ObjectRef`], an [`ArrayRef`] or an immutable
//! [`Collection`](crate::collections::Collection). Cloning a reference value
//! shares it; the address of the allocation is its identity.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;
use weft_utils::hash::address_of;

use crate::catalog::Primitive;
use crate::collections::{Collection, CollectionRef};
use crate::info::{TypeKind, TypeRef};

// -----------------------------------------------------------------------------
// Modules

mod array;
mod key;
mod object;
mod opaque;
mod ordering;

// -----------------------------------------------------------------------------
// Exports

pub use array::{Array, ArrayRef};
pub use object::{Object, ObjectRef};
pub use opaque::{Opaque, OpaqueRef};
pub use ordering::{compare_with, natural_cmp};

pub(crate) use key::ValueKey;
pub(crate) use ordering::check_comparer;

// -----------------------------------------------------------------------------
// Value

/// A runtime value.
///
/// # Examples
///
/// ```
/// use weft_reflect::value::Value;
///
/// let text = Value::from("abc");
/// assert_eq!(text.as_str(), Some("abc"));
/// assert_eq!(text.runtime_type().unwrap().short_name(), "str, core");
///
/// assert!(Value::Null.runtime_type().is_none());
/// ```
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    U8(u8),
    I8(i8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
    Char(char),
    String(Rc<str>),
    Bytes(Rc<[u8]>),
    Timestamp(DateTime<Utc>),
    Uuid(Uuid),
    Decimal(Decimal),
    Array(ArrayRef),
    Collection(CollectionRef),
    Object(ObjectRef),
    Opaque(OpaqueRef),
}

/// The value of a freshly allocated slot of type `ty`.
///
/// Fixed-width primitives start at zero, everything else at null.
#[inline]
pub fn zero_value(ty: TypeRef) -> Value {
    match ty.kind() {
        TypeKind::Primitive(p) => p.zero(),
        _ => Value::Null,
    }
}

macro_rules! impl_as_primitive {
    ($($name:ident : $variant:ident => $ty:ty),* $(,)?) => {
        $(
            #[inline]
            pub const fn $name(&self) -> Option<$ty> {
                match self {
                    Self::$variant(v) => Some(*v),
                    _ => None,
                }
            }
        )*
    };
}

impl Value {
    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    impl_as_primitive! {
        as_bool: Bool => bool,
        as_u8: U8 => u8,
        as_i8: I8 => i8,
        as_i16: I16 => i16,
        as_u16: U16 => u16,
        as_i32: I32 => i32,
        as_u32: U32 => u32,
        as_i64: I64 => i64,
        as_u64: U64 => u64,
        as_f32: F32 => f32,
        as_f64: F64 => f64,
        as_char: Char => char,
        as_timestamp: Timestamp => DateTime<Utc>,
        as_uuid: Uuid => Uuid,
        as_decimal: Decimal => Decimal,
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(b) => Some(b),
            _ => None,
        }
    }

    #[inline]
    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    #[inline]
    pub fn as_array(&self) -> Option<&ArrayRef> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    #[inline]
    pub fn as_opaque(&self) -> Option<&OpaqueRef> {
        match self {
            Self::Opaque(o) => Some(o),
            _ => None,
        }
    }

    #[inline]
    pub fn as_collection(&self) -> Option<&Collection> {
        match self {
            Self::Collection(c) => Some(c),
            _ => None,
        }
    }

    /// The primitive kind of a primitive value.
    pub const fn primitive(&self) -> Option<Primitive> {
        Some(match self {
            Self::Bool(_) => Primitive::Bool,
            Self::U8(_) => Primitive::U8,
            Self::I8(_) => Primitive::I8,
            Self::I16(_) => Primitive::I16,
            Self::U16(_) => Primitive::U16,
            Self::I32(_) => Primitive::I32,
            Self::U32(_) => Primitive::U32,
            Self::I64(_) => Primitive::I64,
            Self::U64(_) => Primitive::U64,
            Self::F32(_) => Primitive::F32,
            Self::F64(_) => Primitive::F64,
            Self::Char(_) => Primitive::Char,
            Self::String(_) => Primitive::String,
            Self::Bytes(_) => Primitive::Bytes,
            Self::Timestamp(_) => Primitive::Timestamp,
            Self::Uuid(_) => Primitive::Uuid,
            Self::Decimal(_) => Primitive::Decimal,
            _ => return None,
        })
    }

    /// The concrete type of the value, `None` for null.
    pub fn runtime_type(&self) -> Option<TypeRef> {
        match self {
            Self::Null => None,
            Self::Array(a) => Some(a.ty()),
            Self::Collection(c) => Some(c.ty()),
            Self::Object(o) => Some(o.ty()),
            Self::Opaque(o) => Some(o.ty()),
            _ => self.primitive().map(Primitive::descriptor),
        }
    }

    /// Address of the shared allocation of a reference value.
    pub fn identity(&self) -> Option<usize> {
        match self {
            Self::Array(a) => Some(a.address()),
            Self::Collection(c) => Some(address_of(&**c)),
            Self::Object(o) => Some(o.address()),
            Self::Opaque(o) => Some(o.address()),
            _ => None,
        }
    }

    /// Whether both values are the same shared allocation.
    #[inline]
    pub fn ptr_eq(&self, other: &Value) -> bool {
        matches!((self.identity(), other.identity()), (Some(a), Some(b)) if a == b)
    }
}

macro_rules! impl_from_primitive {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                #[inline]
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

impl_from_primitive! {
    bool => Bool,
    u8 => U8,
    i8 => I8,
    i16 => I16,
    u16 => U16,
    i32 => I32,
    u32 => U32,
    i64 => I64,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    char => Char,
    DateTime<Utc> => Timestamp,
    Uuid => Uuid,
    Decimal => Decimal,
    ArrayRef => Array,
    CollectionRef => Collection,
    ObjectRef => Object,
    OpaqueRef => Opaque,
}

impl From<&str> for Value {
    #[inline]
    fn from(value: &str) -> Self {
        Self::String(Rc::from(value))
    }
}

impl From<String> for Value {
    #[inline]
    fn from(value: String) -> Self {
        Self::String(Rc::from(value))
    }
}

impl From<Vec<u8>> for Value {
    #[inline]
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(Rc::from(value))
    }
}

impl From<Collection> for Value {
    #[inline]
    fn from(value: Collection) -> Self {
        Self::Collection(Rc::new(value))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    #[inline]
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl fmt::Debug for Value {
    // Reference values print their type and address only, graphs may be cyclic.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.pad("Null"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::U8(v) => write!(f, "{v}u8"),
            Self::I8(v) => write!(f, "{v}i8"),
            Self::I16(v) => write!(f, "{v}i16"),
            Self::U16(v) => write!(f, "{v}u16"),
            Self::I32(v) => write!(f, "{v}i32"),
            Self::U32(v) => write!(f, "{v}u32"),
            Self::I64(v) => write!(f, "{v}i64"),
            Self::U64(v) => write!(f, "{v}u64"),
            Self::F32(v) => write!(f, "{v}f32"),
            Self::F64(v) => write!(f, "{v}f64"),
            Self::Char(v) => write!(f, "{v:?}"),
            Self::String(v) => write!(f, "{v:?}"),
            Self::Bytes(v) => write!(f, "b{v:?}"),
            Self::Timestamp(v) => write!(f, "{v:?}"),
            Self::Uuid(v) => write!(f, "{v}"),
            Self::Decimal(v) => write!(f, "{v}m"),
            Self::Array(a) => fmt::Debug::fmt(a, f),
            Self::Collection(c) => {
                write!(f, "{}@{:#x}", c.ty().stem(), address_of(&**c))
            }
            Self::Object(o) => fmt::Debug::fmt(o, f),
            Self::Opaque(o) => fmt::Debug::fmt(o, f),
        }
    }
}
