use alloc::string::String;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::catalog::Primitive;
use crate::info::TypeRef;

/// Rust types with a catalog descriptor.
///
/// # Examples
///
/// ```
/// use weft_reflect::info::Typed;
///
/// assert_eq!(u16::type_descriptor().short_name(), "u16, core");
/// assert_eq!(String::type_descriptor().short_name(), "str, core");
/// ```
pub trait Typed {
    fn type_descriptor() -> TypeRef;
}

macro_rules! impl_typed {
    ($($ty:ty => $primitive:ident),* $(,)?) => {
        $(
            impl Typed for $ty {
                #[inline]
                fn type_descriptor() -> TypeRef {
                    Primitive::$primitive.descriptor()
                }
            }
        )*
    };
}

impl_typed! {
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
    String => String,
    str => String,
    [u8] => Bytes,
    DateTime<Utc> => Timestamp,
    Uuid => Uuid,
    Decimal => Decimal,
}
