use core::hash::{Hash, Hasher};
use core::mem;

use crate::value::Value;

/// Hash-container key semantics for values.
///
/// Primitives and text compare by content; reference values by identity.
/// Floats compare by bit pattern so every value, `NaN` included, is a
/// valid key.
#[derive(Clone, Copy)]
pub(crate) struct ValueKey<'a>(pub &'a Value);

impl Hash for ValueKey<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        mem::discriminant(self.0).hash(state);
        match self.0 {
            Value::Null => {}
            Value::Bool(v) => v.hash(state),
            Value::U8(v) => v.hash(state),
            Value::I8(v) => v.hash(state),
            Value::I16(v) => v.hash(state),
            Value::U16(v) => v.hash(state),
            Value::I32(v) => v.hash(state),
            Value::U32(v) => v.hash(state),
            Value::I64(v) => v.hash(state),
            Value::U64(v) => v.hash(state),
            Value::F32(v) => v.to_bits().hash(state),
            Value::F64(v) => v.to_bits().hash(state),
            Value::Char(v) => v.hash(state),
            Value::String(v) => v.hash(state),
            Value::Bytes(v) => v.hash(state),
            Value::Timestamp(v) => v.hash(state),
            Value::Uuid(v) => v.hash(state),
            Value::Decimal(v) => v.hash(state),
            Value::Array(_) | Value::Collection(_) | Value::Object(_) | Value::Opaque(_) => {
                self.0.identity().hash(state);
            }
        }
    }
}

impl PartialEq for ValueKey<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self.0, other.0) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::U8(a), Value::U8(b)) => a == b,
            (Value::I8(a), Value::I8(b)) => a == b,
            (Value::I16(a), Value::I16(b)) => a == b,
            (Value::U16(a), Value::U16(b)) => a == b,
            (Value::I32(a), Value::I32(b)) => a == b,
            (Value::U32(a), Value::U32(b)) => a == b,
            (Value::I64(a), Value::I64(b)) => a == b,
            (Value::U64(a), Value::U64(b)) => a == b,
            (Value::F32(a), Value::F32(b)) => a.to_bits() == b.to_bits(),
            (Value::F64(a), Value::F64(b)) => a.to_bits() == b.to_bits(),
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::Timestamp(a), Value::Timestamp(b)) => a == b,
            (Value::Uuid(a), Value::Uuid(b)) => a == b,
            (Value::Decimal(a), Value::Decimal(b)) => a == b,
            (a, b) => a.ptr_eq(b),
        }
    }
}

impl Eq for ValueKey<'_> {}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::info::Typed;
    use crate::value::ArrayRef;

    #[test]
    fn content_and_identity() {
        let a = Value::from("x");
        let b = Value::from(alloc::string::String::from("x"));
        assert!(ValueKey(&a) == ValueKey(&b));
        assert!(ValueKey(&Value::I32(1)) != ValueKey(&Value::I64(1)));
        assert!(ValueKey(&Value::F64(f64::NAN)) == ValueKey(&Value::F64(f64::NAN)));

        let array = ArrayRef::new(i32::type_descriptor(), vec![Value::I32(1)]);
        let same = Value::Array(array.clone());
        let other = Value::Array(ArrayRef::new(i32::type_descriptor(), vec![Value::I32(1)]));
        assert!(ValueKey(&Value::Array(array)) == ValueKey(&same));
        assert!(ValueKey(&same) != ValueKey(&other));
    }
}
