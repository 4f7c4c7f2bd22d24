use core::cmp::Ordering;

use crate::ValueError;
use crate::value::Value;

/// Rank of a variant when values of different kinds meet.
const fn rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::U8(_) => 2,
        Value::I8(_) => 3,
        Value::I16(_) => 4,
        Value::U16(_) => 5,
        Value::I32(_) => 6,
        Value::U32(_) => 7,
        Value::I64(_) => 8,
        Value::U64(_) => 9,
        Value::F32(_) => 10,
        Value::F64(_) => 11,
        Value::Char(_) => 12,
        Value::String(_) => 13,
        Value::Bytes(_) => 14,
        Value::Timestamp(_) => 15,
        Value::Uuid(_) => 16,
        Value::Decimal(_) => 17,
        Value::Array(_) => 18,
        Value::Collection(_) => 19,
        Value::Object(_) => 20,
        Value::Opaque(_) => 21,
    }
}

/// The default ordering used by sorted containers without a comparer.
///
/// - null sorts first;
/// - primitives of the same kind compare by value, text and bytes ordinally;
/// - objects with an ordering capability use it;
/// - anything else falls back to the type name, then the allocation
///   address, which is stable for the lifetime of the values.
///
/// # Examples
///
/// ```
/// use core::cmp::Ordering;
/// use weft_reflect::value::{Value, natural_cmp};
///
/// assert_eq!(natural_cmp(&Value::Null, &Value::I32(0)), Ordering::Less);
/// assert_eq!(natural_cmp(&"abc".into(), &"abcd".into()), Ordering::Less);
/// ```
pub fn natural_cmp(left: &Value, right: &Value) -> Ordering {
    match (left, right) {
        (Value::Null, Value::Null) => return Ordering::Equal,
        (Value::Null, _) => return Ordering::Less,
        (_, Value::Null) => return Ordering::Greater,
        _ => {}
    }
    if let Value::Object(a) = left
        && let Some(compare) = a.info().ordering()
    {
        return compare(a, right);
    }
    if let Value::Object(b) = right
        && let Some(compare) = b.info().ordering()
    {
        return compare(b, left).reverse();
    }
    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::U8(a), Value::U8(b)) => a.cmp(b),
        (Value::I8(a), Value::I8(b)) => a.cmp(b),
        (Value::I16(a), Value::I16(b)) => a.cmp(b),
        (Value::U16(a), Value::U16(b)) => a.cmp(b),
        (Value::I32(a), Value::I32(b)) => a.cmp(b),
        (Value::U32(a), Value::U32(b)) => a.cmp(b),
        (Value::I64(a), Value::I64(b)) => a.cmp(b),
        (Value::U64(a), Value::U64(b)) => a.cmp(b),
        (Value::F32(a), Value::F32(b)) => a.total_cmp(b),
        (Value::F64(a), Value::F64(b)) => a.total_cmp(b),
        (Value::Char(a), Value::Char(b)) => a.cmp(b),
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::Bytes(a), Value::Bytes(b)) => a.cmp(b),
        (Value::Timestamp(a), Value::Timestamp(b)) => a.cmp(b),
        (Value::Uuid(a), Value::Uuid(b)) => a.cmp(b),
        (Value::Decimal(a), Value::Decimal(b)) => a.cmp(b),
        _ => fallback_cmp(left, right),
    }
}

fn fallback_cmp(left: &Value, right: &Value) -> Ordering {
    let by_type = match (left.runtime_type(), right.runtime_type()) {
        (Some(a), Some(b)) => a.short_name().cmp(b.short_name()),
        _ => Ordering::Equal,
    };
    by_type
        .then_with(|| rank(left).cmp(&rank(right)))
        .then_with(|| left.identity().cmp(&right.identity()))
}

/// Orders two values with `comparer`.
///
/// A null comparer, or a value without the comparer capability, falls back
/// to [`natural_cmp`].
pub fn compare_with(comparer: &Value, left: &Value, right: &Value) -> Ordering {
    match comparer {
        Value::Object(object) => match object.info().comparer() {
            Some(compare) => compare(object, left, right),
            None => natural_cmp(left, right),
        },
        _ => natural_cmp(left, right),
    }
}

/// Accepts null and objects with the comparer capability.
pub(crate) fn check_comparer(comparer: &Value) -> Result<(), ValueError> {
    match comparer {
        Value::Null => Ok(()),
        Value::Object(object) if object.info().comparer().is_some() => Ok(()),
        other => match other.runtime_type() {
            Some(ty) => Err(ValueError::NotAComparer { ty }),
            None => Ok(()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::info::{ObjectBuilder, TypeRef, Typed};
    use crate::registry::TypeCell;
    use crate::value::{Object, ObjectRef};

    fn by_rank(this: &Object, other: &Value) -> Ordering {
        let rank = |v: Option<Value>| v.and_then(|v| v.as_i32()).unwrap_or_default();
        match other {
            Value::Object(other) => rank(this.get("rank")).cmp(&rank(other.get("rank"))),
            _ => Ordering::Greater,
        }
    }

    fn ranked() -> TypeRef {
        static CELL: TypeCell = TypeCell::new();
        CELL.get_or_register(|| {
            ObjectBuilder::new("ordering_tests::Ranked", "ordering_tests")
                .field("rank", i32::type_descriptor())
                .ordering(by_rank)
                .build()
        })
    }

    fn ranked_value(rank: i32) -> Value {
        let object = ObjectRef::with_fields(ranked(), [("rank", Value::I32(rank))]).unwrap();
        Value::Object(object)
    }

    #[test]
    fn primitives_and_null() {
        assert_eq!(natural_cmp(&Value::I32(-1), &Value::I32(2)), Ordering::Less);
        assert_eq!(natural_cmp(&Value::F64(1.5), &Value::F64(1.5)), Ordering::Equal);
        assert_eq!(natural_cmp(&Value::I32(0), &Value::Null), Ordering::Greater);
        assert_eq!(natural_cmp(&Value::Bool(false), &Value::I32(0)), Ordering::Less);
    }

    #[test]
    fn ordering_capability() {
        let low = ranked_value(1);
        let high = ranked_value(7);
        assert_eq!(natural_cmp(&low, &high), Ordering::Less);
        assert_eq!(natural_cmp(&high, &low), Ordering::Greater);
        assert_eq!(natural_cmp(&Value::I32(3), &low), Ordering::Less);
    }

    #[test]
    fn comparer_fallback() {
        assert_eq!(
            compare_with(&Value::Null, &Value::from("b"), &Value::from("a")),
            Ordering::Greater
        );
        assert!(check_comparer(&Value::Null).is_ok());
        assert!(check_comparer(&ranked_value(1)).is_err());
    }
}
