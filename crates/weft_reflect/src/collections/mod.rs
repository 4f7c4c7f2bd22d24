//! Immutable containers.
//!
//! Containers are built in one step from their complete contents and expose
//! no mutation afterwards. Element types are not checked at construction;
//! serializers verify them when the container is written.
//!
//! | container              | traversal order             |
//! |------------------------|-----------------------------|
//! | [`ImmutableList`]      | index order                 |
//! | [`ImmutableStack`]     | top first                   |
//! | [`ImmutableQueue`]     | front first                 |
//! | [`ImmutableHashSet`]   | first insertion order       |
//! | [`ImmutableSortedSet`] | ascending by its comparer   |
//! | [`ImmutableMap`]       | first insertion order       |
//! | [`ImmutableArray`]     | index order                 |

use alloc::rc::Rc;

use crate::ValueError;
use crate::info::{CollectionInfo, CollectionKind, TypeRef};

// -----------------------------------------------------------------------------
// Modules

mod array;
mod hash_set;
mod index;
mod list;
mod map;
mod queue;
mod sorted_set;
mod stack;

// -----------------------------------------------------------------------------
// Exports

pub use array::ImmutableArray;
pub use hash_set::ImmutableHashSet;
pub use list::ImmutableList;
pub use map::ImmutableMap;
pub use queue::ImmutableQueue;
pub use sorted_set::ImmutableSortedSet;
pub use stack::ImmutableStack;

// -----------------------------------------------------------------------------
// Collection

/// A shared handle to a [`Collection`].
pub type CollectionRef = Rc<Collection>;

/// Any immutable container.
pub enum Collection {
    List(ImmutableList),
    Stack(ImmutableStack),
    Queue(ImmutableQueue),
    HashSet(ImmutableHashSet),
    SortedSet(ImmutableSortedSet),
    Map(ImmutableMap),
    Array(ImmutableArray),
}

macro_rules! for_each_variant {
    ($self:ident, $inner:ident => $expr:expr) => {
        match $self {
            Self::List($inner) => $expr,
            Self::Stack($inner) => $expr,
            Self::Queue($inner) => $expr,
            Self::HashSet($inner) => $expr,
            Self::SortedSet($inner) => $expr,
            Self::Map($inner) => $expr,
            Self::Array($inner) => $expr,
        }
    };
}

impl Collection {
    /// The concrete container type.
    #[inline]
    pub fn ty(&self) -> TypeRef {
        for_each_variant!(self, c => c.ty())
    }

    #[inline]
    pub fn kind(&self) -> CollectionKind {
        match self {
            Self::List(_) => CollectionKind::List,
            Self::Stack(_) => CollectionKind::Stack,
            Self::Queue(_) => CollectionKind::Queue,
            Self::HashSet(_) => CollectionKind::HashSet,
            Self::SortedSet(_) => CollectionKind::SortedSet,
            Self::Map(_) => CollectionKind::Map,
            Self::Array(_) => CollectionKind::Array,
        }
    }

    /// Number of elements; entries for maps.
    #[inline]
    pub fn len(&self) -> usize {
        for_each_variant!(self, c => c.len())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

macro_rules! impl_from_container {
    ($($container:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$container> for Collection {
                #[inline]
                fn from(value: $container) -> Self {
                    Self::$variant(value)
                }
            }

            impl From<$container> for crate::value::Value {
                #[inline]
                fn from(value: $container) -> Self {
                    Self::Collection(Rc::new(Collection::$variant(value)))
                }
            }
        )*
    };
}

impl_from_container! {
    ImmutableList => List,
    ImmutableStack => Stack,
    ImmutableQueue => Queue,
    ImmutableHashSet => HashSet,
    ImmutableSortedSet => SortedSet,
    ImmutableMap => Map,
    ImmutableArray => Array,
}

impl core::fmt::Debug for Collection {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for_each_variant!(self, c => core::fmt::Debug::fmt(c, f))
    }
}

/// Checks that `ty` is a container type of the given kind.
pub(crate) fn check_kind(
    ty: TypeRef,
    kind: CollectionKind,
) -> Result<&'static CollectionInfo, ValueError> {
    match ty.as_collection() {
        Some(info) if info.kind() == kind => Ok(info),
        _ => Err(ValueError::KindMismatch {
            expected: kind.name(),
            found: ty,
        }),
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cmp::Ordering;

    use super::*;
    use crate::info::{ObjectBuilder, TypeRef, Typed};
    use crate::registry::TypeCell;
    use crate::types;
    use crate::value::{Object, ObjectRef, Value};

    fn ints(values: &[i32]) -> Vec<Value> {
        values.iter().copied().map(Value::I32).collect()
    }

    fn as_ints<'a>(values: impl Iterator<Item = &'a Value>) -> Vec<i32> {
        values.map(|v| v.as_i32().unwrap()).collect()
    }

    fn by_length(_: &Object, left: &Value, right: &Value) -> Ordering {
        let len = |v: &Value| v.as_str().map_or(0, str::len);
        len(left).cmp(&len(right))
    }

    fn length_comparer() -> TypeRef {
        static CELL: TypeCell = TypeCell::new();
        CELL.get_or_register(|| {
            ObjectBuilder::new("collection_tests::ByLength", "collection_tests")
                .comparer(by_length)
                .build()
        })
    }

    #[test]
    fn constructors_check_kind() {
        let int = i32::type_descriptor();
        assert!(ImmutableList::new(types::list_of(int), ints(&[1])).is_ok());
        assert!(matches!(
            ImmutableList::new(types::queue_of(int), ints(&[1])),
            Err(ValueError::KindMismatch { expected: "List", .. })
        ));
        assert!(ImmutableMap::new(types::list_of(int), []).is_err());
        assert!(ImmutableSortedSet::new(int, Value::Null, []).is_err());
    }

    #[test]
    fn stack_and_queue_order() {
        let int = i32::type_descriptor();
        let stack = ImmutableStack::of(int, ints(&[1, 2, 3]));
        assert_eq!(as_ints(stack.iter()), [3, 2, 1]);
        assert_eq!(stack.peek().and_then(Value::as_i32), Some(3));

        let from_top = ImmutableStack::from_top(types::stack_of(int), ints(&[3, 2, 1])).unwrap();
        assert_eq!(as_ints(from_top.iter()), as_ints(stack.iter()));

        let queue = ImmutableQueue::of(int, ints(&[1, 2, 3]));
        assert_eq!(as_ints(queue.iter()), [1, 2, 3]);
        assert_eq!(queue.peek().and_then(Value::as_i32), Some(1));
    }

    #[test]
    fn hash_set_keeps_first_occurrence() {
        let text = String::type_descriptor();
        let set = ImmutableHashSet::of(text, ["b", "a", "b", "c"].map(Value::from));
        let items: Vec<_> = set.iter().filter_map(Value::as_str).collect();
        assert_eq!(items, ["b", "a", "c"]);
        assert!(set.contains(&Value::from("c")));
        assert!(!set.contains(&Value::from("d")));
    }

    #[test]
    fn hash_set_uses_identity_for_objects() {
        let ty = length_comparer();
        let a = Value::Object(ObjectRef::zeroed(ty).unwrap());
        let b = Value::Object(ObjectRef::zeroed(ty).unwrap());
        let set = ImmutableHashSet::of(ty, vec![a.clone(), b, a.clone(), Value::Null]);
        assert_eq!(set.len(), 3);
        assert!(set.contains(&a));
        assert!(set.contains(&Value::Null));
    }

    #[test]
    fn map_replaces_value_in_place() {
        let text = String::type_descriptor();
        let map = ImmutableMap::of(
            text,
            text,
            vec![
                (Value::from("a1"), Value::from("x")),
                (Value::from("a2"), Value::Null),
                (Value::from("a1"), Value::from("y")),
            ],
        );
        let keys: Vec<_> = map.keys().filter_map(Value::as_str).collect();
        assert_eq!(keys, ["a1", "a2"]);
        assert_eq!(map.get(&Value::from("a1")).and_then(Value::as_str), Some("y"));
        assert!(map.get(&Value::from("a2")).unwrap().is_null());
        assert!(map.get(&Value::from("a3")).is_none());
    }

    #[test]
    fn sorted_set_natural_and_custom_order() {
        let text = String::type_descriptor();
        let words = ["abcde", "abc", "abcd", "abc"].map(Value::from);

        let natural = ImmutableSortedSet::of(text, Value::Null, words.clone()).unwrap();
        let items: Vec<_> = natural.iter().filter_map(Value::as_str).collect();
        assert_eq!(items, ["abc", "abcd", "abcde"]);
        assert!(natural.contains(&Value::from("abcd")));

        let comparer = Value::Object(ObjectRef::zeroed(length_comparer()).unwrap());
        let by_len = ImmutableSortedSet::of(
            text,
            comparer.clone(),
            ["xyz", "a", "bb", "cc"].map(Value::from),
        )
        .unwrap();
        // "cc" has the length of "bb" and is dropped.
        let items: Vec<_> = by_len.iter().filter_map(Value::as_str).collect();
        assert_eq!(items, ["a", "bb", "xyz"]);
        assert!(by_len.comparer().ptr_eq(&comparer));
    }

    #[test]
    fn sorted_set_rejects_non_comparers() {
        let text = String::type_descriptor();
        let err = ImmutableSortedSet::of(text, Value::I32(1), []).unwrap_err();
        assert!(matches!(err, ValueError::NotAComparer { .. }));
    }

    #[test]
    fn collection_enum_dispatch() {
        let int = i32::type_descriptor();
        let value = Value::from(ImmutableArray::of(int, ints(&[4, 5])));
        let collection = value.as_collection().unwrap();
        assert_eq!(collection.kind(), CollectionKind::Array);
        assert_eq!(collection.len(), 2);
        assert!(core::ptr::eq(collection.ty(), types::immutable_array_of(int)));
        assert!(core::ptr::eq(value.runtime_type().unwrap(), collection.ty()));
    }
}
