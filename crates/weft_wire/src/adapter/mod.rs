//! Collection adapters.
//!
//! Immutable containers cannot be filled one element at a time. An adapter
//! instead lists a container's contents in its canonical order for writing,
//! and builds the finished container in one step from the decoded contents.
//!
//! The registry is closed: there is exactly one adapter per
//! [`CollectionKind`], chosen by the runtime type of the container.

use weft_reflect::ValueError;
use weft_reflect::collections::Collection;
use weft_reflect::info::{CollectionKind, TypeRef};
use weft_reflect::value::Value;

// -----------------------------------------------------------------------------
// Modules

mod keyed;
mod sequence;

// -----------------------------------------------------------------------------
// Exports

pub use keyed::{HashSetAdapter, MapAdapter, SortedSetAdapter};
pub use sequence::{ArrayAdapter, ListAdapter, QueueAdapter, StackAdapter};

// -----------------------------------------------------------------------------
// Entries

/// The contents of a container, borrowed for writing.
pub enum Entries<'a> {
    Items(&'a [Value]),
    Pairs(Box<dyn ExactSizeIterator<Item = (&'a Value, &'a Value)> + 'a>),
}

impl Entries<'_> {
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Self::Items(items) => items.len(),
            Self::Pairs(pairs) => pairs.len(),
        }
    }
}

/// The decoded contents of a container, in stream order.
#[derive(Debug)]
pub enum Decoded {
    Items(Vec<Value>),
    Pairs(Vec<(Value, Value)>),
}

impl Decoded {
    /// Elements in order; pairs are flattened key first.
    pub fn into_items(self) -> Vec<Value> {
        match self {
            Self::Items(items) => items,
            Self::Pairs(pairs) => pairs.into_iter().flat_map(|(k, v)| [k, v]).collect(),
        }
    }

    /// Key-value pairs in order; a flat element list is paired up.
    pub fn into_pairs(self, ty: TypeRef) -> Result<Vec<(Value, Value)>, ValueError> {
        match self {
            Self::Pairs(pairs) => Ok(pairs),
            Self::Items(items) => {
                if items.len() % 2 != 0 {
                    return Err(ValueError::UnpairedKey { ty });
                }
                let mut pairs = Vec::with_capacity(items.len() / 2);
                let mut items = items.into_iter();
                while let (Some(key), Some(value)) = (items.next(), items.next()) {
                    pairs.push((key, value));
                }
                Ok(pairs)
            }
        }
    }
}

/// Everything an adapter needs to build a container.
#[derive(Debug)]
pub struct Parts {
    /// The decoded comparer, for adapters that carry one.
    pub comparer: Option<Value>,
    pub entries: Decoded,
}

// -----------------------------------------------------------------------------
// CollectionAdapter

/// Write order and one-step construction for one container shape.
pub trait CollectionAdapter: Sync {
    fn kind(&self) -> CollectionKind;

    /// Whether a comparer is written before the elements.
    fn has_comparer(&self) -> bool {
        false
    }

    /// Whether contents are key-value pairs.
    fn is_keyed(&self) -> bool {
        false
    }

    /// The comparer to write, null for the natural order.
    fn comparer<'a>(&self, _collection: &'a Collection) -> Option<&'a Value> {
        None
    }

    /// The contents in canonical write order.
    ///
    /// Returns `None` when `collection` is not of this adapter's kind.
    fn entries<'a>(&self, collection: &'a Collection) -> Option<Entries<'a>>;

    /// Builds the finished container of type `ty`.
    fn build(&self, ty: TypeRef, parts: Parts) -> Result<Collection, ValueError>;
}

static ADAPTERS: [&dyn CollectionAdapter; 7] = [
    &ListAdapter,
    &StackAdapter,
    &QueueAdapter,
    &HashSetAdapter,
    &SortedSetAdapter,
    &MapAdapter,
    &ArrayAdapter,
];

/// The adapter for a container type, `None` for anything else.
///
/// # Examples
///
/// ```
/// use weft_reflect::info::{CollectionKind, Typed};
/// use weft_reflect::types;
/// use weft_wire::adapter::adapter_for;
///
/// let adapter = adapter_for(types::stack_of(i32::type_descriptor())).unwrap();
/// assert_eq!(adapter.kind(), CollectionKind::Stack);
///
/// assert!(adapter_for(i32::type_descriptor()).is_none());
/// ```
pub fn adapter_for(ty: TypeRef) -> Option<&'static dyn CollectionAdapter> {
    let kind = ty.as_collection()?.kind();
    ADAPTERS.iter().copied().find(|adapter| adapter.kind() == kind)
}

/// Every registered adapter.
#[inline]
pub fn adapters() -> impl ExactSizeIterator<Item = &'static dyn CollectionAdapter> {
    ADAPTERS.iter().copied()
}

#[cfg(test)]
mod tests {
    use weft_reflect::collections::{
        ImmutableHashSet, ImmutableList, ImmutableMap, ImmutableQueue, ImmutableSortedSet,
        ImmutableStack,
    };
    use weft_reflect::info::Typed;
    use weft_reflect::types;

    use super::*;

    fn ints(values: &[i32]) -> Vec<Value> {
        values.iter().copied().map(Value::I32).collect()
    }

    fn as_ints(items: &[Value]) -> Vec<Option<i32>> {
        items.iter().map(Value::as_i32).collect()
    }

    /// Writes `collection` through its adapter and rebuilds it.
    fn rebuild(collection: &Collection) -> Collection {
        let adapter = adapter_for(collection.ty()).unwrap();
        let comparer = adapter
            .has_comparer()
            .then(|| adapter.comparer(collection).cloned().unwrap_or_default());
        let entries = match adapter.entries(collection).unwrap() {
            Entries::Items(items) => Decoded::Items(items.to_vec()),
            Entries::Pairs(pairs) => {
                Decoded::Pairs(pairs.map(|(k, v)| (k.clone(), v.clone())).collect())
            }
        };
        adapter
            .build(collection.ty(), Parts { comparer, entries })
            .unwrap()
    }

    #[test]
    fn one_adapter_per_kind() {
        assert_eq!(adapters().len(), CollectionKind::ALL.len());
        for kind in CollectionKind::ALL {
            assert_eq!(adapters().filter(|a| a.kind() == kind).count(), 1, "{kind}");
        }
        assert!(adapter_for(types::sequence_of(i32::type_descriptor())).is_none());
    }

    #[test]
    fn stack_writes_top_first_and_rebuilds() {
        let stack = Collection::from(ImmutableStack::of(i32::type_descriptor(), ints(&[1, 2, 3])));
        let Some(Entries::Items(items)) = adapter_for(stack.ty()).unwrap().entries(&stack) else {
            panic!("stack lists items");
        };
        assert_eq!(as_ints(items), [Some(3), Some(2), Some(1)]);

        let Collection::Stack(rebuilt) = rebuild(&stack) else {
            panic!("expected a stack");
        };
        assert_eq!(rebuilt.peek().and_then(Value::as_i32), Some(3));
        assert_eq!(as_ints(rebuilt.iter().as_slice()), [Some(3), Some(2), Some(1)]);
    }

    #[test]
    fn queue_and_list_keep_order_and_nulls() {
        let mut items = ints(&[4, 5]);
        items.insert(1, Value::Null);

        let queue = Collection::from(ImmutableQueue::of(i32::type_descriptor(), items.clone()));
        let Collection::Queue(queue) = rebuild(&queue) else {
            panic!("expected a queue");
        };
        assert_eq!(as_ints(queue.iter().as_slice()), [Some(4), None, Some(5)]);

        let list = Collection::from(ImmutableList::of(i32::type_descriptor(), items));
        let Collection::List(list) = rebuild(&list) else {
            panic!("expected a list");
        };
        assert_eq!(as_ints(list.as_slice()), [Some(4), None, Some(5)]);
    }

    #[test]
    fn keyed_containers() {
        let set = Collection::from(ImmutableHashSet::of(i32::type_descriptor(), ints(&[3, 1, 3])));
        let Collection::HashSet(set) = rebuild(&set) else {
            panic!("expected a hash set");
        };
        assert_eq!(set.len(), 2);
        assert!(set.contains(&Value::I32(1)));

        let map = Collection::from(ImmutableMap::of(
            String::type_descriptor(),
            i32::type_descriptor(),
            [("b", 2), ("a", 1)].map(|(k, v)| (Value::from(k), Value::I32(v))),
        ));
        let Collection::Map(map) = rebuild(&map) else {
            panic!("expected a map");
        };
        let keys: Vec<_> = map.keys().filter_map(Value::as_str).collect();
        assert_eq!(keys, ["b", "a"]);

        let sorted = Collection::from(
            ImmutableSortedSet::of(i32::type_descriptor(), Value::Null, ints(&[9, 2, 5])).unwrap(),
        );
        let Collection::SortedSet(sorted) = rebuild(&sorted) else {
            panic!("expected a sorted set");
        };
        assert_eq!(as_ints(sorted.iter().as_slice()), [Some(2), Some(5), Some(9)]);
    }

    #[test]
    fn mismatched_shapes() {
        let list = Collection::from(ImmutableList::of(i32::type_descriptor(), ints(&[1])));
        assert!(MapAdapter.entries(&list).is_none());

        let map_ty = types::map_of(i32::type_descriptor(), i32::type_descriptor());
        let odd = Parts {
            comparer: None,
            entries: Decoded::Items(ints(&[1, 2, 3])),
        };
        assert!(matches!(
            MapAdapter.build(map_ty, odd),
            Err(ValueError::UnpairedKey { .. })
        ));

        let wrong = Parts {
            comparer: None,
            entries: Decoded::Items(Vec::new()),
        };
        assert!(matches!(
            ListAdapter.build(map_ty, wrong),
            Err(ValueError::KindMismatch { .. })
        ));
    }
}
