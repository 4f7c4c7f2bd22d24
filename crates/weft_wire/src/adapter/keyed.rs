use weft_reflect::ValueError;
use weft_reflect::collections::{Collection, ImmutableHashSet, ImmutableMap, ImmutableSortedSet};
use weft_reflect::info::{CollectionKind, TypeRef};
use weft_reflect::value::Value;

use super::{CollectionAdapter, Entries, Parts};

/// Stored order, which is first insertion order.
#[derive(Debug, Clone, Copy, Default)]
pub struct HashSetAdapter;

impl CollectionAdapter for HashSetAdapter {
    fn kind(&self) -> CollectionKind {
        CollectionKind::HashSet
    }

    fn entries<'a>(&self, collection: &'a Collection) -> Option<Entries<'a>> {
        match collection {
            Collection::HashSet(set) => Some(Entries::Items(set.iter().as_slice())),
            _ => None,
        }
    }

    fn build(&self, ty: TypeRef, parts: Parts) -> Result<Collection, ValueError> {
        ImmutableHashSet::new(ty, parts.entries.into_items()).map(Collection::from)
    }
}

/// Ascending by the set's comparer, which is written first.
///
/// The rebuilt set sorts by the decoded comparer, not by the stream order.
#[derive(Debug, Clone, Copy, Default)]
pub struct SortedSetAdapter;

impl CollectionAdapter for SortedSetAdapter {
    fn kind(&self) -> CollectionKind {
        CollectionKind::SortedSet
    }

    fn has_comparer(&self) -> bool {
        true
    }

    fn comparer<'a>(&self, collection: &'a Collection) -> Option<&'a Value> {
        match collection {
            Collection::SortedSet(set) => Some(set.comparer()),
            _ => None,
        }
    }

    fn entries<'a>(&self, collection: &'a Collection) -> Option<Entries<'a>> {
        match collection {
            Collection::SortedSet(set) => Some(Entries::Items(set.iter().as_slice())),
            _ => None,
        }
    }

    fn build(&self, ty: TypeRef, parts: Parts) -> Result<Collection, ValueError> {
        let comparer = parts.comparer.unwrap_or_default();
        ImmutableSortedSet::new(ty, comparer, parts.entries.into_items()).map(Collection::from)
    }
}

/// Key-value pairs in stored order.
#[derive(Debug, Clone, Copy, Default)]
pub struct MapAdapter;

impl CollectionAdapter for MapAdapter {
    fn kind(&self) -> CollectionKind {
        CollectionKind::Map
    }

    fn is_keyed(&self) -> bool {
        true
    }

    fn entries<'a>(&self, collection: &'a Collection) -> Option<Entries<'a>> {
        match collection {
            Collection::Map(map) => Some(Entries::Pairs(Box::new(map.iter()))),
            _ => None,
        }
    }

    fn build(&self, ty: TypeRef, parts: Parts) -> Result<Collection, ValueError> {
        let pairs = parts.entries.into_pairs(ty)?;
        ImmutableMap::new(ty, pairs).map(Collection::from)
    }
}
