use weft_reflect::ValueError;
use weft_reflect::collections::{
    Collection, ImmutableArray, ImmutableList, ImmutableQueue, ImmutableStack,
};
use weft_reflect::info::{CollectionKind, TypeRef};

use super::{CollectionAdapter, Entries, Parts};

/// Index order.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListAdapter;

impl CollectionAdapter for ListAdapter {
    fn kind(&self) -> CollectionKind {
        CollectionKind::List
    }

    fn entries<'a>(&self, collection: &'a Collection) -> Option<Entries<'a>> {
        match collection {
            Collection::List(list) => Some(Entries::Items(list.as_slice())),
            _ => None,
        }
    }

    fn build(&self, ty: TypeRef, parts: Parts) -> Result<Collection, ValueError> {
        ImmutableList::new(ty, parts.entries.into_items()).map(Collection::from)
    }
}

/// Top first; rebuilt from the top down, never by replaying pushes.
#[derive(Debug, Clone, Copy, Default)]
pub struct StackAdapter;

impl CollectionAdapter for StackAdapter {
    fn kind(&self) -> CollectionKind {
        CollectionKind::Stack
    }

    fn entries<'a>(&self, collection: &'a Collection) -> Option<Entries<'a>> {
        match collection {
            Collection::Stack(stack) => Some(Entries::Items(stack.iter().as_slice())),
            _ => None,
        }
    }

    fn build(&self, ty: TypeRef, parts: Parts) -> Result<Collection, ValueError> {
        ImmutableStack::from_top(ty, parts.entries.into_items()).map(Collection::from)
    }
}

/// Front first.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueueAdapter;

impl CollectionAdapter for QueueAdapter {
    fn kind(&self) -> CollectionKind {
        CollectionKind::Queue
    }

    fn entries<'a>(&self, collection: &'a Collection) -> Option<Entries<'a>> {
        match collection {
            Collection::Queue(queue) => Some(Entries::Items(queue.iter().as_slice())),
            _ => None,
        }
    }

    fn build(&self, ty: TypeRef, parts: Parts) -> Result<Collection, ValueError> {
        ImmutableQueue::new(ty, parts.entries.into_items()).map(Collection::from)
    }
}

/// Index order; the length is fixed by the element count.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrayAdapter;

impl CollectionAdapter for ArrayAdapter {
    fn kind(&self) -> CollectionKind {
        CollectionKind::Array
    }

    fn entries<'a>(&self, collection: &'a Collection) -> Option<Entries<'a>> {
        match collection {
            Collection::Array(array) => Some(Entries::Items(array.as_slice())),
            _ => None,
        }
    }

    fn build(&self, ty: TypeRef, parts: Parts) -> Result<Collection, ValueError> {
        ImmutableArray::new(ty, parts.entries.into_items()).map(Collection::from)
    }
}
