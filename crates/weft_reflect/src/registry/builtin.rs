//! Built-in generic definitions and contracts.

use core::cmp::Ordering;

use crate::info::{CollectionKind, TypeDescriptor, TypePath};
use crate::registry::GenericDefinition;
use crate::value::{Object, Value, natural_cmp};

pub(crate) const ANY: TypePath = TypePath::new("weft_reflect::contracts::Any", "weft_reflect");

pub(crate) static OPTION: GenericDefinition =
    GenericDefinition::new("core::option::Option", "core", 1, |inst| inst.nullable());

macro_rules! collection_definitions {
    ($($name:ident: $kind:ident => $path:literal),* $(,)?) => {
        $(
            pub(crate) static $name: GenericDefinition = GenericDefinition::new(
                $path,
                "weft_reflect",
                CollectionKind::$kind.arity(),
                |inst| Ok(inst.collection(CollectionKind::$kind)),
            );
        )*

        /// The definition behind each container kind.
        pub(crate) const fn collection_definition(kind: CollectionKind) -> &'static GenericDefinition {
            match kind {
                $(CollectionKind::$kind => &$name,)*
            }
        }
    };
}

collection_definitions! {
    LIST: List => "weft_reflect::collections::ImmutableList",
    STACK: Stack => "weft_reflect::collections::ImmutableStack",
    QUEUE: Queue => "weft_reflect::collections::ImmutableQueue",
    HASH_SET: HashSet => "weft_reflect::collections::ImmutableHashSet",
    SORTED_SET: SortedSet => "weft_reflect::collections::ImmutableSortedSet",
    MAP: Map => "weft_reflect::collections::ImmutableMap",
    IMMUTABLE_ARRAY: Array => "weft_reflect::collections::ImmutableArray",
}

pub(crate) static SEQUENCE: GenericDefinition =
    GenericDefinition::new("weft_reflect::contracts::Sequence", "weft_reflect", 1, |inst| {
        Ok(inst.contract())
    });

pub(crate) static SET: GenericDefinition =
    GenericDefinition::new("weft_reflect::contracts::Set", "weft_reflect", 1, |inst| {
        Ok(inst.contract())
    });

pub(crate) static MAP_CONTRACT: GenericDefinition =
    GenericDefinition::new("weft_reflect::contracts::Map", "weft_reflect", 2, |inst| {
        Ok(inst.contract())
    });

pub(crate) static COMPARER: GenericDefinition =
    GenericDefinition::new("weft_reflect::contracts::Comparer", "weft_reflect", 1, |inst| {
        Ok(inst.contract())
    });

pub(crate) static DEFAULT_COMPARER: GenericDefinition = GenericDefinition::new(
    "weft_reflect::compare::DefaultComparer",
    "weft_reflect",
    1,
    |inst| Ok(inst.object().comparer(default_compare).build()),
);

pub(crate) fn default_compare(_: &Object, left: &Value, right: &Value) -> Ordering {
    natural_cmp(left, right)
}

/// Every built-in generic definition.
pub(crate) fn definitions() -> [&'static GenericDefinition; 13] {
    [
        &OPTION,
        &LIST,
        &STACK,
        &QUEUE,
        &HASH_SET,
        &SORTED_SET,
        &MAP,
        &IMMUTABLE_ARRAY,
        &SEQUENCE,
        &SET,
        &MAP_CONTRACT,
        &COMPARER,
        &DEFAULT_COMPARER,
    ]
}

/// The `any` contract.
pub(crate) fn any_descriptor() -> TypeDescriptor {
    TypeDescriptor::contract(ANY, alloc::vec::Vec::new())
}
