use core::fmt;

use bitflags::bitflags;

use crate::catalog::Primitive;
use crate::info::{ObjectInfo, TypeRef};

// -----------------------------------------------------------------------------
// TypeFlags

bitflags! {
    /// Classification bits computed once per descriptor.
    ///
    /// Every predicate of the [`catalog`](crate::catalog) is a single test
    /// against these bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TypeFlags: u16 {
        const PRIMITIVE = 1;
        const FIXED_WIDTH = 1 << 1;
        const NULLABLE = 1 << 2;
        const ARRAY = 1 << 3;
        const COLLECTION = 1 << 4;
        const OBJECT = 1 << 5;
        const CONTRACT = 1 << 6;
        const OPAQUE = 1 << 7;
        const GENERIC = 1 << 8;
        /// Values of this type are shared by reference and can be back-referenced.
        const REFERENCE = 1 << 9;
    }
}

// -----------------------------------------------------------------------------
// CollectionKind

/// The container shapes with a built-in adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    List,
    Stack,
    Queue,
    HashSet,
    SortedSet,
    Map,
    Array,
}

impl CollectionKind {
    /// All kinds, in declaration order.
    pub const ALL: [CollectionKind; 7] = [
        Self::List,
        Self::Stack,
        Self::Queue,
        Self::HashSet,
        Self::SortedSet,
        Self::Map,
        Self::Array,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::List => "List",
            Self::Stack => "Stack",
            Self::Queue => "Queue",
            Self::HashSet => "HashSet",
            Self::SortedSet => "SortedSet",
            Self::Map => "Map",
            Self::Array => "Array",
        }
    }

    /// Number of generic arguments of the container type.
    #[inline]
    pub const fn arity(self) -> usize {
        match self {
            Self::Map => 2,
            _ => 1,
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

// -----------------------------------------------------------------------------
// CollectionInfo

/// Element types of a container type.
#[derive(Debug, Clone, Copy)]
pub struct CollectionInfo {
    kind: CollectionKind,
    element: TypeRef,
    value: Option<TypeRef>,
}

impl CollectionInfo {
    #[inline]
    pub(crate) const fn new(kind: CollectionKind, element: TypeRef, value: Option<TypeRef>) -> Self {
        Self {
            kind,
            element,
            value,
        }
    }

    #[inline]
    pub const fn kind(&self) -> CollectionKind {
        self.kind
    }

    /// The element type; the key type for maps.
    #[inline]
    pub const fn element(&self) -> TypeRef {
        self.element
    }

    /// The value type of a map, `None` for other kinds.
    #[inline]
    pub const fn value(&self) -> Option<TypeRef> {
        self.value
    }
}

// -----------------------------------------------------------------------------
// TypeKind

/// The classification of a [`TypeDescriptor`](crate::info::TypeDescriptor).
pub enum TypeKind {
    /// A catalog primitive.
    Primitive(Primitive),
    /// A value that may be absent, wrapping a primitive.
    Nullable(TypeRef),
    /// A mutable one-dimensional array of the element type.
    Array(TypeRef),
    /// An immutable container with a built-in adapter.
    Collection(CollectionInfo),
    /// A plain object with named fields.
    Object(ObjectInfo),
    /// An interface-like type; only usable as a static type.
    Contract,
    /// A type whose contents are not visible to the serializer.
    Opaque,
}

impl TypeKind {
    /// Name of the classification, used in diagnostics.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Primitive(_) => "primitive",
            Self::Nullable(_) => "nullable",
            Self::Array(_) => "array",
            Self::Collection(_) => "collection",
            Self::Object(_) => "object",
            Self::Contract => "contract",
            Self::Opaque => "opaque",
        }
    }

    pub(crate) const fn flags(&self) -> TypeFlags {
        match self {
            Self::Primitive(p) => {
                if p.fixed_width().is_some() {
                    TypeFlags::PRIMITIVE.union(TypeFlags::FIXED_WIDTH)
                } else {
                    TypeFlags::PRIMITIVE
                }
            }
            Self::Nullable(_) => TypeFlags::NULLABLE,
            Self::Array(_) => TypeFlags::ARRAY.union(TypeFlags::REFERENCE),
            Self::Collection(_) => TypeFlags::COLLECTION.union(TypeFlags::REFERENCE),
            Self::Object(_) => TypeFlags::OBJECT.union(TypeFlags::REFERENCE),
            Self::Contract => TypeFlags::CONTRACT,
            Self::Opaque => TypeFlags::OPAQUE.union(TypeFlags::REFERENCE),
        }
    }
}

impl fmt::Debug for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(p) => f.debug_tuple("Primitive").field(p).finish(),
            Self::Nullable(t) => f.debug_tuple("Nullable").field(&t.short_name()).finish(),
            Self::Array(t) => f.debug_tuple("Array").field(&t.short_name()).finish(),
            Self::Collection(info) => f
                .debug_struct("Collection")
                .field("kind", &info.kind)
                .field("element", &info.element.short_name())
                .field("value", &info.value.map(|t| t.short_name()))
                .finish(),
            Self::Object(info) => f.debug_tuple("Object").field(info).finish(),
            Self::Contract => f.pad("Contract"),
            Self::Opaque => f.pad("Opaque"),
        }
    }
}
