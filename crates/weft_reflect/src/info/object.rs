use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;

use crate::TypeResolutionError;
use crate::info::{FieldDescriptor, TypeDescriptor, TypePath, TypeRef};
use crate::value::{Object, Value};

/// Comparer capability: orders two values on behalf of a comparer object.
///
/// The first argument is the comparer instance itself, so comparers can
/// carry state such as a nested comparer.
pub type ComparerFn = fn(comparer: &Object, left: &Value, right: &Value) -> Ordering;

/// Natural-ordering capability: compares an object with another value.
pub type OrderingFn = fn(this: &Object, other: &Value) -> Ordering;

// -----------------------------------------------------------------------------
// ObjectInfo

/// Fields and capabilities of a plain-object type.
pub struct ObjectInfo {
    fields: Box<[FieldDescriptor]>,
    comparer: Option<ComparerFn>,
    ordering: Option<OrderingFn>,
}

impl ObjectInfo {
    /// Fields in declaration order.
    #[inline]
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    #[inline]
    pub fn field_len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn field_at(&self, index: usize) -> Option<&FieldDescriptor> {
        self.fields.get(index)
    }

    /// Finds a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name() == name)
    }

    pub fn field_names(&self) -> impl ExactSizeIterator<Item = &str> {
        self.fields.iter().map(FieldDescriptor::name)
    }

    /// The comparer capability, present when instances order other values.
    #[inline]
    pub fn comparer(&self) -> Option<ComparerFn> {
        self.comparer
    }

    /// The natural-ordering capability of instances.
    #[inline]
    pub fn ordering(&self) -> Option<OrderingFn> {
        self.ordering
    }
}

impl fmt::Debug for ObjectInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectInfo")
            .field("fields", &self.fields)
            .field("comparer", &self.comparer.is_some())
            .field("ordering", &self.ordering.is_some())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// ObjectBuilder

/// Builds the [`TypeDescriptor`] of a plain object.
///
/// Field indices follow the order of the `field` calls.
///
/// # Examples
///
/// ```
/// use weft_reflect::info::{ObjectBuilder, Typed};
/// use weft_reflect::registry::{TypeCell, TypeRegistry};
/// use weft_reflect::info::TypeRef;
///
/// // A linked node refers to itself, so its `next` field is lazy.
/// fn node() -> TypeRef {
///     static CELL: TypeCell = TypeCell::new();
///     CELL.get_or_register(|| {
///         ObjectBuilder::new("docs::Node", "docs")
///             .field("value", i64::type_descriptor())
///             .lazy_field("next", || Ok(node()))
///             .build()
///     })
/// }
///
/// let next = node().as_object().unwrap().field("next").unwrap();
/// assert!(core::ptr::eq(next.field_type().unwrap(), node()));
/// ```
pub struct ObjectBuilder {
    path: TypePath,
    generics: Vec<TypeRef>,
    fields: Vec<FieldDescriptor>,
    comparer: Option<ComparerFn>,
    ordering: Option<OrderingFn>,
}

impl ObjectBuilder {
    #[inline]
    pub fn new(path: &'static str, module: &'static str) -> Self {
        Self::with_path(TypePath::new(path, module))
    }

    #[inline]
    pub fn with_path(path: TypePath) -> Self {
        Self {
            path,
            generics: Vec::new(),
            fields: Vec::new(),
            comparer: None,
            ordering: None,
        }
    }

    /// Sets the generic arguments; they become part of the short name.
    #[inline]
    pub fn generics(mut self, args: impl Into<Vec<TypeRef>>) -> Self {
        self.generics = args.into();
        self
    }

    /// Appends a field with a known type.
    pub fn field(mut self, name: impl Into<Cow<'static, str>>, ty: TypeRef) -> Self {
        let index = self.fields.len();
        self.fields.push(FieldDescriptor::eager(name.into(), index, ty));
        self
    }

    /// Appends a field whose type is resolved on first access.
    pub fn lazy_field<F>(mut self, name: impl Into<Cow<'static, str>>, init: F) -> Self
    where
        F: Fn() -> Result<TypeRef, TypeResolutionError> + Send + Sync + 'static,
    {
        let index = self.fields.len();
        self.fields
            .push(FieldDescriptor::lazy(name.into(), index, Box::new(init)));
        self
    }

    /// Marks instances as comparers for sorted containers.
    #[inline]
    pub fn comparer(mut self, compare: ComparerFn) -> Self {
        self.comparer = Some(compare);
        self
    }

    /// Gives instances a natural ordering.
    #[inline]
    pub fn ordering(mut self, compare: OrderingFn) -> Self {
        self.ordering = Some(compare);
        self
    }

    pub fn build(self) -> TypeDescriptor {
        let info = ObjectInfo {
            fields: self.fields.into_boxed_slice(),
            comparer: self.comparer,
            ordering: self.ordering,
        };
        TypeDescriptor::object(self.path, self.generics, info)
    }
}
