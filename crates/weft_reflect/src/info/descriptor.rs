use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::hash::{Hash, Hasher};

use crate::catalog::Primitive;
use crate::info::{CollectionInfo, CollectionKind, ObjectInfo, TypeFlags, TypeKind, TypePath};

/// A published, process-lifetime [`TypeDescriptor`].
///
/// Two `TypeRef`s denote the same type exactly when they point to the same
/// descriptor; equality and hashing use the address.
pub type TypeRef = &'static TypeDescriptor;

// -----------------------------------------------------------------------------
// TypeDescriptor

/// Runtime identity and shape of a type.
///
/// # Short names
///
/// Every descriptor has a canonical short name, the string written into
/// streams the first time the type occurs:
///
/// - plain types: `path, crate`, e.g. `demo::Something, demo`
/// - generic types: `path[[arg],[arg]], crate`, each `arg` a short name
/// - arrays: the element's name with `[]` before the crate, e.g. `i32[], core`
///
/// # Examples
///
/// ```
/// use weft_reflect::info::Typed;
/// use weft_reflect::types;
///
/// let list = types::list_of(i32::type_descriptor());
/// assert_eq!(
///     list.short_name(),
///     "weft_reflect::collections::ImmutableList[[i32, core]], weft_reflect",
/// );
///
/// let array = types::array_of(i32::type_descriptor());
/// assert_eq!(array.short_name(), "i32[], core");
/// ```
pub struct TypeDescriptor {
    path: TypePath,
    stem: Cow<'static, str>,
    short_name: Cow<'static, str>,
    generics: Cow<'static, [TypeRef]>,
    flags: TypeFlags,
    kind: TypeKind,
}

/// Builds the stem (`path[[arg],[arg]]`) and the full short name of a type.
pub(crate) fn compose_names(path: &TypePath, generics: &[TypeRef]) -> (String, String) {
    let mut stem = String::from(path.path());
    if !generics.is_empty() {
        stem.push('[');
        for (idx, arg) in generics.iter().enumerate() {
            if idx > 0 {
                stem.push(',');
            }
            stem.push('[');
            stem.push_str(arg.short_name());
            stem.push(']');
        }
        stem.push(']');
    }
    let mut short_name = String::with_capacity(stem.len() + path.module().len() + 2);
    short_name.push_str(&stem);
    short_name.push_str(", ");
    short_name.push_str(path.module());
    (stem, short_name)
}

impl TypeDescriptor {
    /// Descriptor of a catalog primitive; only used for the static table.
    pub(crate) const fn primitive(
        primitive: Primitive,
        path: &'static str,
        module: &'static str,
        short_name: &'static str,
    ) -> Self {
        let kind = TypeKind::Primitive(primitive);
        Self {
            path: TypePath::new(path, module),
            stem: Cow::Borrowed(path),
            short_name: Cow::Borrowed(short_name),
            generics: Cow::Borrowed(&[]),
            flags: kind.flags(),
            kind,
        }
    }

    /// Creates a descriptor with a computed short name.
    pub(crate) fn from_parts(path: TypePath, generics: Vec<TypeRef>, kind: TypeKind) -> Self {
        let (stem, short_name) = compose_names(&path, &generics);
        let mut flags = kind.flags();
        if !generics.is_empty() {
            flags |= TypeFlags::GENERIC;
        }
        Self {
            path,
            stem: Cow::Owned(stem),
            short_name: Cow::Owned(short_name),
            generics: Cow::Owned(generics),
            flags,
            kind,
        }
    }

    /// A one-dimensional array of `element`.
    pub(crate) fn array(element: TypeRef) -> Self {
        let mut stem = String::from(element.stem());
        stem.push_str("[]");
        let mut short_name = stem.clone();
        short_name.push_str(", ");
        short_name.push_str(element.path.module());
        let kind = TypeKind::Array(element);
        Self {
            path: element.path.clone(),
            stem: Cow::Owned(stem),
            short_name: Cow::Owned(short_name),
            generics: Cow::Borrowed(&[]),
            flags: kind.flags(),
            kind,
        }
    }

    /// A built-in container type.
    pub(crate) fn collection(path: TypePath, kind: CollectionKind, generics: Vec<TypeRef>) -> Self {
        let info = CollectionInfo::new(kind, generics[0], generics.get(1).copied());
        Self::from_parts(path, generics, TypeKind::Collection(info))
    }

    /// Creates a plain-object descriptor.
    ///
    /// Prefer [`ObjectBuilder`](crate::info::ObjectBuilder), which assigns
    /// field indices.
    #[inline]
    pub fn object(path: TypePath, generics: Vec<TypeRef>, info: ObjectInfo) -> Self {
        Self::from_parts(path, generics, TypeKind::Object(info))
    }

    /// Creates an interface-like descriptor, usable only as a static type.
    #[inline]
    pub fn contract(path: TypePath, generics: Vec<TypeRef>) -> Self {
        Self::from_parts(path, generics, TypeKind::Contract)
    }

    /// Creates a descriptor whose values cannot be serialized without a surrogate.
    #[inline]
    pub fn opaque(path: TypePath) -> Self {
        Self::from_parts(path, Vec::new(), TypeKind::Opaque)
    }

    #[inline]
    pub fn path(&self) -> &TypePath {
        &self.path
    }

    /// The canonical short name, see the [type-level docs](Self).
    #[inline]
    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    /// The short name without the trailing `, crate`.
    #[inline]
    pub fn stem(&self) -> &str {
        &self.stem
    }

    /// Generic arguments, in declaration order.
    #[inline]
    pub fn generics(&self) -> &[TypeRef] {
        &self.generics
    }

    #[inline]
    pub const fn flags(&self) -> TypeFlags {
        self.flags
    }

    #[inline]
    pub const fn kind(&self) -> &TypeKind {
        &self.kind
    }

    #[inline]
    pub const fn as_primitive(&self) -> Option<Primitive> {
        match self.kind {
            TypeKind::Primitive(p) => Some(p),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_object(&self) -> Option<&ObjectInfo> {
        match &self.kind {
            TypeKind::Object(info) => Some(info),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_collection(&self) -> Option<&CollectionInfo> {
        match &self.kind {
            TypeKind::Collection(info) => Some(info),
            _ => None,
        }
    }

    /// The element type of an array descriptor.
    #[inline]
    pub const fn array_element(&self) -> Option<TypeRef> {
        match self.kind {
            TypeKind::Array(element) => Some(element),
            _ => None,
        }
    }

    /// The wrapped type of a nullable descriptor.
    #[inline]
    pub const fn nullable_inner(&self) -> Option<TypeRef> {
        match self.kind {
            TypeKind::Nullable(inner) => Some(inner),
            _ => None,
        }
    }

    /// Whether values of this type are shared allocations with an identity.
    #[inline]
    pub const fn is_reference(&self) -> bool {
        self.flags.contains(TypeFlags::REFERENCE)
    }

    /// Whether a value whose runtime type is `self` may be stored where
    /// `target` is the declared type.
    ///
    /// Contracts accept every runtime type; concrete types only accept
    /// themselves.
    #[inline]
    pub fn is_assignable_to(&'static self, target: TypeRef) -> bool {
        target.flags.contains(TypeFlags::CONTRACT) || core::ptr::eq(self, target)
    }
}

impl PartialEq for TypeDescriptor {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self, other)
    }
}

impl Eq for TypeDescriptor {}

impl Hash for TypeDescriptor {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        core::ptr::hash(self, state);
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("name", &self.short_name)
            .field("kind", &self.kind)
            .finish()
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.short_name)
    }
}
