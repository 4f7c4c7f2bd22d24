//! Serializer configuration.
//!
//! Both ends of a stream must agree on the options that shape the bytes:
//! the known type list, the surrogates and whether object references are
//! preserved. None of them is recorded in the stream.

use core::fmt;

use weft_reflect::ValueError;
use weft_reflect::info::TypeRef;
use weft_reflect::value::Value;
use weft_utils::hash::{AddressMap, address_of};

/// Default limit on nested reference values.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Default limit on collection counts and string lengths.
pub const DEFAULT_MAX_LENGTH: usize = 1 << 24;

// -----------------------------------------------------------------------------
// Surrogate

/// Converts a value to its surrogate form.
pub type ToSurrogateFn = fn(&Value) -> Result<Value, ValueError>;

/// Rebuilds a value from its surrogate form.
pub type FromSurrogateFn = fn(Value) -> Result<Value, ValueError>;

/// Stands in for a type that cannot be serialized directly.
///
/// On write, a value of the `source` type is written as the source
/// manifest followed by its surrogate, itself a complete value of the
/// `target` type. On read, a source manifest for which a surrogate is
/// registered is followed by that surrogate value, which is then converted
/// back.
///
/// The source value takes part in reference tracking like any other, so a
/// shared source value is converted once and written once.
#[derive(Clone, Copy)]
pub struct Surrogate {
    source: TypeRef,
    target: TypeRef,
    to_surrogate: ToSurrogateFn,
    from_surrogate: FromSurrogateFn,
}

impl Surrogate {
    pub const fn new(
        source: TypeRef,
        target: TypeRef,
        to_surrogate: ToSurrogateFn,
        from_surrogate: FromSurrogateFn,
    ) -> Self {
        Self {
            source,
            target,
            to_surrogate,
            from_surrogate,
        }
    }

    /// The type being replaced.
    #[inline]
    pub const fn source(&self) -> TypeRef {
        self.source
    }

    /// The type written in its place.
    #[inline]
    pub const fn target(&self) -> TypeRef {
        self.target
    }

    #[inline]
    pub fn to_surrogate(&self, value: &Value) -> Result<Value, ValueError> {
        (self.to_surrogate)(value)
    }

    #[inline]
    pub fn from_surrogate(&self, value: Value) -> Result<Value, ValueError> {
        (self.from_surrogate)(value)
    }
}

impl fmt::Debug for Surrogate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Surrogate")
            .field("source", &self.source.short_name())
            .field("target", &self.target.short_name())
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// SerializerOptions

/// Options shared by a writer and the reader of its output.
///
/// # Examples
///
/// ```
/// use weft_reflect::info::Typed;
/// use weft_wire::SerializerOptions;
///
/// let options = SerializerOptions::new()
///     .with_known_type(String::type_descriptor())
///     .with_max_depth(64);
///
/// assert_eq!(options.known_index(String::type_descriptor()), Some(0));
/// assert_eq!(options.max_depth(), 64);
/// assert!(options.preserve_object_references());
/// ```
#[derive(Clone)]
pub struct SerializerOptions {
    known_types: Vec<TypeRef>,
    known_index: AddressMap<u32>,
    surrogates: Vec<Surrogate>,
    preserve_object_references: bool,
    max_depth: usize,
    max_length: usize,
}

impl SerializerOptions {
    pub fn new() -> Self {
        Self {
            known_types: Vec::new(),
            known_index: AddressMap::default(),
            surrogates: Vec::new(),
            preserve_object_references: true,
            max_depth: DEFAULT_MAX_DEPTH,
            max_length: DEFAULT_MAX_LENGTH,
        }
    }

    /// Appends a type both ends know by position.
    ///
    /// Registering a type twice keeps its first position.
    pub fn with_known_type(mut self, ty: TypeRef) -> Self {
        let next = self.known_types.len() as u32;
        self.known_index.entry(address_of(ty)).or_insert_with(|| {
            self.known_types.push(ty);
            next
        });
        self
    }

    pub fn with_known_types(self, types: impl IntoIterator<Item = TypeRef>) -> Self {
        types.into_iter().fold(self, Self::with_known_type)
    }

    /// Adds a surrogate, replacing any earlier one for the same source.
    pub fn with_surrogate(mut self, surrogate: Surrogate) -> Self {
        self.surrogates
            .retain(|s| !core::ptr::eq(s.source, surrogate.source));
        self.surrogates.push(surrogate);
        self
    }

    /// When disabled, every occurrence of a shared value is written in
    /// full and cyclic graphs fail with a depth error.
    pub const fn with_preserve_object_references(mut self, preserve: bool) -> Self {
        self.preserve_object_references = preserve;
        self
    }

    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub const fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    #[inline]
    pub fn known_types(&self) -> &[TypeRef] {
        &self.known_types
    }

    #[inline]
    pub fn known_type(&self, index: u64) -> Option<TypeRef> {
        usize::try_from(index)
            .ok()
            .and_then(|index| self.known_types.get(index).copied())
    }

    #[inline]
    pub fn known_index(&self, ty: TypeRef) -> Option<u32> {
        self.known_index.get(&address_of(ty)).copied()
    }

    /// The surrogate replacing values of `ty`.
    pub fn surrogate_for(&self, ty: TypeRef) -> Option<&Surrogate> {
        self.surrogates.iter().find(|s| core::ptr::eq(s.source, ty))
    }

    #[inline]
    pub const fn preserve_object_references(&self) -> bool {
        self.preserve_object_references
    }

    #[inline]
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }

    #[inline]
    pub const fn max_length(&self) -> usize {
        self.max_length
    }
}

impl Default for SerializerOptions {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SerializerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerializerOptions")
            .field(
                "known_types",
                &self
                    .known_types
                    .iter()
                    .map(|ty| ty.short_name())
                    .collect::<Vec<_>>(),
            )
            .field("surrogates", &self.surrogates)
            .field("preserve_object_references", &self.preserve_object_references)
            .field("max_depth", &self.max_depth)
            .field("max_length", &self.max_length)
            .finish()
    }
}
