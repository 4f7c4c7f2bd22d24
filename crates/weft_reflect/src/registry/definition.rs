use alloc::string::String;
use alloc::vec::Vec;

use crate::TypeResolutionError;
use crate::catalog;
use crate::info::{CollectionKind, ObjectBuilder, TypeDescriptor, TypeKind, TypePath, TypeRef};
use crate::info::compose_names;

/// Builds the descriptor of one instantiation of a generic definition.
pub type BuildFn = fn(&Instantiation<'_>) -> Result<TypeDescriptor, TypeResolutionError>;

// -----------------------------------------------------------------------------
// GenericDefinition

/// An open generic type, instantiated on demand with concrete arguments.
///
/// # Examples
///
/// ```
/// use weft_reflect::info::Typed;
/// use weft_reflect::registry::{GenericDefinition, TypeRegistry};
///
/// static BOX: GenericDefinition = GenericDefinition::new("docs::Boxed", "docs", 1, |inst| {
///     Ok(inst.object().field("inner", inst.args()[0]).build())
/// });
///
/// let registry = TypeRegistry::global();
/// let boxed = registry.instantiate(&BOX, &[i32::type_descriptor()]).unwrap();
/// assert_eq!(boxed.short_name(), "docs::Boxed[[i32, core]], docs");
///
/// // The definition is now known, so the name resolves.
/// let again = registry.resolve("docs::Boxed[[u8, core]], docs").unwrap();
/// assert_eq!(again.generics()[0].short_name(), "u8, core");
/// ```
#[derive(Clone)]
pub struct GenericDefinition {
    path: TypePath,
    arity: usize,
    build: BuildFn,
}

impl GenericDefinition {
    #[inline]
    pub const fn new(path: &'static str, module: &'static str, arity: usize, build: BuildFn) -> Self {
        Self {
            path: TypePath::new(path, module),
            arity,
            build,
        }
    }

    #[inline]
    pub fn path(&self) -> &TypePath {
        &self.path
    }

    /// Number of generic parameters.
    #[inline]
    pub const fn arity(&self) -> usize {
        self.arity
    }

    pub(crate) fn build(&self, instantiation: &Instantiation<'_>) -> Result<TypeDescriptor, TypeResolutionError> {
        (self.build)(instantiation)
    }

    pub(crate) fn check_arity(&self, found: usize) -> Result<(), TypeResolutionError> {
        if found == self.arity {
            Ok(())
        } else {
            Err(TypeResolutionError::ArityMismatch {
                definition: self.path.definition_key().into(),
                expected: self.arity,
                found,
            })
        }
    }
}

impl core::fmt::Debug for GenericDefinition {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GenericDefinition")
            .field("path", &self.path)
            .field("arity", &self.arity)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Instantiation

/// A generic definition applied to concrete arguments.
pub struct Instantiation<'a> {
    path: &'a TypePath,
    args: &'a [TypeRef],
    short_name: String,
}

impl<'a> Instantiation<'a> {
    pub(crate) fn new(path: &'a TypePath, args: &'a [TypeRef]) -> Self {
        let (_, short_name) = compose_names(path, args);
        Self {
            path,
            args,
            short_name,
        }
    }

    /// The generic arguments; their number always equals the arity.
    #[inline]
    pub fn args(&self) -> &'a [TypeRef] {
        self.args
    }

    #[inline]
    pub fn path(&self) -> &TypePath {
        self.path
    }

    /// The short name the instantiated type will have.
    #[inline]
    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    /// An object builder with this path and arguments filled in.
    pub fn object(&self) -> ObjectBuilder {
        ObjectBuilder::with_path(self.path.clone()).generics(self.args.to_vec())
    }

    /// A contract descriptor with this path and arguments.
    pub fn contract(&self) -> TypeDescriptor {
        TypeDescriptor::contract(self.path.clone(), self.args.to_vec())
    }

    pub(crate) fn collection(&self, kind: CollectionKind) -> TypeDescriptor {
        TypeDescriptor::collection(self.path.clone(), kind, self.args.to_vec())
    }

    /// `Option<T>`; only primitives can be wrapped.
    pub(crate) fn nullable(&self) -> Result<TypeDescriptor, TypeResolutionError> {
        let inner = self.args[0];
        if !catalog::is_primitive(inner) {
            return Err(TypeResolutionError::InvalidArgument {
                definition: self.path.definition_key().into(),
                argument: inner.short_name().into(),
            });
        }
        let generics: Vec<TypeRef> = self.args.to_vec();
        Ok(TypeDescriptor::from_parts(
            self.path.clone(),
            generics,
            TypeKind::Nullable(inner),
        ))
    }
}
