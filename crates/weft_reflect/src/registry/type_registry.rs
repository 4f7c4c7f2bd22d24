use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use std::sync::{LazyLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use weft_utils::hash::HashMap;

use crate::TypeResolutionError;
use crate::catalog;
use crate::info::{TypeDescriptor, TypeRef};
use crate::registry::{GenericDefinition, Instantiation, TypeName, builtin};

static GLOBAL: LazyLock<TypeRegistry> = LazyLock::new(TypeRegistry::new);

#[inline]
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

#[inline]
fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

// -----------------------------------------------------------------------------
// TypeRegistry

/// Process-wide store of type descriptors, keyed by short name.
///
/// The registry is the name cache used by decoders: every descriptor it
/// publishes is leaked and kept for the rest of the process, so a short
/// name maps to the same [`TypeRef`] forever.
///
/// Misses are resolved without holding a lock: the descriptor is computed
/// first, then inserted only if no other thread got there first. Concurrent
/// first lookups of one name therefore all return the same descriptor.
///
/// # Examples
///
/// ```
/// use weft_reflect::registry::TypeRegistry;
/// use weft_reflect::types;
/// use weft_reflect::info::Typed;
///
/// let registry = TypeRegistry::global();
/// let name = "weft_reflect::collections::ImmutableQueue[[i64, core]], weft_reflect";
///
/// let queue = registry.resolve(name).unwrap();
/// assert!(core::ptr::eq(queue, types::queue_of(i64::type_descriptor())));
///
/// assert!(registry.resolve("nowhere::Missing, nowhere").is_err());
/// ```
pub struct TypeRegistry {
    names: RwLock<HashMap<Cow<'static, str>, TypeRef>>,
    generics: RwLock<HashMap<Box<str>, GenericDefinition>>,
    #[cfg(feature = "auto_register")]
    auto_registered: std::sync::Once,
}

impl TypeRegistry {
    /// Creates a registry without any entry, not even primitives.
    pub fn empty() -> Self {
        Self {
            names: RwLock::new(HashMap::default()),
            generics: RwLock::new(HashMap::default()),
            #[cfg(feature = "auto_register")]
            auto_registered: std::sync::Once::new(),
        }
    }

    /// Creates a registry with the primitives and built-in generic types.
    ///
    /// - primitives: see [`catalog`](crate::catalog)
    /// - `core::option::Option<T>` for primitive `T`
    /// - the immutable containers of [`collections`](crate::collections)
    /// - contracts: `Any`, `Sequence<T>`, `Set<T>`, `Map<K, V>`, `Comparer<T>`
    /// - `DefaultComparer<T>`
    pub fn new() -> Self {
        let registry = Self::empty();
        for ty in catalog::primitives() {
            registry.insert(ty);
        }
        for definition in builtin::definitions() {
            registry.register_generic(definition);
        }
        registry.register(builtin::any_descriptor());
        registry
    }

    /// The registry shared by the whole process.
    #[inline]
    pub fn global() -> &'static TypeRegistry {
        &GLOBAL
    }

    /// Looks up a published descriptor without resolving anything.
    #[inline]
    pub fn get(&self, short_name: &str) -> Option<TypeRef> {
        read(&self.names).get(short_name).copied()
    }

    #[inline]
    pub fn contains(&self, short_name: &str) -> bool {
        read(&self.names).contains_key(short_name)
    }

    /// Number of cached names, aliases included.
    #[inline]
    pub fn len(&self) -> usize {
        read(&self.names).len()
    }

    /// Publishes `descriptor` under its short name.
    ///
    /// If the name is already taken the existing descriptor is returned and
    /// `descriptor` is dropped.
    pub fn register(&self, descriptor: TypeDescriptor) -> TypeRef {
        let mut names = write(&self.names);
        if let Some(&existing) = names.get(descriptor.short_name()) {
            return existing;
        }
        let ty: TypeRef = Box::leak(Box::new(descriptor));
        names.insert(Cow::Borrowed(ty.short_name()), ty);
        log::debug!("registered type `{}`", ty.short_name());
        ty
    }

    /// Adds an already published descriptor, e.g. a catalog primitive.
    pub fn insert(&self, ty: TypeRef) {
        write(&self.names)
            .entry(Cow::Borrowed(ty.short_name()))
            .or_insert(ty);
    }

    fn alias(&self, name: &str, ty: TypeRef) {
        write(&self.names)
            .entry(Cow::Owned(name.into()))
            .or_insert(ty);
    }

    /// Makes a generic definition resolvable by name.
    ///
    /// Returns `false` if a definition with the same path was already known.
    pub fn register_generic(&self, definition: &GenericDefinition) -> bool {
        let key = definition.path().definition_key();
        if read(&self.generics).contains_key(key.as_str()) {
            return false;
        }
        let mut generics = write(&self.generics);
        if generics.contains_key(key.as_str()) {
            return false;
        }
        generics.insert(key.into_boxed_str(), definition.clone());
        true
    }

    /// Finds a generic definition by `path, crate`.
    pub fn generic_definition(&self, key: &str) -> Option<GenericDefinition> {
        read(&self.generics).get(key).cloned()
    }

    /// Instantiates `definition` with `args`, registering the definition
    /// itself on first use.
    pub fn instantiate(
        &self,
        definition: &GenericDefinition,
        args: &[TypeRef],
    ) -> Result<TypeRef, TypeResolutionError> {
        definition.check_arity(args.len())?;
        let instantiation = Instantiation::new(definition.path(), args);
        if let Some(ty) = self.get(instantiation.short_name()) {
            return Ok(ty);
        }
        self.register_generic(definition);
        let descriptor = definition.build(&instantiation)?;
        Ok(self.register(descriptor))
    }

    /// Instantiates a built-in definition whose builder cannot fail.
    pub(crate) fn instantiate_builtin(
        &self,
        definition: &GenericDefinition,
        args: &[TypeRef],
        build: impl FnOnce(&Instantiation<'_>) -> TypeDescriptor,
    ) -> TypeRef {
        let instantiation = Instantiation::new(definition.path(), args);
        if let Some(ty) = self.get(instantiation.short_name()) {
            return ty;
        }
        self.register(build(&instantiation))
    }

    /// The one-dimensional array type of `element`.
    pub fn array_of(&self, element: TypeRef) -> TypeRef {
        let descriptor = TypeDescriptor::array(element);
        if let Some(ty) = self.get(descriptor.short_name()) {
            return ty;
        }
        self.register(descriptor)
    }

    /// Resolves a short name, instantiating generic and array types as needed.
    ///
    /// The name may differ from the canonical short name in spacing; such
    /// spellings are cached as aliases.
    pub fn resolve(&self, short_name: &str) -> Result<TypeRef, TypeResolutionError> {
        if let Some(ty) = self.get(short_name) {
            return Ok(ty);
        }
        let name = TypeName::parse(short_name)?;
        let ty = self.resolve_name(&name)?;
        if ty.short_name() != short_name {
            self.alias(short_name, ty);
        }
        Ok(ty)
    }

    fn resolve_name(&self, name: &TypeName<'_>) -> Result<TypeRef, TypeResolutionError> {
        if let Some(ty) = self.get(name.source()) {
            return Ok(ty);
        }
        if name.rank() > 0 {
            let element = self.resolve_name(&name.element())?;
            return Ok(self.array_of(element));
        }

        let key = name.definition_key();
        if name.args().is_empty() {
            return self
                .get(&key)
                .or_else(|| {
                    self.auto_register();
                    self.get(&key)
                })
                .ok_or_else(|| TypeResolutionError::UnknownType {
                    name: name.source().into(),
                });
        }

        let args = name
            .args()
            .iter()
            .map(|arg| self.resolve_name(arg))
            .collect::<Result<Vec<_>, _>>()?;
        let definition = self
            .generic_definition(&key)
            .or_else(|| {
                self.auto_register();
                self.generic_definition(&key)
            })
            .ok_or_else(|| TypeResolutionError::UnknownType {
                name: key.as_str().into(),
            })?;
        self.instantiate(&definition, &args)
    }

    /// Runs the registrations submitted with [`submit_type!`](crate::submit_type).
    ///
    /// Runs at most once per registry and is triggered automatically the
    /// first time a name lookup misses. Returns `false` when the
    /// `auto_register` feature is disabled.
    pub fn auto_register(&self) -> bool {
        #[cfg(feature = "auto_register")]
        {
            self.auto_registered.call_once(|| {
                let count = crate::registry::auto_register::run(self);
                log::debug!("auto registered {count} type(s)");
            });
            true
        }
        #[cfg(not(feature = "auto_register"))]
        {
            false
        }
    }
}

impl Default for TypeRegistry {
    /// See [`TypeRegistry::new`].
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("names", &self.len())
            .field("generics", &read(&self.generics).len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Barrier;
    use std::thread;

    use super::*;
    use crate::info::{ObjectBuilder, Typed};
    use crate::registry::GenericDefinition;
    use crate::types;

    static PAIR: GenericDefinition =
        GenericDefinition::new("registry_tests::Pair", "registry_tests", 2, |inst| {
            Ok(inst
                .object()
                .field("left", inst.args()[0])
                .field("right", inst.args()[1])
                .build())
        });

    #[test]
    fn primitives_resolve_from_new_registry() {
        let registry = TypeRegistry::new();
        for ty in catalog::primitives() {
            assert!(core::ptr::eq(registry.resolve(ty.short_name()).unwrap(), ty));
        }
    }

    #[test]
    fn empty_registry_knows_nothing() {
        let registry = TypeRegistry::empty();
        assert_eq!(registry.len(), 0);
        assert!(registry.resolve("i32, core").is_err());
    }

    #[test]
    fn register_keeps_first_descriptor() {
        let registry = TypeRegistry::new();
        let first = registry.register(ObjectBuilder::new("registry_tests::Dup", "registry_tests").build());
        let second = registry.register(
            ObjectBuilder::new("registry_tests::Dup", "registry_tests")
                .field("ignored", i32::type_descriptor())
                .build(),
        );
        assert!(core::ptr::eq(first, second));
        assert_eq!(second.as_object().unwrap().field_len(), 0);
    }

    #[test]
    fn resolve_nested_generics() {
        let registry = TypeRegistry::global();
        let pair = registry
            .instantiate(&PAIR, &[i32::type_descriptor(), types::list_of(String::type_descriptor())])
            .unwrap();
        let name = pair.short_name();
        assert_eq!(
            name,
            "registry_tests::Pair[[i32, core],[weft_reflect::collections::ImmutableList[[str, core]], weft_reflect]], registry_tests"
        );
        assert!(core::ptr::eq(registry.resolve(name).unwrap(), pair));

        // A new combination is instantiated from the name alone.
        let other = registry
            .resolve("registry_tests::Pair[[u8, core],[i64, core]], registry_tests")
            .unwrap();
        let left = other.as_object().unwrap().field("left").unwrap();
        assert_eq!(left.field_type().unwrap().short_name(), "u8, core");
    }

    #[test]
    fn resolve_accepts_spacing_variants() {
        let registry = TypeRegistry::global();
        let canonical = types::list_of(i32::type_descriptor());
        let spaced = "weft_reflect::collections::ImmutableList[[ i32,  core ]],  weft_reflect";
        assert!(core::ptr::eq(registry.resolve(spaced).unwrap(), canonical));
        assert!(registry.contains(spaced));
    }

    #[test]
    fn resolve_arrays() {
        let registry = TypeRegistry::global();
        let jagged = registry.resolve("i32[][], core").unwrap();
        let inner = jagged.array_element().unwrap();
        assert!(core::ptr::eq(inner, types::array_of(i32::type_descriptor())));
        assert!(core::ptr::eq(inner.array_element().unwrap(), i32::type_descriptor()));
    }

    #[test]
    fn resolution_errors() {
        let registry = TypeRegistry::global();
        assert!(matches!(
            registry.resolve("registry_tests::Nope, registry_tests"),
            Err(TypeResolutionError::UnknownType { .. })
        ));
        assert!(matches!(
            registry.resolve("registry_tests::Nope[[i32, core]], registry_tests"),
            Err(TypeResolutionError::UnknownType { .. })
        ));
        assert!(matches!(
            registry.resolve("weft_reflect::collections::ImmutableList[[nope::X, nope]], weft_reflect"),
            Err(TypeResolutionError::UnknownType { .. })
        ));
        assert!(matches!(
            registry.resolve("weft_reflect::collections::ImmutableMap[[i32, core]], weft_reflect"),
            Err(TypeResolutionError::ArityMismatch { expected: 2, found: 1, .. })
        ));
        assert!(matches!(
            registry.resolve("core::option::Option[[weft_reflect::contracts::Any, weft_reflect]], core"),
            Err(TypeResolutionError::InvalidArgument { .. })
        ));
        assert!(matches!(
            registry.resolve("broken[[, x"),
            Err(TypeResolutionError::MalformedName { .. })
        ));
    }

    #[test]
    fn concurrent_first_resolution_publishes_once() {
        const THREADS: usize = 8;
        let name = "registry_tests::Pair[[i16, core],[weft_reflect::collections::ImmutableStack[[char, core]], weft_reflect]], registry_tests";
        TypeRegistry::global().register_generic(&PAIR);

        let barrier = Barrier::new(THREADS);
        let resolved = thread::scope(|scope| {
            let handles: Vec<_> = (0..THREADS)
                .map(|_| {
                    scope.spawn(|| {
                        barrier.wait();
                        TypeRegistry::global().resolve(name).unwrap() as *const TypeDescriptor as usize
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().unwrap())
                .collect::<Vec<_>>()
        });

        assert_eq!(resolved.len(), THREADS);
        assert!(resolved.iter().all(|&addr| addr == resolved[0]));
        let cached = TypeRegistry::global().get(name).unwrap();
        assert_eq!(cached as *const TypeDescriptor as usize, resolved[0]);
        assert_eq!(cached.generics().len(), 2);
    }
}
