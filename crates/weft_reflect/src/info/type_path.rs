use alloc::borrow::Cow;
use alloc::string::String;
use core::fmt;

// -----------------------------------------------------------------------------
// TypePath

/// The qualified path of a type and the crate it comes from.
///
/// The path never carries generic arguments; those are part of the
/// [`TypeDescriptor`](crate::info::TypeDescriptor).
///
/// # Examples
///
/// ```
/// use weft_reflect::info::TypePath;
///
/// let path = TypePath::new("demo::shapes::Circle", "demo");
/// assert_eq!(path.ident(), "Circle");
/// assert_eq!(path.definition_key(), "demo::shapes::Circle, demo");
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TypePath {
    path: Cow<'static, str>,
    module: Cow<'static, str>,
}

impl TypePath {
    /// Creates a path from static strings.
    #[inline]
    pub const fn new(path: &'static str, module: &'static str) -> Self {
        Self {
            path: Cow::Borrowed(path),
            module: Cow::Borrowed(module),
        }
    }

    /// Creates a path from owned strings, used for names decoded at runtime.
    #[inline]
    pub fn owned(path: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            path: Cow::Owned(path.into()),
            module: Cow::Owned(module.into()),
        }
    }

    /// The qualified path, e.g. `demo::shapes::Circle`.
    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The originating crate, e.g. `demo`.
    #[inline]
    pub fn module(&self) -> &str {
        &self.module
    }

    /// The last path segment.
    pub fn ident(&self) -> &str {
        match self.path.rfind("::") {
            Some(idx) => &self.path[idx + 2..],
            None => &self.path,
        }
    }

    /// `path, module`; the key under which a generic definition is stored.
    pub fn definition_key(&self) -> String {
        let mut key = String::with_capacity(self.path.len() + self.module.len() + 2);
        key.push_str(&self.path);
        key.push_str(", ");
        key.push_str(&self.module);
        key
    }
}

impl fmt::Debug for TypePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.path, self.module)
    }
}
