use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use weft_utils::hash::address_of;

use crate::ValueError;
use crate::info::TypeRef;
use crate::types;
use crate::value::{Value, zero_value};

// -----------------------------------------------------------------------------
// Array

/// A mutable one-dimensional array.
///
/// Unlike [`ImmutableArray`](crate::collections::ImmutableArray) the length
/// is fixed but slots can be assigned, so decoders can register an array
/// before its elements exist.
pub struct Array {
    ty: TypeRef,
    element: TypeRef,
    items: RefCell<Vec<Value>>,
}

impl Array {
    /// The array type, e.g. `i32[], core`.
    #[inline]
    pub fn ty(&self) -> TypeRef {
        self.ty
    }

    #[inline]
    pub fn element_type(&self) -> TypeRef {
        self.element
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<Value> {
        self.items.borrow().get(index).cloned()
    }

    pub fn set(&self, index: usize, value: Value) -> Result<(), ValueError> {
        match self.items.borrow_mut().get_mut(index) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(ValueError::IndexOutOfRange {
                ty: self.ty,
                index,
            }),
        }
    }

    /// Snapshot of the elements.
    #[inline]
    pub fn to_vec(&self) -> Vec<Value> {
        self.items.borrow().clone()
    }
}

// -----------------------------------------------------------------------------
// ArrayRef

/// A shared handle to an [`Array`].
///
/// # Examples
///
/// ```
/// use weft_reflect::info::Typed;
/// use weft_reflect::value::{ArrayRef, Value};
///
/// let array = ArrayRef::zeroed(i32::type_descriptor(), 3);
/// array.set(1, Value::I32(5)).unwrap();
///
/// assert_eq!(array.len(), 3);
/// assert_eq!(array.get(1).unwrap().as_i32(), Some(5));
/// assert!(array.set(3, Value::I32(1)).is_err());
/// ```
#[derive(Clone)]
pub struct ArrayRef(Rc<Array>);

impl ArrayRef {
    pub fn new(element: TypeRef, items: impl IntoIterator<Item = Value>) -> Self {
        Self(Rc::new(Array {
            ty: types::array_of(element),
            element,
            items: RefCell::new(items.into_iter().collect()),
        }))
    }

    /// An array of `len` zero values.
    pub fn zeroed(element: TypeRef, len: usize) -> Self {
        let zero = zero_value(element);
        Self::new(element, core::iter::repeat_n(zero, len))
    }

    #[inline]
    pub fn ptr_eq(&self, other: &ArrayRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    #[inline]
    pub fn address(&self) -> usize {
        address_of(&*self.0)
    }
}

impl core::ops::Deref for ArrayRef {
    type Target = Array;

    #[inline]
    fn deref(&self) -> &Array {
        &self.0
    }
}

impl fmt::Debug for ArrayRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{:#x}", self.ty.stem(), self.address())
    }
}
