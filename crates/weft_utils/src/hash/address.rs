use crate::hash::HashMap;

/// A map keyed by the address of a shared allocation.
///
/// Used for identity tables, where two values are "the same" only when
/// they point to the same allocation.
pub type AddressMap<V> = HashMap<usize, V>;

/// Returns the address of `value` as a map key.
///
/// Metadata of wide pointers is discarded, so a slice and its first
/// element share a key.
///
/// # Examples
///
/// ```
/// use weft_utils::hash::address_of;
///
/// let a = 1_u32;
/// let b = 1_u32;
/// assert_eq!(address_of(&a), address_of(&a));
/// assert_ne!(address_of(&a), address_of(&b));
/// ```
#[inline]
pub fn address_of<T: ?Sized>(value: &T) -> usize {
    (value as *const T).cast::<()>() as usize
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;

    use super::*;

    #[test]
    fn shared_allocation_keeps_address() {
        let a = Rc::new(7_i32);
        let b = Rc::clone(&a);
        let c = Rc::new(7_i32);

        let mut map = AddressMap::default();
        map.insert(address_of(&*a), "a");

        assert_eq!(map.get(&address_of(&*b)), Some(&"a"));
        assert_eq!(map.get(&address_of(&*c)), None);
    }
}
