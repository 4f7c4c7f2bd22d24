use core::fmt;

use weft_reflect::info::TypeRef;

/// The chain of types leading to the value being processed.
#[derive(Default, Clone)]
pub(super) struct TypeStack {
    stack: Vec<TypeRef>,
}

impl TypeStack {
    #[inline]
    pub fn push(&mut self, ty: TypeRef) {
        self.stack.push(ty);
    }

    #[inline]
    pub fn pop(&mut self) {
        self.stack.pop();
    }
}

impl fmt::Debug for TypeStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut iter = self.stack.iter();
        if let Some(first) = iter.next() {
            writeln!(f, "`{}`", first.short_name())?;
        }
        for ty in iter {
            writeln!(f, " -> `{}`", ty.short_name())?;
        }
        Ok(())
    }
}
