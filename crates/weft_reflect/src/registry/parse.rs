use alloc::borrow::Cow;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::TypeResolutionError;

// -----------------------------------------------------------------------------
// TypeName

/// A parsed short type name.
///
/// ```text
/// name := stem ", " crate
/// stem := path ( "[" "[" name "]" ( "," "[" name "]" )* "]" )? ( "[]" )*
/// ```
///
/// # Examples
///
/// ```
/// use weft_reflect::registry::TypeName;
///
/// let name = TypeName::parse("demo::Pair[[i32, core],[str, core]][], demo").unwrap();
/// assert_eq!(name.path(), "demo::Pair");
/// assert_eq!(name.module(), "demo");
/// assert_eq!(name.rank(), 1);
///
/// let element = name.element();
/// assert_eq!(element.source(), "demo::Pair[[i32, core],[str, core]], demo");
/// assert_eq!(element.args().len(), 2);
/// assert_eq!(element.args()[1].source(), "str, core");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeName<'a> {
    source: Cow<'a, str>,
    stem: &'a str,
    path: &'a str,
    module: &'a str,
    args: Vec<TypeName<'a>>,
    rank: usize,
}

impl<'a> TypeName<'a> {
    /// Parses a complete short name.
    pub fn parse(input: &'a str) -> Result<Self, TypeResolutionError> {
        let mut parser = Parser { input, pos: 0 };
        let name = parser.name()?;
        parser.skip_spaces();
        if parser.pos != input.len() {
            return Err(parser.error());
        }
        Ok(name)
    }

    /// The text this name was parsed from.
    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[inline]
    pub fn path(&self) -> &'a str {
        self.path
    }

    #[inline]
    pub fn module(&self) -> &'a str {
        self.module
    }

    /// Generic arguments, empty for non-generic names.
    #[inline]
    pub fn args(&self) -> &[TypeName<'a>] {
        &self.args
    }

    /// Number of trailing `[]`.
    #[inline]
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// `path, module`, the lookup key of the generic definition or plain type.
    pub fn definition_key(&self) -> String {
        format!("{}, {}", self.path, self.module)
    }

    /// The name with one `[]` removed; `self` when it is not an array.
    pub fn element(&self) -> TypeName<'a> {
        if self.rank == 0 {
            return self.clone();
        }
        let stem = &self.stem[..self.stem.len() - 2];
        TypeName {
            source: Cow::Owned(format!("{}, {}", stem, self.module)),
            stem,
            path: self.path,
            module: self.module,
            args: self.args.clone(),
            rank: self.rank - 1,
        }
    }
}

// -----------------------------------------------------------------------------
// Parser

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn error(&self) -> TypeResolutionError {
        TypeResolutionError::MalformedName {
            name: self.input.into(),
            position: self.pos,
        }
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    #[inline]
    fn peek_second(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos + 1).copied()
    }

    fn eat(&mut self, byte: u8) -> Result<(), TypeResolutionError> {
        if self.peek() == Some(byte) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.error())
        }
    }

    fn skip_spaces(&mut self) {
        while self.peek() == Some(b' ') {
            self.pos += 1;
        }
    }

    /// A path or crate segment, up to the next delimiter.
    fn segment(&mut self) -> Result<&'a str, TypeResolutionError> {
        let start = self.pos;
        while let Some(byte) = self.peek() {
            if matches!(byte, b'[' | b']' | b',') {
                break;
            }
            self.pos += 1;
        }
        let segment = self.input[start..self.pos].trim();
        if segment.is_empty() {
            return Err(self.error());
        }
        Ok(segment)
    }

    fn name(&mut self) -> Result<TypeName<'a>, TypeResolutionError> {
        self.skip_spaces();
        let start = self.pos;
        let path = self.segment()?;

        let mut args = Vec::new();
        if self.peek() == Some(b'[') && self.peek_second() == Some(b'[') {
            self.pos += 1;
            loop {
                self.eat(b'[')?;
                args.push(self.name()?);
                self.eat(b']')?;
                if self.peek() != Some(b',') {
                    break;
                }
                self.pos += 1;
                self.skip_spaces();
            }
            self.eat(b']')?;
        }

        let mut rank = 0;
        while self.peek() == Some(b'[') && self.peek_second() == Some(b']') {
            self.pos += 2;
            rank += 1;
        }
        let stem = self.input[start..self.pos].trim_end();

        self.eat(b',')?;
        self.skip_spaces();
        let module = self.segment()?;

        Ok(TypeName {
            source: Cow::Borrowed(self.input[start..self.pos].trim_end()),
            stem,
            path,
            module,
            args,
            rank,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_name() {
        let name = TypeName::parse("demo::Something, demo").unwrap();
        assert_eq!(name.path(), "demo::Something");
        assert_eq!(name.module(), "demo");
        assert!(name.args().is_empty());
        assert_eq!(name.rank(), 0);
        assert_eq!(name.definition_key(), "demo::Something, demo");
    }

    #[test]
    fn nested_generics() {
        let input = "a::Map[[str, core],[a::List[[b::Item, b]], a]], a";
        let name = TypeName::parse(input).unwrap();
        assert_eq!(name.source(), input);
        assert_eq!(name.args().len(), 2);

        let list = &name.args()[1];
        assert_eq!(list.source(), "a::List[[b::Item, b]], a");
        assert_eq!(list.args()[0].source(), "b::Item, b");
    }

    #[test]
    fn arrays() {
        let name = TypeName::parse("i32[][], core").unwrap();
        assert_eq!(name.rank(), 2);
        assert_eq!(name.element().source(), "i32[], core");
        assert_eq!(name.element().element().source(), "i32, core");
    }

    #[test]
    fn malformed() {
        for input in [
            "",
            "demo::Something",
            "demo::Something,",
            "a::List[[i32, core], a",
            "a::List[[i32, core]] , a extra]",
            "a::List[i32, core], a",
        ] {
            let err = TypeName::parse(input).unwrap_err();
            assert!(
                matches!(err, TypeResolutionError::MalformedName { .. }),
                "{input}: {err:?}"
            );
        }
    }
}
