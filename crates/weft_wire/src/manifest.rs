//! Type manifests: the wire identity written in front of a value.
//!
//! A manifest appears at most once in full per session. Later occurrences
//! of the same type are written as the session id assigned at first sight.
//!
//! | tag                | body                                              |
//! |--------------------|---------------------------------------------------|
//! | [`tag::FULL`]      | short name, field count, one name per field       |
//! | [`tag::INDEXED`]   | session type id                                   |
//! | [`tag::KNOWN`]     | position in [`SerializerOptions::known_types`]    |
//!
//! Field names let a reader whose local type gained, lost or reordered
//! fields still align the payload by name.

use std::io::{self, Read, Write};

use weft_reflect::info::TypeRef;
use weft_reflect::registry::TypeRegistry;

use crate::error::{MalformedError, Result, SessionProtocolError};
use crate::options::SerializerOptions;
use crate::session::{FieldLayout, Session};
use crate::stream::{ByteReader, ByteWriter};

/// One-byte headers of self-describing values.
pub mod tag {
    /// No value.
    pub const NULL: u8 = 0x00;
    /// A value already written in this session, followed by its object id.
    pub const BACK_REFERENCE: u8 = 0x01;
    /// A [`Full`](super::Manifest::Full) manifest follows.
    pub const FULL: u8 = 0x02;
    /// An [`Indexed`](super::Manifest::Indexed) manifest follows.
    pub const INDEXED: u8 = 0x03;
    /// A [`Known`](super::Manifest::Known) manifest follows.
    pub const KNOWN: u8 = 0x04;
    /// An array: element manifest, count, elements.
    pub const ARRAY: u8 = 0x05;

    /// Whether `tag` starts a manifest.
    #[inline]
    pub const fn is_manifest(tag: u8) -> bool {
        matches!(tag, FULL | INDEXED | KNOWN)
    }
}

// -----------------------------------------------------------------------------
// Manifest

/// A decoded or about-to-be-encoded manifest.
///
/// # Examples
///
/// ```
/// use weft_reflect::info::Typed;
/// use weft_wire::manifest::{Manifest, tag};
/// use weft_wire::stream::{ByteReader, ByteWriter};
///
/// let manifest = Manifest::full(i32::type_descriptor());
/// let mut out = ByteWriter::new(Vec::new());
/// manifest.encode(&mut out).unwrap();
/// let bytes = out.into_inner();
/// assert_eq!(bytes[0], tag::FULL);
///
/// let mut input = ByteReader::new(&bytes[1..]);
/// let decoded = Manifest::decode(tag::FULL, &mut input, 1024).unwrap();
/// assert_eq!(decoded, manifest);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Manifest {
    Full {
        short_name: Box<str>,
        field_names: Vec<Box<str>>,
    },
    Indexed {
        type_id: u64,
    },
    Known {
        index: u64,
    },
}

impl Manifest {
    /// The full manifest of `ty`.
    pub fn full(ty: TypeRef) -> Self {
        let field_names = match ty.as_object() {
            Some(info) => info.field_names().map(Box::from).collect(),
            None => Vec::new(),
        };
        Self::Full {
            short_name: ty.short_name().into(),
            field_names,
        }
    }

    #[inline]
    pub const fn tag(&self) -> u8 {
        match self {
            Self::Full { .. } => tag::FULL,
            Self::Indexed { .. } => tag::INDEXED,
            Self::Known { .. } => tag::KNOWN,
        }
    }

    /// Writes the tag and the body.
    pub fn encode<W: Write>(&self, out: &mut ByteWriter<W>) -> io::Result<()> {
        out.write_u8(self.tag())?;
        match self {
            Self::Full {
                short_name,
                field_names,
            } => {
                out.write_prefixed(short_name.as_bytes())?;
                out.write_len(field_names.len())?;
                for name in field_names {
                    out.write_prefixed(name.as_bytes())?;
                }
                Ok(())
            }
            Self::Indexed { type_id } => out.write_varint(*type_id),
            Self::Known { index } => out.write_varint(*index),
        }
    }

    /// Reads the body of a manifest whose tag was already consumed.
    ///
    /// `limit` bounds every length and count.
    pub fn decode<R: Read>(tag: u8, input: &mut ByteReader<R>, limit: usize) -> Result<Self> {
        match tag {
            tag::FULL => {
                let short_name = read_text(input, limit)?;
                let count = input.read_len(limit)?;
                let mut field_names = Vec::with_capacity(count.min(64));
                for _ in 0..count {
                    field_names.push(read_text(input, limit)?);
                }
                Ok(Self::Full {
                    short_name,
                    field_names,
                })
            }
            tag::INDEXED => Ok(Self::Indexed {
                type_id: input.read_varint()?,
            }),
            tag::KNOWN => Ok(Self::Known {
                index: input.read_varint()?,
            }),
            other => Err(MalformedError::ExpectedManifest(other).into()),
        }
    }
}

fn read_text<R: Read>(input: &mut ByteReader<R>, limit: usize) -> Result<Box<str>> {
    let bytes = input.read_prefixed(limit)?;
    String::from_utf8(bytes)
        .map(String::into_boxed_str)
        .map_err(|_| MalformedError::InvalidUtf8.into())
}

// -----------------------------------------------------------------------------
// Session-aware codec

/// Writes the manifest of `ty`, interning it in `session`.
///
/// An already interned type is written as `Indexed`. A first occurrence is
/// written as `Known` when both ends pre-share it, `Full` otherwise; both
/// assign the next session id.
pub fn write_manifest<W: Write>(
    out: &mut ByteWriter<W>,
    session: &mut Session,
    options: &SerializerOptions,
    ty: TypeRef,
) -> io::Result<()> {
    let (type_id, is_new) = session.intern_type(ty);
    let manifest = if !is_new {
        Manifest::Indexed {
            type_id: type_id.into(),
        }
    } else if let Some(index) = options.known_index(ty) {
        Manifest::Known {
            index: index.into(),
        }
    } else {
        Manifest::full(ty)
    };
    log::trace!(
        "manifest {:#04x} for `{}` (type id {type_id})",
        manifest.tag(),
        ty.short_name(),
    );
    manifest.encode(out)
}

/// Reads a manifest whose tag was already consumed.
///
/// Returns the type and its session id.
pub fn read_manifest<R: Read>(
    input: &mut ByteReader<R>,
    session: &mut Session,
    options: &SerializerOptions,
    tag: u8,
) -> Result<(TypeRef, u64)> {
    let manifest = Manifest::decode(tag, input, options.max_length())?;
    let (ty, type_id) = match manifest {
        Manifest::Indexed { type_id } => (session.resolve_type(type_id)?, type_id),
        Manifest::Known { index } => {
            let ty = options
                .known_type(index)
                .ok_or(SessionProtocolError::UnknownKnownType {
                    index,
                    count: options.known_types().len(),
                })?;
            (ty, session.push_type(ty, None).into())
        }
        Manifest::Full {
            short_name,
            field_names,
        } => {
            let ty = TypeRegistry::global().resolve(&short_name)?;
            let layout = FieldLayout::align(ty, &field_names);
            (ty, session.push_type(ty, layout).into())
        }
    };
    log::trace!(
        "decoded manifest {tag:#04x} as `{}` (type id {type_id})",
        ty.short_name(),
    );
    Ok((ty, type_id))
}

#[cfg(test)]
mod tests {
    use weft_reflect::info::{ObjectBuilder, Typed};
    use weft_reflect::types;

    use super::*;
    use crate::error::Error;

    fn write_all(session: &mut Session, options: &SerializerOptions, tys: &[TypeRef]) -> Vec<u8> {
        let mut out = ByteWriter::new(Vec::new());
        for &ty in tys {
            write_manifest(&mut out, session, options, ty).unwrap();
        }
        out.into_inner()
    }

    fn read_all(bytes: &[u8], options: &SerializerOptions, count: usize) -> Result<Vec<TypeRef>> {
        let mut session = Session::new();
        let mut input = ByteReader::new(bytes);
        (0..count)
            .map(|_| {
                let tag = input.read_u8()?;
                read_manifest(&mut input, &mut session, options, tag).map(|(ty, _)| ty)
            })
            .collect()
    }

    #[test]
    fn first_occurrence_full_then_indexed() {
        let options = SerializerOptions::new();
        let list = types::list_of(String::type_descriptor());
        let mut session = Session::new();
        let bytes = write_all(&mut session, &options, &[list, i32::type_descriptor(), list]);

        assert_eq!(bytes[0], tag::FULL);
        // Indexed manifest of type id 0 closes the stream.
        assert_eq!(&bytes[bytes.len() - 2..], &[tag::INDEXED, 0]);

        let decoded = read_all(&bytes, &options, 3).unwrap();
        assert!(core::ptr::eq(decoded[0], list));
        assert!(core::ptr::eq(decoded[1], i32::type_descriptor()));
        assert!(core::ptr::eq(decoded[2], list));
    }

    #[test]
    fn object_manifest_lists_field_names() {
        let ty = TypeRegistry::global().register(
            ObjectBuilder::new("manifest_tests::Pair", "weft_wire")
                .field("left", i32::type_descriptor())
                .field("right", String::type_descriptor())
                .build(),
        );
        let Manifest::Full { field_names, .. } = Manifest::full(ty) else {
            panic!("expected a full manifest");
        };
        let names: Vec<&str> = field_names.iter().map(|name| &**name).collect();
        assert_eq!(names, ["left", "right"]);
    }

    #[test]
    fn known_types_skip_the_name() {
        let options = SerializerOptions::new().with_known_type(String::type_descriptor());
        let mut session = Session::new();
        let bytes = write_all(
            &mut session,
            &options,
            &[String::type_descriptor(), String::type_descriptor()],
        );
        assert_eq!(bytes, [tag::KNOWN, 0, tag::INDEXED, 0]);

        let decoded = read_all(&bytes, &options, 2).unwrap();
        assert!(decoded.iter().all(|ty| core::ptr::eq(*ty, String::type_descriptor())));

        let err = read_all(&bytes, &SerializerOptions::new(), 1).unwrap_err();
        assert!(matches!(
            err,
            Error::SessionProtocol(SessionProtocolError::UnknownKnownType { index: 0, count: 0 })
        ));
    }

    #[test]
    fn unassigned_index_is_a_protocol_error() {
        let err = read_all(&[tag::INDEXED, 3], &SerializerOptions::new(), 1).unwrap_err();
        assert!(matches!(
            err,
            Error::SessionProtocol(SessionProtocolError::UnknownTypeId { id: 3, assigned: 0 })
        ));
    }

    #[test]
    fn unknown_names_fail_resolution() {
        let mut out = ByteWriter::new(Vec::new());
        Manifest::Full {
            short_name: "nowhere::Missing, nowhere".into(),
            field_names: Vec::new(),
        }
        .encode(&mut out)
        .unwrap();
        let err = read_all(&out.into_inner(), &SerializerOptions::new(), 1).unwrap_err();
        assert!(matches!(err, Error::TypeResolution(_)));
    }

    #[test]
    fn rejects_non_manifest_tags_and_bad_text() {
        let err = read_all(&[tag::ARRAY], &SerializerOptions::new(), 1).unwrap_err();
        assert!(matches!(err, Error::Malformed(MalformedError::ExpectedManifest(tag::ARRAY))));

        let err = read_all(&[tag::FULL, 2, 0xFF, 0xFE, 0], &SerializerOptions::new(), 1).unwrap_err();
        assert!(matches!(err, Error::Malformed(MalformedError::InvalidUtf8)));
    }
}
