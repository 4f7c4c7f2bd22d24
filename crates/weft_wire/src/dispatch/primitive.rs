use std::io::{Read, Write};

use chrono::DateTime;
use rust_decimal::Decimal;
use uuid::Uuid;
use weft_reflect::catalog::Primitive;
use weft_reflect::info::TypeRef;
use weft_reflect::value::Value;

use super::mismatch;
use crate::error::{MalformedError, Result};
use crate::stream::{ByteReader, ByteWriter};

/// Writes the payload of a primitive, without any header.
///
/// Fixed-width values are written little-endian at their natural width,
/// text and bytes as a length field where 0 stands for null. A timestamp is
/// its unix seconds (`i64`) followed by the subsecond nanoseconds (`u32`),
/// a uuid its 16 raw bytes and a decimal its 16-byte packed form.
pub(super) fn write<W: Write>(
    out: &mut ByteWriter<W>,
    primitive: Primitive,
    ty: TypeRef,
    value: &Value,
) -> Result<()> {
    match (primitive, value) {
        (Primitive::Bool, Value::Bool(v)) => out.write_u8(u8::from(*v))?,
        (Primitive::U8, Value::U8(v)) => out.write_u8(*v)?,
        (Primitive::I8, Value::I8(v)) => out.write_all(&v.to_le_bytes())?,
        (Primitive::I16, Value::I16(v)) => out.write_all(&v.to_le_bytes())?,
        (Primitive::U16, Value::U16(v)) => out.write_all(&v.to_le_bytes())?,
        (Primitive::I32, Value::I32(v)) => out.write_all(&v.to_le_bytes())?,
        (Primitive::U32, Value::U32(v)) => out.write_all(&v.to_le_bytes())?,
        (Primitive::I64, Value::I64(v)) => out.write_all(&v.to_le_bytes())?,
        (Primitive::U64, Value::U64(v)) => out.write_all(&v.to_le_bytes())?,
        (Primitive::F32, Value::F32(v)) => out.write_all(&v.to_le_bytes())?,
        (Primitive::F64, Value::F64(v)) => out.write_all(&v.to_le_bytes())?,
        (Primitive::Char, Value::Char(v)) => out.write_all(&u32::from(*v).to_le_bytes())?,
        (Primitive::Timestamp, Value::Timestamp(v)) => {
            out.write_all(&v.timestamp().to_le_bytes())?;
            out.write_all(&v.timestamp_subsec_nanos().to_le_bytes())?;
        }
        (Primitive::Uuid, Value::Uuid(v)) => out.write_all(v.as_bytes())?,
        (Primitive::Decimal, Value::Decimal(v)) => out.write_all(&v.serialize())?,
        (Primitive::String, Value::String(text)) => write_variable(out, text.as_bytes())?,
        (Primitive::Bytes, Value::Bytes(bytes)) => write_variable(out, bytes)?,
        (Primitive::String | Primitive::Bytes, Value::Null) => out.write_varint(0)?,
        (_, other) => return Err(mismatch(ty, other)),
    }
    Ok(())
}

fn write_variable<W: Write>(out: &mut ByteWriter<W>, bytes: &[u8]) -> std::io::Result<()> {
    out.write_varint(bytes.len() as u64 + 1)?;
    out.write_all(bytes)
}

/// Reads the payload of a primitive written by [`write`].
pub(super) fn read<R: Read>(
    input: &mut ByteReader<R>,
    primitive: Primitive,
    limit: usize,
) -> Result<Value> {
    Ok(match primitive {
        Primitive::Bool => match input.read_u8()? {
            0 => Value::Bool(false),
            1 => Value::Bool(true),
            byte => return Err(MalformedError::InvalidBool(byte).into()),
        },
        Primitive::U8 => Value::U8(input.read_u8()?),
        Primitive::I8 => Value::I8(i8::from_le_bytes(input.read_array()?)),
        Primitive::I16 => Value::I16(i16::from_le_bytes(input.read_array()?)),
        Primitive::U16 => Value::U16(u16::from_le_bytes(input.read_array()?)),
        Primitive::I32 => Value::I32(i32::from_le_bytes(input.read_array()?)),
        Primitive::U32 => Value::U32(u32::from_le_bytes(input.read_array()?)),
        Primitive::I64 => Value::I64(i64::from_le_bytes(input.read_array()?)),
        Primitive::U64 => Value::U64(u64::from_le_bytes(input.read_array()?)),
        Primitive::F32 => Value::F32(f32::from_le_bytes(input.read_array()?)),
        Primitive::F64 => Value::F64(f64::from_le_bytes(input.read_array()?)),
        Primitive::Char => {
            let scalar = u32::from_le_bytes(input.read_array()?);
            Value::Char(char::from_u32(scalar).ok_or(MalformedError::InvalidChar(scalar))?)
        }
        Primitive::Timestamp => {
            let secs = i64::from_le_bytes(input.read_array()?);
            let nanos = u32::from_le_bytes(input.read_array()?);
            let timestamp = DateTime::from_timestamp(secs, nanos)
                .ok_or(MalformedError::InvalidTimestamp { secs, nanos })?;
            Value::Timestamp(timestamp)
        }
        Primitive::Uuid => Value::Uuid(Uuid::from_bytes(input.read_array()?)),
        Primitive::Decimal => Value::Decimal(read_decimal(input.read_array()?)?),
        Primitive::String => match read_variable(input, limit)? {
            Some(bytes) => String::from_utf8(bytes)
                .map_err(|_| MalformedError::InvalidUtf8)?
                .into(),
            None => Value::Null,
        },
        Primitive::Bytes => read_variable(input, limit)?.map_or(Value::Null, Value::from),
    })
}

/// Sign in bit 31, scale in bits 16..24; everything else must be clear.
const DECIMAL_FLAG_MASK: u32 = 0x8000_0000 | 0x00FF_0000;
const DECIMAL_MAX_SCALE: u32 = 28;

fn read_decimal(bytes: [u8; 16]) -> Result<Decimal> {
    let flags = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    let scale = (flags >> 16) & 0xFF;
    if flags & !DECIMAL_FLAG_MASK != 0 || scale > DECIMAL_MAX_SCALE {
        return Err(MalformedError::InvalidDecimal(flags).into());
    }
    Ok(Decimal::deserialize(bytes))
}

fn read_variable<R: Read>(input: &mut ByteReader<R>, limit: usize) -> Result<Option<Vec<u8>>> {
    let field = input.read_len(limit.saturating_add(1))?;
    match field.checked_sub(1) {
        Some(len) => Ok(Some(input.read_vec(len)?)),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use weft_reflect::info::Typed;

    use super::*;
    use crate::error::Error;

    fn encode(primitive: Primitive, value: &Value) -> Result<Vec<u8>> {
        let mut out = ByteWriter::new(Vec::new());
        write(&mut out, primitive, primitive.descriptor(), value)?;
        Ok(out.into_inner())
    }

    fn decode(primitive: Primitive, bytes: &[u8]) -> Result<Value> {
        let mut input = ByteReader::new(bytes);
        let value = read(&mut input, primitive, 1024)?;
        assert_eq!(input.position(), bytes.len() as u64, "trailing bytes");
        Ok(value)
    }

    #[test]
    fn fixed_width_layout() {
        assert_eq!(encode(Primitive::Bool, &true.into()).unwrap(), [1]);
        assert_eq!(encode(Primitive::I16, &Value::I16(-2)).unwrap(), [0xFE, 0xFF]);
        assert_eq!(encode(Primitive::I32, &Value::I32(999)).unwrap(), [0xE7, 0x03, 0, 0]);
        assert_eq!(encode(Primitive::Char, &'é'.into()).unwrap(), [0xE9, 0, 0, 0]);
        assert_eq!(encode(Primitive::F64, &Value::F64(1.0)).unwrap(), 1.0_f64.to_le_bytes());

        for primitive in Primitive::ALL {
            if let Some(width) = primitive.fixed_width() {
                let bytes = encode(primitive, &primitive.zero()).unwrap();
                assert_eq!(bytes.len(), width, "{primitive}");
            }
        }
    }

    #[test]
    fn extended_layout() {
        let timestamp = DateTime::from_timestamp(1_700_000_000, 250).unwrap();
        let bytes = encode(Primitive::Timestamp, &timestamp.into()).unwrap();
        assert_eq!(bytes[..8], 1_700_000_000_i64.to_le_bytes());
        assert_eq!(bytes[8..], 250_u32.to_le_bytes());

        let id = Uuid::from_u128(0x0011_2233_4455_6677_8899_AABB_CCDD_EEFF);
        let bytes = encode(Primitive::Uuid, &id.into()).unwrap();
        assert_eq!(bytes, id.as_bytes());

        // -1.5: scale 1, sign set, mantissa 15
        let bytes = encode(Primitive::Decimal, &Decimal::new(-15, 1).into()).unwrap();
        assert_eq!(bytes[..4], [0, 0, 1, 0x80]);
        assert_eq!(bytes[4..8], 15_u32.to_le_bytes());
        assert!(bytes[8..].iter().all(|b| *b == 0));
    }

    #[test]
    fn variable_width_layout() {
        assert_eq!(encode(Primitive::String, &Value::Null).unwrap(), [0]);
        assert_eq!(encode(Primitive::String, &"".into()).unwrap(), [1]);
        assert_eq!(encode(Primitive::String, &"hi".into()).unwrap(), [3, b'h', b'i']);
        assert_eq!(encode(Primitive::Bytes, &vec![7_u8].into()).unwrap(), [2, 7]);

        assert!(decode(Primitive::String, &[0]).unwrap().is_null());
        assert_eq!(decode(Primitive::String, &[1]).unwrap().as_str(), Some(""));
        assert_eq!(decode(Primitive::Bytes, &[2, 7]).unwrap().as_bytes(), Some(&[7_u8][..]));
    }

    #[test]
    fn decodes_what_it_encodes() {
        let samples = [
            Value::U8(200),
            Value::I8(-5),
            Value::U16(65_000),
            Value::U32(u32::MAX),
            Value::I64(i64::MIN),
            Value::U64(u64::MAX),
            Value::F32(-0.5),
            Value::Char('\u{1F600}'),
            Value::from("Yesbox!"),
            Value::Timestamp(DateTime::from_timestamp(-86_400, 999_999_999).unwrap()),
            Value::Uuid(Uuid::from_u128(u128::MAX - 7)),
            Value::Decimal(Decimal::new(-123_456_789, 4)),
            Value::Decimal(Decimal::MAX),
        ];
        for sample in samples {
            let primitive = sample.primitive().unwrap();
            let decoded = decode(primitive, &encode(primitive, &sample).unwrap()).unwrap();
            assert_eq!(format!("{decoded:?}"), format!("{sample:?}"));
        }
    }

    #[test]
    fn rejects_bad_values() {
        let err = encode(Primitive::I32, &Value::Null).unwrap_err();
        assert!(matches!(err, Error::UnexpectedNull { .. }));

        let err = encode(Primitive::I32, &Value::I64(1)).unwrap_err();
        assert!(matches!(
            err,
            Error::TypeMismatch { expected, found }
                if core::ptr::eq(expected, i32::type_descriptor())
                    && core::ptr::eq(found, i64::type_descriptor())
        ));

        assert!(matches!(
            decode(Primitive::Bool, &[2]),
            Err(Error::Malformed(MalformedError::InvalidBool(2)))
        ));
        assert!(matches!(
            decode(Primitive::Char, &0xD800_u32.to_le_bytes()),
            Err(Error::Malformed(MalformedError::InvalidChar(0xD800)))
        ));
        assert!(matches!(
            decode(Primitive::String, &[3, 0xC3, 0x28]),
            Err(Error::Malformed(MalformedError::InvalidUtf8))
        ));
        assert!(matches!(decode(Primitive::I64, &[1, 2, 3]), Err(Error::Io(_))));

        let mut timestamp = [0_u8; 12];
        timestamp[..8].copy_from_slice(&i64::MAX.to_le_bytes());
        assert!(matches!(
            decode(Primitive::Timestamp, &timestamp),
            Err(Error::Malformed(MalformedError::InvalidTimestamp { secs: i64::MAX, nanos: 0 }))
        ));

        let mut decimal = [0_u8; 16];
        decimal[2] = 29;
        assert!(matches!(
            decode(Primitive::Decimal, &decimal),
            Err(Error::Malformed(MalformedError::InvalidDecimal(0x001D_0000)))
        ));
        decimal[2] = 0;
        decimal[0] = 1;
        assert!(matches!(
            decode(Primitive::Decimal, &decimal),
            Err(Error::Malformed(MalformedError::InvalidDecimal(1)))
        ));
    }
}
