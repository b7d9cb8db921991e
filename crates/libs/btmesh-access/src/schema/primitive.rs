use crate::buffer::{InputBuffer, OutputBuffer};
use crate::error::{CodecError, ErrorKind, SchemaError};
use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    Little,
    Big,
}

/// Fixed-width integer layout, 1 to 7 octets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntFormat {
    width: u8,
    signed: bool,
    endian: Endian,
}

impl IntFormat {
    pub const U8: Self = Self::raw(1, false, Endian::Little);
    pub const I8: Self = Self::raw(1, true, Endian::Little);
    pub const U16_LE: Self = Self::raw(2, false, Endian::Little);
    pub const I16_LE: Self = Self::raw(2, true, Endian::Little);
    pub const U16_BE: Self = Self::raw(2, false, Endian::Big);
    pub const U24_LE: Self = Self::raw(3, false, Endian::Little);
    pub const U32_LE: Self = Self::raw(4, false, Endian::Little);
    pub const U40_LE: Self = Self::raw(5, false, Endian::Little);
    pub const U48_LE: Self = Self::raw(6, false, Endian::Little);

    const fn raw(width: u8, signed: bool, endian: Endian) -> Self {
        Self { width, signed, endian }
    }

    pub fn new(width: usize, signed: bool, endian: Endian) -> Result<Self, SchemaError> {
        match u8::try_from(width) {
            Ok(w @ 1..=7) => Ok(Self::raw(w, signed, endian)),
            _ => Err(SchemaError::UnsupportedWidth { width }),
        }
    }

    pub fn width(&self) -> usize {
        usize::from(self.width)
    }

    pub fn is_signed(&self) -> bool {
        self.signed
    }

    fn bits(&self) -> u32 {
        u32::from(self.width) * 8
    }

    pub fn min(&self) -> i64 {
        if self.signed {
            -(1i64 << (self.bits() - 1))
        } else {
            0
        }
    }

    /// Largest representable value; doubles as the "unknown" sentinel of scaled fields.
    pub fn max(&self) -> i64 {
        if self.signed {
            (1i64 << (self.bits() - 1)) - 1
        } else {
            (1i64 << self.bits()) - 1
        }
    }

    pub(crate) fn read(&self, input: &mut InputBuffer<'_>) -> Result<i64, CodecError> {
        let bytes = input.read_slice(self.width())?;
        let fold = |acc: u64, byte: &u8| (acc << 8) | u64::from(*byte);
        let raw = match self.endian {
            Endian::Little => bytes.iter().rev().fold(0, fold),
            Endian::Big => bytes.iter().fold(0, fold),
        };

        if self.signed {
            let shift = 64 - self.bits();
            Ok(((raw << shift) as i64) >> shift)
        } else {
            Ok(raw as i64)
        }
    }

    pub(crate) fn write(&self, value: i64, output: &mut OutputBuffer) -> Result<(), CodecError> {
        if value < self.min() || value > self.max() {
            let kind = if self.signed { "signed" } else { "unsigned" };
            return Err(ErrorKind::out_of_range(
                value,
                format!("does not fit a {}-byte {} integer", self.width, kind),
            )
            .into());
        }

        let le = (value as u64).to_le_bytes();
        let bytes = &le[..self.width()];
        match self.endian {
            Endian::Little => {
                output.write(bytes);
            }
            Endian::Big => {
                for byte in bytes.iter().rev() {
                    output.write_byte(*byte);
                }
            }
        }

        Ok(())
    }
}

pub(crate) fn decode_flag(input: &mut InputBuffer<'_>) -> Result<Value, CodecError> {
    let offset = input.offset();
    match input.read_byte()? {
        0 => Ok(Value::Bool(false)),
        1 => Ok(Value::Bool(true)),
        other => Err(ErrorKind::invalid(offset, format!("flag octet 0x{other:02x}")).into()),
    }
}

pub(crate) fn encode_flag(value: &Value, output: &mut OutputBuffer) -> Result<(), CodecError> {
    let flag = value.as_bool().ok_or_else(|| CodecError::mismatch("bool", value.kind_name()))?;
    output.write_byte(u8::from(flag));

    Ok(())
}

pub(crate) fn decode_bytes(input: &mut InputBuffer<'_>, size: usize) -> Result<Value, CodecError> {
    Ok(Value::Bytes(input.read_slice(size)?.to_vec()))
}

pub(crate) fn encode_bytes(value: &Value, size: usize, output: &mut OutputBuffer) -> Result<(), CodecError> {
    let Value::Bytes(bytes) = value else {
        return Err(CodecError::mismatch("bytes", value.kind_name()));
    };
    if bytes.len() != size {
        return Err(ErrorKind::out_of_range(
            hex::encode(bytes),
            format!("expected exactly {size} bytes"),
        )
        .into());
    }
    output.write(bytes);

    Ok(())
}

/// Fixed-length UTF-8 text. Decode strips trailing NUL and space padding,
/// encode pads with NULs.
pub(crate) fn decode_text(input: &mut InputBuffer<'_>, size: usize) -> Result<Value, CodecError> {
    let offset = input.offset();
    let bytes = input.read_slice(size)?;
    let end = bytes.iter().rposition(|b| !matches!(b, b'\0' | b' ')).map_or(0, |i| i + 1);

    match std::str::from_utf8(&bytes[..end]) {
        Ok(text) => Ok(Value::Text(text.to_string())),
        Err(err) => Err(ErrorKind::invalid(offset, format!("text is not UTF-8: {err}")).into()),
    }
}

pub(crate) fn encode_text(value: &Value, size: usize, output: &mut OutputBuffer) -> Result<(), CodecError> {
    let text = value.as_text().ok_or_else(|| CodecError::mismatch("text", value.kind_name()))?;
    if text.len() > size {
        return Err(ErrorKind::out_of_range(
            format!("{:?}", text),
            format!("longer than {size} bytes"),
        )
        .into());
    }
    output.write(text.as_bytes());
    output.write(&vec![0u8; size - text.len()]);

    Ok(())
}

/// Padding content is discarded, so non-zero padding comes back as zeros on encode.
pub(crate) fn decode_padding(input: &mut InputBuffer<'_>, size: usize) -> Result<Value, CodecError> {
    input.read_slice(size)?;

    Ok(Value::Unit)
}

pub(crate) fn encode_padding(size: usize, output: &mut OutputBuffer) {
    output.write(&vec![0u8; size]);
}

pub(crate) fn decode_const(input: &mut InputBuffer<'_>, expected: &[u8]) -> Result<Value, CodecError> {
    let offset = input.offset();
    let actual = input.read_slice(expected.len())?;
    if actual != expected {
        return Err(ErrorKind::ConstMismatch {
            offset,
            expected: hex::encode(expected),
            actual: hex::encode(actual),
        }
        .into());
    }

    Ok(Value::Unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(format: IntFormat, bytes: &[u8]) -> i64 {
        format.read(&mut InputBuffer::new(bytes)).expect("read integer")
    }

    fn write(format: IntFormat, value: i64) -> Result<Vec<u8>, CodecError> {
        let mut output = OutputBuffer::new();
        format.write(value, &mut output)?;
        Ok(output.into_inner())
    }

    #[test]
    fn little_endian_is_default_layout() {
        assert_eq!(read(IntFormat::U16_LE, &[0x8c, 0x00]), 0x008c);
        assert_eq!(read(IntFormat::U24_LE, &[0x10, 0xa4, 0x00]), 42_000);
        assert_eq!(read(IntFormat::U40_LE, &[0x05, 0x04, 0x03, 0x02, 0x01]), 0x01_0203_0405);
        assert_eq!(read(IntFormat::U16_BE, &[0x82, 0x2e]), 0x822e);
    }

    #[test]
    fn signed_values_are_sign_extended() {
        assert_eq!(read(IntFormat::I8, &[0xe2]), -30);
        assert_eq!(read(IntFormat::I16_LE, &[0x01, 0x80]), -32767);
        assert_eq!(write(IntFormat::I8, -30).expect("encode"), [0xe2]);
    }

    #[test]
    fn out_of_width_values_are_rejected() {
        let err = write(IntFormat::U8, 256).expect_err("too wide");
        assert!(matches!(err.kind(), ErrorKind::ValueOutOfRange { .. }));
        assert!(write(IntFormat::I8, -129).is_err());
        assert_eq!(IntFormat::U24_LE.max(), 0xff_ffff);
        assert_eq!(IntFormat::I16_LE.max(), 0x7fff);
    }

    #[test]
    fn padding_is_written_as_zeros() {
        let mut input = InputBuffer::new(&[0xaa, 0x55]);
        assert_eq!(decode_padding(&mut input, 2).expect("padding"), Value::Unit);

        let mut output = OutputBuffer::new();
        encode_padding(2, &mut output);
        assert_eq!(output.as_slice(), [0, 0]);
    }

    #[test]
    fn only_supported_widths_construct() {
        assert!(IntFormat::new(6, false, Endian::Little).is_ok());
        assert_eq!(
            IntFormat::new(8, false, Endian::Little),
            Err(SchemaError::UnsupportedWidth { width: 8 })
        );
    }

    #[test]
    fn text_trims_trailing_padding() {
        let mut input = InputBuffer::new(b"ab c\0\0");
        assert_eq!(decode_text(&mut input, 6).expect("text"), Value::Text("ab c".into()));

        let mut input = InputBuffer::new(b" ab c \0 ");
        assert_eq!(decode_text(&mut input, 8).expect("text"), Value::Text(" ab c".into()));

        let mut output = OutputBuffer::new();
        encode_text(&Value::Text("ab c".into()), 6, &mut output).expect("encode");
        assert_eq!(output.as_slice(), b"ab c\0\0");
    }

    #[test]
    fn flag_accepts_only_zero_and_one() {
        assert_eq!(decode_flag(&mut InputBuffer::new(&[1])).expect("flag"), Value::Bool(true));
        let err = decode_flag(&mut InputBuffer::new(&[2])).expect_err("not a flag");
        assert!(matches!(err.kind(), ErrorKind::InvalidValue { offset: 0, .. }));
    }

    #[test]
    fn const_mismatch_reports_both_sides() {
        let err = decode_const(&mut InputBuffer::new(&[0x01, 0x02]), &[0x01, 0x03]).expect_err("mismatch");
        assert_eq!(
            err.kind(),
            &ErrorKind::ConstMismatch { offset: 0, expected: "0103".into(), actual: "0102".into() }
        );
    }
}
