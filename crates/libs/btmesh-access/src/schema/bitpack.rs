use crate::buffer::{InputBuffer, OutputBuffer};
use crate::error::{CodecError, ErrorKind, SchemaError};
use crate::value::{Record, Value};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BitField {
    Uint { name: &'static str, width: u32 },
    Flag { name: &'static str },
    Padding { width: u32 },
    Const { width: u32, value: u64 },
}

impl BitField {
    pub fn uint(name: &'static str, width: u32) -> Self {
        BitField::Uint { name, width }
    }

    pub fn flag(name: &'static str) -> Self {
        BitField::Flag { name }
    }

    pub fn padding(width: u32) -> Self {
        BitField::Padding { width }
    }

    pub fn constant(width: u32, value: u64) -> Self {
        BitField::Const { width, value }
    }

    fn width(&self) -> u32 {
        match self {
            BitField::Uint { width, .. } | BitField::Padding { width } | BitField::Const { width, .. } => *width,
            BitField::Flag { .. } => 1,
        }
    }

    fn label(&self) -> String {
        match self {
            BitField::Uint { name, .. } | BitField::Flag { name } => name.to_string(),
            BitField::Padding { .. } => "padding".to_string(),
            BitField::Const { .. } => "const".to_string(),
        }
    }
}

fn mask(width: u32) -> u64 {
    if width >= 64 {
        u64::MAX
    } else {
        (1u64 << width) - 1
    }
}

/// Sub-byte fields packed most significant bit first into whole octets.
///
/// A reversed pack stores its container little-endian: the octets are
/// swapped before the fields are sliced, the field order itself stays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitPack {
    fields: Vec<BitField>,
    reversed: bool,
    size: usize,
}

impl BitPack {
    pub fn new(fields: Vec<BitField>) -> Result<Self, SchemaError> {
        Self::build(fields, false)
    }

    pub fn reversed(fields: Vec<BitField>) -> Result<Self, SchemaError> {
        Self::build(fields, true)
    }

    fn build(fields: Vec<BitField>, reversed: bool) -> Result<Self, SchemaError> {
        if let Some(field) = fields.iter().find(|f| f.width() == 0) {
            return Err(SchemaError::EmptyBitField { field: field.label() });
        }

        let bits: u32 = fields.iter().map(BitField::width).sum();
        if bits % 8 != 0 {
            return Err(SchemaError::UnalignedBitPack { bits });
        }
        if bits > 64 {
            return Err(SchemaError::OversizedBitPack { bits });
        }

        Ok(Self { fields, reversed, size: (bits / 8) as usize })
    }

    /// Packed size in octets.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    fn octets(&self) -> impl Iterator<Item = usize> {
        let size = self.size;
        let reversed = self.reversed;
        (0..size).map(move |i| if reversed { size - 1 - i } else { i })
    }

    pub(crate) fn decode(&self, input: &mut InputBuffer<'_>) -> Result<Value, CodecError> {
        let offset = input.offset();
        let bytes = input.read_slice(self.size)?;
        let container = self.octets().fold(0u64, |acc, i| (acc << 8) | u64::from(bytes[i]));

        let mut record = Record::new();
        let mut remaining = (self.size * 8) as u32;
        for field in &self.fields {
            let width = field.width();
            remaining -= width;
            let bits = (container >> remaining) & mask(width);

            match field {
                BitField::Uint { name, .. } => record.insert(*name, Value::Int(bits as i64)),
                BitField::Flag { name } => record.insert(*name, Value::Bool(bits == 1)),
                // Encoded back as zero bits.
                BitField::Padding { .. } => {}
                BitField::Const { value, .. } => {
                    if bits != *value {
                        return Err(ErrorKind::ConstMismatch {
                            offset,
                            expected: format!("{value:#x}"),
                            actual: format!("{bits:#x}"),
                        }
                        .into());
                    }
                }
            }
        }

        Ok(Value::Record(record))
    }

    pub(crate) fn encode_record(&self, record: &Record, output: &mut OutputBuffer) -> Result<(), CodecError> {
        let mut container = 0u64;
        let mut remaining = (self.size * 8) as u32;
        for field in &self.fields {
            let width = field.width();
            remaining -= width;

            let bits = match field {
                BitField::Uint { name, width } => {
                    let value = record.require(name)?.expect_int().map_err(|e| e.within(*name))?;
                    if value < 0 || value as u64 > mask(*width) {
                        return Err(CodecError::from(ErrorKind::out_of_range(
                            value,
                            format!("does not fit {width} bits"),
                        ))
                        .within(*name));
                    }
                    value as u64
                }
                BitField::Flag { name } => {
                    let value = record.require(name)?;
                    let flag = value
                        .as_bool()
                        .ok_or_else(|| CodecError::mismatch("bool", value.kind_name()).within(*name))?;
                    u64::from(flag)
                }
                BitField::Padding { .. } => 0,
                BitField::Const { value, width } => *value & mask(*width),
            };

            container |= bits << remaining;
        }

        let be = container.to_be_bytes();
        let packed = &be[8 - self.size..];
        for i in self.octets() {
            output.write_byte(packed[i]);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(pack: &BitPack, bytes: &[u8]) -> Record {
        match pack.decode(&mut InputBuffer::new(bytes)).expect("decode") {
            Value::Record(record) => record,
            other => panic!("expected record, got {other:?}"),
        }
    }

    fn encode(pack: &BitPack, record: &Record) -> Vec<u8> {
        let mut output = OutputBuffer::new();
        pack.encode_record(record, &mut output).expect("encode");
        output.into_inner()
    }

    #[test]
    fn width_must_be_octet_aligned() {
        let err = BitPack::new(vec![BitField::padding(3), BitField::flag("lamp_fault")]).expect_err("4 bits");
        assert_eq!(err, SchemaError::UnalignedBitPack { bits: 4 });
        assert!(matches!(
            BitPack::new(vec![BitField::uint("wide", 72)]),
            Err(SchemaError::OversizedBitPack { bits: 72 })
        ));
        assert!(matches!(
            BitPack::new(vec![BitField::uint("nothing", 0), BitField::padding(8)]),
            Err(SchemaError::EmptyBitField { .. })
        ));
    }

    #[test]
    fn fault_flags_are_msb_first() {
        let pack = BitPack::new(vec![
            BitField::padding(5),
            BitField::flag("circuit_fault"),
            BitField::flag("battery_fault"),
            BitField::flag("lamp_fault"),
        ])
        .expect("pack");

        let record = decode(&pack, &[0x06]);
        assert_eq!(record.get("circuit_fault"), Some(&Value::Bool(true)));
        assert_eq!(record.get("battery_fault"), Some(&Value::Bool(true)));
        assert_eq!(record.get("lamp_fault"), Some(&Value::Bool(false)));
        assert_eq!(encode(&pack, &record), [0x06]);
    }

    #[test]
    fn reversed_pack_reads_a_little_endian_container() {
        let pack = BitPack::reversed(vec![BitField::uint("category", 10), BitField::uint("sub_category", 6)])
            .expect("pack");

        // 0x0941: category 0x25, sub-category 0x01
        let record = decode(&pack, &[0x41, 0x09]);
        assert_eq!(record.get("category"), Some(&Value::Int(0x25)));
        assert_eq!(record.get("sub_category"), Some(&Value::Int(0x01)));
        assert_eq!(encode(&pack, &record), [0x41, 0x09]);
    }

    #[test]
    fn const_bits_are_checked() {
        let pack = BitPack::new(vec![BitField::constant(1, 0), BitField::uint("tai_utc_delta", 15)]).expect("pack");
        assert_eq!(decode(&pack, &[0x08, 0x07]).get("tai_utc_delta"), Some(&Value::Int(0x0807)));

        let err = pack.decode(&mut InputBuffer::new(&[0x88, 0x07])).expect_err("const bit set");
        assert!(matches!(err.kind(), ErrorKind::ConstMismatch { offset: 0, .. }));
    }

    #[test]
    fn oversized_field_value_is_rejected() {
        let pack = BitPack::new(vec![BitField::padding(4), BitField::uint("nibble", 4)]).expect("pack");
        let mut output = OutputBuffer::new();
        let err = pack
            .encode_record(&Record::new().with("nibble", 16u8), &mut output)
            .expect_err("16 needs 5 bits");
        assert_eq!(err.path().to_string(), "nibble");
    }
}
