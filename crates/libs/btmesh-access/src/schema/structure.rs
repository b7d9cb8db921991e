use crate::buffer::{InputBuffer, OutputBuffer};
use crate::error::CodecError;
use crate::schema::{Codec, Schema};
use crate::value::{Record, Value};

#[derive(Debug, Clone)]
pub enum Field {
    /// Decoded value stored under the name.
    Named(&'static str, Schema),
    /// Record-producing schema whose fields are spliced into the enclosing record.
    Embedded(Schema),
    /// Consumed and produced without a value (padding, constants).
    Anonymous(Schema),
}

impl Field {
    pub fn named(name: &'static str, schema: Schema) -> Self {
        Field::Named(name, schema)
    }

    pub fn embedded(schema: Schema) -> Self {
        Field::Embedded(schema)
    }

    pub fn anonymous(schema: Schema) -> Self {
        Field::Anonymous(schema)
    }

    fn fixed_size(&self) -> Option<usize> {
        match self {
            Field::Named(_, schema) | Field::Embedded(schema) | Field::Anonymous(schema) => schema.fixed_size(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Struct {
    fields: Vec<Field>,
}

impl Struct {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub(crate) fn fixed_size(&self) -> Option<usize> {
        self.fields.iter().map(Field::fixed_size).sum()
    }

    /// Decodes every field into `record`, which doubles as the lookup scope
    /// for discriminants of later fields.
    pub(crate) fn decode_into(&self, input: &mut InputBuffer<'_>, record: &mut Record) -> Result<(), CodecError> {
        for field in &self.fields {
            match field {
                Field::Named(name, schema) => {
                    let value = schema.decode(input, record).map_err(|e| e.within(*name))?;
                    record.insert(*name, value);
                }
                Field::Embedded(schema) => decode_embedded(schema, input, record)?,
                Field::Anonymous(schema) => {
                    schema.decode(input, record)?;
                }
            }
        }

        Ok(())
    }

    pub(crate) fn encode_from(&self, record: &Record, output: &mut OutputBuffer) -> Result<(), CodecError> {
        for field in &self.fields {
            match field {
                Field::Named(name, schema) => {
                    let value = record.require(name)?;
                    schema.encode(value, output, record).map_err(|e| e.within(*name))?;
                }
                Field::Embedded(schema) => encode_embedded(schema, record, output)?,
                Field::Anonymous(schema) => schema.encode(&Value::Unit, output, record)?,
            }
        }

        Ok(())
    }
}

fn decode_embedded(schema: &Schema, input: &mut InputBuffer<'_>, record: &mut Record) -> Result<(), CodecError> {
    if let Schema::Struct(inner) = schema {
        return inner.decode_into(input, record);
    }

    match schema.decode(input, record)? {
        Value::Record(fields) => {
            record.extend(fields);
            Ok(())
        }
        Value::Unit => Ok(()),
        other => Err(CodecError::mismatch("record", other.kind_name())),
    }
}

fn encode_embedded(schema: &Schema, record: &Record, output: &mut OutputBuffer) -> Result<(), CodecError> {
    match schema {
        Schema::Struct(inner) => inner.encode_from(record, output),
        Schema::BitPack(pack) => pack.encode_record(record, output),
        other => other.encode(&Value::Record(record.clone()), output, record),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::bitpack::{BitField, BitPack};
    use crate::schema::primitive::IntFormat;

    fn timestamp() -> Schema {
        let delta = BitPack::new(vec![BitField::constant(1, 0), BitField::uint("tai_utc_delta", 15)])
            .expect("aligned pack");
        Schema::structure(vec![
            Field::named("tai_seconds", Schema::Int(IntFormat::U40_LE)),
            Field::named("time_zone_offset", Schema::Int(IntFormat::U8)),
            Field::embedded(Schema::bitpack(delta)),
        ])
    }

    #[test]
    fn embedded_fields_are_spliced_flat() {
        let schema = timestamp();
        let bytes = [0x05, 0x04, 0x03, 0x02, 0x01, 0x06, 0x08, 0x07];
        let value = schema.decode_bytes(&bytes).expect("decode");
        let record = value.as_record().expect("record");

        assert_eq!(record.field_names().collect::<Vec<_>>(), ["tai_seconds", "time_zone_offset", "tai_utc_delta"]);
        assert_eq!(record.get("tai_utc_delta"), Some(&Value::Int(0x0807)));
        assert_eq!(schema.encode_value(&value).expect("encode"), bytes);
        assert_eq!(schema.fixed_size(), Some(8));
    }

    #[test]
    fn nested_struct_embeds_and_keeps_order() {
        let range = Schema::structure(vec![
            Field::named("minimum", Schema::Int(IntFormat::U8)),
            Field::named("maximum", Schema::Int(IntFormat::U8)),
        ]);
        let stats = Schema::structure(vec![
            Field::named("average", Schema::Int(IntFormat::U8)),
            Field::embedded(range),
            Field::anonymous(Schema::Padding(1)),
        ]);

        let value = stats.decode_bytes(&[1, 2, 3, 0xaa]).expect("decode");
        assert_eq!(
            value,
            Value::Record(Record::new().with("average", 1u8).with("minimum", 2u8).with("maximum", 3u8))
        );
        assert_eq!(stats.encode_value(&value).expect("encode"), [1, 2, 3, 0]);
    }

    #[test]
    fn missing_field_is_reported_with_path() {
        let inner = Schema::structure(vec![Field::named("seconds", Schema::Int(IntFormat::U16_LE))]);
        let outer = Schema::structure(vec![Field::named("timer", inner)]);

        let value = Value::Record(Record::new().with("timer", Record::new()));
        let err = outer.encode_value(&value).expect_err("seconds missing");
        assert_eq!(err.path().to_string(), "timer");
        assert!(matches!(err.kind(), crate::ErrorKind::MissingField { field } if field == "seconds"));
    }

    #[test]
    fn truncated_field_reports_path() {
        let schema = Schema::structure(vec![
            Field::named("el_lamp_total_operation_time", Schema::Int(IntFormat::U32_LE)),
            Field::named("el_lamp_emergency_time", Schema::Int(IntFormat::U32_LE)),
        ]);
        let err = schema.decode_bytes(&[0; 6]).expect_err("short");
        assert!(err.is_truncated());
        assert_eq!(err.path().to_string(), "el_lamp_emergency_time");
    }
}
