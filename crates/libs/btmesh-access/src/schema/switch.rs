use std::collections::BTreeMap;

use log::trace;

use crate::buffer::{InputBuffer, OutputBuffer};
use crate::enums::MeshEnum;
use crate::error::{CodecError, ErrorKind, SchemaError};
use crate::schema::{Codec, Schema};
use crate::value::{Record, Value};

/// Selects the child schema from a sibling field decoded earlier in the same record.
#[derive(Debug, Clone)]
pub struct Switch {
    discriminant: &'static str,
    cases: BTreeMap<u64, Schema>,
    default: Option<Schema>,
}

impl Switch {
    pub fn new(
        discriminant: &'static str,
        cases: impl IntoIterator<Item = (u64, Schema)>,
    ) -> Result<Self, SchemaError> {
        let mut map = BTreeMap::new();
        for (key, schema) in cases {
            if map.insert(key, schema).is_some() {
                return Err(SchemaError::DuplicateKey { table: discriminant.to_string(), key });
            }
        }

        Ok(Self { discriminant, cases: map, default: None })
    }

    /// Cases keyed by enumeration variants.
    pub fn on<E: MeshEnum>(
        discriminant: &'static str,
        cases: impl IntoIterator<Item = (E, Schema)>,
    ) -> Result<Self, SchemaError> {
        Self::new(discriminant, cases.into_iter().map(|(key, schema)| (key.raw(), schema)))
    }

    pub fn with_default(mut self, schema: Schema) -> Self {
        self.default = Some(schema);
        self
    }

    pub fn discriminant(&self) -> &'static str {
        self.discriminant
    }

    pub fn keys(&self) -> impl Iterator<Item = u64> + '_ {
        self.cases.keys().copied()
    }

    fn select(&self, scope: &Record, offset: usize) -> Result<&Schema, CodecError> {
        let key = discriminant_key(scope.require(self.discriminant)?)?;

        match self.cases.get(&key).or(self.default.as_ref()) {
            Some(schema) => {
                trace!("switch on `{}` selected case 0x{:x}", self.discriminant, key);
                Ok(schema)
            }
            None => Err(ErrorKind::UnhandledDiscriminant {
                discriminant: self.discriminant.to_string(),
                value: key,
                offset,
            }
            .into()),
        }
    }
}

impl Codec for Switch {
    fn decode(&self, input: &mut InputBuffer<'_>, scope: &Record) -> Result<Value, CodecError> {
        self.select(scope, input.offset())?.decode(input, scope)
    }

    fn encode(&self, value: &Value, output: &mut OutputBuffer, scope: &Record) -> Result<(), CodecError> {
        self.select(scope, output.offset())?.encode(value, output, scope)
    }
}

/// Raw key of an enumerated, integer or boolean discriminant.
pub(crate) fn discriminant_key(value: &Value) -> Result<u64, CodecError> {
    match value {
        Value::Enum(variant) => Ok(variant.raw()),
        Value::Int(raw) if *raw >= 0 => Ok(*raw as u64),
        Value::Bool(flag) => Ok(u64::from(*flag)),
        other => Err(CodecError::mismatch("discriminant", other.kind_name())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::primitive::IntFormat;
    use crate::schema::structure::Field;

    fn message() -> Schema {
        let params = Switch::new(
            "subopcode",
            [
                (0x00, Schema::empty()),
                (
                    0x09,
                    Schema::structure(vec![Field::named("sync_integral", Schema::Int(IntFormat::U16_LE))]),
                ),
            ],
        )
        .expect("distinct keys");

        Schema::structure(vec![
            Field::named("subopcode", Schema::Int(IntFormat::U8)),
            Field::named("payload", Schema::switch(params)),
        ])
    }

    #[test]
    fn case_follows_sibling_field() {
        let schema = message();
        let value = schema.decode_bytes(&[0x09, 0x34, 0x12]).expect("decode");
        assert_eq!(value.get("payload").and_then(|p| p.get("sync_integral")), Some(&Value::Int(0x1234)));
        assert_eq!(schema.encode_value(&value).expect("encode"), [0x09, 0x34, 0x12]);
    }

    #[test]
    fn encode_derives_case_from_value_being_built() {
        let schema = message();
        let value = Value::Record(Record::new().with("subopcode", 0u8).with("payload", Record::new()));
        assert_eq!(schema.encode_value(&value).expect("encode"), [0x00]);
    }

    #[test]
    fn unknown_key_fails_with_offset() {
        let err = message().decode_bytes(&[0x04, 0xff]).expect_err("no case for 4");
        assert_eq!(
            err.kind(),
            &ErrorKind::UnhandledDiscriminant { discriminant: "subopcode".into(), value: 4, offset: 1 }
        );
        assert_eq!(err.path().to_string(), "payload");
    }

    #[test]
    fn default_catches_unmapped_keys() {
        let switch = Switch::new("kind", [(1, Schema::empty())])
            .expect("switch")
            .with_default(Schema::Bytes(1));
        let schema = Schema::structure(vec![
            Field::named("kind", Schema::Int(IntFormat::U8)),
            Field::named("body", Schema::switch(switch)),
        ]);

        let value = schema.decode_bytes(&[7, 0xab]).expect("default case");
        assert_eq!(value.get("body"), Some(&Value::Bytes(vec![0xab])));
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let err = Switch::new("opcode", [(0x4c, Schema::empty()), (0x4c, Schema::empty())]).expect_err("dup");
        assert_eq!(err, SchemaError::DuplicateKey { table: "opcode".into(), key: 0x4c });
    }
}
