//! Opcode-framed Access-Layer codec over a set of message families.

use btmesh_access::{
    CodecError, EnumTable, EnumValue, ErrorKind, Field, InputBuffer, Record, Schema, SchemaError, Switch, Value,
};
use log::{debug, warn};

use crate::config::{CodecConfig, ConfigError};
use crate::family::{Family, FamilyKind};

const OPCODE: &str = "opcode";
const PARAMS: &str = "params";

/// A decoded Access-Layer message.
#[derive(Debug, Clone, PartialEq)]
pub struct AccessMessage {
    pub opcode: EnumValue,
    pub params: Value,
}

impl AccessMessage {
    pub fn new(opcode: EnumValue, params: impl Into<Value>) -> Self {
        Self { opcode, params: params.into() }
    }

    pub fn into_record(self) -> Record {
        Record::new().with(OPCODE, self.opcode).with(PARAMS, self.params)
    }

    pub fn from_record(record: &Record) -> Result<Self, CodecError> {
        let opcode = match record.require(OPCODE)? {
            Value::Enum(opcode) => *opcode,
            other => return Err(CodecError::mismatch("enum", other.kind_name()).within(OPCODE)),
        };

        Ok(Self { opcode, params: record.require(PARAMS)?.clone() })
    }
}

impl From<AccessMessage> for Value {
    fn from(message: AccessMessage) -> Self {
        Value::Record(message.into_record())
    }
}

/// `{opcode, params}` with the parameters selected by the opcode.
///
/// Immutable once built; share it freely between threads.
#[derive(Debug, Clone)]
pub struct AccessCodec {
    message: Schema,
    families: Vec<FamilyKind>,
    allow_trailing_data: bool,
}

impl AccessCodec {
    pub fn new(families: Vec<Family>, allow_trailing_data: bool) -> Result<Self, SchemaError> {
        let kinds = families.iter().map(Family::kind).collect();
        let opcodes = EnumTable::merge(OPCODE, families.iter().map(Family::opcodes))?;
        let params = Switch::new(OPCODE, families.into_iter().flat_map(Family::into_messages))?;

        let message = Schema::structure(vec![
            Field::named(OPCODE, Schema::enum_table(Schema::Opcode, opcodes)),
            Field::named(PARAMS, Schema::switch(params)),
        ]);

        Ok(Self { message, families: kinds, allow_trailing_data })
    }

    pub fn from_config(config: &CodecConfig) -> Result<Self, ConfigError> {
        let families = config.families.iter().map(|&kind| Family::build(kind)).collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(families, config.allow_trailing_data)?)
    }

    /// Every family, strict about trailing bytes.
    pub fn standard() -> Result<Self, ConfigError> {
        Self::from_config(&CodecConfig::default())
    }

    pub fn families(&self) -> &[FamilyKind] {
        &self.families
    }

    pub fn decode(&self, bytes: &[u8]) -> Result<AccessMessage, CodecError> {
        let mut input = InputBuffer::new(bytes);
        let value = self.message.decode(&mut input, &Record::new())?;
        let message = AccessMessage::from_record(value.expect_record()?)?;

        let remaining = input.bytes_left();
        if remaining > 0 {
            if !self.allow_trailing_data {
                return Err(ErrorKind::TrailingData { offset: input.offset(), remaining }.into());
            }
            warn!("{}: ignoring {} trailing bytes at offset {}", message.opcode.name(), remaining, input.offset());
        }
        debug!("decoded {} (0x{:x})", message.opcode.name(), message.opcode.raw());

        Ok(message)
    }

    pub fn encode(&self, message: &AccessMessage) -> Result<Vec<u8>, CodecError> {
        let record = message.clone().into_record();
        let bytes = self.message.encode_value(&Value::Record(record))?;
        debug!("encoded {} into {} bytes", message.opcode.name(), bytes.len());

        Ok(bytes)
    }
}
