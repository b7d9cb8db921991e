//! Declarative schema tree and the codec that walks it.

mod adapter;
mod bitpack;
mod greedy;
mod primitive;
mod select;
mod structure;
mod switch;
mod time;

use std::fmt;
use std::sync::Arc;

use crate::buffer::{InputBuffer, OutputBuffer};
use crate::enums::{EnumTable, MeshEnum};
use crate::error::{CodecError, ErrorKind};
use crate::opcode;
use crate::value::{Record, Value};

pub use adapter::{Adapter, DaysSinceEpoch, Exponential, Scale, Scaled};
pub use bitpack::{BitField, BitPack};
pub use primitive::{Endian, IntFormat};
pub use select::Select;
pub use structure::{Field, Struct};
pub use switch::Switch;
pub use time::{
    local_datetime, tai_seconds_of, tai_utc_delta, tai_utc_delta_raw, time_zone_offset, time_zone_offset_raw,
    TaiTimestamp, MESH_UNIX_EPOCH_DIFF,
};

pub(crate) use switch::discriminant_key;

/// Anything that reads and writes one value against a shared decode context.
///
/// `scope` is the record being built by the enclosing struct. Implementors
/// outside this crate plug in through [`Schema::custom`].
pub trait Codec: fmt::Debug + Send + Sync {
    fn decode(&self, input: &mut InputBuffer<'_>, scope: &Record) -> Result<Value, CodecError>;

    fn encode(&self, value: &Value, output: &mut OutputBuffer, scope: &Record) -> Result<(), CodecError>;

    /// Encoded size when it does not depend on the value.
    fn fixed_size(&self) -> Option<usize> {
        None
    }
}

#[derive(Debug, Clone)]
pub enum Schema {
    Int(IntFormat),
    Flag,
    Bytes(usize),
    Text(usize),
    Padding(usize),
    Const(Arc<[u8]>),
    Opcode,
    Enum { inner: Arc<Schema>, table: Arc<EnumTable> },
    Adapted { inner: Arc<Schema>, adapter: Arc<dyn Adapter> },
    Struct(Arc<Struct>),
    BitPack(Arc<BitPack>),
    Switch(Arc<Switch>),
    Greedy(Arc<Schema>),
    Select(Arc<Select>),
    Custom(Arc<dyn Codec>),
}

impl Schema {
    /// Raw integer decoded as a variant of `E`.
    pub fn enumeration<E: MeshEnum>(inner: Schema) -> Self {
        Self::enum_table(inner, EnumTable::of::<E>())
    }

    pub fn enum_table(inner: Schema, table: EnumTable) -> Self {
        Schema::Enum { inner: Arc::new(inner), table: Arc::new(table) }
    }

    pub fn adapted(inner: Schema, adapter: impl Adapter + 'static) -> Self {
        Schema::Adapted { inner: Arc::new(inner), adapter: Arc::new(adapter) }
    }

    pub fn scaled(format: IntFormat, scale: Scale) -> Self {
        Self::adapted(Schema::Int(format), Scaled::new(format, scale))
    }

    pub fn structure(fields: Vec<Field>) -> Self {
        Schema::Struct(Arc::new(Struct::new(fields)))
    }

    /// Struct without fields, for parameterless messages.
    pub fn empty() -> Self {
        Self::structure(Vec::new())
    }

    pub fn greedy(element: Schema) -> Self {
        Schema::Greedy(Arc::new(element))
    }

    pub fn bitpack(pack: BitPack) -> Self {
        Schema::BitPack(Arc::new(pack))
    }

    pub fn switch(switch: Switch) -> Self {
        Schema::Switch(Arc::new(switch))
    }

    pub fn select(select: Select) -> Self {
        Schema::Select(Arc::new(select))
    }

    pub fn custom(codec: impl Codec + 'static) -> Self {
        Schema::Custom(Arc::new(codec))
    }

    pub fn constant(bytes: &[u8]) -> Self {
        Schema::Const(Arc::from(bytes))
    }

    pub fn fixed_size(&self) -> Option<usize> {
        match self {
            Schema::Int(format) => Some(format.width()),
            Schema::Flag => Some(1),
            Schema::Bytes(size) | Schema::Text(size) | Schema::Padding(size) => Some(*size),
            Schema::Const(bytes) => Some(bytes.len()),
            Schema::Opcode | Schema::Switch(_) | Schema::Greedy(_) | Schema::Select(_) => None,
            Schema::Enum { inner, .. } | Schema::Adapted { inner, .. } => inner.fixed_size(),
            Schema::Struct(inner) => inner.fixed_size(),
            Schema::BitPack(pack) => Some(pack.size()),
            Schema::Custom(codec) => codec.fixed_size(),
        }
    }

    pub fn decode(&self, input: &mut InputBuffer<'_>, scope: &Record) -> Result<Value, CodecError> {
        match self {
            Schema::Int(format) => format.read(input).map(Value::Int),
            Schema::Flag => primitive::decode_flag(input),
            Schema::Bytes(size) => primitive::decode_bytes(input, *size),
            Schema::Text(size) => primitive::decode_text(input, *size),
            Schema::Padding(size) => primitive::decode_padding(input, *size),
            Schema::Const(bytes) => primitive::decode_const(input, bytes),
            Schema::Opcode => opcode::decode_opcode(input).map(|op| Value::Int(i64::from(op))),
            Schema::Enum { inner, table } => {
                let offset = input.offset();
                let raw = inner.decode(input, scope)?;
                let key = raw.expect_int()?;
                let Ok(key) = u64::try_from(key) else {
                    return Err(ErrorKind::invalid(offset, format!("negative {} discriminant {key}", table.name())).into());
                };
                table.lookup(key).map(Value::Enum).ok_or_else(|| {
                    ErrorKind::UnhandledDiscriminant { discriminant: table.name().to_string(), value: key, offset }.into()
                })
            }
            Schema::Adapted { inner, adapter } => {
                let offset = input.offset();
                let raw = inner.decode(input, scope)?;
                adapter.decode(raw, offset)
            }
            Schema::Struct(inner) => {
                let mut record = Record::new();
                inner.decode_into(input, &mut record)?;
                Ok(Value::Record(record))
            }
            Schema::BitPack(pack) => pack.decode(input),
            Schema::Switch(switch) => switch.decode(input, scope),
            Schema::Greedy(element) => greedy::decode(element, input, scope),
            Schema::Select(select) => select.decode(input, scope),
            Schema::Custom(codec) => codec.decode(input, scope),
        }
    }

    pub fn encode(&self, value: &Value, output: &mut OutputBuffer, scope: &Record) -> Result<(), CodecError> {
        match self {
            Schema::Int(format) => format.write(value.expect_int()?, output),
            Schema::Flag => primitive::encode_flag(value, output),
            Schema::Bytes(size) => primitive::encode_bytes(value, *size, output),
            Schema::Text(size) => primitive::encode_text(value, *size, output),
            Schema::Padding(size) => {
                primitive::encode_padding(*size, output);
                Ok(())
            }
            Schema::Const(bytes) => {
                output.write(bytes);
                Ok(())
            }
            Schema::Opcode => {
                let raw = value.expect_int()?;
                let op = u32::try_from(raw)
                    .map_err(|_| CodecError::from(ErrorKind::out_of_range(raw, "not an opcode")))?;
                opcode::encode_opcode(op, output)
            }
            Schema::Enum { inner, table } => {
                let raw = match value {
                    Value::Enum(variant) => variant.raw(),
                    other => discriminant_key(other)?,
                };
                if !table.contains(raw) {
                    return Err(ErrorKind::out_of_range(
                        format!("0x{raw:x}"),
                        format!("not a member of {}", table.name()),
                    )
                    .into());
                }
                inner.encode(&Value::Int(raw as i64), output, scope)
            }
            Schema::Adapted { inner, adapter } => inner.encode(&adapter.encode(value)?, output, scope),
            Schema::Struct(inner) => inner.encode_from(value.expect_record()?, output),
            Schema::BitPack(pack) => pack.encode_record(value.expect_record()?, output),
            Schema::Switch(switch) => switch.encode(value, output, scope),
            Schema::Greedy(element) => greedy::encode(element, value, output, scope),
            Schema::Select(select) => select.encode(value, output, scope),
            Schema::Custom(codec) => codec.encode(value, output, scope),
        }
    }

    /// Decodes a complete buffer, failing on unconsumed input.
    pub fn decode_bytes(&self, bytes: &[u8]) -> Result<Value, CodecError> {
        let mut input = InputBuffer::new(bytes);
        let value = self.decode(&mut input, &Record::new())?;
        if input.bytes_left() > 0 {
            return Err(ErrorKind::TrailingData { offset: input.offset(), remaining: input.bytes_left() }.into());
        }

        Ok(value)
    }

    pub fn encode_value(&self, value: &Value) -> Result<Vec<u8>, CodecError> {
        let mut output = OutputBuffer::new();
        self.encode(value, &mut output, &Record::new())?;

        Ok(output.into_inner())
    }
}
