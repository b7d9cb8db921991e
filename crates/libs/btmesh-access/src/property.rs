//! Identifier-selected payloads.
//!
//! Several message families carry a 16-bit identifier followed by a value
//! whose layout depends on it. [`PropertyDispatch`] decodes the header,
//! resolves the value schema from a [`PropertyTable`] and stores the value
//! under the identifier's symbolic name, next to the raw `property_id`.

use std::collections::BTreeMap;
use std::sync::Arc;

use log::trace;

use crate::buffer::{InputBuffer, OutputBuffer};
use crate::enums::MeshEnum;
use crate::error::{CodecError, ErrorKind, SchemaError};
use crate::schema::{discriminant_key, Codec, Field, IntFormat, Schema, Struct};
use crate::value::{Record, Value};

/// Name of the identifier field in every dispatched header.
pub const PROPERTY_ID: &str = "property_id";

#[derive(Debug, Clone)]
pub struct PropertyEntry<I> {
    id: I,
    schema: Schema,
}

impl<I: MeshEnum> PropertyEntry<I> {
    pub fn id(&self) -> I {
        self.id
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Field tag the decoded value is stored under.
    pub fn field(&self) -> &'static str {
        self.id.name()
    }
}

/// Registry from identifier to value schema.
#[derive(Debug, Clone)]
pub struct PropertyTable<I> {
    entries: BTreeMap<u64, PropertyEntry<I>>,
}

impl<I: MeshEnum> Default for PropertyTable<I> {
    fn default() -> Self {
        Self { entries: BTreeMap::new() }
    }
}

impl<I: MeshEnum> PropertyTable<I> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, id: I, schema: Schema) -> Result<(), SchemaError> {
        if self.entries.contains_key(&id.raw()) {
            return Err(SchemaError::DuplicateKey { table: I::TABLE_NAME.to_string(), key: id.raw() });
        }
        self.entries.insert(id.raw(), PropertyEntry { id, schema });

        Ok(())
    }

    pub fn from_entries(entries: impl IntoIterator<Item = (I, Schema)>) -> Result<Self, SchemaError> {
        let mut table = Self::new();
        for (id, schema) in entries {
            table.register(id, schema)?;
        }

        Ok(table)
    }

    pub fn get(&self, id: I) -> Option<&PropertyEntry<I>> {
        self.get_raw(id.raw())
    }

    pub fn get_raw(&self, raw: u64) -> Option<&PropertyEntry<I>> {
        self.entries.get(&raw)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = I> + '_ {
        self.entries.values().map(|entry| entry.id)
    }

    /// Little-endian 16-bit identifier decoded as `I`.
    pub fn id_schema() -> Schema {
        Schema::enumeration::<I>(Schema::Int(IntFormat::U16_LE))
    }
}

/// Header, then the registry-selected value, re-keyed under the identifier's name.
#[derive(Debug, Clone)]
pub struct PropertyDispatch<I> {
    header: Struct,
    table: Arc<PropertyTable<I>>,
}

impl<I: MeshEnum> PropertyDispatch<I> {
    /// Header holding only the identifier.
    pub fn new(table: Arc<PropertyTable<I>>) -> Self {
        Self::with_fields(Vec::new(), table)
    }

    /// Header holding the identifier followed by `fields`.
    pub fn with_fields(fields: Vec<Field>, table: Arc<PropertyTable<I>>) -> Self {
        let mut header = vec![Field::named(PROPERTY_ID, PropertyTable::<I>::id_schema())];
        header.extend(fields);

        Self { header: Struct::new(header), table }
    }

    pub fn table(&self) -> &PropertyTable<I> {
        &self.table
    }

    pub fn into_schema(self) -> Schema {
        Schema::custom(self)
    }

    fn entry(&self, record: &Record, offset: usize) -> Result<&PropertyEntry<I>, CodecError> {
        let raw = discriminant_key(record.require(PROPERTY_ID)?).map_err(|e| e.within(PROPERTY_ID))?;
        let entry = self.table.get_raw(raw).ok_or_else(|| ErrorKind::UnhandledDiscriminant {
            discriminant: I::TABLE_NAME.to_string(),
            value: raw,
            offset,
        })?;
        trace!("{} 0x{:04x} dispatched to `{}`", I::TABLE_NAME, raw, entry.field());

        Ok(entry)
    }
}

impl<I: MeshEnum> Codec for PropertyDispatch<I> {
    fn decode(&self, input: &mut InputBuffer<'_>, _scope: &Record) -> Result<Value, CodecError> {
        let offset = input.offset();
        let mut record = Record::new();
        self.header.decode_into(input, &mut record)?;

        let entry = self.entry(&record, offset)?;
        let value = entry.schema.decode(input, &record).map_err(|e| e.within(entry.field()))?;
        record.insert(entry.field(), value);

        Ok(Value::Record(record))
    }

    fn encode(&self, value: &Value, output: &mut OutputBuffer, _scope: &Record) -> Result<(), CodecError> {
        let record = value.expect_record()?;
        let entry = self.entry(record, output.offset())?;

        self.header.encode_from(record, output)?;
        let field = entry.field();
        entry.schema.encode(record.require(field)?, output, record).map_err(|e| e.within(field))
    }
}
