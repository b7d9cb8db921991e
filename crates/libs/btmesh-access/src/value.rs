use std::fmt;

use serde::ser::{Error as _, SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use time::format_description::well_known::Rfc3339;
use time::{Date, Duration, OffsetDateTime};

use crate::enums::MeshEnum;
use crate::error::CodecError;

/// A decoded enumerated field: the raw wire value and its symbolic name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnumValue {
    raw: u64,
    name: &'static str,
}

impl EnumValue {
    pub const fn new(raw: u64, name: &'static str) -> Self {
        Self { raw, name }
    }

    pub fn of<E: MeshEnum>(variant: E) -> Self {
        Self::new(variant.raw(), variant.name())
    }

    pub fn raw(&self) -> u64 {
        self.raw
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn to_enum<E: MeshEnum>(&self) -> Option<E> {
        E::from_raw(self.raw)
    }
}

impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(0x{:x})", self.name, self.raw)
    }
}

/// Dynamically shaped value produced by decoding and consumed by encoding.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Unit,
    Bool(bool),
    Int(i64),
    Float(f64),
    /// The "value is not known" sentinel of a scaled field.
    Unknown,
    Bytes(Vec<u8>),
    Text(String),
    Enum(EnumValue),
    Date(Date),
    DateTime(OffsetDateTime),
    Duration(Duration),
    List(Vec<Value>),
    Record(Record),
}

impl Value {
    pub fn enum_of<E: MeshEnum>(variant: E) -> Self {
        Value::Enum(EnumValue::of(variant))
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Unit => "unit",
            Value::Bool(_) => "bool",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Unknown => "unknown",
            Value::Bytes(_) => "bytes",
            Value::Text(_) => "text",
            Value::Enum(_) => "enum",
            Value::Date(_) => "date",
            Value::DateTime(_) => "date-time",
            Value::Duration(_) => "duration",
            Value::List(_) => "list",
            Value::Record(_) => "record",
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Numeric view of `Int` and `Float` values.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<EnumValue> {
        match self {
            Value::Enum(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(v) => Some(v),
            _ => None,
        }
    }

    /// Field lookup on record values.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.as_record().and_then(|record| record.get(field))
    }

    pub fn expect_record(&self) -> Result<&Record, CodecError> {
        self.as_record().ok_or_else(|| CodecError::mismatch("record", self.kind_name()))
    }

    pub fn expect_int(&self) -> Result<i64, CodecError> {
        self.as_int().ok_or_else(|| CodecError::mismatch("integer", self.kind_name()))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

macro_rules! int_into_value {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Value {
            fn from(v: $ty) -> Self {
                Value::Int(i64::from(v))
            }
        })*
    };
}

int_into_value!(i8, i16, i32, i64, u8, u16, u32);

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<EnumValue> for Value {
    fn from(v: EnumValue) -> Self {
        Value::Enum(v)
    }
}

impl From<Date> for Value {
    fn from(v: Date) -> Self {
        Value::Date(v)
    }
}

impl From<OffsetDateTime> for Value {
    fn from(v: OffsetDateTime) -> Self {
        Value::DateTime(v)
    }
}

impl From<Duration> for Value {
    fn from(v: Duration) -> Self {
        Value::Duration(v)
    }
}

impl From<Record> for Value {
    fn from(v: Record) -> Self {
        Value::Record(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::List(v)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Unit => serializer.serialize_unit(),
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::Int(v) => serializer.serialize_i64(*v),
            Value::Float(v) => serializer.serialize_f64(*v),
            Value::Unknown => serializer.serialize_none(),
            Value::Bytes(v) => serializer.serialize_str(&hex::encode(v)),
            Value::Text(v) => serializer.serialize_str(v),
            Value::Enum(v) => serializer.serialize_str(v.name()),
            Value::Date(v) => serializer.collect_str(v),
            Value::DateTime(v) => {
                let rendered = v.format(&Rfc3339).map_err(S::Error::custom)?;
                serializer.serialize_str(&rendered)
            }
            Value::Duration(v) => serializer.serialize_f64(v.as_seconds_f64()),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Record(record) => record.serialize(serializer),
        }
    }
}

/// Insertion-ordered named fields.
///
/// Serves both as the decoded message value and as the decode context that
/// later fields consult for discriminants. Equality ignores field order.
#[derive(Debug, Clone, Default)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Inserts or replaces a field, keeping its original position on replace.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(field, _)| *field == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|(field, _)| field == name).map(|(_, value)| value)
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        let index = self.fields.iter().position(|(field, _)| field == name)?;
        Some(self.fields.remove(index).1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn extend(&mut self, other: Record) {
        for (name, value) in other.fields {
            self.insert(name, value);
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn require(&self, name: &str) -> Result<&Value, CodecError> {
        self.get(name).ok_or_else(|| CodecError::missing(name))
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.iter().all(|(name, value)| other.get(name) == Some(value))
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut record = Record::new();
        for (name, value) in iter {
            record.insert(name, value);
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    #[test]
    fn record_equality_ignores_order() {
        let a = Record::new().with("subopcode", 3u8).with("payload", Record::new());
        let b = Record::new().with("payload", Record::new()).with("subopcode", 3u8);
        assert_eq!(a, b);
        assert_ne!(a, Record::new().with("subopcode", 3u8));
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut record = Record::new().with("a", 1u8).with("b", 2u8);
        record.insert("a", 9u8);
        assert_eq!(record.field_names().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(record.get("a"), Some(&Value::Int(9)));
    }

    #[test]
    fn serializes_to_readable_json() {
        let value = Value::Record(
            Record::new()
                .with("property_id", EnumValue::new(0x8c, "light_distribution"))
                .with("raw", Value::Bytes(vec![0xde, 0xad]))
                .with("made", date!(2019 - 05 - 20))
                .with("at", datetime!(2000-01-01 0:00 UTC))
                .with("delta", Duration::seconds(32))
                .with("temperature", Value::Unknown),
        );

        let json = serde_json::to_value(&value).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "property_id": "light_distribution",
                "raw": "dead",
                "made": "2019-05-20",
                "at": "2000-01-01T00:00:00Z",
                "delta": 32.0,
                "temperature": null,
            })
        );
    }
}
