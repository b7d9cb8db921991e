//! Time Server/Setup Server messages.

use btmesh_access::schema::{local_datetime, tai_seconds_of, tai_utc_delta, tai_utc_delta_raw, time_zone_offset};
use btmesh_access::{
    Adapter, BitField, BitPack, CodecError, ErrorKind, Field, IntFormat, Record, Schema, SchemaError, Value,
};
use strum::{EnumIter, FromRepr, IntoStaticStr};
use time::{Duration, OffsetDateTime};

use crate::family::{FamilyKind, MessageFamily};

/// Nanoseconds per subsecond step (1/256 s).
const SUBSECOND_NANOS: i64 = 3_906_250;
const UNCERTAINTY_STEP_MILLIS: i128 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRepr, IntoStaticStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
#[repr(u32)]
pub enum TimeOpcode {
    TimeGet = 0x8237,
    TimeSet = 0x5c,
    TimeStatus = 0x5d,
    TimeRoleGet = 0x8238,
    TimeRoleSet = 0x8239,
    TimeRoleStatus = 0x823a,
    TimeZoneGet = 0x823b,
    TimeZoneSet = 0x823c,
    TimeZoneStatus = 0x823d,
    TaiUtcDeltaGet = 0x823e,
    TaiUtcDeltaSet = 0x823f,
    TaiUtcDeltaStatus = 0x8240,
}

btmesh_access::mesh_enum!(TimeOpcode, u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRepr, IntoStaticStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum TimeRole {
    None = 0,
    TimeAuthority = 1,
    TimeRelay = 2,
    TimeClient = 3,
}

btmesh_access::mesh_enum!(TimeRole, u8);

/// Converts the raw Time state to `{date, uncertainty, tai_utc_delta, time_authority}`.
///
/// `date` keeps the subsecond in its nanoseconds and is displayed in the
/// zone carried by the message.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeshTime;

impl MeshTime {
    pub fn schema() -> Result<Schema, SchemaError> {
        let delta = BitPack::reversed(vec![BitField::uint("tai_utc_delta", 15), BitField::flag("time_authority")])?;
        let raw = Schema::structure(vec![
            Field::named("tai_seconds", Schema::Int(IntFormat::U40_LE)),
            Field::named("subsecond", Schema::Int(IntFormat::U8)),
            Field::named("uncertainty", Schema::Int(IntFormat::U8)),
            Field::embedded(Schema::bitpack(delta)),
            Field::named("time_zone_offset", Schema::Int(IntFormat::U8)),
        ]);

        Ok(Schema::adapted(raw, MeshTime))
    }
}

fn int_field(record: &Record, name: &str) -> Result<i64, CodecError> {
    record.require(name)?.expect_int().map_err(|e| e.within(name))
}

impl Adapter for MeshTime {
    fn decode(&self, raw: Value, offset: usize) -> Result<Value, CodecError> {
        let record = raw.expect_record()?;
        let zone_raw = int_field(record, "time_zone_offset")?;
        let zone = u8::try_from(zone_raw)
            .ok()
            .and_then(time_zone_offset)
            .ok_or_else(|| CodecError::from(ErrorKind::invalid(offset, format!("time zone octet 0x{zone_raw:02x}"))))?;

        let subsecond = Duration::nanoseconds(int_field(record, "subsecond")? * SUBSECOND_NANOS);
        let date = local_datetime(int_field(record, "tai_seconds")?, zone, offset)?
            .checked_add(subsecond)
            .ok_or_else(|| CodecError::from(ErrorKind::invalid(offset, "subsecond past the calendar range")))?;

        Ok(Value::Record(
            Record::new()
                .with("date", date)
                .with("uncertainty", Duration::milliseconds(int_field(record, "uncertainty")? * 10))
                .with("tai_utc_delta", tai_utc_delta(int_field(record, "tai_utc_delta")?))
                .with("time_authority", record.require("time_authority")?.clone()),
        ))
    }

    fn encode(&self, value: &Value) -> Result<Value, CodecError> {
        let record = value.expect_record()?;
        let date = datetime_field(record, "date")?;
        let uncertainty = duration_field(record, "uncertainty")?;
        let delta = duration_field(record, "tai_utc_delta")?;

        let subsecond = i64::from(date.nanosecond()) / SUBSECOND_NANOS;
        let whole = date
            .replace_nanosecond(0)
            .map_err(|e| CodecError::from(ErrorKind::out_of_range(date, e.to_string())).within("date"))?;
        let (tai, zone) = tai_seconds_of(whole).map_err(|e| e.within("date"))?;

        let millis = uncertainty.whole_milliseconds();
        if millis % UNCERTAINTY_STEP_MILLIS != 0 || !(0..=255 * UNCERTAINTY_STEP_MILLIS).contains(&millis) {
            return Err(CodecError::from(ErrorKind::out_of_range(uncertainty, "not a 10 ms step within 0..=2550 ms"))
                .within("uncertainty"));
        }

        Ok(Value::Record(
            Record::new()
                .with("tai_seconds", tai)
                .with("subsecond", subsecond)
                .with("uncertainty", (millis / UNCERTAINTY_STEP_MILLIS) as i64)
                .with("tai_utc_delta", tai_utc_delta_raw(delta).map_err(|e| e.within("tai_utc_delta"))?)
                .with("time_authority", record.require("time_authority")?.clone())
                .with("time_zone_offset", zone),
        ))
    }
}

fn datetime_field(record: &Record, name: &str) -> Result<OffsetDateTime, CodecError> {
    match record.require(name)? {
        Value::DateTime(date) => Ok(*date),
        other => Err(CodecError::mismatch("date-time", other.kind_name()).within(name)),
    }
}

fn duration_field(record: &Record, name: &str) -> Result<Duration, CodecError> {
    match record.require(name)? {
        Value::Duration(duration) => Ok(*duration),
        other => Err(CodecError::mismatch("duration", other.kind_name()).within(name)),
    }
}

fn tai_utc_delta_pack(name: &'static str) -> Result<Schema, SchemaError> {
    Ok(Schema::bitpack(BitPack::reversed(vec![BitField::padding(1), BitField::uint(name, 15)])?))
}

fn time_zone_set() -> Schema {
    Schema::structure(vec![
        Field::named("time_zone_offset_new", Schema::Int(IntFormat::U8)),
        Field::named("tai_of_zone_change", Schema::Int(IntFormat::U40_LE)),
    ])
}

fn time_zone_status() -> Schema {
    Schema::structure(vec![
        Field::named("time_zone_offset_current", Schema::Int(IntFormat::U8)),
        Field::embedded(time_zone_set()),
    ])
}

fn tai_utc_delta_set() -> Result<Schema, SchemaError> {
    Ok(Schema::structure(vec![
        Field::embedded(tai_utc_delta_pack("tai_utc_delta_new")?),
        Field::named("tai_of_delta_change", Schema::Int(IntFormat::U40_LE)),
    ]))
}

fn tai_utc_delta_status() -> Result<Schema, SchemaError> {
    Ok(Schema::structure(vec![
        Field::embedded(tai_utc_delta_pack("tai_utc_delta_current")?),
        Field::embedded(tai_utc_delta_set()?),
    ]))
}

fn time_role() -> Schema {
    Schema::structure(vec![Field::named("time_role", Schema::enumeration::<TimeRole>(Schema::Int(IntFormat::U8)))])
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Time;

impl MessageFamily for Time {
    type Opcode = TimeOpcode;

    const KIND: FamilyKind = FamilyKind::Time;

    fn messages() -> Result<Vec<(Self::Opcode, Schema)>, SchemaError> {
        use TimeOpcode::*;

        let time = MeshTime::schema()?;

        Ok(vec![
            (TimeGet, Schema::empty()),
            (TimeSet, time.clone()),
            (TimeStatus, time),
            (TimeRoleGet, Schema::empty()),
            (TimeRoleSet, time_role()),
            (TimeRoleStatus, time_role()),
            (TimeZoneGet, Schema::empty()),
            (TimeZoneSet, time_zone_set()),
            (TimeZoneStatus, time_zone_status()),
            (TaiUtcDeltaGet, Schema::empty()),
            (TaiUtcDeltaSet, tai_utc_delta_set()?),
            (TaiUtcDeltaStatus, tai_utc_delta_status()?),
        ])
    }
}
