use time::{Duration, OffsetDateTime, UtcOffset};

use crate::error::{CodecError, ErrorKind, SchemaError};
use crate::schema::adapter::Adapter;
use crate::schema::bitpack::{BitField, BitPack};
use crate::schema::primitive::IntFormat;
use crate::schema::structure::Field;
use crate::schema::Schema;
use crate::value::{Record, Value};

/// Seconds between the Unix epoch and the mesh TAI epoch (2000-01-01T00:00:00).
pub const MESH_UNIX_EPOCH_DIFF: i64 = 946_684_800;

const ZONE_STEP_SECONDS: i32 = 15 * 60;
const ZONE_BIAS: i32 = 64;
const DELTA_BIAS: i64 = 255;
const DELTA_MAX_RAW: i64 = 0x7fff;
const TAI_MAX: i64 = (1 << 40) - 1;

/// Time zone offset octet: 15 minute steps biased by 64.
pub fn time_zone_offset(raw: u8) -> Option<UtcOffset> {
    UtcOffset::from_whole_seconds((i32::from(raw) - ZONE_BIAS) * ZONE_STEP_SECONDS).ok()
}

pub fn time_zone_offset_raw(offset: UtcOffset) -> Result<u8, CodecError> {
    let seconds = offset.whole_seconds();
    if seconds % ZONE_STEP_SECONDS != 0 {
        return Err(ErrorKind::out_of_range(offset, "not a multiple of 15 minutes").into());
    }

    u8::try_from(seconds / ZONE_STEP_SECONDS + ZONE_BIAS)
        .map_err(|_| ErrorKind::out_of_range(offset, "outside the time zone octet").into())
}

/// TAI-UTC delta: raw seconds biased by 255.
pub fn tai_utc_delta(raw: i64) -> Duration {
    Duration::seconds(raw - DELTA_BIAS)
}

pub fn tai_utc_delta_raw(delta: Duration) -> Result<i64, CodecError> {
    if delta.subsec_nanoseconds() != 0 {
        return Err(ErrorKind::out_of_range(delta, "TAI-UTC delta has whole seconds only").into());
    }

    let raw = delta.whole_seconds() + DELTA_BIAS;
    if !(0..=DELTA_MAX_RAW).contains(&raw) {
        return Err(ErrorKind::out_of_range(delta, "outside -255..=32512 seconds").into());
    }

    Ok(raw)
}

fn zone_from_record(record: &Record, offset: usize) -> Result<UtcOffset, CodecError> {
    let raw = record.require("time_zone_offset")?.expect_int()?;
    u8::try_from(raw)
        .ok()
        .and_then(time_zone_offset)
        .ok_or_else(|| ErrorKind::invalid(offset, format!("time zone octet 0x{raw:02x}")).into())
}

/// Local calendar time from TAI seconds and the zone it was recorded in.
///
/// The zone offset is added to the instant as well as used for display, so
/// `tai_seconds = 0` at -14:30 reads as 1999-12-30T19:00-14:30.
pub fn local_datetime(tai_seconds: i64, zone: UtcOffset, offset: usize) -> Result<OffsetDateTime, CodecError> {
    let unix = tai_seconds + MESH_UNIX_EPOCH_DIFF + i64::from(zone.whole_seconds());
    OffsetDateTime::from_unix_timestamp(unix)
        .ok()
        .and_then(|instant| instant.checked_to_offset(zone))
        .ok_or_else(|| ErrorKind::invalid(offset, format!("TAI seconds {tai_seconds} out of calendar range")).into())
}

/// Inverse of [`local_datetime`]; returns the TAI seconds and the zone octet.
pub fn tai_seconds_of(date: OffsetDateTime) -> Result<(i64, u8), CodecError> {
    let zone = date.offset();
    let tai = date.unix_timestamp() - MESH_UNIX_EPOCH_DIFF - i64::from(zone.whole_seconds());
    if !(0..=TAI_MAX).contains(&tai) {
        return Err(ErrorKind::out_of_range(date, "before the mesh epoch or beyond 40 bits").into());
    }

    Ok((tai, time_zone_offset_raw(zone)?))
}

/// Timestamp carried by emergency lighting test status messages.
///
/// Eight octets on the wire: 40-bit TAI seconds, the zone octet and a
/// big-endian 16-bit word whose low 15 bits hold the biased TAI-UTC delta.
/// Decodes to `{date, tai_utc_delta}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaiTimestamp;

impl TaiTimestamp {
    pub fn schema() -> Result<Schema, SchemaError> {
        let delta = BitPack::new(vec![BitField::constant(1, 0), BitField::uint("tai_utc_delta", 15)])?;
        let raw = Schema::structure(vec![
            Field::named("tai_seconds", Schema::Int(IntFormat::U40_LE)),
            Field::named("time_zone_offset", Schema::Int(IntFormat::U8)),
            Field::embedded(Schema::bitpack(delta)),
        ]);

        Ok(Schema::adapted(raw, TaiTimestamp))
    }
}

impl Adapter for TaiTimestamp {
    fn decode(&self, raw: Value, offset: usize) -> Result<Value, CodecError> {
        let record = raw.expect_record()?;
        let zone = zone_from_record(record, offset)?;
        let tai = record.require("tai_seconds")?.expect_int()?;
        let delta = record.require("tai_utc_delta")?.expect_int()?;

        Ok(Value::Record(
            Record::new()
                .with("date", local_datetime(tai, zone, offset)?)
                .with("tai_utc_delta", tai_utc_delta(delta)),
        ))
    }

    fn encode(&self, value: &Value) -> Result<Value, CodecError> {
        let record = value.expect_record()?;
        let date = match record.require("date")? {
            Value::DateTime(date) => *date,
            other => return Err(CodecError::mismatch("date-time", other.kind_name()).within("date")),
        };
        let delta = match record.require("tai_utc_delta")? {
            Value::Duration(delta) => *delta,
            other => return Err(CodecError::mismatch("duration", other.kind_name()).within("tai_utc_delta")),
        };

        let (tai, zone) = tai_seconds_of(date).map_err(|e| e.within("date"))?;
        let delta = tai_utc_delta_raw(delta).map_err(|e| e.within("tai_utc_delta"))?;

        Ok(Value::Record(
            Record::new()
                .with("tai_seconds", tai)
                .with("time_zone_offset", zone)
                .with("tai_utc_delta", delta),
        ))
    }
}

#[cfg(test)]
mod tests {
    use time::macros::{datetime, offset};

    use super::*;

    #[test]
    fn zone_octet_is_biased_quarter_hours() {
        assert_eq!(time_zone_offset(0x40), Some(offset!(UTC)));
        assert_eq!(time_zone_offset(0x06), Some(offset!(-14:30)));
        assert_eq!(time_zone_offset(0x48), Some(offset!(+2)));
        assert_eq!(time_zone_offset(0xa8), None);
        assert_eq!(time_zone_offset_raw(offset!(-14:30)).expect("raw"), 0x06);
        assert!(time_zone_offset_raw(offset!(+1:10)).is_err());
    }

    #[test]
    fn delta_is_biased_by_255() {
        assert_eq!(tai_utc_delta(0x011f), Duration::seconds(32));
        assert_eq!(tai_utc_delta_raw(Duration::seconds(1800)).expect("raw"), 0x0807);
        assert!(tai_utc_delta_raw(Duration::seconds(-256)).is_err());
    }

    #[test]
    fn epoch_timestamp_with_zero_offset() {
        let schema = TaiTimestamp::schema().expect("schema");
        let bytes = [0x00, 0x00, 0x00, 0x00, 0x00, 0x40, 0x01, 0x1f];
        let value = schema.decode_bytes(&bytes).expect("decode");

        let Some(Value::DateTime(date)) = value.get("date") else {
            panic!("no date in {value:?}");
        };
        assert_eq!(*date, datetime!(2000-01-01 0:00 UTC));
        assert_eq!(date.offset(), offset!(UTC));
        assert_eq!(value.get("tai_utc_delta"), Some(&Value::Duration(Duration::seconds(32))));
        assert_eq!(schema.encode_value(&value).expect("encode"), bytes);
    }

    #[test]
    fn zone_shifts_the_local_reading() {
        let schema = TaiTimestamp::schema().expect("schema");
        let bytes = [0x05, 0x04, 0x03, 0x02, 0x01, 0x06, 0x08, 0x07];
        let value = schema.decode_bytes(&bytes).expect("decode");

        let Some(Value::DateTime(date)) = value.get("date") else {
            panic!("no date in {value:?}");
        };
        assert_eq!(*date, datetime!(2137-03-02 17:02:45 -14:30));
        assert_eq!(date.offset(), offset!(-14:30));
        assert_eq!(value.get("tai_utc_delta"), Some(&Value::Duration(Duration::seconds(1800))));
        assert_eq!(schema.encode_value(&value).expect("encode"), bytes);
    }

    #[test]
    fn out_of_range_zone_octet_is_invalid() {
        let err = TaiTimestamp::schema()
            .expect("schema")
            .decode_bytes(&[0, 0, 0, 0, 0, 0xf0, 0x01, 0x1f])
            .expect_err("zone 0xf0");
        assert!(matches!(err.kind(), ErrorKind::InvalidValue { offset: 0, .. }));
    }

    #[test]
    fn dates_before_the_mesh_epoch_do_not_encode() {
        let value = Value::Record(
            Record::new()
                .with("date", datetime!(1999-01-01 0:00 UTC))
                .with("tai_utc_delta", Duration::ZERO),
        );
        let err = TaiTimestamp::schema().expect("schema").encode_value(&value).expect_err("negative TAI");
        assert_eq!(err.path().to_string(), "date");
    }
}
