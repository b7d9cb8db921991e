use std::fmt;

use time::macros::date;
use time::{Date, Duration};

use crate::error::{CodecError, ErrorKind};
use crate::schema::primitive::IntFormat;
use crate::value::Value;

/// Bidirectional transform between a raw decoded value and its domain value.
pub trait Adapter: fmt::Debug + Send + Sync {
    /// `offset` is where the raw value started in the input.
    fn decode(&self, raw: Value, offset: usize) -> Result<Value, CodecError>;

    fn encode(&self, value: &Value) -> Result<Value, CodecError>;
}

/// Physical-unit scaling of a raw integer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    resolution: f64,
    rounding: Option<u32>,
    unknown_value: bool,
}

impl Scale {
    /// Plain count: resolution 1, all-ones reserved for "unknown".
    pub const COUNT: Scale = Scale::new(1.0);

    pub const fn new(resolution: f64) -> Self {
        Self { resolution, rounding: None, unknown_value: true }
    }

    /// Decimal places kept on decode.
    pub const fn rounding(mut self, digits: u32) -> Self {
        self.rounding = Some(digits);
        self
    }

    /// Treats the maximal raw value as a literal instead of the unknown sentinel.
    pub const fn known_only(mut self) -> Self {
        self.unknown_value = false;
        self
    }

    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    pub fn has_unknown(&self) -> bool {
        self.unknown_value
    }

    fn integral(&self) -> Option<i64> {
        (self.resolution >= 1.0 && self.resolution.fract() == 0.0).then_some(self.resolution as i64)
    }
}

fn round_to(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    (value * factor).round() / factor
}

#[derive(Debug, Clone, Copy)]
pub struct Scaled {
    format: IntFormat,
    scale: Scale,
}

impl Scaled {
    pub fn new(format: IntFormat, scale: Scale) -> Self {
        Self { format, scale }
    }

    fn sentinel(&self) -> Option<i64> {
        self.scale.unknown_value.then(|| self.format.max())
    }
}

impl Adapter for Scaled {
    fn decode(&self, raw: Value, _offset: usize) -> Result<Value, CodecError> {
        let raw = raw.expect_int()?;
        if Some(raw) == self.sentinel() {
            return Ok(Value::Unknown);
        }

        if let Some(factor) = self.scale.integral() {
            if let Some(value) = raw.checked_mul(factor) {
                return Ok(Value::Int(value));
            }
        }

        let value = raw as f64 * self.scale.resolution;
        Ok(Value::Float(match self.scale.rounding {
            Some(digits) => round_to(value, digits),
            None => value,
        }))
    }

    fn encode(&self, value: &Value) -> Result<Value, CodecError> {
        let number = match value {
            Value::Unknown => {
                return self.sentinel().map(Value::Int).ok_or_else(|| {
                    ErrorKind::out_of_range("unknown", "field reserves no unknown value").into()
                });
            }
            other => other.as_f64().ok_or_else(|| CodecError::mismatch("number", other.kind_name()))?,
        };

        let scaled = (number / self.scale.resolution).round();
        let upper = match self.sentinel() {
            Some(sentinel) => sentinel - 1,
            None => self.format.max(),
        };
        if !scaled.is_finite() || scaled < self.format.min() as f64 || scaled > upper as f64 {
            return Err(ErrorKind::out_of_range(
                number,
                format!(
                    "raw {} outside {}..={} at resolution {}",
                    scaled,
                    self.format.min(),
                    upper,
                    self.scale.resolution
                ),
            )
            .into());
        }

        Ok(Value::Int(scaled as i64))
    }
}

/// `1.1^(raw - 64)` seconds, raw 0 meaning zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct Exponential;

impl Exponential {
    const BASE: f64 = 1.1;
    const BIAS: i64 = 64;
}

impl Adapter for Exponential {
    fn decode(&self, raw: Value, _offset: usize) -> Result<Value, CodecError> {
        let raw = raw.expect_int()?;
        if raw == 0 {
            return Ok(Value::Float(0.0));
        }

        Ok(Value::Float(round_to(Self::BASE.powf((raw - Self::BIAS) as f64), 4)))
    }

    fn encode(&self, value: &Value) -> Result<Value, CodecError> {
        let number = value.as_f64().ok_or_else(|| CodecError::mismatch("number", value.kind_name()))?;
        if number == 0.0 {
            return Ok(Value::Int(0));
        }
        if !number.is_finite() || number < 0.0 {
            return Err(ErrorKind::out_of_range(number, "exponential time must be positive").into());
        }

        let raw = (number.ln() / Self::BASE.ln()).round() as i64 + Self::BIAS;
        if !(1..=255).contains(&raw) {
            return Err(ErrorKind::out_of_range(number, "outside the exponential time scale").into());
        }

        Ok(Value::Int(raw))
    }
}

/// Calendar date stored as a day count since 1970-01-01.
#[derive(Debug, Clone, Copy, Default)]
pub struct DaysSinceEpoch;

impl DaysSinceEpoch {
    pub const EPOCH: Date = date!(1970 - 01 - 01);
}

impl Adapter for DaysSinceEpoch {
    fn decode(&self, raw: Value, offset: usize) -> Result<Value, CodecError> {
        let days = raw.expect_int()?;
        Self::EPOCH
            .checked_add(Duration::days(days))
            .map(Value::Date)
            .ok_or_else(|| ErrorKind::invalid(offset, format!("{days} days past epoch")).into())
    }

    fn encode(&self, value: &Value) -> Result<Value, CodecError> {
        match value {
            Value::Date(date) => Ok(Value::Int((*date - Self::EPOCH).whole_days())),
            Value::Int(days) => Ok(Value::Int(*days)),
            other => Err(CodecError::mismatch("date", other.kind_name())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scaled(format: IntFormat, scale: Scale) -> Scaled {
        Scaled::new(format, scale)
    }

    #[test]
    fn sentinel_decodes_and_encodes_regardless_of_resolution() {
        for scale in [Scale::COUNT, Scale::new(0.01).rounding(2), Scale::new(1000.0).rounding(1)] {
            let adapter = scaled(IntFormat::U16_LE, scale);
            assert_eq!(adapter.decode(Value::Int(0xffff), 0).expect("decode"), Value::Unknown);
            assert_eq!(adapter.encode(&Value::Unknown).expect("encode"), Value::Int(0xffff));
        }

        let signed = scaled(IntFormat::I16_LE, Scale::new(0.01).rounding(2));
        assert_eq!(signed.decode(Value::Int(0x7fff), 0).expect("decode"), Value::Unknown);
    }

    #[test]
    fn sentinel_is_not_encodable_as_a_literal() {
        let adapter = scaled(IntFormat::U8, Scale::COUNT);
        let err = adapter.encode(&Value::Int(255)).expect_err("collides with unknown");
        assert!(matches!(err.kind(), ErrorKind::ValueOutOfRange { .. }));
        assert_eq!(adapter.encode(&Value::Int(254)).expect("encode"), Value::Int(254));
    }

    #[test]
    fn known_only_fields_keep_the_maximum() {
        let adapter = scaled(IntFormat::U24_LE, Scale::COUNT.known_only());
        assert_eq!(adapter.decode(Value::Int(0xff_ffff), 0).expect("decode"), Value::Int(16_777_215));
        assert!(adapter.encode(&Value::Unknown).is_err());
    }

    #[test]
    fn fractional_resolution_rounds() {
        let adapter = scaled(IntFormat::I16_LE, Scale::new(0.5).rounding(1).known_only());
        assert_eq!(adapter.decode(Value::Int(-32767), 0).expect("decode"), Value::Float(-16383.5));
        assert_eq!(adapter.encode(&Value::Float(-16383.5)).expect("encode"), Value::Int(-32767));

        let millis = scaled(IntFormat::U24_LE, Scale::new(0.001).rounding(3));
        assert_eq!(millis.decode(Value::Int(42_000), 0).expect("decode"), Value::Float(42.0));
        assert_eq!(millis.encode(&Value::Int(314)).expect("encode"), Value::Int(314_000));
    }

    #[test]
    fn integral_resolution_yields_integers() {
        let adapter = scaled(IntFormat::U24_LE, Scale::new(1000.0).rounding(1));
        assert_eq!(adapter.decode(Value::Int(7), 0).expect("decode"), Value::Int(7000));
        assert_eq!(adapter.encode(&Value::Int(7000)).expect("encode"), Value::Int(7));
    }

    #[test]
    fn exponential_reencodes_every_raw_value() {
        for raw in 0..=255 {
            let decoded = Exponential.decode(Value::Int(raw), 0).expect("decode");
            assert_eq!(Exponential.encode(&decoded).expect("encode"), Value::Int(raw), "raw {raw}");
        }
        assert_eq!(Exponential.decode(Value::Int(64), 0).expect("decode"), Value::Float(1.0));
    }

    #[test]
    fn exponential_rejects_negative_time() {
        assert!(Exponential.encode(&Value::Float(-1.0)).is_err());
    }

    #[test]
    fn days_since_epoch() {
        let decoded = DaysSinceEpoch.decode(Value::Int(18_000), 0).expect("decode");
        assert_eq!(decoded, Value::Date(date!(2019 - 04 - 14)));
        assert_eq!(DaysSinceEpoch.encode(&decoded).expect("encode"), Value::Int(18_000));
    }
}
