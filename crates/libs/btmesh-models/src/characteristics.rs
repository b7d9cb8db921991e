//! Value layouts shared by device properties.
//!
//! Each function returns the schema of one characteristic. Scaled fields
//! reserve their all-ones raw value for "unknown" unless built with
//! [`Scale::known_only`].

use btmesh_access::{
    BitField, BitPack, DaysSinceEpoch, Exponential, Field, IntFormat, Scale, Schema, SchemaError,
};
use strum::{EnumIter, FromRepr, IntoStaticStr};

const CURRENT: Scale = Scale::new(0.01).rounding(2);
const VOLTAGE: Scale = Scale::new(1.0 / 64.0);
const DECIHOUR: Scale = Scale::new(0.1).rounding(1);
const MILLIS: Scale = Scale::new(0.001).rounding(3);
const KILO: Scale = Scale::new(1000.0).rounding(1);
const HALF: Scale = Scale::new(0.5).rounding(1);
const DECI: Scale = Scale::new(0.1).rounding(1);
const CENTI: Scale = Scale::new(0.01).rounding(2);
const CHROMATICITY: Scale = Scale::new(1.0 / 65535.0).known_only();

#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRepr, IntoStaticStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum LightDistribution {
    TypeNotSpecified = 0x00,
    TypeI = 0x01,
    TypeII = 0x02,
    TypeIII = 0x03,
    TypeIV = 0x04,
    TypeV = 0x05,
}

btmesh_access::mesh_enum!(LightDistribution, u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRepr, IntoStaticStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum LightSourceType {
    TypeNotSpecified = 0x00,
    LowPressureFluorescent = 0x01,
    HighIntensityDischarge = 0x02,
    LowVoltageHalogen = 0x03,
    Incandescent = 0x04,
    LightEmittingDiode = 0x05,
    OrganicLightEmittingDiode = 0x06,
    OtherThanListedAbove = 0xfd,
    NoLightSource = 0xfe,
    MultipleLightSourceTypes = 0xff,
}

btmesh_access::mesh_enum!(LightSourceType, u8);

fn record(fields: Vec<(&'static str, Schema)>) -> Schema {
    Schema::structure(fields.into_iter().map(|(name, schema)| Field::named(name, schema)).collect())
}

fn count(format: IntFormat) -> Schema {
    Schema::scaled(format, Scale::COUNT)
}

fn current() -> Schema {
    Schema::scaled(IntFormat::U16_LE, CURRENT)
}

fn voltage() -> Schema {
    Schema::scaled(IntFormat::U16_LE, VOLTAGE)
}

fn power() -> Schema {
    Schema::scaled(IntFormat::U24_LE, DECI)
}

fn temperature_8() -> Schema {
    Schema::scaled(IntFormat::I8, HALF)
}

fn temperature_16() -> Schema {
    Schema::scaled(IntFormat::I16_LE, CENTI)
}

fn relative_value(scale: Scale) -> Schema {
    Schema::scaled(IntFormat::U8, scale)
}

// time

pub fn time_millisecond_24() -> Schema {
    record(vec![("seconds", Schema::scaled(IntFormat::U24_LE, MILLIS))])
}

pub fn time_hour_24() -> Schema {
    record(vec![("hours", count(IntFormat::U24_LE))])
}

pub fn time_second_16() -> Schema {
    record(vec![("seconds", count(IntFormat::U16_LE))])
}

pub fn time_second_32() -> Schema {
    record(vec![("seconds", count(IntFormat::U32_LE))])
}

pub fn time_exponential_8() -> Schema {
    record(vec![("seconds", Schema::adapted(Schema::Int(IntFormat::U8), Exponential))])
}

pub fn time_decihour_8() -> Schema {
    record(vec![("hour", Schema::scaled(IntFormat::U8, DECIHOUR))])
}

pub fn date_utc() -> Schema {
    record(vec![("date", Schema::adapted(Schema::Int(IntFormat::U24_LE), DaysSinceEpoch))])
}

// electric current

pub fn electric_current() -> Schema {
    record(vec![("current", current())])
}

pub fn average_current() -> Schema {
    record(vec![("electric_current_value", current()), ("sensing_duration", time_exponential_8())])
}

pub fn electric_current_range() -> Schema {
    record(vec![("minimum_electric_current_value", current()), ("maximum_electric_current_value", current())])
}

pub fn electric_current_specification() -> Schema {
    record(vec![
        ("minimum_electric_current_value", current()),
        ("typical_electric_current_value", current()),
        ("maximum_electric_current_value", current()),
    ])
}

pub fn electric_current_statistics() -> Schema {
    Schema::structure(vec![
        Field::named("average_electric_current_value", current()),
        Field::named("standard_deviation_electric_current_value", current()),
        Field::embedded(electric_current_range()),
        Field::named("sensing_duration", time_exponential_8()),
    ])
}

pub fn relative_value_in_a_current_range() -> Schema {
    record(vec![
        ("relative_value", relative_value(HALF)),
        ("minimum_current", current()),
        ("maximum_current", current()),
    ])
}

// voltage

pub fn voltage_value() -> Schema {
    record(vec![("voltage", voltage())])
}

pub fn average_voltage() -> Schema {
    record(vec![("voltage_value", voltage()), ("sensing_duration", time_exponential_8())])
}

pub fn voltage_range() -> Schema {
    record(vec![
        ("minimum_voltage_value", voltage()),
        ("typical_voltage_value", voltage()),
        ("maximum_voltage_value", voltage()),
    ])
}

pub fn voltage_statistics() -> Schema {
    record(vec![
        ("average_voltage_value", voltage()),
        ("standard_deviation_voltage_value", voltage()),
        ("minimum_voltage_value", voltage()),
        ("maximum_voltage_value", voltage()),
        ("sensing_duration", time_exponential_8()),
    ])
}

pub fn relative_value_in_a_voltage_range() -> Schema {
    record(vec![
        ("relative_value", relative_value(HALF.known_only())),
        ("minimum_voltage", voltage()),
        ("maximum_voltage", voltage()),
    ])
}

pub fn high_voltage() -> Schema {
    record(vec![("high_voltage", Schema::scaled(IntFormat::U24_LE, VOLTAGE.known_only()))])
}

pub fn voltage_frequency() -> Schema {
    record(vec![("voltage_frequency", Schema::Int(IntFormat::U16_LE))])
}

// energy

pub fn energy() -> Schema {
    record(vec![("energy", count(IntFormat::U24_LE))])
}

/// Also used for apparent and active energy, which share the layout.
pub fn energy_32() -> Schema {
    record(vec![("energy", Schema::scaled(IntFormat::U32_LE, MILLIS.known_only()))])
}

pub fn energy_in_a_period_of_day() -> Schema {
    record(vec![
        ("energy_value", count(IntFormat::U24_LE)),
        ("start_time", time_decihour_8()),
        ("end_time", time_decihour_8()),
    ])
}

// power

pub fn power_value() -> Schema {
    record(vec![("power", power())])
}

pub fn power_specification() -> Schema {
    record(vec![
        ("minimum_power_value", power()),
        ("typical_power_value", power()),
        ("maximum_power_value", power()),
    ])
}

// temperature

pub fn temperature() -> Schema {
    record(vec![("temperature", temperature_16())])
}

pub fn temperature_8_value() -> Schema {
    record(vec![("temperature", temperature_8())])
}

pub fn temperature_range() -> Schema {
    record(vec![("minimum_temperature", temperature_8()), ("maximum_temperature", temperature_8())])
}

pub fn temperature_8_statistics() -> Schema {
    Schema::structure(vec![
        Field::named("average_temperature", temperature_8()),
        Field::named("standard_deviation_temperature", temperature_8()),
        Field::embedded(temperature_range()),
        Field::named("sensing_duration", time_exponential_8()),
    ])
}

pub fn temperature_8_in_a_period_of_day() -> Schema {
    record(vec![
        ("temperature", temperature_8()),
        ("start_time", time_decihour_8()),
        ("end_time", time_decihour_8()),
    ])
}

pub fn temperature_statistics() -> Schema {
    record(vec![
        ("average_temperature", temperature_16()),
        ("standard_deviation_temperature", temperature_16()),
        ("minimum_temperature", temperature_16()),
        ("maximum_temperature", temperature_16()),
        ("sensing_duration", time_exponential_8()),
    ])
}

pub fn high_temperature() -> Schema {
    record(vec![("temperature", Schema::scaled(IntFormat::I16_LE, HALF.known_only()))])
}

pub fn relative_value_in_a_temperature_range() -> Schema {
    record(vec![
        ("relative_value", relative_value(HALF.known_only())),
        ("minimum_temperature", temperature_16()),
        ("maximum_temperature", temperature_16()),
    ])
}

// luminosity

pub fn luminous_flux() -> Schema {
    record(vec![("luminous_flux", count(IntFormat::U16_LE))])
}

pub fn luminous_flux_range() -> Schema {
    record(vec![("minimum_luminous_flux", count(IntFormat::U16_LE)), ("maximum_luminous_flux", count(IntFormat::U16_LE))])
}

pub fn luminous_energy() -> Schema {
    record(vec![("luminous_energy", Schema::scaled(IntFormat::U24_LE, KILO))])
}

pub fn luminous_exposure() -> Schema {
    record(vec![("luminous_exposure", Schema::scaled(IntFormat::U24_LE, KILO))])
}

pub fn luminous_intensity() -> Schema {
    record(vec![("luminous_intensity", count(IntFormat::U16_LE))])
}

pub fn luminous_efficacy() -> Schema {
    record(vec![("luminous_efficacy", Schema::scaled(IntFormat::U16_LE, DECI))])
}

pub fn illuminance() -> Schema {
    record(vec![("illuminance", Schema::scaled(IntFormat::U24_LE, CENTI.known_only()))])
}

pub fn relative_value_in_an_illuminance_range() -> Schema {
    record(vec![
        ("relative_value", relative_value(HALF.known_only())),
        ("minimum_illuminance", Schema::scaled(IntFormat::U24_LE, CENTI.known_only())),
        ("maximum_illuminance", Schema::scaled(IntFormat::U24_LE, CENTI.known_only())),
    ])
}

pub fn perceived_lightness() -> Schema {
    record(vec![("perceived_lightness", Schema::Int(IntFormat::U16_LE))])
}

pub fn light_distribution() -> Schema {
    record(vec![("light_distribution", Schema::enumeration::<LightDistribution>(Schema::Int(IntFormat::U8)))])
}

pub fn light_output() -> Schema {
    record(vec![("light_output", Schema::scaled(IntFormat::U24_LE, Scale::COUNT.rounding(1).known_only()))])
}

pub fn light_source_type() -> Schema {
    record(vec![("light_source_type", Schema::enumeration::<LightSourceType>(Schema::Int(IntFormat::U8)))])
}

// counters

pub fn percentage_8() -> Schema {
    record(vec![("percentage", relative_value(HALF))])
}

pub fn count_16() -> Schema {
    record(vec![("count", count(IntFormat::U16_LE))])
}

pub fn count_24() -> Schema {
    record(vec![("count", count(IntFormat::U24_LE))])
}

pub fn coefficient() -> Schema {
    record(vec![("coefficient", count(IntFormat::U32_LE))])
}

// chromaticity

pub fn chromaticity_tolerance() -> Schema {
    record(vec![("chromaticity_tolerance", Schema::scaled(IntFormat::I8, Scale::new(0.0001).rounding(4).known_only()))])
}

pub fn chromatic_distance_from_planckian() -> Schema {
    record(vec![(
        "distance_from_planckian",
        Schema::scaled(IntFormat::I16_LE, Scale::new(0.00001).rounding(5).known_only()),
    )])
}

pub fn correlated_color_temperature() -> Schema {
    record(vec![("correlated_color_temperature", Schema::scaled(IntFormat::U16_LE, Scale::COUNT.rounding(1)))])
}

pub fn chromaticity_coordinates() -> Schema {
    record(vec![
        ("chromaticity_x_coordinate", Schema::scaled(IntFormat::U16_LE, CHROMATICITY)),
        ("chromaticity_y_coordinate", Schema::scaled(IntFormat::U16_LE, CHROMATICITY)),
    ])
}

pub fn color_rendering_index() -> Schema {
    record(vec![("color_rendering_index", Schema::scaled(IntFormat::I8, Scale::COUNT.known_only()))])
}

// miscellaneous

pub fn cosine_of_the_angle() -> Schema {
    record(vec![("cosine_of_the_angle", Schema::Int(IntFormat::I8))])
}

pub fn global_trade_item_number() -> Schema {
    record(vec![("global_trade_item_number", Schema::Int(IntFormat::U48_LE))])
}

/// Category in the upper ten bits of a little-endian 16-bit word.
pub fn appearance() -> Result<Schema, SchemaError> {
    let pack = BitPack::reversed(vec![BitField::uint("category", 10), BitField::uint("sub_category", 6)])?;

    Ok(Schema::structure(vec![Field::embedded(Schema::bitpack(pack))]))
}

pub fn country_code() -> Schema {
    record(vec![("country_code", count(IntFormat::U16_LE))])
}

pub fn presence() -> Schema {
    record(vec![("presence_detected", Schema::Flag)])
}

pub fn event_statistics() -> Schema {
    record(vec![
        ("number_of_events", count_16()),
        ("average_event_duration", time_second_16()),
        ("time_elapsed_since_last_event", time_exponential_8()),
        ("sensing_duration", time_exponential_8()),
    ])
}

pub fn relative_runtime_in_a_generic_level_range() -> Schema {
    record(vec![
        ("relative_value", relative_value(HALF.known_only())),
        ("minimum_generic_level", Schema::scaled(IntFormat::U16_LE, Scale::COUNT.known_only())),
        ("maximum_generic_level", Schema::scaled(IntFormat::U16_LE, Scale::COUNT.known_only())),
    ])
}

/// UTF-8 text NUL padded to `size` octets, decoded as a bare string.
pub fn fixed_string(size: usize) -> Schema {
    Schema::Text(size)
}

#[cfg(test)]
mod tests {
    use btmesh_access::{EnumValue, Record, Value};
    use time::macros::date;

    use super::*;

    #[test]
    fn statistics_embed_their_range() {
        let schema = temperature_8_statistics();
        let bytes = [0x28, 0x02, 0xf6, 0x50, 0x40];
        let value = schema.decode_bytes(&bytes).expect("decode");

        let expected = Record::new()
            .with("average_temperature", 20.0)
            .with("standard_deviation_temperature", 1.0)
            .with("minimum_temperature", -5.0)
            .with("maximum_temperature", 40.0)
            .with("sensing_duration", Record::new().with("seconds", 1.0));
        assert_eq!(value, Value::Record(expected));
        assert_eq!(schema.encode_value(&value).expect("encode"), bytes);
    }

    #[test]
    fn unknown_current_is_the_sentinel() {
        let value = electric_current().decode_bytes(&[0xff, 0xff]).expect("decode");
        assert_eq!(value.get("current"), Some(&Value::Unknown));

        let value = illuminance().decode_bytes(&[0xff, 0xff, 0xff]).expect("decode");
        assert_eq!(value.get("illuminance"), Some(&Value::Float(167_772.15)));
    }

    #[test]
    fn appearance_is_a_reversed_word() {
        let schema = appearance().expect("schema");
        let value = schema.decode_bytes(&[0x41, 0x09]).expect("decode");
        assert_eq!(value, Value::Record(Record::new().with("category", 0x25).with("sub_category", 1)));
    }

    #[test]
    fn date_of_manufacture_counts_days() {
        let value = date_utc().decode_bytes(&[0x50, 0x46, 0x00]).expect("decode");
        assert_eq!(value.get("date"), Some(&Value::Date(date!(2019 - 04 - 14))));
    }

    #[test]
    fn light_source_type_accepts_reserved_top_values() {
        let value = light_source_type().decode_bytes(&[0xfe]).expect("decode");
        assert_eq!(value.get("light_source_type"), Some(&Value::Enum(EnumValue::new(0xfe, "no_light_source"))));
        assert!(light_source_type().decode_bytes(&[0x07]).is_err());
    }

    #[test]
    fn fixed_string_pads_on_encode() {
        let encoded = fixed_string(8).encode_value(&Value::from("1.0.3")).expect("encode");
        assert_eq!(encoded, b"1.0.3\0\0\0");
    }
}
