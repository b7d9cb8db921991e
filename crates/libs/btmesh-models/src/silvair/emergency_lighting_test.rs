use std::sync::Arc;

use btmesh_access::{BitField, BitPack, Field, IntFormat, PropertyTable, Schema, SchemaError, Select, TaiTimestamp};
use strum::{EnumIter, FromRepr, IntoStaticStr};

use super::{vendor_params, vendor_property, vendor_property_get};
use crate::characteristics::time_second_32;
use crate::family::{FamilyKind, MessageFamily};

#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRepr, IntoStaticStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
#[repr(u32)]
pub enum EmergencyLightingTestOpcode {
    SilvairElt = 0xe9_3601,
}

btmesh_access::mesh_enum!(EmergencyLightingTestOpcode, u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRepr, IntoStaticStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum EmergencyLightingTestSubOpcode {
    EltFunctionalTestGet = 0x00,
    EltFunctionalTestStart = 0x01,
    EltFunctionalTestStop = 0x02,
    EltFunctionalTestStatus = 0x03,
    EltDurationTestGet = 0x04,
    EltDurationTestStart = 0x05,
    EltDurationTestStop = 0x06,
    EltDurationTestStatus = 0x07,
    EltPropertyGet = 0x08,
    EltPropertySet = 0x09,
    EltPropertySetUnacknowledged = 0x0a,
    EltPropertyStatus = 0x0b,
}

btmesh_access::mesh_enum!(EmergencyLightingTestSubOpcode, u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRepr, IntoStaticStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum TestExecutionStatus {
    Finished = 0,
    Triggered = 1,
    InProgress = 2,
    Postponed = 3,
    Stopped = 4,
    Dropped = 5,
    Timeout = 6,
    Unknown = 7,
}

btmesh_access::mesh_enum!(TestExecutionStatus, u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRepr, IntoStaticStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
#[repr(u16)]
pub enum EmergencyLightingTestProperty {
    EltDurationTestExecutionTimeout = 0xff84,
    EltFunctionalTestExecutionTimeout = 0xff85,
    EltDurationTestRetryPeriod = 0xff86,
    EltFunctionalTestRetryPeriod = 0xff87,
    EltDurationTestBackupAutomaticDelay = 0xff88,
    EltFunctionalTestBackupAutomaticDelay = 0xff89,
    EltDurationTestBackupAutomaticInterval = 0xff8a,
    EltFunctionalTestBackupAutomaticInterval = 0xff8b,
}

btmesh_access::mesh_enum!(EmergencyLightingTestProperty, u16);

impl EmergencyLightingTestProperty {
    /// Every test property is a 32-bit second count.
    pub fn table() -> Result<PropertyTable<Self>, SchemaError> {
        use strum::IntoEnumIterator;

        PropertyTable::from_entries(Self::iter().map(|id| (id, time_second_32())))
    }
}

fn functional_result() -> Result<Schema, SchemaError> {
    Ok(Schema::bitpack(BitPack::new(vec![
        BitField::padding(5),
        BitField::flag("circuit_fault"),
        BitField::flag("battery_fault"),
        BitField::flag("lamp_fault"),
    ])?))
}

fn duration_result() -> Result<Schema, SchemaError> {
    Ok(Schema::bitpack(BitPack::new(vec![
        BitField::padding(4),
        BitField::flag("battery_duration_fault"),
        BitField::flag("circuit_fault"),
        BitField::flag("battery_fault"),
        BitField::flag("lamp_fault"),
    ])?))
}

/// Minimal status, or the minimal status followed by a relative timestamp when the bytes are there.
fn test_status(result: Schema, extra: Vec<Field>) -> Result<Schema, SchemaError> {
    let mut fields = vec![
        Field::named("tai_timestamp", TaiTimestamp::schema()?),
        Field::named("execution_status", Schema::enumeration::<TestExecutionStatus>(Schema::Int(IntFormat::U8))),
        Field::named("execution_result", result),
    ];
    fields.extend(extra);

    let minimal = Schema::structure(fields);
    let optional = Schema::structure(vec![
        Field::embedded(minimal.clone()),
        Field::named("relative_timestamp", Schema::Int(IntFormat::U32_LE)),
    ]);

    Ok(Schema::select(Select::new(vec![("optional", optional), ("minimal", minimal)])?))
}

pub(crate) fn functional_test_status() -> Result<Schema, SchemaError> {
    test_status(functional_result()?, Vec::new())
}

pub(crate) fn duration_test_status() -> Result<Schema, SchemaError> {
    test_status(duration_result()?, vec![Field::named("duration_result", Schema::Int(IntFormat::U16_LE))])
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EmergencyLightingTest;

impl MessageFamily for EmergencyLightingTest {
    type Opcode = EmergencyLightingTestOpcode;

    const KIND: FamilyKind = FamilyKind::EmergencyLightingTest;

    fn messages() -> Result<Vec<(Self::Opcode, Schema)>, SchemaError> {
        use EmergencyLightingTestSubOpcode::*;

        let table = Arc::new(EmergencyLightingTestProperty::table()?);
        let property = vendor_property(&table);

        let payloads = vec![
            (EltFunctionalTestGet, Schema::empty()),
            (EltFunctionalTestStart, Schema::empty()),
            (EltFunctionalTestStop, Schema::empty()),
            (EltFunctionalTestStatus, functional_test_status()?),
            (EltDurationTestGet, Schema::empty()),
            (EltDurationTestStart, Schema::empty()),
            (EltDurationTestStop, Schema::empty()),
            (EltDurationTestStatus, duration_test_status()?),
            (EltPropertyGet, vendor_property_get::<EmergencyLightingTestProperty>()),
            (EltPropertySet, property.clone()),
            (EltPropertySetUnacknowledged, property.clone()),
            (EltPropertyStatus, property),
        ];

        Ok(vec![(EmergencyLightingTestOpcode::SilvairElt, vendor_params(payloads)?)])
    }
}

#[cfg(test)]
mod tests {
    use btmesh_access::{Record, Value};

    use super::*;

    #[test]
    fn status_shapes_have_descending_sizes() {
        let functional = functional_test_status().expect("schema");
        let duration = duration_test_status().expect("schema");

        // 8-octet timestamp, status, result; duration adds 2, optional adds 4.
        assert_eq!(functional.fixed_size(), None);
        assert!(functional.decode_bytes(&[0; 10]).is_ok());
        assert!(functional.decode_bytes(&[0; 14]).is_ok());
        assert!(duration.decode_bytes(&[0; 12]).is_ok());
        assert!(duration.decode_bytes(&[0; 16]).is_ok());
    }

    #[test]
    fn duration_result_flags() {
        let value = duration_result().expect("schema").decode_bytes(&[0x0f]).expect("decode");
        assert_eq!(
            value,
            Value::Record(
                Record::new()
                    .with("battery_duration_fault", true)
                    .with("circuit_fault", true)
                    .with("battery_fault", true)
                    .with("lamp_fault", true)
            )
        );
    }

    #[test]
    fn every_property_is_registered() {
        assert_eq!(EmergencyLightingTestProperty::table().expect("table").len(), 8);
    }
}
