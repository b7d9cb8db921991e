use std::sync::Arc;

use btmesh_access::{Field, IntFormat, PropertyTable, Schema, SchemaError};
use strum::{EnumIter, FromRepr, IntoStaticStr};

use super::{vendor_params, vendor_property, vendor_property_get};
use crate::characteristics::{perceived_lightness, time_second_16};
use crate::family::{FamilyKind, MessageFamily};

#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRepr, IntoStaticStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
#[repr(u32)]
pub enum EmergencyLightingOpcode {
    SilvairEl = 0xea_3601,
}

btmesh_access::mesh_enum!(EmergencyLightingOpcode, u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRepr, IntoStaticStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum EmergencyLightingSubOpcode {
    ElInhibitEnter = 0x00,
    ElInhibitEnterUnacknowledged = 0x01,
    ElInhibitExit = 0x02,
    ElInhibitExitUnacknowledged = 0x03,
    ElStateGet = 0x04,
    ElStateStatus = 0x05,
    ElPropertyGet = 0x06,
    ElPropertySet = 0x07,
    ElPropertySetUnacknowledged = 0x08,
    ElPropertyStatus = 0x09,
    ElLampOperationTimeGet = 0x0a,
    ElLampOperationTimeClear = 0x0b,
    ElLampOperationTimeClearUnacknowledged = 0x0c,
    ElLampOperationTimeStatus = 0x0d,
    ElRestEnter = 0x0e,
    ElRestEnterUnacknowledged = 0x0f,
    ElRestExit = 0x10,
    ElRestExitUnacknowledged = 0x11,
}

btmesh_access::mesh_enum!(EmergencyLightingSubOpcode, u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRepr, IntoStaticStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum ElState {
    TransitionFromInhibitToNormal = 0x00,
    TransitionFromFunctionalTestToNormal = 0x01,
    TransitionFromDurationTestToNormal = 0x02,
    Normal = 0x03,
    TransitionFromRestToEmergency = 0x04,
    Emergency = 0x05,
    ExtendedEmergency = 0x06,
    TransitionFromEmergencyToRest = 0x07,
    Rest = 0x08,
    TransitionFromNormalToInhibit = 0x09,
    Inhibit = 0x0a,
    TransitionFromNormalToDurationTest = 0x0b,
    DurationTestInProgress = 0x0c,
    TransitionFromNormalToFunctionalTest = 0x0d,
    FunctionalTestInProgress = 0x0e,
    BatteryDischarged = 0x0f,
    Unknown = 0x10,
}

btmesh_access::mesh_enum!(ElState, u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRepr, IntoStaticStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
#[repr(u16)]
pub enum EmergencyLightingProperty {
    ElLightness = 0xff80,
    ElLightnessRangeMin = 0xff81,
    ElLightnessRangeMax = 0xff82,
    ElProlongTime = 0xff83,
}

btmesh_access::mesh_enum!(EmergencyLightingProperty, u16);

impl EmergencyLightingProperty {
    pub fn table() -> Result<PropertyTable<Self>, SchemaError> {
        PropertyTable::from_entries([
            (Self::ElLightness, perceived_lightness()),
            (Self::ElLightnessRangeMin, perceived_lightness()),
            (Self::ElLightnessRangeMax, perceived_lightness()),
            (Self::ElProlongTime, time_second_16()),
        ])
    }
}

fn state_status() -> Schema {
    Schema::structure(vec![Field::named("el_state", Schema::enumeration::<ElState>(Schema::Int(IntFormat::U8)))])
}

fn lamp_operation_time_status() -> Schema {
    Schema::structure(vec![
        Field::named("el_lamp_total_operation_time", Schema::Int(IntFormat::U32_LE)),
        Field::named("el_lamp_emergency_time", Schema::Int(IntFormat::U32_LE)),
    ])
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EmergencyLighting;

impl MessageFamily for EmergencyLighting {
    type Opcode = EmergencyLightingOpcode;

    const KIND: FamilyKind = FamilyKind::EmergencyLighting;

    fn messages() -> Result<Vec<(Self::Opcode, Schema)>, SchemaError> {
        use EmergencyLightingSubOpcode::*;

        let table = Arc::new(EmergencyLightingProperty::table()?);
        let property = vendor_property(&table);

        let payloads = vec![
            (ElInhibitEnter, Schema::empty()),
            (ElInhibitEnterUnacknowledged, Schema::empty()),
            (ElInhibitExit, Schema::empty()),
            (ElInhibitExitUnacknowledged, Schema::empty()),
            (ElStateGet, Schema::empty()),
            (ElStateStatus, state_status()),
            (ElPropertyGet, vendor_property_get::<EmergencyLightingProperty>()),
            (ElPropertySet, property.clone()),
            (ElPropertySetUnacknowledged, property.clone()),
            (ElPropertyStatus, property),
            (ElLampOperationTimeGet, Schema::empty()),
            (ElLampOperationTimeClear, Schema::empty()),
            (ElLampOperationTimeClearUnacknowledged, Schema::empty()),
            (ElLampOperationTimeStatus, lamp_operation_time_status()),
            (ElRestEnter, Schema::empty()),
            (ElRestEnterUnacknowledged, Schema::empty()),
            (ElRestExit, Schema::empty()),
            (ElRestExitUnacknowledged, Schema::empty()),
        ];

        Ok(vec![(EmergencyLightingOpcode::SilvairEl, vendor_params(payloads)?)])
    }
}
