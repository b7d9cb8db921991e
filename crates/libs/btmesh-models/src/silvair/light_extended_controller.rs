use std::sync::Arc;

use btmesh_access::{Field, IntFormat, PropertyTable, Schema, SchemaError};
use strum::{EnumIter, FromRepr, IntoStaticStr};

use super::{vendor_params, vendor_property, vendor_property_get};
use crate::characteristics::time_millisecond_24;
use crate::family::{FamilyKind, MessageFamily};

#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRepr, IntoStaticStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
#[repr(u32)]
pub enum LightExtendedControllerOpcode {
    SilvairLec = 0xf6_3601,
}

btmesh_access::mesh_enum!(LightExtendedControllerOpcode, u32);

/// Bulk and sync-integral-get sub-opcodes are declared without a payload layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRepr, IntoStaticStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum LightExtendedControllerSubOpcode {
    PropertyGet = 0x00,
    PropertySet = 0x01,
    PropertySetUnacknowledged = 0x02,
    PropertyStatus = 0x03,
    BulkLcPropertySet = 0x04,
    BulkLcPropertyStatus = 0x05,
    BulkLecPropertySet = 0x06,
    BulkLecPropertyStatus = 0x07,
    SyncIntegralGet = 0x08,
    SyncIntegralStatus = 0x09,
}

btmesh_access::mesh_enum!(LightExtendedControllerSubOpcode, u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRepr, IntoStaticStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
#[repr(u16)]
pub enum LightExtendedControllerProperty {
    AutoResumeMode = 0xff71,
    AutoResumeTimer = 0xff72,
}

btmesh_access::mesh_enum!(LightExtendedControllerProperty, u16);

impl LightExtendedControllerProperty {
    pub fn table() -> Result<PropertyTable<Self>, SchemaError> {
        PropertyTable::from_entries([(Self::AutoResumeMode, Schema::Flag), (Self::AutoResumeTimer, time_millisecond_24())])
    }
}

fn sync_integral_status() -> Schema {
    Schema::structure(vec![Field::named("sync_integral", Schema::Int(IntFormat::U16_LE))])
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LightExtendedController;

impl MessageFamily for LightExtendedController {
    type Opcode = LightExtendedControllerOpcode;

    const KIND: FamilyKind = FamilyKind::LightExtendedController;

    fn messages() -> Result<Vec<(Self::Opcode, Schema)>, SchemaError> {
        use LightExtendedControllerSubOpcode::*;

        let table = Arc::new(LightExtendedControllerProperty::table()?);
        let property = vendor_property(&table);

        let payloads = vec![
            (PropertyGet, vendor_property_get::<LightExtendedControllerProperty>()),
            (PropertySet, property.clone()),
            (PropertySetUnacknowledged, property.clone()),
            (PropertyStatus, property),
            (SyncIntegralStatus, sync_integral_status()),
        ];

        Ok(vec![(LightExtendedControllerOpcode::SilvairLec, vendor_params(payloads)?)])
    }
}
