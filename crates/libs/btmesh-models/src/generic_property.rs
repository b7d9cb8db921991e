//! Generic User/Admin/Manufacturer/Client Property messages.

use std::sync::Arc;

use btmesh_access::{Field, IntFormat, PropertyDispatch, PropertyTable, Schema, SchemaError, PROPERTY_ID};
use strum::{EnumIter, FromRepr, IntoStaticStr};

use crate::family::{FamilyKind, MessageFamily};
use crate::properties::{property_table, PropertyAccess, PropertyId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRepr, IntoStaticStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
#[repr(u32)]
pub enum GenericPropertyOpcode {
    GenericUserPropertiesGet = 0x822e,
    GenericUserPropertiesStatus = 0x4b,
    GenericUserPropertyGet = 0x822f,
    GenericUserPropertySet = 0x4c,
    GenericUserPropertySetUnacknowledged = 0x4d,
    GenericUserPropertyStatus = 0x4e,
    GenericAdminPropertiesGet = 0x822c,
    GenericAdminPropertiesStatus = 0x47,
    GenericAdminPropertyGet = 0x822d,
    GenericAdminPropertySet = 0x48,
    GenericAdminPropertySetUnacknowledged = 0x49,
    GenericAdminPropertyStatus = 0x4a,
    GenericManufacturerPropertiesGet = 0x822a,
    GenericManufacturerPropertiesStatus = 0x43,
    GenericManufacturerPropertyGet = 0x822b,
    GenericManufacturerPropertySet = 0x44,
    GenericManufacturerPropertySetUnacknowledged = 0x45,
    GenericManufacturerPropertyStatus = 0x46,
    GenericClientPropertiesGet = 0x4f,
    GenericClientPropertiesStatus = 0x50,
}

btmesh_access::mesh_enum!(GenericPropertyOpcode, u32);

pub fn properties_get() -> Schema {
    Schema::empty()
}

pub fn properties_status() -> Schema {
    Schema::structure(vec![Field::named("property_ids", Schema::greedy(PropertyTable::<PropertyId>::id_schema()))])
}

pub fn property_get() -> Schema {
    Schema::structure(vec![Field::named(PROPERTY_ID, PropertyTable::<PropertyId>::id_schema())])
}

pub fn property_set(table: Arc<PropertyTable<PropertyId>>) -> Schema {
    PropertyDispatch::new(table).into_schema()
}

pub fn property_status(table: Arc<PropertyTable<PropertyId>>) -> Schema {
    let access = Field::named("access", Schema::enumeration::<PropertyAccess>(Schema::Int(IntFormat::U8)));
    PropertyDispatch::with_fields(vec![access], table).into_schema()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GenericProperty;

impl MessageFamily for GenericProperty {
    type Opcode = GenericPropertyOpcode;

    const KIND: FamilyKind = FamilyKind::GenericProperty;

    fn messages() -> Result<Vec<(Self::Opcode, Schema)>, SchemaError> {
        use GenericPropertyOpcode::*;

        let table = Arc::new(property_table()?);
        let set = property_set(table.clone());
        let status = property_status(table);

        Ok(vec![
            (GenericUserPropertiesGet, properties_get()),
            (GenericUserPropertiesStatus, properties_status()),
            (GenericUserPropertyGet, property_get()),
            (GenericUserPropertySet, set.clone()),
            (GenericUserPropertySetUnacknowledged, set.clone()),
            (GenericUserPropertyStatus, status.clone()),
            (GenericAdminPropertiesGet, properties_get()),
            (GenericAdminPropertiesStatus, properties_status()),
            (GenericAdminPropertyGet, property_get()),
            (GenericAdminPropertySet, set.clone()),
            (GenericAdminPropertySetUnacknowledged, set.clone()),
            (GenericAdminPropertyStatus, status.clone()),
            (GenericManufacturerPropertiesGet, properties_get()),
            (GenericManufacturerPropertiesStatus, properties_status()),
            (GenericManufacturerPropertyGet, property_get()),
            (GenericManufacturerPropertySet, set.clone()),
            (GenericManufacturerPropertySetUnacknowledged, set),
            (GenericManufacturerPropertyStatus, status),
            (GenericClientPropertiesGet, properties_get()),
            (GenericClientPropertiesStatus, properties_status()),
        ])
    }
}
