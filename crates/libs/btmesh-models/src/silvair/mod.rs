//! Silvair vendor models (company ID 0x0136).
//!
//! Each model owns a single vendor opcode. Its parameters start with a
//! sub-opcode octet that selects the payload layout.

mod emergency_lighting;
mod emergency_lighting_test;
mod light_extended_controller;

use std::sync::Arc;

use btmesh_access::{Field, IntFormat, MeshEnum, PropertyDispatch, PropertyTable, Schema, SchemaError, Switch, PROPERTY_ID};

pub use emergency_lighting::{
    EmergencyLighting, EmergencyLightingOpcode, EmergencyLightingProperty, EmergencyLightingSubOpcode, ElState,
};
pub use emergency_lighting_test::{
    EmergencyLightingTest, EmergencyLightingTestOpcode, EmergencyLightingTestProperty, EmergencyLightingTestSubOpcode,
    TestExecutionStatus,
};
pub use light_extended_controller::{
    LightExtendedController, LightExtendedControllerOpcode, LightExtendedControllerProperty,
    LightExtendedControllerSubOpcode,
};

pub const SILVAIR_COMPANY_ID: u16 = 0x0136;

/// `{subopcode, payload}` with the payload switched on the sub-opcode.
pub(crate) fn vendor_params<S: MeshEnum>(payloads: Vec<(S, Schema)>) -> Result<Schema, SchemaError> {
    Ok(Schema::structure(vec![
        Field::named("subopcode", Schema::enumeration::<S>(Schema::Int(IntFormat::U8))),
        Field::named("payload", Schema::switch(Switch::on("subopcode", payloads)?)),
    ]))
}

pub(crate) fn vendor_property_get<I: MeshEnum>() -> Schema {
    Schema::structure(vec![Field::named(PROPERTY_ID, PropertyTable::<I>::id_schema())])
}

pub(crate) fn vendor_property<I: MeshEnum>(table: &Arc<PropertyTable<I>>) -> Schema {
    PropertyDispatch::new(table.clone()).into_schema()
}
