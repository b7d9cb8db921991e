//! Message families: one opcode enumeration plus the parameter layout of each opcode.

use std::fmt;

use btmesh_access::{EnumTable, MeshEnum, Schema, SchemaError};
use serde::Deserialize;
use strum::{EnumIter, IntoEnumIterator, IntoStaticStr};

use crate::generic_property::GenericProperty;
use crate::silvair::{EmergencyLighting, EmergencyLightingTest, LightExtendedController};
use crate::time::Time;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, IntoStaticStr, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FamilyKind {
    GenericProperty,
    Time,
    EmergencyLighting,
    EmergencyLightingTest,
    LightExtendedController,
}

impl FamilyKind {
    pub fn all() -> Vec<FamilyKind> {
        FamilyKind::iter().collect()
    }

    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

impl fmt::Display for FamilyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static description of a family of messages sharing an opcode enumeration.
pub trait MessageFamily {
    type Opcode: MeshEnum;

    const KIND: FamilyKind;

    /// Parameter layout per opcode. Opcodes without an entry are declared but not decodable.
    fn messages() -> Result<Vec<(Self::Opcode, Schema)>, SchemaError>;
}

/// A [`MessageFamily`] with its opcode type erased, ready to be merged into a codec.
#[derive(Debug, Clone)]
pub struct Family {
    kind: FamilyKind,
    opcodes: EnumTable,
    messages: Vec<(u64, Schema)>,
}

impl Family {
    pub fn of<F: MessageFamily>() -> Result<Self, SchemaError> {
        let messages = F::messages()?.into_iter().map(|(opcode, schema)| (opcode.raw(), schema)).collect();

        Ok(Self { kind: F::KIND, opcodes: EnumTable::of::<F::Opcode>(), messages })
    }

    pub fn build(kind: FamilyKind) -> Result<Self, SchemaError> {
        match kind {
            FamilyKind::GenericProperty => Self::of::<GenericProperty>(),
            FamilyKind::Time => Self::of::<Time>(),
            FamilyKind::EmergencyLighting => Self::of::<EmergencyLighting>(),
            FamilyKind::EmergencyLightingTest => Self::of::<EmergencyLightingTest>(),
            FamilyKind::LightExtendedController => Self::of::<LightExtendedController>(),
        }
    }

    pub fn kind(&self) -> FamilyKind {
        self.kind
    }

    pub fn opcodes(&self) -> &EnumTable {
        &self.opcodes
    }

    pub fn messages(&self) -> &[(u64, Schema)] {
        &self.messages
    }

    pub(crate) fn into_messages(self) -> Vec<(u64, Schema)> {
        self.messages
    }
}
