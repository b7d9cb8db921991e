//! Bluetooth mesh message families and the Access-Layer codec built from them.

pub mod characteristics;
mod codec;
mod config;
pub mod family;
pub mod generic_property;
pub mod properties;
pub mod silvair;
pub mod time;

pub use codec::{AccessCodec, AccessMessage};
pub use config::{CodecConfig, ConfigError};
pub use family::{Family, FamilyKind, MessageFamily};
pub use generic_property::{GenericProperty, GenericPropertyOpcode};
pub use properties::{property_table, PropertyAccess, PropertyId};
pub use crate::time::{MeshTime, Time, TimeOpcode, TimeRole};
