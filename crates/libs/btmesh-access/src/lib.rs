//! Declarative codec for mesh Access-Layer payloads.
//!
//! A message is described once as a [`Schema`] tree and the same tree is
//! walked to decode and to encode. Every payload starts with an opcode:
//!
//! ```text
//! +-------------+---------------------------------------------+
//! | opcode 1-3B | parameters, selected by opcode               |
//! +-------------+---------------------------------------------+
//!                | sub-opcode | payload, selected by sub-opcode |
//!                             | property_id | value by id       |
//! ```
//!
//! Schemas are immutable after construction and can be shared between
//! threads. All per-call state lives in the [`Record`] being built.

mod buffer;
mod enums;
mod error;
pub mod opcode;
pub mod property;
pub mod schema;
mod value;

pub use buffer::{InputBuffer, OutputBuffer};
pub use enums::{EnumTable, MeshEnum};
pub use error::{CodecError, ErrorKind, FieldPath, SchemaError};
pub use property::{PropertyDispatch, PropertyEntry, PropertyTable, PROPERTY_ID};
pub use schema::{
    Adapter, BitField, BitPack, Codec, DaysSinceEpoch, Endian, Exponential, Field, IntFormat, Scale, Scaled,
    Schema, Select, Struct, Switch, TaiTimestamp,
};
pub use value::{EnumValue, Record, Value};

#[doc(hidden)]
pub use strum;
