#![allow(dead_code)]

use std::sync::OnceLock;

use btmesh_access::{EnumValue, MeshEnum, Record, Value};
use btmesh_models::{AccessCodec, AccessMessage};
use test_support::{hex_bytes, init_logging};

static CODEC: OnceLock<AccessCodec> = OnceLock::new();

pub fn codec() -> &'static AccessCodec {
    init_logging();
    CODEC.get_or_init(|| AccessCodec::standard().expect("standard codec"))
}

/// Decodes `fixture` to `{opcode, params}` and encodes the expectation back to the same bytes.
pub fn assert_message<E: MeshEnum>(fixture: &str, opcode: E, params: impl Into<Value>) {
    let bytes = hex_bytes(fixture);
    let expected = AccessMessage::new(EnumValue::of(opcode), params);

    assert_eq!(codec().decode(&bytes).expect("decode"), expected, "decode {fixture}");
    assert_eq!(codec().encode(&expected).expect("encode"), bytes, "encode {fixture}");
}

/// Parameters of a vendor message: the sub-opcode and its payload.
pub fn vendor<S: MeshEnum>(subopcode: S, payload: Record) -> Record {
    Record::new().with("subopcode", Value::enum_of(subopcode)).with("payload", payload)
}
