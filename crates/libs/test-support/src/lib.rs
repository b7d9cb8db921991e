//! Helpers shared by the workspace's integration tests.

use std::sync::OnceLock;

use btmesh_access::{Schema, Value};

static LOGGING: OnceLock<()> = OnceLock::new();

/// Routes `log` output through the test harness; `RUST_LOG` overrides the `warn` default.
pub fn init_logging() {
    LOGGING.get_or_init(|| {
        let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
            .is_test(true)
            .try_init();
    });
}

/// Decodes a hex fixture. Whitespace is ignored so fixtures can be grouped by field.
pub fn hex_bytes(fixture: &str) -> Vec<u8> {
    let compact: String = fixture.chars().filter(|c| !c.is_whitespace()).collect();
    hex::decode(&compact).unwrap_or_else(|err| panic!("bad hex fixture {fixture:?}: {err}"))
}

/// Asserts that `fixture` decodes to `expected` and that `expected` encodes back to `fixture`.
pub fn assert_schema_round_trip(schema: &Schema, fixture: &str, expected: &Value) {
    init_logging();
    let bytes = hex_bytes(fixture);

    let decoded = schema.decode_bytes(&bytes).unwrap_or_else(|err| panic!("decode {fixture}: {err}"));
    assert_eq!(&decoded, expected, "decode {fixture}");

    let encoded = schema.encode_value(expected).unwrap_or_else(|err| panic!("encode {fixture}: {err}"));
    assert_eq!(hex::encode(encoded), hex::encode(&bytes), "encode {fixture}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_may_be_spaced() {
        assert_eq!(hex_bytes("82 2F 8c00"), [0x82, 0x2f, 0x8c, 0x00]);
    }
}
