use crate::buffer::{InputBuffer, OutputBuffer};
use crate::error::CodecError;
use crate::schema::{Codec, Schema};
use crate::value::{Record, Value};

/// Repeats `element` until the input is exhausted.
pub(crate) fn decode(element: &Schema, input: &mut InputBuffer<'_>, scope: &Record) -> Result<Value, CodecError> {
    let mut items = Vec::new();
    while input.bytes_left() > 0 {
        let before = input.offset();
        let item = element.decode(input, scope).map_err(|e| e.within(format!("[{}]", items.len())))?;
        items.push(item);

        if input.offset() == before {
            break;
        }
    }

    Ok(Value::List(items))
}

pub(crate) fn encode(
    element: &Schema,
    value: &Value,
    output: &mut OutputBuffer,
    scope: &Record,
) -> Result<(), CodecError> {
    let items = value.as_list().ok_or_else(|| CodecError::mismatch("list", value.kind_name()))?;
    for (index, item) in items.iter().enumerate() {
        element.encode(item, output, scope).map_err(|e| e.within(format!("[{index}]")))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::schema::primitive::IntFormat;
    use crate::schema::Schema;
    use crate::value::Value;

    #[test]
    fn consumes_until_exhausted() {
        let ids = Schema::greedy(Schema::Int(IntFormat::U16_LE));
        let value = ids.decode_bytes(&[0x8c, 0x00, 0xa4, 0x00]).expect("decode");
        assert_eq!(value, Value::List(vec![Value::Int(0x8c), Value::Int(0xa4)]));
        assert_eq!(ids.encode_value(&value).expect("encode"), [0x8c, 0x00, 0xa4, 0x00]);
    }

    #[test]
    fn empty_input_is_an_empty_list() {
        let ids = Schema::greedy(Schema::Int(IntFormat::U16_LE));
        assert_eq!(ids.decode_bytes(&[]).expect("decode"), Value::List(vec![]));
    }

    #[test]
    fn dangling_partial_element_is_truncation() {
        let ids = Schema::greedy(Schema::Int(IntFormat::U16_LE));
        let err = ids.decode_bytes(&[0x8c, 0x00, 0xa4]).expect_err("odd length");
        assert!(err.is_truncated());
        assert_eq!(err.path().to_string(), "[1]");
    }
}
