use log::trace;

use crate::buffer::{InputBuffer, OutputBuffer};
use crate::error::{CodecError, ErrorKind, SchemaError};
use crate::schema::{Codec, Schema};
use crate::value::{Record, Value};

/// Ordered alternatives for messages with optional trailing fields.
///
/// Candidates are listed longest first. Decoding takes the first fixed-size
/// candidate that fits in the remaining input, so the caller must hand over
/// exactly the bytes of one frame. Candidates without a fixed size are tried
/// speculatively and the cursor is restored when they fail.
#[derive(Debug, Clone)]
pub struct Select {
    alternatives: Vec<(&'static str, Schema)>,
}

impl Select {
    pub fn new(alternatives: Vec<(&'static str, Schema)>) -> Result<Self, SchemaError> {
        if alternatives.is_empty() {
            return Err(SchemaError::EmptySelect);
        }

        let sized: Vec<(&'static str, usize)> = alternatives
            .iter()
            .filter_map(|(name, schema)| schema.fixed_size().map(|size| (*name, size)))
            .collect();
        for (i, &(earlier, earlier_size)) in sized.iter().enumerate() {
            for &(later, later_size) in &sized[i + 1..] {
                if later_size == earlier_size {
                    return Err(SchemaError::AmbiguousAlternatives {
                        first: earlier.to_string(),
                        second: later.to_string(),
                        size: later_size,
                    });
                }
                if later_size > earlier_size {
                    return Err(SchemaError::AlternativesOutOfOrder {
                        shorter: earlier.to_string(),
                        shorter_size: earlier_size,
                        longer: later.to_string(),
                        longer_size: later_size,
                    });
                }
            }
        }

        Ok(Self { alternatives })
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.alternatives.iter().map(|(name, _)| *name)
    }

    fn smallest(&self) -> usize {
        self.alternatives.iter().filter_map(|(_, schema)| schema.fixed_size()).min().unwrap_or(0)
    }
}

impl Codec for Select {
    fn decode(&self, input: &mut InputBuffer<'_>, scope: &Record) -> Result<Value, CodecError> {
        let available = input.bytes_left();
        let mut last_error = None;

        for (name, schema) in &self.alternatives {
            match schema.fixed_size() {
                Some(size) if size > available => continue,
                Some(_) => {
                    trace!("selected `{}` alternative with {} bytes left", name, available);
                    return schema.decode(input, scope);
                }
                None => {
                    let mark = input.offset();
                    match schema.decode(input, scope) {
                        Ok(value) => {
                            trace!("selected `{}` alternative", name);
                            return Ok(value);
                        }
                        Err(err) => {
                            input.rewind(mark);
                            last_error = Some(err);
                        }
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            ErrorKind::TruncatedInput { offset: input.offset(), needed: self.smallest(), available }.into()
        }))
    }

    /// Only a missing field moves on to the next candidate. Any other failure
    /// means the value has the candidate's shape but cannot be written.
    fn encode(&self, value: &Value, output: &mut OutputBuffer, scope: &Record) -> Result<(), CodecError> {
        let mut last_error = None;

        for (name, schema) in &self.alternatives {
            let mark = output.offset();
            match schema.encode(value, output, scope) {
                Ok(()) => {
                    trace!("encoded `{}` alternative", name);
                    return Ok(());
                }
                Err(err) if matches!(err.kind(), ErrorKind::MissingField { .. }) => {
                    output.truncate(mark);
                    last_error = Some(err);
                }
                Err(err) => {
                    output.truncate(mark);
                    return Err(err);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| CodecError::mismatch("alternative", value.kind_name())))
    }
}
