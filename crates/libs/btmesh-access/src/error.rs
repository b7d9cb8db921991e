use std::fmt;

use thiserror::Error;

/// Dotted location of a field inside a message, outermost segment first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    fn prepend(&mut self, segment: String) {
        self.0.insert(0, segment);
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "<root>");
        }
        write!(f, "{}", self.0.join("."))
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ErrorKind {
    #[error("malformed opcode framing: octet 0x{octet:02x} at offset {offset}")]
    MalformedFraming { offset: usize, octet: u8 },

    #[error("unhandled {discriminant} 0x{value:x} at offset {offset}")]
    UnhandledDiscriminant { discriminant: String, value: u64, offset: usize },

    #[error("truncated input at offset {offset}: need {needed} bytes, {available} available")]
    TruncatedInput { offset: usize, needed: usize, available: usize },

    #[error("{remaining} unconsumed bytes at offset {offset}")]
    TrailingData { offset: usize, remaining: usize },

    #[error("value {value} out of range: {reason}")]
    ValueOutOfRange { value: String, reason: String },

    #[error("const mismatch at offset {offset}: expected {expected}, found {actual}")]
    ConstMismatch { offset: usize, expected: String, actual: String },

    #[error("invalid value at offset {offset}: {reason}")]
    InvalidValue { offset: usize, reason: String },

    #[error("missing field `{field}`")]
    MissingField { field: String },

    #[error("expected {expected}, found {found}")]
    TypeMismatch { expected: &'static str, found: &'static str },
}

impl ErrorKind {
    pub fn out_of_range(value: impl fmt::Display, reason: impl Into<String>) -> Self {
        ErrorKind::ValueOutOfRange { value: value.to_string(), reason: reason.into() }
    }

    pub fn invalid(offset: usize, reason: impl Into<String>) -> Self {
        ErrorKind::InvalidValue { offset, reason: reason.into() }
    }
}

/// Failure while decoding or encoding a message.
///
/// Carries the [`ErrorKind`] and the path of the field that failed.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind} (at {path})")]
pub struct CodecError {
    kind: ErrorKind,
    path: FieldPath,
}

impl CodecError {
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, path: FieldPath::root() }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    pub fn into_kind(self) -> ErrorKind {
        self.kind
    }

    /// Prefixes the path with the name of the enclosing field.
    pub fn within(mut self, segment: impl Into<String>) -> Self {
        self.path.prepend(segment.into());
        self
    }

    pub fn is_truncated(&self) -> bool {
        matches!(self.kind, ErrorKind::TruncatedInput { .. })
    }

    pub fn is_unhandled_discriminant(&self) -> bool {
        matches!(self.kind, ErrorKind::UnhandledDiscriminant { .. })
    }

    pub fn missing(field: &str) -> Self {
        ErrorKind::MissingField { field: field.to_string() }.into()
    }

    pub fn mismatch(expected: &'static str, found: &'static str) -> Self {
        ErrorKind::TypeMismatch { expected, found }.into()
    }
}

impl From<ErrorKind> for CodecError {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

/// Schema definitions rejected while they are being built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("bit pack of {bits} bits is not a whole number of bytes")]
    UnalignedBitPack { bits: u32 },

    #[error("bit pack of {bits} bits exceeds the 64-bit container")]
    OversizedBitPack { bits: u32 },

    #[error("bit field `{field}` has zero width")]
    EmptyBitField { field: String },

    #[error("integer width of {width} bytes is not supported")]
    UnsupportedWidth { width: usize },

    #[error("ordered selection needs at least one alternative")]
    EmptySelect,

    #[error("alternatives `{first}` and `{second}` both occupy {size} bytes")]
    AmbiguousAlternatives { first: String, second: String, size: usize },

    #[error("alternative `{shorter}` ({shorter_size} bytes) listed before `{longer}` ({longer_size} bytes)")]
    AlternativesOutOfOrder { shorter: String, shorter_size: usize, longer: String, longer_size: usize },

    #[error("duplicate key 0x{key:x} in {table}")]
    DuplicateKey { table: String, key: u64 },
}
