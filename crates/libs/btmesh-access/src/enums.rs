use std::collections::BTreeMap;
use std::fmt;

use crate::error::SchemaError;
use crate::value::EnumValue;

/// Closed set of protocol identifiers (opcodes, sub-opcodes, property IDs, enumerated fields).
///
/// Implemented with [`mesh_enum!`](crate::mesh_enum) on enums deriving
/// `strum::FromRepr`, `strum::IntoStaticStr` and `strum::EnumIter`.
pub trait MeshEnum: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// Name used when reporting an unhandled raw value.
    const TABLE_NAME: &'static str;

    fn from_raw(raw: u64) -> Option<Self>;

    fn raw(self) -> u64;

    /// Symbolic `snake_case` name, also used as the field tag of dispatched values.
    fn name(self) -> &'static str;

    fn variants() -> Vec<Self>;
}

/// Implements [`MeshEnum`] for a `strum`-derived fieldless enum with an explicit `repr`.
#[macro_export]
macro_rules! mesh_enum {
    ($ty:ident, $repr:ty) => {
        impl $crate::MeshEnum for $ty {
            const TABLE_NAME: &'static str = stringify!($ty);

            fn from_raw(raw: u64) -> Option<Self> {
                <$repr>::try_from(raw).ok().and_then(Self::from_repr)
            }

            fn raw(self) -> u64 {
                self as $repr as u64
            }

            fn name(self) -> &'static str {
                self.into()
            }

            fn variants() -> ::std::vec::Vec<Self> {
                <Self as $crate::strum::IntoEnumIterator>::iter().collect()
            }
        }
    };
}

/// Raw value to symbolic name mapping, erased from the concrete enum type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumTable {
    name: String,
    entries: BTreeMap<u64, &'static str>,
}

impl EnumTable {
    pub fn of<E: MeshEnum>() -> Self {
        let entries = E::variants().into_iter().map(|v| (v.raw(), v.name())).collect();
        Self { name: E::TABLE_NAME.to_string(), entries }
    }

    /// Unions several tables, rejecting raw values claimed twice.
    pub fn merge<'a>(
        name: impl Into<String>,
        tables: impl IntoIterator<Item = &'a EnumTable>,
    ) -> Result<Self, SchemaError> {
        let name = name.into();
        let mut entries = BTreeMap::new();
        for table in tables {
            for (&raw, &symbol) in &table.entries {
                if entries.insert(raw, symbol).is_some() {
                    return Err(SchemaError::DuplicateKey { table: name, key: raw });
                }
            }
        }
        Ok(Self { name, entries })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lookup(&self, raw: u64) -> Option<EnumValue> {
        self.entries.get(&raw).map(|&name| EnumValue::new(raw, name))
    }

    pub fn contains(&self, raw: u64) -> bool {
        self.entries.contains_key(&raw)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = EnumValue> + '_ {
        self.entries.iter().map(|(&raw, &name)| EnumValue::new(raw, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, strum::FromRepr, strum::IntoStaticStr, strum::EnumIter)]
    #[strum(serialize_all = "snake_case")]
    #[repr(u8)]
    enum Role {
        None = 0,
        TimeAuthority = 1,
        TimeRelay = 2,
    }

    crate::mesh_enum!(Role, u8);

    #[derive(Debug, Clone, Copy, PartialEq, Eq, strum::FromRepr, strum::IntoStaticStr, strum::EnumIter)]
    #[strum(serialize_all = "snake_case")]
    #[repr(u8)]
    enum Clash {
        Relay = 2,
    }

    crate::mesh_enum!(Clash, u8);

    #[test]
    fn raw_and_names_follow_declaration() {
        assert_eq!(Role::from_raw(1), Some(Role::TimeAuthority));
        assert_eq!(Role::from_raw(0x1_01), None);
        assert_eq!(Role::TimeRelay.raw(), 2);
        assert_eq!(Role::TimeAuthority.name(), "time_authority");
        assert_eq!(Role::TABLE_NAME, "Role");
    }

    #[test]
    fn table_lookup() {
        let table = EnumTable::of::<Role>();
        assert_eq!(table.len(), 3);
        assert_eq!(table.lookup(0).map(|v| v.name()), Some("none"));
        assert!(table.lookup(3).is_none());
    }

    #[test]
    fn merge_rejects_overlap() {
        let roles = EnumTable::of::<Role>();
        let clash = EnumTable::of::<Clash>();
        let err = EnumTable::merge("opcodes", [&roles, &clash]).expect_err("raw 2 claimed twice");
        assert_eq!(err, SchemaError::DuplicateKey { table: "opcodes".into(), key: 2 });
    }
}
