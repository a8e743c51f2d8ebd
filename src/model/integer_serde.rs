//! Serialization of integer option values in formats (like TOML) whose
//! integers are signed 64-bit.
//!
//! Values that fit in an `i64` are written as integers. [`UNSET`] is written
//! as the string `"unset"`, any other larger value as a decimal string.
//! Deserialization accepts all three forms, plus `"disabled"`.

use std::fmt::{self, Formatter};

use serde::de::{self, Visitor};
use serde::{Deserializer, Serializer};

use super::option::{parse_integer_value, UNSET};


pub fn serialize<S>(value: &u64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if *value == UNSET {
        serializer.serialize_str("unset")
    } else if i64::try_from(*value).is_ok() {
        serializer.serialize_u64(*value)
    } else {
        serializer.serialize_str(&value.to_string())
    }
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(IntegerValueVisitor)
}

/// [`deserialize`] for `Option<u64>` fields marked `#[serde(default)]`.
pub fn deserialize_optional<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize(deserializer).map(Some)
}


struct IntegerValueVisitor;

impl<'de> Visitor<'de> for IntegerValueVisitor {
    type Value = u64;

    fn expecting(&self, formatter: &mut Formatter) -> fmt::Result {
        formatter.write_str("a non-negative integer, a decimal string, \"unset\" or \"disabled\"")
    }

    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(value)
    }

    fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        u64::try_from(value)
            .map_err(|_| E::invalid_value(de::Unexpected::Signed(value), &self))
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        parse_integer_value(value).ok_or_else(|| E::invalid_value(de::Unexpected::Str(value), &self))
    }
}
