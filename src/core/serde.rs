/*!
 * Serde Helpers
 * Skip predicates and sentinel encodings shared by serializable types
 */

use crate::core::types::Tick;
use serde::{Deserialize, Deserializer, Serializer};

/// Serialize `Option<Tick>` as a signed integer with `-1` for "unset"
///
/// Matches the record dumps consumed by external tooling, where unset
/// start/finish times are written as -1.
pub mod tick_or_sentinel {
    use super::*;

    pub fn serialize<S>(value: &Option<Tick>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(tick) => {
                let signed = i64::try_from(*tick).map_err(<S::Error as serde::ser::Error>::custom)?;
                serializer.serialize_i64(signed)
            }
            None => serializer.serialize_i64(-1),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Tick>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = i64::deserialize(deserializer)?;
        if raw < 0 {
            Ok(None)
        } else {
            Ok(Some(raw as Tick))
        }
    }
}

/// Skip serializing if bool is false
#[inline]
pub const fn is_false(value: &bool) -> bool {
    !*value
}

#[inline]
pub const fn is_zero_u64(value: &u64) -> bool {
    *value == 0
}
