//! Bus identity.
//!
//! Bus ids are opaque strings assigned by the data source (route numbers
//! such as `"101"` in practice).  Some feeds send them as JSON numbers, so
//! deserialization accepts either and always stores the string form.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Identity of one fleet vehicle.  Used as the marker key, so it must be
/// unique within a snapshot.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default, Serialize)]
#[serde(transparent)]
pub struct BusId(pub String);

impl BusId {
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `true` when the source sent no id at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for BusId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BusId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for BusId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl<'de> Deserialize<'de> for BusId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Int(i64),
            Float(f64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => BusId(s),
            RawId::Int(n) => BusId(n.to_string()),
            RawId::Float(n) => BusId(n.to_string()),
        })
    }
}
