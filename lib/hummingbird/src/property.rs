use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

#[derive(Copy, Clone, Debug, Deserialize, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AccessMode {
    #[serde(rename = "R")]
    Read,
    #[serde(rename = "RW")]
    ReadWrite,
    #[serde(rename = "W")]
    Write,
}

impl fmt::Display for AccessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => write!(f, "R"),
            Self::ReadWrite => write!(f, "RW"),
            Self::Write => write!(f, "W"),
        }
    }
}

/// Reading reported by the platform. Devices send either numbers or strings.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Value {
    Numeric(f64),
    Text(String),
}

impl Value {
    /// Integral numeric readings only, `6.0` is `Some(6)` but `6.5` and `"6"` are `None`.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Numeric(value) if value.fract() == 0.0 && value.is_finite() => {
                Some(*value as i64)
            }
            _ => None,
        }
    }

    /// Raw bitfield of a numeric reading, truncated towards zero and
    /// reinterpreted as an unsigned 32 bit word.
    pub fn as_bits(&self) -> Option<u32> {
        match self {
            Self::Numeric(value) if value.is_finite() => Some(value.trunc() as i64 as u32),
            _ => None,
        }
    }
}

/// Largest magnitude an `f64` holds without losing integer precision.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Numeric(value) if value.fract() == 0.0 && value.abs() <= MAX_EXACT_INTEGER => {
                serializer.serialize_i64(*value as i64)
            }
            Self::Numeric(value) => serializer.serialize_f64(*value),
            Self::Text(value) => serializer.serialize_str(value),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Numeric(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Numeric(value as f64)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(value) => write!(f, "{value}"),
            Self::Text(value) => write!(f, "{value}"),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct DeviceProperty {
    pub code: String,
    pub name: String,
    pub value: Value,
    #[serde(default)]
    pub data_type: String,
    #[serde(default)]
    pub unit: String,
    pub access_mode: AccessMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<i64>,
}
