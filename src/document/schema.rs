//! Manifest Schema Types
//!
//! Typed representation of a Pod manifest as produced by the loader. Missing
//! scalar fields, and keys present with no value, deserialize to their
//! empty/zero value so the validation rules, not the loader, decide what is
//! required.

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

/// Root manifest structure (matches YAML)
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Document {
    #[serde(alias = "schemaVersion", deserialize_with = "null_as_default")]
    pub api_version: String,
    #[serde(deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub metadata: Metadata,
    #[serde(deserialize_with = "null_as_default")]
    pub spec: PodSpec,
}

/// Object metadata
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Metadata {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    pub namespace: Option<String>,
    #[serde(deserialize_with = "unique_labels")]
    pub labels: BTreeMap<String, String>,
}

/// Pod specification
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct PodSpec {
    #[serde(deserialize_with = "null_as_default")]
    pub os: String,
    #[serde(deserialize_with = "null_as_default")]
    pub containers: Vec<Container>,
}

/// A single container entry
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Container {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub image: String,
    #[serde(deserialize_with = "null_as_default")]
    pub ports: Vec<ContainerPort>,
    pub readiness_probe: Option<Probe>,
    pub liveness_probe: Option<Probe>,
    pub resources: Option<ResourceRequirements>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ContainerPort {
    #[serde(deserialize_with = "null_as_default")]
    pub container_port: i64,
    pub protocol: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Probe {
    #[serde(deserialize_with = "null_as_default")]
    pub http_get: HttpGetAction,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct HttpGetAction {
    #[serde(deserialize_with = "null_as_default")]
    pub path: String,
    #[serde(deserialize_with = "null_as_default")]
    pub port: i64,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ResourceRequirements {
    #[serde(deserialize_with = "null_as_default")]
    pub limits: ResourceLimits,
    pub requests: Option<ResourceLimits>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ResourceLimits {
    pub cpu: Option<CpuQuantity>,
    pub memory: Option<String>,
}

/// `key:` with no value reads as the type's empty value
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Label mapping that rejects a key defined twice
fn unique_labels<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct LabelsVisitor;

    impl<'de> Visitor<'de> for LabelsVisitor {
        type Value = BTreeMap<String, String>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a mapping of label names to values")
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(BTreeMap::new())
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(BTreeMap::new())
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut labels = BTreeMap::new();
            while let Some((key, value)) = map.next_entry::<String, String>()? {
                if labels.contains_key(&key) {
                    return Err(de::Error::custom(format!("duplicate label key '{}'", key)));
                }
                labels.insert(key, value);
            }
            Ok(labels)
        }
    }

    deserializer.deserialize_any(LabelsVisitor)
}

/// CPU quantity as written in the manifest.
///
/// YAML allows `cpu: 2` and `cpu: "2"`; both are accepted. Anything else
/// (floats, booleans, integers too wide for `i64`, nested values) is kept in
/// `Other`, rendered as text, so validation can report it instead of the
/// loader rejecting the whole file.
#[derive(Debug, Clone, PartialEq)]
pub enum CpuQuantity {
    Integer(i64),
    Text(String),
    Other(String),
}

impl CpuQuantity {
    /// Normalize to a positive whole number of CPUs, if the value is one.
    pub fn as_positive_integer(&self) -> Option<u64> {
        match self {
            CpuQuantity::Integer(n) if *n > 0 => Some(*n as u64),
            CpuQuantity::Text(s) if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => {
                s.parse::<u64>().ok().filter(|n| *n > 0)
            }
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for CpuQuantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(CpuQuantityVisitor)
    }
}

struct CpuQuantityVisitor;

impl<'de> Visitor<'de> for CpuQuantityVisitor {
    type Value = CpuQuantity;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a cpu quantity")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(CpuQuantity::Integer(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(i64::try_from(v)
            .map(CpuQuantity::Integer)
            .unwrap_or_else(|_| CpuQuantity::Other(v.to_string())))
    }

    fn visit_i128<E: de::Error>(self, v: i128) -> Result<Self::Value, E> {
        Ok(CpuQuantity::Other(v.to_string()))
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<Self::Value, E> {
        Ok(CpuQuantity::Other(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(CpuQuantity::Other(v.to_string()))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(CpuQuantity::Other(v.to_string()))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(CpuQuantity::Text(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(CpuQuantity::Text(v))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(CpuQuantity::Other("<sequence>".to_string()))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(CpuQuantity::Other("<mapping>".to_string()))
    }
}

impl From<i64> for CpuQuantity {
    fn from(value: i64) -> Self {
        CpuQuantity::Integer(value)
    }
}

impl From<&str> for CpuQuantity {
    fn from(value: &str) -> Self {
        CpuQuantity::Text(value.to_string())
    }
}

impl fmt::Display for CpuQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CpuQuantity::Integer(n) => write!(f, "{}", n),
            CpuQuantity::Text(s) | CpuQuantity::Other(s) => f.write_str(s),
        }
    }
}
