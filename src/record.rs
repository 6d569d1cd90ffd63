//! DNS records of a managed domain.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use strum_macros::{EnumString, IntoStaticStr};

use crate::domain::Domain;

/// Location used for records that don't take part in Global Traffic Director.
pub const DEFAULT_GTD_LOCATION: &str = "DEFAULT";

/// Record types supported by DNS Made Easy.
///
/// Types without a variant of their own, such as ones the provider adds later,
/// are kept as [Type::Other] with the text the provider sent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumString, IntoStaticStr)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Type {
    A,
    Aaaa,
    Aname,
    Caa,
    Cname,
    /// HTTP redirection.
    Httpred,
    Mx,
    Ns,
    Ptr,
    Soa,
    Spf,
    Srv,
    Txt,
    #[strum(default)]
    Other(String),
}

impl Type {
    /// Gets the string representation of the type.
    pub fn as_str(&self) -> &str {
        match self {
            Type::Other(type_) => type_,
            _ => self.into(),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Type {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Type {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;

        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

/// A DNS record belonging to one domain.
///
/// The boolean flags are only sent when set, and `id` only once the provider has
/// assigned one.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    #[serde(
        default,
        deserialize_with = "deserialize_to_option_u64",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<u64>,
    /// Label relative to the domain; empty for the apex.
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub type_: Type,
    #[serde(default)]
    pub value: String,
    pub ttl: u32,
    #[serde(default = "default_gtd_location")]
    pub gtd_location: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub dynamic_dns: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub monitor: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub failover: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub hard_link: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub failed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<u64>,
    /// Validation errors the provider reported for this record.
    #[serde(default, rename = "error", skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl Record {
    /// Creates a record that hasn't been sent to the provider yet.
    pub fn new(name: &str, type_: Type, value: &str, ttl: u32) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            type_,
            value: value.to_string(),
            ttl,
            gtd_location: default_gtd_location(),
            dynamic_dns: false,
            monitor: false,
            failover: false,
            hard_link: false,
            failed: false,
            source: None,
            source_id: None,
            errors: Vec::new(),
        }
    }
}

/// One page of the records of a domain.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DomainRecords {
    #[serde(rename = "data")]
    pub records: Vec<Record>,
    pub page: u32,
    pub total_pages: u32,
    pub total_records: u32,
    /// The domain the records belong to, when the provider includes it.
    pub domain: Option<Domain>,
}

fn default_gtd_location() -> String {
    DEFAULT_GTD_LOCATION.to_string()
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Helper type for deserializing a string or a u64 to a u64.
#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrU64 {
    U64(u64),
    String(String),
}

pub(crate) fn deserialize_to_option_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    let string_or_u64 = Option::<StringOrU64>::deserialize(deserializer)?;
    Ok(match string_or_u64 {
        Some(StringOrU64::U64(i)) => Some(i),
        Some(StringOrU64::String(s)) => Some(s.parse().map_err(D::Error::custom)?),
        None => None,
    })
}

/// Deserializes `null` to the default value of `T`.
pub(crate) fn deserialize_null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserializes a missing, null or empty string to `None`, and anything else by parsing it.
pub(crate) fn deserialize_empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    use serde::de::Error;

    let s = Option::<String>::deserialize(deserializer)?;
    match s.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(D::Error::custom),
    }
}
