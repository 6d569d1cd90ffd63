//! Managed DNS domains.

use std::net::{Ipv4Addr, Ipv6Addr};

use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value as JsonValue};

use crate::Payload;

/// A domain (DNS zone) managed by DNS Made Easy.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Domain {
    /// Assigned by the provider; `None` until the domain has been created.
    #[serde(
        deserialize_with = "crate::record::deserialize_to_option_u64",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<u64>,
    #[serde(deserialize_with = "crate::record::deserialize_null_as_default")]
    pub name: String,
    /// Creation time in milliseconds since the Unix epoch.
    #[serde(deserialize_with = "crate::record::deserialize_null_as_default")]
    pub created: i64,
    /// Last update time in milliseconds since the Unix epoch.
    #[serde(deserialize_with = "crate::record::deserialize_null_as_default")]
    pub updated: i64,
    #[serde(deserialize_with = "crate::record::deserialize_null_as_default")]
    pub gtd_enabled: bool,
    #[serde(deserialize_with = "crate::record::deserialize_null_as_default")]
    pub name_servers: Vec<NameServer>,
    #[serde(deserialize_with = "crate::record::deserialize_null_as_default")]
    pub delegate_name_servers: Vec<String>,
    #[serde(deserialize_with = "crate::record::deserialize_null_as_default")]
    pub active_third_parties: Vec<String>,
    #[serde(deserialize_with = "crate::record::deserialize_null_as_default")]
    pub pending_action_id: i64,
    #[serde(deserialize_with = "crate::record::deserialize_null_as_default")]
    pub process_multi: bool,
    #[serde(deserialize_with = "crate::record::deserialize_null_as_default")]
    pub folder_id: i64,
}

/// A name server assigned to a [Domain].
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct NameServer {
    #[serde(deserialize_with = "crate::record::deserialize_null_as_default")]
    pub fqdn: String,
    #[serde(
        deserialize_with = "crate::record::deserialize_empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub ipv4: Option<Ipv4Addr>,
    #[serde(
        deserialize_with = "crate::record::deserialize_empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub ipv6: Option<Ipv6Addr>,
}

/// One page of the account's domains.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DomainList {
    #[serde(rename = "data")]
    pub domains: Vec<Domain>,
    pub page: u32,
    pub total_pages: u32,
    pub total_records: u32,
}

/// Fields to change on several domains at once.
///
/// Only the fields that are set are sent. Attributes without a dedicated setter
/// can be passed through [DomainUpdate::field].
///
/// ```
/// use dnsmadeeasy::domain::DomainUpdate;
///
/// let update = DomainUpdate::new().gtd_enabled(false).folder_id(1234);
/// assert!(!update.is_empty());
/// ```
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DomainUpdate {
    gtd_enabled: Option<bool>,
    folder_id: Option<i64>,
    template_id: Option<i64>,
    vanity_id: Option<i64>,
    soa_id: Option<i64>,
    transfer_acl_id: Option<i64>,
    extra: JsonMap<String, JsonValue>,
}

impl DomainUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables Global Traffic Director.
    pub fn gtd_enabled(mut self, enabled: bool) -> Self {
        self.gtd_enabled = Some(enabled);
        self
    }

    /// Moves the domains into the given folder.
    pub fn folder_id(mut self, id: i64) -> Self {
        self.folder_id = Some(id);
        self
    }

    /// Applies the given record template.
    pub fn template_id(mut self, id: i64) -> Self {
        self.template_id = Some(id);
        self
    }

    /// Uses the given vanity name server configuration.
    pub fn vanity_id(mut self, id: i64) -> Self {
        self.vanity_id = Some(id);
        self
    }

    /// Uses the given custom SOA record.
    pub fn soa_id(mut self, id: i64) -> Self {
        self.soa_id = Some(id);
        self
    }

    /// Uses the given zone transfer ACL.
    pub fn transfer_acl_id(mut self, id: i64) -> Self {
        self.transfer_acl_id = Some(id);
        self
    }

    /// Sets an arbitrary field by its wire name.
    ///
    /// Typed setters take precedence over a field of the same name, and `ids`
    /// is always the list passed to [crate::Client::update_domains].
    pub fn field<T: Into<JsonValue>>(mut self, name: &str, value: T) -> Self {
        self.extra.insert(name.to_string(), value.into());
        self
    }

    /// Whether no field has been set.
    pub fn is_empty(&self) -> bool {
        self.gtd_enabled.is_none()
            && self.folder_id.is_none()
            && self.template_id.is_none()
            && self.vanity_id.is_none()
            && self.soa_id.is_none()
            && self.transfer_acl_id.is_none()
            && self.extra.is_empty()
    }

    pub(crate) fn to_payload(&self, ids: &[u64]) -> Payload {
        Payload::new()
            .add("ids", ids.to_vec())
            .add_if_some("gtdEnabled", self.gtd_enabled)
            .add_if_some("folderId", self.folder_id)
            .add_if_some("templateId", self.template_id)
            .add_if_some("vanityId", self.vanity_id)
            .add_if_some("soaId", self.soa_id)
            .add_if_some("transferAclId", self.transfer_acl_id)
            .merge_missing(&self.extra)
    }
}

#[cfg(test)]
mod tests;
