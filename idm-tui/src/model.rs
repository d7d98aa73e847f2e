//! Entry types returned by the identity backend.
//!
//! The backend encodes every LDAP attribute as a list of strings
//! (`"cn": ["webservers"]`), occasionally as a bare string. Missing
//! attributes decode to empty values.

use idm_select::{has_nonempty_key, Keyed};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AttrValue {
    One(String),
    Many(Vec<String>),
}

impl AttrValue {
    fn into_vec(self) -> Vec<String> {
        match self {
            AttrValue::One(value) => vec![value],
            AttrValue::Many(values) => values,
        }
    }
}

fn first_value<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(optional_first_value(deserializer)?.unwrap_or_default())
}

fn optional_first_value<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    let value = Option::<AttrValue>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.into_vec().into_iter().next()))
}

fn all_values<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let value = Option::<AttrValue>::deserialize(deserializer)?;
    Ok(value.map(AttrValue::into_vec).unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct HostGroup {
    #[serde(default, deserialize_with = "first_value")]
    pub cn: String,
    #[serde(default, deserialize_with = "optional_first_value")]
    pub description: Option<String>,
    #[serde(default, rename = "member_host", deserialize_with = "all_values")]
    pub member_hosts: Vec<String>,
    #[serde(default, rename = "member_hostgroup", deserialize_with = "all_values")]
    pub member_hostgroups: Vec<String>,
}

impl HostGroup {
    pub fn named(cn: impl Into<String>) -> Self {
        Self {
            cn: cn.into(),
            ..Self::default()
        }
    }
}

impl Keyed for HostGroup {
    type Key = String;

    fn key(&self) -> &String {
        &self.cn
    }
}

pub fn is_host_group_selectable(group: &HostGroup) -> bool {
    has_nonempty_key(group)
}

/// One page of host groups plus the keys of every match across all pages.
#[derive(Debug, Clone, Default)]
pub struct HostGroupPage {
    pub rows: Vec<HostGroup>,
    pub universe: Vec<HostGroup>,
    pub total_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct IdView {
    #[serde(default, deserialize_with = "first_value")]
    pub cn: String,
    #[serde(default, deserialize_with = "optional_first_value")]
    pub description: Option<String>,
    #[serde(
        default,
        rename = "ipadomainresolutionorder",
        deserialize_with = "optional_first_value"
    )]
    pub domain_resolution_order: Option<String>,
}

impl IdView {
    /// Attributes that differ from `original`, in the shape the modify call
    /// expects. Cleared attributes are sent as empty strings.
    pub fn modified_values(&self, original: &IdView) -> Map<String, Value> {
        let mut changed = Map::new();
        if normalized(&self.description) != normalized(&original.description) {
            changed.insert(
                "description".to_string(),
                Value::String(normalized(&self.description).to_string()),
            );
        }
        if normalized(&self.domain_resolution_order)
            != normalized(&original.domain_resolution_order)
        {
            changed.insert(
                "ipadomainresolutionorder".to_string(),
                Value::String(normalized(&self.domain_resolution_order).to_string()),
            );
        }
        changed
    }

    pub fn is_modified(&self, original: &IdView) -> bool {
        !self.modified_values(original).is_empty()
    }

    /// Domains listed in the resolution order, in priority order.
    pub fn resolution_domains(&self) -> Vec<&str> {
        normalized(&self.domain_resolution_order)
            .split(':')
            .map(str::trim)
            .filter(|domain| !domain.is_empty())
            .collect()
    }
}

fn normalized(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_host_group_decodes_attribute_lists() {
        let group: HostGroup = serde_json::from_value(json!({
            "cn": ["webservers"],
            "description": ["Front-end hosts"],
            "member_host": ["web1.example.test", "web2.example.test"],
            "dn": "cn=webservers,cn=hostgroups,cn=accounts,dc=example,dc=test"
        }))
        .unwrap();
        assert_eq!(group.cn, "webservers");
        assert_eq!(group.description.as_deref(), Some("Front-end hosts"));
        assert_eq!(group.member_hosts.len(), 2);
        assert!(group.member_hostgroups.is_empty());
    }

    #[test]
    fn test_host_group_accepts_bare_strings_and_missing_fields() {
        let group: HostGroup = serde_json::from_value(json!({ "cn": "db" })).unwrap();
        assert_eq!(group.cn, "db");
        assert_eq!(group.description, None);

        let empty: HostGroup = serde_json::from_value(json!({})).unwrap();
        assert_eq!(empty.cn, "");
        assert!(!is_host_group_selectable(&empty));
    }

    #[test]
    fn test_id_view_decodes() {
        let view: IdView = serde_json::from_value(json!({
            "cn": ["Default Trust View"],
            "ipadomainresolutionorder": ["ad.example.test:example.test"]
        }))
        .unwrap();
        assert_eq!(view.cn, "Default Trust View");
        assert_eq!(view.resolution_domains(), vec!["ad.example.test", "example.test"]);
    }

    #[test]
    fn test_modified_values_only_changed_fields() {
        let original = IdView {
            cn: "branch".into(),
            description: Some("Branch office".into()),
            domain_resolution_order: None,
        };
        let mut current = original.clone();
        assert!(current.modified_values(&original).is_empty());

        current.domain_resolution_order = Some("a.test:b.test".into());
        let changed = current.modified_values(&original);
        assert_eq!(changed.len(), 1);
        assert_eq!(changed["ipadomainresolutionorder"], json!("a.test:b.test"));
    }

    #[test]
    fn test_modified_values_clears_with_empty_string() {
        let original = IdView {
            cn: "branch".into(),
            description: Some("Branch office".into()),
            domain_resolution_order: None,
        };
        let current = IdView {
            description: Some(String::new()),
            ..original.clone()
        };
        let changed = current.modified_values(&original);
        assert_eq!(changed["description"], json!(""));
        assert!(current.is_modified(&original));
    }
}
