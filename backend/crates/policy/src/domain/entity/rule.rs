//! Rule Entity
//!
//! A policy statement attached to a client. `DenyHttpAccess` blocks every
//! domain in every referenced list; `AllowHttpAccess` exempts them and is
//! only meaningful inside a [`Lease`](super::lease::Lease).
//!
//! Rules reference domain lists by id, never by embedded copy: a list can
//! be shared by many clients and edited in one place.

use kernel::id::DomainListId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Client-level policy statement
///
/// Wire format is a `kind`-tagged object:
/// `{"kind": "deny_http_access", "domainlists": [1, 2]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rule {
    /// Block every domain in every referenced list
    DenyHttpAccess {
        #[serde(skip_serializing_if = "BTreeSet::is_empty", default)]
        domainlists: BTreeSet<DomainListId>,
    },
    /// Exempt every domain in every referenced list
    AllowHttpAccess {
        #[serde(skip_serializing_if = "BTreeSet::is_empty", default)]
        domainlists: BTreeSet<DomainListId>,
    },
}

impl Rule {
    /// Create a deny rule over the given list ids
    pub fn deny(ids: impl IntoIterator<Item = DomainListId>) -> Self {
        Rule::DenyHttpAccess {
            domainlists: ids.into_iter().collect(),
        }
    }

    /// Create an allow rule over the given list ids
    pub fn allow(ids: impl IntoIterator<Item = DomainListId>) -> Self {
        Rule::AllowHttpAccess {
            domainlists: ids.into_iter().collect(),
        }
    }

    #[inline]
    pub fn is_deny(&self) -> bool {
        matches!(self, Rule::DenyHttpAccess { .. })
    }

    #[inline]
    pub fn is_allow(&self) -> bool {
        matches!(self, Rule::AllowHttpAccess { .. })
    }

    /// The referenced domain-list ids
    pub fn domainlists(&self) -> &BTreeSet<DomainListId> {
        match self {
            Rule::DenyHttpAccess { domainlists } | Rule::AllowHttpAccess { domainlists } => {
                domainlists
            }
        }
    }

    /// Does this rule reference the given list?
    pub fn references(&self, id: DomainListId) -> bool {
        self.domainlists().contains(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::id::Id;

    #[test]
    fn test_kind_predicates() {
        assert!(Rule::deny([Id::from_u32(1)]).is_deny());
        assert!(!Rule::deny([Id::from_u32(1)]).is_allow());
        assert!(Rule::allow([Id::from_u32(1)]).is_allow());
    }

    #[test]
    fn test_ids_deduplicate() {
        let rule = Rule::deny([Id::from_u32(2), Id::from_u32(2), Id::from_u32(1)]);
        let ids: Vec<u32> = rule.domainlists().iter().map(|id| id.as_u32()).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_references() {
        let rule = Rule::deny([Id::from_u32(7)]);
        assert!(rule.references(Id::from_u32(7)));
        assert!(!rule.references(Id::from_u32(8)));
    }

    #[test]
    fn test_wire_format_tag() {
        let rule = Rule::deny([Id::from_u32(1)]);
        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(json["kind"], "deny_http_access");
        assert_eq!(json["domainlists"], serde_json::json!([1]));

        let back: Rule = serde_json::from_value(json).unwrap();
        assert_eq!(back, rule);
    }

    #[test]
    fn test_empty_ids_omitted_and_defaulted() {
        let rule = Rule::allow([]);
        let json = serde_json::to_string(&rule).unwrap();
        assert_eq!(json, r#"{"kind":"allow_http_access"}"#);

        let back: Rule = serde_json::from_str(&json).unwrap();
        assert!(back.domainlists().is_empty());
    }
}
