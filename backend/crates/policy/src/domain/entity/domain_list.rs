//! Domain List Entity
//!
//! A named, id-addressed collection of domain names usable as a policy
//! target. Lists are shared: many clients' rules and leases may reference
//! the same list id.

use kernel::id::DomainListId;
use serde::{Deserialize, Serialize};

use crate::domain::value_object::domain_name::DomainName;

/// Base used by [`DomainList::generate_name`]
pub const DEFAULT_LIST_NAME: &str = "Domain List";

/// Named collection of blocked/blockable domains
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainList {
    /// `None` until the store assigns an id
    pub id: Option<DomainListId>,
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub domains: Vec<String>,
}

impl DomainList {
    /// Create an unpersisted, empty list
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            domains: Vec::new(),
        }
    }

    /// Does the list already contain this domain?
    pub fn contains(&self, domain: &str) -> bool {
        self.domains.iter().any(|d| d == domain)
    }

    /// Append a validated domain, replace-on-write.
    ///
    /// [`DomainName`] is the only admission path, so list entries are
    /// always normalized. Re-adding an existing domain returns an
    /// unchanged copy.
    pub fn add_domain(&self, domain: DomainName) -> DomainList {
        if self.contains(domain.as_str()) {
            return self.clone();
        }
        let mut domains = self.domains.clone();
        domains.push(domain.into_inner());
        DomainList {
            domains,
            ..self.clone()
        }
    }

    /// Pick a fresh default name: `"Domain List"`, then `"Domain List 2"`,
    /// `"Domain List 3"`, …
    ///
    /// An exact `"Domain List"` counts as suffix 1; otherwise the maximum
    /// numeric suffix found wins. Independent of the order of `existing`.
    pub fn generate_name(existing: &[DomainList]) -> String {
        let max_suffix = existing
            .iter()
            .filter_map(|list| name_suffix(&list.name))
            .max();

        match max_suffix {
            Some(n) => format!("{DEFAULT_LIST_NAME} {}", n + 1),
            None => DEFAULT_LIST_NAME.to_owned(),
        }
    }
}

/// The implied numeric suffix of a default-named list, if any
fn name_suffix(name: &str) -> Option<u32> {
    if name == DEFAULT_LIST_NAME {
        return Some(1);
    }
    name.strip_prefix(DEFAULT_LIST_NAME)?
        .strip_prefix(' ')?
        .parse()
        .ok()
}
