//! Policy Evaluator
//!
//! Pure computation of the effective blocked-domain set for one client at
//! one instant. Blocking is exempted per *list*, not per domain string:
//! the whole evaluation is set arithmetic on list ids followed by one
//! union over the surviving lists' domains, so there are never
//! domain-level conflicts to reconcile.

use chrono::{DateTime, Utc};
use kernel::id::DomainListId;
use std::collections::{BTreeSet, HashMap};

use super::entity::{client::Client, domain_list::DomainList};

/// Result of one evaluation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyDecision {
    /// Every domain the client is denied at the evaluated instant
    pub blocked: BTreeSet<String>,
    /// Denied list ids that resolved to no known list (e.g. deleted lists).
    /// A recoverable condition for the caller to report, never a failure.
    pub unresolved: Vec<DomainListId>,
}

/// Compute the client's effective blocked-domain set at `now`.
///
/// 1. Union the list ids of every deny rule (the invariant says there is
///    at most one, but more are tolerated).
/// 2. Union the list ids of every lease active at `now` (strict
///    `end > now`).
/// 3. Subtract: any active lease covering a list fully exempts it, no
///    matter how many leases target it or when each ends.
/// 4. Union the domains of the surviving lists, resolved against an
///    id-indexed map built once per evaluation.
pub fn effective_blocked_domains(
    client: &Client,
    lists: &[DomainList],
    now: DateTime<Utc>,
) -> PolicyDecision {
    let index: HashMap<DomainListId, &DomainList> = lists
        .iter()
        .filter_map(|list| list.id.map(|id| (id, list)))
        .collect();

    let denied = client.denied_list_ids();
    let overridden = client.active_override_ids(now);

    let mut decision = PolicyDecision::default();
    for id in denied.difference(&overridden) {
        match index.get(id) {
            Some(list) => decision.blocked.extend(list.domains.iter().cloned()),
            None => decision.unresolved.push(*id),
        }
    }
    decision
}
