//! Client Entity
//!
//! The aggregate for one managed device: its address, its blocking rules
//! and its leases. A client owns both collections exclusively; nothing is
//! shared across clients except the domain lists the rules point at.
//!
//! Every mutation is replace-on-write: operations take `&self` and return
//! a new `Client`, and the store persists by whole-object replacement. No
//! live collection is ever spliced in place, so there is nothing to alias
//! and the evaluator works over plain values.

use chrono::{DateTime, Utc};
use kernel::id::{ClientId, DomainListId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::lease::{Lease, LeaseDuration};
use super::rule::Rule;
use crate::domain::value_object::host_addr::HostAddr;

/// One managed client device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// `None` until the store assigns an id
    pub id: Option<ClientId>,
    pub ip: HostAddr,
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub rules: Vec<Rule>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub leases: Vec<Lease>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mac_address: Option<String>,
}

impl Client {
    /// Create an unpersisted client with no rules or leases
    pub fn new(ip: HostAddr, name: impl Into<String>, mac_address: Option<String>) -> Self {
        Self {
            id: None,
            ip,
            name: name.into(),
            rules: Vec::new(),
            leases: Vec::new(),
            mac_address,
        }
    }

    fn with_rules(&self, rules: Vec<Rule>) -> Client {
        Client {
            rules,
            ..self.clone()
        }
    }

    fn with_leases(&self, leases: Vec<Lease>) -> Client {
        Client {
            leases,
            ..self.clone()
        }
    }

    // ========================================================================
    // Policy views
    // ========================================================================

    /// Union of list ids over all deny rules.
    ///
    /// The invariant is a single deny rule per client, but evaluation
    /// tolerates more.
    pub fn denied_list_ids(&self) -> BTreeSet<DomainListId> {
        self.rules
            .iter()
            .filter(|rule| rule.is_deny())
            .flat_map(|rule| rule.domainlists().iter().copied())
            .collect()
    }

    /// Union of list ids over all leases active at `now`
    pub fn active_override_ids(&self, now: DateTime<Utc>) -> BTreeSet<DomainListId> {
        self.leases
            .iter()
            .filter(|lease| lease.is_active(now))
            .flat_map(|lease| lease.rule.domainlists().iter().copied())
            .collect()
    }

    /// Leases covering `list_id` that are active at `now`
    pub fn active_leases_for(&self, list_id: DomainListId, now: DateTime<Utc>) -> Vec<&Lease> {
        self.leases
            .iter()
            .filter(|lease| lease.covers(list_id) && lease.is_active(now))
            .collect()
    }

    /// Latest expiry among active leases covering `list_id`.
    ///
    /// Display only: overlapping leases extend the shown window, but the
    /// block decision itself is the strict boolean "any active lease".
    pub fn unblocked_until(
        &self,
        list_id: DomainListId,
        now: DateTime<Utc>,
    ) -> Option<DateTime<Utc>> {
        self.active_leases_for(list_id, now)
            .iter()
            .map(|lease| lease.end_date_utc)
            .max()
    }

    // ========================================================================
    // Lease lifecycle
    // ========================================================================

    /// Temporarily lift blocking of `list_id` for the given preset duration
    pub fn pause(&self, list_id: DomainListId, duration: LeaseDuration, now: DateTime<Utc>) -> Client {
        let mut leases = self.leases.clone();
        leases.push(Lease::new(
            Rule::allow([list_id]),
            now,
            duration.to_duration(),
        ));
        self.with_leases(leases)
    }

    /// Restore blocking of `list_id` immediately.
    ///
    /// Removes every lease referencing the list, active or expired: an
    /// explicit resume never waits for time to elapse.
    pub fn resume(&self, list_id: DomainListId) -> Client {
        let leases = self
            .leases
            .iter()
            .filter(|lease| !lease.covers(list_id))
            .cloned()
            .collect();
        self.with_leases(leases)
    }

    /// Drop leases no longer active at `now`.
    ///
    /// Returns `None` when nothing changed, so the caller can skip the
    /// write. Evaluation never requires pruning; this exists for the
    /// persistence sweep.
    pub fn prune_expired_leases(&self, now: DateTime<Utc>) -> Option<Client> {
        let retained: Vec<Lease> = self
            .leases
            .iter()
            .filter(|lease| lease.is_active(now))
            .cloned()
            .collect();

        if retained.len() == self.leases.len() {
            None
        } else {
            Some(self.with_leases(retained))
        }
    }

    // ========================================================================
    // Rule mutation
    // ========================================================================

    /// Add list ids to the client's deny rule, creating it if absent.
    ///
    /// Ids accumulate into the one deny rule; duplicates vanish in the set.
    pub fn add_deny_targets(&self, ids: impl IntoIterator<Item = DomainListId>) -> Client {
        let ids: BTreeSet<DomainListId> = ids.into_iter().collect();
        let mut rules = self.rules.clone();

        if let Some(Rule::DenyHttpAccess { domainlists }) =
            rules.iter_mut().find(|rule| rule.is_deny())
        {
            domainlists.extend(ids);
        } else {
            rules.push(Rule::deny(ids));
        }

        self.with_rules(rules)
    }

    /// Remove one list id from the deny rule.
    ///
    /// `None` when no rule references the id — the caller reports
    /// not-found. A deny rule whose target set empties is removed
    /// entirely: a rule with zero targets is not a valid resting state.
    pub fn remove_deny_target(&self, list_id: DomainListId) -> Option<Client> {
        if !self.denied_list_ids().contains(&list_id) {
            return None;
        }

        let mut rules = Vec::with_capacity(self.rules.len());
        for rule in &self.rules {
            match rule {
                Rule::DenyHttpAccess { domainlists } => {
                    let remaining: BTreeSet<DomainListId> = domainlists
                        .iter()
                        .copied()
                        .filter(|id| *id != list_id)
                        .collect();
                    if !remaining.is_empty() {
                        rules.push(Rule::DenyHttpAccess {
                            domainlists: remaining,
                        });
                    }
                }
                other => rules.push(other.clone()),
            }
        }

        Some(self.with_rules(rules))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use kernel::id::Id;

    fn t0() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn client() -> Client {
        Client::new(HostAddr::new("192.168.1.20").unwrap(), "tablet", None)
    }

    const L1: DomainListId = Id::from_u32(1);
    const L2: DomainListId = Id::from_u32(2);

    mod rule_mutation {
        use super::*;

        #[test]
        fn test_add_creates_single_deny_rule() {
            let c = client().add_deny_targets([L1]).add_deny_targets([L2]);
            assert_eq!(c.rules.len(), 1);
            assert_eq!(c.denied_list_ids(), BTreeSet::from([L1, L2]));
        }

        #[test]
        fn test_add_is_duplicate_free() {
            let c = client().add_deny_targets([L1, L1]).add_deny_targets([L1]);
            assert_eq!(c.denied_list_ids(), BTreeSet::from([L1]));
        }

        #[test]
        fn test_remove_prunes_empty_rule() {
            let c = client().add_deny_targets([L1]);
            let c = c.remove_deny_target(L1).unwrap();
            assert!(c.rules.is_empty());
        }

        #[test]
        fn test_remove_keeps_other_targets() {
            let c = client().add_deny_targets([L1, L2]);
            let c = c.remove_deny_target(L1).unwrap();
            assert_eq!(c.denied_list_ids(), BTreeSet::from([L2]));
            assert_eq!(c.rules.len(), 1);
        }

        #[test]
        fn test_remove_unknown_is_none() {
            assert!(client().remove_deny_target(L1).is_none());

            let c = client().add_deny_targets([L1]);
            assert!(c.remove_deny_target(L2).is_none());
        }

        #[test]
        fn test_mutation_leaves_original_untouched() {
            let before = client();
            let _ = before.add_deny_targets([L1]);
            assert!(before.rules.is_empty());
        }
    }

    mod lease_lifecycle {
        use super::*;

        #[test]
        fn test_pause_appends_active_lease() {
            let c = client().pause(L1, LeaseDuration::ThirtyMinutes, t0());
            assert_eq!(c.leases.len(), 1);
            assert_eq!(c.active_leases_for(L1, t0()).len(), 1);
            assert_eq!(c.active_override_ids(t0()), BTreeSet::from([L1]));
        }

        #[test]
        fn test_resume_removes_all_matching_leases() {
            let c = client()
                .pause(L1, LeaseDuration::ThirtyMinutes, t0())
                .pause(L1, LeaseDuration::OneHour, t0())
                .pause(L2, LeaseDuration::OneHour, t0());
            let c = c.resume(L1);
            assert!(c.active_leases_for(L1, t0()).is_empty());
            // the other list's lease survives
            assert_eq!(c.active_leases_for(L2, t0()).len(), 1);
        }

        #[test]
        fn test_resume_removes_expired_leases_too() {
            let c = client().pause(L1, LeaseDuration::ThirtyMinutes, t0());
            let later = t0() + Duration::hours(2);
            let c = c.resume(L1);
            assert!(c.leases.is_empty());
            assert!(c.active_leases_for(L1, later).is_empty());
        }

        #[test]
        fn test_unblocked_until_is_latest_end() {
            let c = client()
                .pause(L1, LeaseDuration::ThirtyMinutes, t0())
                .pause(L1, LeaseDuration::TwoHours, t0());
            assert_eq!(
                c.unblocked_until(L1, t0()),
                Some(t0() + Duration::hours(2))
            );
        }

        #[test]
        fn test_unblocked_until_ignores_expired() {
            let c = client().pause(L1, LeaseDuration::ThirtyMinutes, t0());
            assert_eq!(c.unblocked_until(L1, t0() + Duration::hours(1)), None);
        }

        #[test]
        fn test_prune_drops_only_expired() {
            let c = client()
                .pause(L1, LeaseDuration::ThirtyMinutes, t0())
                .pause(L2, LeaseDuration::SixHours, t0());
            let pruned = c.prune_expired_leases(t0() + Duration::hours(1)).unwrap();
            assert_eq!(pruned.leases.len(), 1);
            assert!(pruned.leases[0].covers(L2));
        }

        #[test]
        fn test_prune_unchanged_is_none() {
            let c = client().pause(L1, LeaseDuration::SixHours, t0());
            assert!(c.prune_expired_leases(t0() + Duration::minutes(5)).is_none());
            assert!(client().prune_expired_leases(t0()).is_none());
        }
    }

    mod serialization {
        use super::*;

        #[test]
        fn test_empty_collections_omitted() {
            let c = client();
            let json = serde_json::to_string(&c).unwrap();
            assert_eq!(
                json,
                r#"{"id":null,"ip":"192.168.1.20","name":"tablet"}"#
            );
        }

        #[test]
        fn test_reads_original_store_format() {
            let json = r#"{
                "id": 3,
                "ip": "192.168.1.20",
                "name": "tablet",
                "mac_address": "aa:bb:cc:dd:ee:ff",
                "rules": [{"kind": "deny_http_access", "domainlists": [1]}],
                "leases": [{
                    "end_date_utc": 1700001800000,
                    "rule": {"kind": "allow_http_access", "domainlists": [1]}
                }]
            }"#;
            let c: Client = serde_json::from_str(json).unwrap();
            assert_eq!(c.denied_list_ids(), BTreeSet::from([L1]));
            assert_eq!(c.leases[0].end_date_utc, t0() + Duration::minutes(30));
            assert_eq!(c.mac_address.as_deref(), Some("aa:bb:cc:dd:ee:ff"));
        }
    }
}
