//! Client Policy Use Case
//!
//! The read side: evaluates the effective blocked-domain set for one
//! client at the current instant and assembles the per-list state the UI
//! renders ("blocked" vs "unblocked until 14:30").

use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::id::{ClientId, DomainListId};

use crate::domain::entity::client::Client;
use crate::domain::evaluator::{self, PolicyDecision};
use crate::domain::repository::{ClientRepository, DomainListRepository};
use crate::error::{PolicyError, PolicyResult};

/// Block state of one denied list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListBlockState {
    pub id: DomainListId,
    pub name: String,
    /// Strictly boolean: false iff any lease is active right now
    pub blocked: bool,
    /// Latest lease expiry while unblocked; display only
    pub unblocked_until: Option<DateTime<Utc>>,
}

/// Client policy output
pub struct ClientPolicyOutput {
    pub client: Client,
    pub decision: PolicyDecision,
    /// One entry per denied list that still resolves
    pub lists: Vec<ListBlockState>,
    pub evaluated_at: DateTime<Utc>,
}

/// Client policy use case
pub struct ClientPolicyUseCase<C, D>
where
    C: ClientRepository,
    D: DomainListRepository,
{
    clients: Arc<C>,
    lists: Arc<D>,
}

impl<C, D> ClientPolicyUseCase<C, D>
where
    C: ClientRepository,
    D: DomainListRepository,
{
    pub fn new(clients: Arc<C>, lists: Arc<D>) -> Self {
        Self { clients, lists }
    }

    pub async fn execute(&self, client_id: ClientId) -> PolicyResult<ClientPolicyOutput> {
        let client = self
            .clients
            .find_client(client_id)
            .await?
            .ok_or(PolicyError::ClientNotFound)?;

        let lists = self.lists.list_domain_lists().await?;

        let now = Utc::now();
        let decision = evaluator::effective_blocked_domains(&client, &lists, now);

        for id in &decision.unresolved {
            tracing::warn!(
                client_id = %client_id,
                list_id = %id,
                "Client references a domain list that no longer exists"
            );
        }

        let denied = client.denied_list_ids();
        let states = lists
            .iter()
            .filter_map(|list| list.id.map(|id| (id, list)))
            .filter(|(id, _)| denied.contains(id))
            .map(|(id, list)| ListBlockState {
                id,
                name: list.name.clone(),
                blocked: client.active_leases_for(id, now).is_empty(),
                unblocked_until: client.unblocked_until(id, now),
            })
            .collect();

        Ok(ClientPolicyOutput {
            client,
            decision,
            lists: states,
            evaluated_at: now,
        })
    }
}
