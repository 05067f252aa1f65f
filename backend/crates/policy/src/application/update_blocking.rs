//! Update Blocking Use Case
//!
//! Mutates the client's persistent deny rule: ids accumulate into the one
//! deny rule on add, and the rule disappears when its last target is
//! removed.

use std::collections::BTreeSet;
use std::sync::Arc;

use kernel::id::{ClientId, DomainListId};

use crate::domain::entity::client::Client;
use crate::domain::repository::{ClientRepository, DomainListRepository};
use crate::error::{PolicyError, PolicyResult};

/// Update blocking use case
pub struct UpdateBlockingUseCase<C, D>
where
    C: ClientRepository,
    D: DomainListRepository,
{
    clients: Arc<C>,
    lists: Arc<D>,
}

impl<C, D> UpdateBlockingUseCase<C, D>
where
    C: ClientRepository,
    D: DomainListRepository,
{
    pub fn new(clients: Arc<C>, lists: Arc<D>) -> Self {
        Self { clients, lists }
    }

    /// Add domain lists to the client's deny rule
    pub async fn add_targets(
        &self,
        client_id: ClientId,
        list_ids: Vec<DomainListId>,
    ) -> PolicyResult<Client> {
        let client = self
            .clients
            .find_client(client_id)
            .await?
            .ok_or(PolicyError::ClientNotFound)?;

        // A new rule target must point at a list that exists right now;
        // only later deletion may leave a dangling reference.
        let known: BTreeSet<DomainListId> = self
            .lists
            .list_domain_lists()
            .await?
            .iter()
            .filter_map(|list| list.id)
            .collect();
        if list_ids.iter().any(|id| !known.contains(id)) {
            return Err(PolicyError::DomainListNotFound);
        }

        let updated = client.add_deny_targets(list_ids);

        self.clients
            .replace_client(client_id, updated)
            .await?
            .ok_or(PolicyError::ClientNotFound)
    }

    /// Remove one domain list from the client's deny rule
    pub async fn remove_target(
        &self,
        client_id: ClientId,
        list_id: DomainListId,
    ) -> PolicyResult<Client> {
        let client = self
            .clients
            .find_client(client_id)
            .await?
            .ok_or(PolicyError::ClientNotFound)?;

        let updated = client
            .remove_deny_target(list_id)
            .ok_or(PolicyError::TargetNotBlocked(list_id))?;

        self.clients
            .replace_client(client_id, updated)
            .await?
            .ok_or(PolicyError::ClientNotFound)
    }
}
