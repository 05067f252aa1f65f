//! Resume Access Use Case
//!
//! Forcibly restores blocking of one domain list for one client. Every
//! lease referencing the list is dropped, active or expired; resuming an
//! already-blocked list is success, not an error.

use std::sync::Arc;

use kernel::id::{ClientId, DomainListId};

use crate::domain::entity::client::Client;
use crate::domain::repository::ClientRepository;
use crate::error::{PolicyError, PolicyResult};

/// Resume access input
pub struct ResumeAccessInput {
    pub client_id: ClientId,
    pub list_id: DomainListId,
}

/// Resume access use case
pub struct ResumeAccessUseCase<C>
where
    C: ClientRepository,
{
    clients: Arc<C>,
}

impl<C> ResumeAccessUseCase<C>
where
    C: ClientRepository,
{
    pub fn new(clients: Arc<C>) -> Self {
        Self { clients }
    }

    pub async fn execute(&self, input: ResumeAccessInput) -> PolicyResult<Client> {
        let client = self
            .clients
            .find_client(input.client_id)
            .await?
            .ok_or(PolicyError::ClientNotFound)?;

        // No list-existence check: leases on a deleted list should still
        // be clearable.
        let updated = client.resume(input.list_id);

        let stored = self
            .clients
            .replace_client(input.client_id, updated)
            .await?
            .ok_or(PolicyError::ClientNotFound)?;

        tracing::info!(
            client_id = %input.client_id,
            list_id = %input.list_id,
            "Resumed blocking"
        );

        Ok(stored)
    }
}
