//! Pause Access Use Case
//!
//! Temporarily lifts blocking of one domain list for one client by
//! appending a lease. Durations come from the fixed preset set offered in
//! the UI.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::id::{ClientId, DomainListId};

use crate::domain::entity::client::Client;
use crate::domain::entity::lease::LeaseDuration;
use crate::domain::repository::{ClientRepository, DomainListRepository};
use crate::error::{PolicyError, PolicyResult};

/// Pause access input
pub struct PauseAccessInput {
    pub client_id: ClientId,
    pub list_id: DomainListId,
    /// Requested pause length; must be one of the presets
    pub minutes: i64,
}

/// Pause access output
#[derive(Debug)]
pub struct PauseAccessOutput {
    /// The stored client with the new lease
    pub client: Client,
    /// When blocking resumes on its own
    pub unblocked_until: DateTime<Utc>,
}

/// Pause access use case
pub struct PauseAccessUseCase<C, D>
where
    C: ClientRepository,
    D: DomainListRepository,
{
    clients: Arc<C>,
    lists: Arc<D>,
}

impl<C, D> PauseAccessUseCase<C, D>
where
    C: ClientRepository,
    D: DomainListRepository,
{
    pub fn new(clients: Arc<C>, lists: Arc<D>) -> Self {
        Self { clients, lists }
    }

    pub async fn execute(&self, input: PauseAccessInput) -> PolicyResult<PauseAccessOutput> {
        let duration = LeaseDuration::from_minutes(input.minutes)
            .ok_or(PolicyError::UnsupportedDuration(input.minutes))?;

        let client = self
            .clients
            .find_client(input.client_id)
            .await?
            .ok_or(PolicyError::ClientNotFound)?;

        // Pausing a list that no longer exists would mint a lease that can
        // never do anything; reject it instead.
        self.lists
            .find_domain_list(input.list_id)
            .await?
            .ok_or(PolicyError::DomainListNotFound)?;

        let now = Utc::now();
        let updated = client.pause(input.list_id, duration, now);

        let stored = self
            .clients
            .replace_client(input.client_id, updated)
            .await?
            .ok_or(PolicyError::ClientNotFound)?;

        tracing::info!(
            client_id = %input.client_id,
            list_id = %input.list_id,
            minutes = input.minutes,
            "Paused blocking"
        );

        Ok(PauseAccessOutput {
            client: stored,
            unblocked_until: now + duration.to_duration(),
        })
    }
}
