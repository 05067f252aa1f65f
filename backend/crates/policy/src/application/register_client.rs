//! Register Client Use Case
//!
//! Admits a new managed device: validates the address and rejects
//! duplicates before the store assigns an id.

use std::sync::Arc;

use crate::domain::entity::client::Client;
use crate::domain::repository::ClientRepository;
use crate::domain::value_object::host_addr::HostAddr;
use crate::error::{PolicyError, PolicyResult};

/// Register client input
pub struct RegisterClientInput {
    /// Dotted-quad address of the device
    pub ip: String,
    /// Display name
    pub name: String,
    /// Hardware address, if known
    pub mac_address: Option<String>,
}

/// Register client use case
pub struct RegisterClientUseCase<C>
where
    C: ClientRepository,
{
    clients: Arc<C>,
}

impl<C> RegisterClientUseCase<C>
where
    C: ClientRepository,
{
    pub fn new(clients: Arc<C>) -> Self {
        Self { clients }
    }

    pub async fn execute(&self, input: RegisterClientInput) -> PolicyResult<Client> {
        let ip = HostAddr::new(&input.ip)?;

        // The proxy keys on source address, so one client per IP.
        let existing = self.clients.list_clients().await?;
        if existing.iter().any(|client| client.ip == ip) {
            return Err(PolicyError::DuplicateClientIp(ip.as_str().to_owned()));
        }

        let client = Client::new(ip, input.name, input.mac_address);
        self.clients.insert_client(client).await
    }
}
