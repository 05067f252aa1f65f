//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in the infra layer.
//!
//! The store contract is whole-object replacement with last-write-wins
//! semantics: there is no versioning or merge here, concurrent edits are
//! resolved by whoever saves last. `insert` assigns the next id and
//! `replace` returns the authoritative stored value.

use kernel::id::{ClientId, DomainListId};

use crate::domain::entity::{client::Client, domain_list::DomainList};
use crate::error::PolicyResult;

/// Client repository trait
#[trait_variant::make(ClientRepository: Send)]
pub trait LocalClientRepository {
    /// All clients
    async fn list_clients(&self) -> PolicyResult<Vec<Client>>;

    /// Find a client by id
    async fn find_client(&self, id: ClientId) -> PolicyResult<Option<Client>>;

    /// Insert a new client, assigning the next id
    async fn insert_client(&self, client: Client) -> PolicyResult<Client>;

    /// Replace a client wholesale; `None` if the id is unknown
    async fn replace_client(&self, id: ClientId, client: Client) -> PolicyResult<Option<Client>>;

    /// Delete a client; `None` if the id is unknown
    async fn remove_client(&self, id: ClientId) -> PolicyResult<Option<Client>>;
}

/// Domain list repository trait
#[trait_variant::make(DomainListRepository: Send)]
pub trait LocalDomainListRepository {
    /// All domain lists
    async fn list_domain_lists(&self) -> PolicyResult<Vec<DomainList>>;

    /// Find a list by id
    async fn find_domain_list(&self, id: DomainListId) -> PolicyResult<Option<DomainList>>;

    /// Insert a new list, assigning the next id
    async fn insert_domain_list(&self, list: DomainList) -> PolicyResult<DomainList>;

    /// Replace a list wholesale; `None` if the id is unknown
    async fn replace_domain_list(
        &self,
        id: DomainListId,
        list: DomainList,
    ) -> PolicyResult<Option<DomainList>>;

    /// Delete a list; `None` if the id is unknown.
    ///
    /// Rules referencing a deleted list keep their dangling id; the
    /// evaluator reports it as unresolved rather than failing.
    async fn remove_domain_list(&self, id: DomainListId) -> PolicyResult<Option<DomainList>>;
}
