//! Add Domain Use Case
//!
//! Admits one domain string into a list, through the validator. The error
//! message is surfaced verbatim next to the input that produced it.

use std::sync::Arc;

use kernel::id::DomainListId;

use crate::domain::entity::domain_list::DomainList;
use crate::domain::repository::DomainListRepository;
use crate::domain::value_object::domain_name::DomainName;
use crate::error::{PolicyError, PolicyResult};

/// Add domain input
pub struct AddDomainInput {
    pub list_id: DomainListId,
    /// Raw user input; validated here
    pub domain: String,
}

/// Add domain use case
pub struct AddDomainUseCase<D>
where
    D: DomainListRepository,
{
    lists: Arc<D>,
}

impl<D> AddDomainUseCase<D>
where
    D: DomainListRepository,
{
    pub fn new(lists: Arc<D>) -> Self {
        Self { lists }
    }

    pub async fn execute(&self, input: AddDomainInput) -> PolicyResult<DomainList> {
        let domain = DomainName::new(&input.domain)?;

        let list = self
            .lists
            .find_domain_list(input.list_id)
            .await?
            .ok_or(PolicyError::DomainListNotFound)?;

        let updated = list.add_domain(domain);

        self.lists
            .replace_domain_list(input.list_id, updated)
            .await?
            .ok_or(PolicyError::DomainListNotFound)
    }
}
