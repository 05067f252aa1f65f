//! Create Domain List Use Case
//!
//! Creates an empty list. When the user supplies no name, one is generated
//! from the existing collection ("Domain List", "Domain List 2", …).

use std::sync::Arc;

use crate::domain::entity::domain_list::DomainList;
use crate::domain::repository::DomainListRepository;
use crate::error::PolicyResult;

/// Create domain list input
pub struct CreateDomainListInput {
    /// Optional display name; generated when absent or blank
    pub name: Option<String>,
}

/// Create domain list use case
pub struct CreateDomainListUseCase<D>
where
    D: DomainListRepository,
{
    lists: Arc<D>,
}

impl<D> CreateDomainListUseCase<D>
where
    D: DomainListRepository,
{
    pub fn new(lists: Arc<D>) -> Self {
        Self { lists }
    }

    pub async fn execute(&self, input: CreateDomainListInput) -> PolicyResult<DomainList> {
        let existing = self.lists.list_domain_lists().await?;

        let name = match input.name {
            Some(name) if !name.trim().is_empty() => name.trim().to_owned(),
            _ => DomainList::generate_name(&existing),
        };

        self.lists.insert_domain_list(DomainList::new(name)).await
    }
}
