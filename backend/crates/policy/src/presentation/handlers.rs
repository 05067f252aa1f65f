//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, State};
use std::sync::Arc;

use kernel::id::Id;

use crate::application::{
    AddDomainInput, AddDomainUseCase, ClientPolicyUseCase, CreateDomainListInput,
    CreateDomainListUseCase, PauseAccessInput, PauseAccessUseCase, RegisterClientInput,
    RegisterClientUseCase, ResumeAccessInput, ResumeAccessUseCase, UpdateBlockingUseCase,
};
use crate::domain::entity::{client::Client, domain_list::DomainList};
use crate::domain::repository::{ClientRepository, DomainListRepository};
use crate::domain::value_object::domain_name::DomainName;
use crate::error::{PolicyError, PolicyResult};
use crate::presentation::dto::{
    AddDomainRequest, BlockTargetsRequest, ClientPolicyResponse, CreateClientRequest,
    CreateDomainListRequest, PauseRequest, PauseResponse, ResumeRequest,
};

/// Shared state for policy handlers
#[derive(Clone)]
pub struct PolicyAppState<R>
where
    R: ClientRepository + DomainListRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
}

// ============================================================================
// Clients
// ============================================================================

/// GET /api/v1/client
pub async fn list_clients<R>(
    State(state): State<PolicyAppState<R>>,
) -> PolicyResult<Json<Vec<Client>>>
where
    R: ClientRepository + DomainListRepository + Clone + Send + Sync + 'static,
{
    state.repo.list_clients().await.map(Json)
}

/// POST /api/v1/client
pub async fn create_client<R>(
    State(state): State<PolicyAppState<R>>,
    Json(req): Json<CreateClientRequest>,
) -> PolicyResult<Json<Client>>
where
    R: ClientRepository + DomainListRepository + Clone + Send + Sync + 'static,
{
    let use_case = RegisterClientUseCase::new(state.repo.clone());

    let input = RegisterClientInput {
        ip: req.ip,
        name: req.name,
        mac_address: req.mac_address,
    };

    use_case.execute(input).await.map(Json)
}

/// GET /api/v1/client/{id}
pub async fn get_client<R>(
    State(state): State<PolicyAppState<R>>,
    Path(id): Path<u32>,
) -> PolicyResult<Json<Client>>
where
    R: ClientRepository + DomainListRepository + Clone + Send + Sync + 'static,
{
    state
        .repo
        .find_client(Id::from_u32(id))
        .await?
        .ok_or(PolicyError::ClientNotFound)
        .map(Json)
}

/// PUT /api/v1/client/{id} - whole-object replace
pub async fn put_client<R>(
    State(state): State<PolicyAppState<R>>,
    Path(id): Path<u32>,
    Json(client): Json<Client>,
) -> PolicyResult<Json<Client>>
where
    R: ClientRepository + DomainListRepository + Clone + Send + Sync + 'static,
{
    state
        .repo
        .replace_client(Id::from_u32(id), client)
        .await?
        .ok_or(PolicyError::ClientNotFound)
        .map(Json)
}

/// DELETE /api/v1/client/{id}
pub async fn delete_client<R>(
    State(state): State<PolicyAppState<R>>,
    Path(id): Path<u32>,
) -> PolicyResult<Json<Client>>
where
    R: ClientRepository + DomainListRepository + Clone + Send + Sync + 'static,
{
    state
        .repo
        .remove_client(Id::from_u32(id))
        .await?
        .ok_or(PolicyError::ClientNotFound)
        .map(Json)
}

// ============================================================================
// Policy view / lease lifecycle
// ============================================================================

/// GET /api/v1/client/{id}/policy
pub async fn client_policy<R>(
    State(state): State<PolicyAppState<R>>,
    Path(id): Path<u32>,
) -> PolicyResult<Json<ClientPolicyResponse>>
where
    R: ClientRepository + DomainListRepository + Clone + Send + Sync + 'static,
{
    let use_case = ClientPolicyUseCase::new(state.repo.clone(), state.repo.clone());
    let output = use_case.execute(Id::from_u32(id)).await?;
    Ok(Json(output.into()))
}

/// POST /api/v1/client/{id}/pause
pub async fn pause<R>(
    State(state): State<PolicyAppState<R>>,
    Path(id): Path<u32>,
    Json(req): Json<PauseRequest>,
) -> PolicyResult<Json<PauseResponse>>
where
    R: ClientRepository + DomainListRepository + Clone + Send + Sync + 'static,
{
    let use_case = PauseAccessUseCase::new(state.repo.clone(), state.repo.clone());

    let input = PauseAccessInput {
        client_id: Id::from_u32(id),
        list_id: Id::from_u32(req.domainlist_id),
        minutes: req.minutes,
    };

    let output = use_case.execute(input).await?;
    Ok(Json(output.into()))
}

/// POST /api/v1/client/{id}/resume
pub async fn resume<R>(
    State(state): State<PolicyAppState<R>>,
    Path(id): Path<u32>,
    Json(req): Json<ResumeRequest>,
) -> PolicyResult<Json<Client>>
where
    R: ClientRepository + DomainListRepository + Clone + Send + Sync + 'static,
{
    let use_case = ResumeAccessUseCase::new(state.repo.clone());

    let input = ResumeAccessInput {
        client_id: Id::from_u32(id),
        list_id: Id::from_u32(req.domainlist_id),
    };

    use_case.execute(input).await.map(Json)
}

// ============================================================================
// Blocking mutation
// ============================================================================

/// POST /api/v1/client/{id}/block
pub async fn add_block_targets<R>(
    State(state): State<PolicyAppState<R>>,
    Path(id): Path<u32>,
    Json(req): Json<BlockTargetsRequest>,
) -> PolicyResult<Json<Client>>
where
    R: ClientRepository + DomainListRepository + Clone + Send + Sync + 'static,
{
    let use_case = UpdateBlockingUseCase::new(state.repo.clone(), state.repo.clone());
    let list_ids = req.domainlist_ids.into_iter().map(Id::from_u32).collect();
    use_case
        .add_targets(Id::from_u32(id), list_ids)
        .await
        .map(Json)
}

/// DELETE /api/v1/client/{id}/block/{list_id}
pub async fn remove_block_target<R>(
    State(state): State<PolicyAppState<R>>,
    Path((id, list_id)): Path<(u32, u32)>,
) -> PolicyResult<Json<Client>>
where
    R: ClientRepository + DomainListRepository + Clone + Send + Sync + 'static,
{
    let use_case = UpdateBlockingUseCase::new(state.repo.clone(), state.repo.clone());
    use_case
        .remove_target(Id::from_u32(id), Id::from_u32(list_id))
        .await
        .map(Json)
}

// ============================================================================
// Domain lists
// ============================================================================

/// GET /api/v1/domainlist
pub async fn list_domain_lists<R>(
    State(state): State<PolicyAppState<R>>,
) -> PolicyResult<Json<Vec<DomainList>>>
where
    R: ClientRepository + DomainListRepository + Clone + Send + Sync + 'static,
{
    state.repo.list_domain_lists().await.map(Json)
}

/// POST /api/v1/domainlist
pub async fn create_domain_list<R>(
    State(state): State<PolicyAppState<R>>,
    Json(req): Json<CreateDomainListRequest>,
) -> PolicyResult<Json<DomainList>>
where
    R: ClientRepository + DomainListRepository + Clone + Send + Sync + 'static,
{
    let use_case = CreateDomainListUseCase::new(state.repo.clone());
    let input = CreateDomainListInput { name: req.name };
    use_case.execute(input).await.map(Json)
}

/// GET /api/v1/domainlist/{id}
pub async fn get_domain_list<R>(
    State(state): State<PolicyAppState<R>>,
    Path(id): Path<u32>,
) -> PolicyResult<Json<DomainList>>
where
    R: ClientRepository + DomainListRepository + Clone + Send + Sync + 'static,
{
    state
        .repo
        .find_domain_list(Id::from_u32(id))
        .await?
        .ok_or(PolicyError::DomainListNotFound)
        .map(Json)
}

/// PUT /api/v1/domainlist/{id} - whole-object replace
///
/// The incoming domains pass through the validator so a replace can never
/// smuggle an unnormalized entry into the store.
pub async fn put_domain_list<R>(
    State(state): State<PolicyAppState<R>>,
    Path(id): Path<u32>,
    Json(list): Json<DomainList>,
) -> PolicyResult<Json<DomainList>>
where
    R: ClientRepository + DomainListRepository + Clone + Send + Sync + 'static,
{
    let mut normalized = list;
    normalized.domains = normalized
        .domains
        .iter()
        .map(|domain| DomainName::new(domain).map(DomainName::into_inner))
        .collect::<Result<_, _>>()?;

    state
        .repo
        .replace_domain_list(Id::from_u32(id), normalized)
        .await?
        .ok_or(PolicyError::DomainListNotFound)
        .map(Json)
}

/// DELETE /api/v1/domainlist/{id}
pub async fn delete_domain_list<R>(
    State(state): State<PolicyAppState<R>>,
    Path(id): Path<u32>,
) -> PolicyResult<Json<DomainList>>
where
    R: ClientRepository + DomainListRepository + Clone + Send + Sync + 'static,
{
    state
        .repo
        .remove_domain_list(Id::from_u32(id))
        .await?
        .ok_or(PolicyError::DomainListNotFound)
        .map(Json)
}

/// POST /api/v1/domainlist/{id}/domains
pub async fn add_domain<R>(
    State(state): State<PolicyAppState<R>>,
    Path(id): Path<u32>,
    Json(req): Json<AddDomainRequest>,
) -> PolicyResult<Json<DomainList>>
where
    R: ClientRepository + DomainListRepository + Clone + Send + Sync + 'static,
{
    let use_case = AddDomainUseCase::new(state.repo.clone());

    let input = AddDomainInput {
        list_id: Id::from_u32(id),
        domain: req.domain,
    };

    use_case.execute(input).await.map(Json)
}
