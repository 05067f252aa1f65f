//! Policy Router

use axum::{
    Router,
    routing::{delete, get, post},
};
use std::sync::Arc;

use crate::domain::repository::{ClientRepository, DomainListRepository};
use crate::infra::json_store::JsonFileStore;
use crate::presentation::handlers::{self, PolicyAppState};

/// Create the policy router over the JSON-file store
pub fn policy_router(store: JsonFileStore) -> Router {
    policy_router_generic(store)
}

/// Create a policy router for any repository implementation
pub fn policy_router_generic<R>(repo: R) -> Router
where
    R: ClientRepository + DomainListRepository + Clone + Send + Sync + 'static,
{
    let state = PolicyAppState {
        repo: Arc::new(repo),
    };

    Router::new()
        .route(
            "/client",
            get(handlers::list_clients::<R>).post(handlers::create_client::<R>),
        )
        .route(
            "/client/{id}",
            get(handlers::get_client::<R>)
                .put(handlers::put_client::<R>)
                .delete(handlers::delete_client::<R>),
        )
        .route("/client/{id}/policy", get(handlers::client_policy::<R>))
        .route("/client/{id}/pause", post(handlers::pause::<R>))
        .route("/client/{id}/resume", post(handlers::resume::<R>))
        .route("/client/{id}/block", post(handlers::add_block_targets::<R>))
        .route(
            "/client/{id}/block/{list_id}",
            delete(handlers::remove_block_target::<R>),
        )
        .route(
            "/domainlist",
            get(handlers::list_domain_lists::<R>).post(handlers::create_domain_list::<R>),
        )
        .route(
            "/domainlist/{id}",
            get(handlers::get_domain_list::<R>)
                .put(handlers::put_domain_list::<R>)
                .delete(handlers::delete_domain_list::<R>),
        )
        .route("/domainlist/{id}/domains", post(handlers::add_domain::<R>))
        .with_state(state)
}
