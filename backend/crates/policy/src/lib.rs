//! Policy - Per-device access policy engine
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, the policy evaluator, repository traits
//! - `application/` - Use cases and application config
//! - `infra/` - JSON-file store implementation
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Policy Model
//! - A client device carries persistent `deny_http_access` rules referencing
//!   domain lists by id
//! - A lease temporarily lifts a block: an `allow_http_access` rule bounded
//!   by an expiry instant
//! - The evaluator is a pure function of (client, lists, now); enforcement,
//!   persistence and rendering are collaborators

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::PolicyConfig;
pub use error::{PolicyError, PolicyResult};
pub use infra::json_store::JsonFileStore;
pub use presentation::router::policy_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}
