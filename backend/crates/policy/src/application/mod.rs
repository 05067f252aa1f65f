//! Application Layer
//!
//! Use cases and application services.

pub mod add_domain;
pub mod client_policy;
pub mod config;
pub mod create_domain_list;
pub mod pause_access;
pub mod register_client;
pub mod resume_access;
pub mod update_blocking;

// Re-exports
pub use add_domain::{AddDomainInput, AddDomainUseCase};
pub use client_policy::{ClientPolicyOutput, ClientPolicyUseCase, ListBlockState};
pub use config::PolicyConfig;
pub use create_domain_list::{CreateDomainListInput, CreateDomainListUseCase};
pub use pause_access::{PauseAccessInput, PauseAccessOutput, PauseAccessUseCase};
pub use register_client::{RegisterClientInput, RegisterClientUseCase};
pub use resume_access::{ResumeAccessInput, ResumeAccessUseCase};
pub use update_blocking::UpdateBlockingUseCase;
