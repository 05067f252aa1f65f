//! Presentation Layer

pub mod dto;
pub mod handlers;
pub mod router;

pub use router::{policy_router, policy_router_generic};
