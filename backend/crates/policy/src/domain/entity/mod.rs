//! Entity Module

pub mod client;
pub mod domain_list;
pub mod lease;
pub mod rule;

pub use client::Client;
pub use domain_list::DomainList;
pub use lease::{Lease, LeaseDuration};
pub use rule::Rule;
