//! Value Object Module

pub mod domain_name;
pub mod host_addr;

pub use domain_name::{DomainName, DomainNameError};
pub use host_addr::{HostAddr, HostAddrError};
