//! Host Address Value Object
//!
//! The dotted-quad IPv4 address identifying a managed client device on the
//! home network. The proxy matches on source address, so this is the
//! client's primary key from the gateway's point of view.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;

/// Error returned when host address validation fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostAddrError {
    input: String,
}

impl fmt::Display for HostAddrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' is not a valid IPv4 address, expected something like '192.168.1.20'",
            self.input
        )
    }
}

impl std::error::Error for HostAddrError {}

/// Validated dotted-quad IPv4 address
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HostAddr {
    value: String,
}

impl HostAddr {
    /// Create a new HostAddr from raw input
    pub fn new(input: impl AsRef<str>) -> Result<Self, HostAddrError> {
        let trimmed = input.as_ref().trim();
        let addr: Ipv4Addr = trimmed.parse().map_err(|_| HostAddrError {
            input: trimmed.to_owned(),
        })?;
        Ok(Self {
            value: addr.to_string(),
        })
    }

    /// Get the address string
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl fmt::Debug for HostAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HostAddr({})", self.value)
    }
}

impl fmt::Display for HostAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl AsRef<str> for HostAddr {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl TryFrom<String> for HostAddr {
    type Error = HostAddrError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for HostAddr {
    type Error = HostAddrError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<HostAddr> for String {
    fn from(addr: HostAddr) -> Self {
        addr.value
    }
}
