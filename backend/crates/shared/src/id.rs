//! Common ID Types
//!
//! Type-safe ID wrappers for domain entities.
//!
//! Entity ids in this system are small sequential integers assigned by the
//! store (`max existing id + 1`), so the wrapper carries a `u32` rather
//! than a UUID. On the wire an id is a plain JSON number.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;

/// Generic typed ID wrapper
///
/// Usage:
/// ```
/// use kernel::id::{Id, markers};
/// type ClientId = Id<markers::Client>;
/// ```
pub struct Id<T> {
    value: u32,
    _marker: PhantomData<T>,
}

impl<T> Id<T> {
    /// Create from a raw numeric id
    pub const fn from_u32(value: u32) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    /// Get the underlying number
    pub const fn as_u32(&self) -> u32 {
        self.value
    }
}

// Manual impls: derives would put bounds on the marker type.

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.value.cmp(&other.value)
    }
}

impl<T> std::hash::Hash for Id<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> From<u32> for Id<T> {
    fn from(value: u32) -> Self {
        Self::from_u32(value)
    }
}

impl<T> From<Id<T>> for u32 {
    fn from(id: Id<T>) -> Self {
        id.value
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.value)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u32::deserialize(deserializer).map(Self::from_u32)
    }
}

/// Marker types for different entity IDs
pub mod markers {
    /// Marker for managed client devices
    pub struct Client;

    /// Marker for domain lists
    pub struct DomainList;
}

/// Type aliases for common IDs
pub type ClientId = Id<markers::Client>;
pub type DomainListId = Id<markers::DomainList>;
