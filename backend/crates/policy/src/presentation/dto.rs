//! API DTOs (Data Transfer Objects)
//!
//! CRUD endpoints exchange the persisted entities themselves (the store
//! contract is whole-object replace); the DTOs here cover the
//! action-shaped requests and the evaluated policy view.

use serde::{Deserialize, Serialize};

use crate::application::client_policy::ClientPolicyOutput;
use crate::application::pause_access::PauseAccessOutput;
use crate::domain::entity::client::Client;

// ============================================================================
// Client registration
// ============================================================================

/// Create client request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientRequest {
    pub ip: String,
    pub name: String,
    pub mac_address: Option<String>,
}

// ============================================================================
// Pause / Resume
// ============================================================================

/// Pause request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PauseRequest {
    pub domainlist_id: u32,
    /// One of the preset durations: 30, 60, 120, 360 or 1440
    pub minutes: i64,
}

/// Pause response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PauseResponse {
    pub client: Client,
    /// When blocking resumes on its own (epoch ms)
    pub unblocked_until_ms: i64,
}

impl From<PauseAccessOutput> for PauseResponse {
    fn from(output: PauseAccessOutput) -> Self {
        Self {
            unblocked_until_ms: output.unblocked_until.timestamp_millis(),
            client: output.client,
        }
    }
}

/// Resume request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeRequest {
    pub domainlist_id: u32,
}

// ============================================================================
// Blocking mutation
// ============================================================================

/// Add deny targets request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockTargetsRequest {
    pub domainlist_ids: Vec<u32>,
}

// ============================================================================
// Domain lists
// ============================================================================

/// Create domain list request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDomainListRequest {
    /// Generated ("Domain List N") when absent or blank
    pub name: Option<String>,
}

/// Add domain request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddDomainRequest {
    pub domain: String,
}

// ============================================================================
// Policy view
// ============================================================================

/// Block state of one denied list
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListBlockStateDto {
    pub id: u32,
    pub name: String,
    pub blocked: bool,
    pub unblocked_until_ms: Option<i64>,
}

/// Evaluated policy for one client
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientPolicyResponse {
    pub client_id: Option<u32>,
    pub evaluated_at_ms: i64,
    /// Every domain the client is currently denied
    pub blocked_domains: Vec<String>,
    /// Denied list ids that no longer resolve to a list
    pub unresolved_domainlists: Vec<u32>,
    /// Per-list state for the pause/resume controls
    pub lists: Vec<ListBlockStateDto>,
}

impl From<ClientPolicyOutput> for ClientPolicyResponse {
    fn from(output: ClientPolicyOutput) -> Self {
        Self {
            client_id: output.client.id.map(|id| id.as_u32()),
            evaluated_at_ms: output.evaluated_at.timestamp_millis(),
            blocked_domains: output.decision.blocked.into_iter().collect(),
            unresolved_domainlists: output
                .decision
                .unresolved
                .iter()
                .map(|id| id.as_u32())
                .collect(),
            lists: output
                .lists
                .into_iter()
                .map(|state| ListBlockStateDto {
                    id: state.id.as_u32(),
                    name: state.name,
                    blocked: state.blocked,
                    unblocked_until_ms: state.unblocked_until.map(|t| t.timestamp_millis()),
                })
                .collect(),
        }
    }
}
