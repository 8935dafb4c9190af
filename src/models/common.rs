//! Types shared by chat and embedding responses.

use serde::{Deserialize, Serialize};

/// Token accounting reported by the endpoint.
///
/// Counters are informational; any of them may be absent or `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: Option<u64>,
    #[serde(default)]
    pub completion_tokens: Option<u64>,
    #[serde(default)]
    pub total_tokens: Option<u64>,
}
