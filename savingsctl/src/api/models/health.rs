//! Response model for the liveness endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub ok: bool,
    /// Current server time
    pub time: DateTime<Utc>,
    /// Seconds since the service started
    pub uptime_seconds: i64,
    pub pid: u32,
    pub version: String,
}
