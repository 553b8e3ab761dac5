use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single applicant record as persisted in the `recruits` table.
///
/// Recruits are immutable once created: no update or delete path exists in
/// this service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recruit {
    pub id: i64,
    pub name: String,
    pub phone: String,
    /// Skill tags joined with [`crate::validate::SKILL_SEPARATOR`],
    /// submission order preserved.
    pub skills: String,
    /// Display timestamp supplied by the client, or the server-side
    /// fallback rendered at submission time.
    pub submit_time: String,
    pub created_at: DateTime<Utc>,
}

/// Untrusted submission payload as received on the wire.
///
/// Every field is optional so missing values flow into validation rather
/// than failing deserialization; the distinction matters for returning the
/// specific rejection message the applicant can act on.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSubmission {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub skills: Option<Vec<String>>,
    #[serde(default, rename = "submitTime")]
    pub submit_time: Option<String>,
}

/// A submission that passed validation and is ready for persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedSubmission {
    pub name: String,
    pub phone: String,
    pub skills: String,
    pub submit_time: String,
}
