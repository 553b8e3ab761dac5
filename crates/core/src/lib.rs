pub mod dashboard;
pub mod types;
pub mod validate;

pub use dashboard::{build_view, DashboardView};
pub use types::{NormalizedSubmission, RawSubmission, Recruit};
pub use validate::{normalize, RejectionReason, SKILL_SEPARATOR};
