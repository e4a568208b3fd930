use serde::Serialize;

/// Result of a profile completion check.
///
/// Starts as `Unknown`, settles on `Complete` or `Incomplete` once per check
/// cycle, and returns to `Unknown` only when a refetch is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    #[default]
    Unknown,
    Complete,
    Incomplete,
}

impl Verdict {
    pub fn from_complete(complete: bool) -> Self {
        if complete {
            Verdict::Complete
        } else {
            Verdict::Incomplete
        }
    }

    pub fn is_resolved(self) -> bool {
        !matches!(self, Verdict::Unknown)
    }
}
