//! The remote profile service seam and the per-role completion rules.

use async_trait::async_trait;
use campus_auth::Role;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("profile request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid profile response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("unexpected profile payload: {0}")]
    Unexpected(String),
}

/// Roles whose dashboards require a completed profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileKind {
    College,
    Student,
    JobSeeker,
}

impl ProfileKind {
    const COLLEGE_FIELDS: &'static [&'static str] = &[
        "collegeName",
        "university",
        "principalName",
        "coordinatorName",
        "address",
    ];
    const PERSON_FIELDS: &'static [&'static str] = &["fullName", "email"];

    /// Completion is only enforced for colleges, students, and job seekers.
    pub fn for_role(role: Role) -> Option<Self> {
        match role {
            Role::College => Some(ProfileKind::College),
            Role::Student => Some(ProfileKind::Student),
            Role::JobSeeker => Some(ProfileKind::JobSeeker),
            Role::Employee | Role::Employer | Role::Admin | Role::SuperAdmin => None,
        }
    }

    pub fn required_fields(self) -> &'static [&'static str] {
        match self {
            ProfileKind::College => Self::COLLEGE_FIELDS,
            ProfileKind::Student | ProfileKind::JobSeeker => Self::PERSON_FIELDS,
        }
    }

    pub fn missing_fields(self, profile: &ProfileRecord) -> Vec<&'static str> {
        self.required_fields()
            .iter()
            .copied()
            .filter(|field| !profile.has_value(field))
            .collect()
    }

    pub fn is_complete(self, profile: &ProfileRecord) -> bool {
        self.required_fields()
            .iter()
            .all(|field| profile.has_value(field))
    }
}

/// A profile as returned by the remote service. Fields are opaque apart from
/// the ones named by [`ProfileKind::required_fields`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProfileRecord(Map<String, Value>);

impl ProfileRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Interprets a decoded response body; `null` means the profile does not exist.
    pub fn from_value(value: Value) -> Result<Option<Self>, ProfileError> {
        match value {
            Value::Null => Ok(None),
            Value::Object(fields) => Ok(Some(Self(fields))),
            other => Err(ProfileError::Unexpected(format!(
                "expected a JSON object, got {other}"
            ))),
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Whether `field` holds a usable value. Absent, `null`, `""`, `false`
    /// and zero count as empty.
    pub fn has_value(&self, field: &str) -> bool {
        match self.0.get(field) {
            None | Some(Value::Null) => false,
            Some(Value::String(text)) => !text.is_empty(),
            Some(Value::Bool(flag)) => *flag,
            Some(Value::Number(number)) => number.as_f64().is_some_and(|n| n != 0.0),
            Some(Value::Array(_)) | Some(Value::Object(_)) => true,
        }
    }
}

impl From<Map<String, Value>> for ProfileRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Read access to the role-specific profile endpoints.
#[async_trait]
pub trait ProfileService: Send + Sync {
    /// Fetches the caller's profile. `Ok(None)` means no profile exists yet.
    async fn fetch_profile(
        &self,
        kind: ProfileKind,
        token: &str,
    ) -> Result<Option<ProfileRecord>, ProfileError>;
}

#[async_trait]
impl<T: ProfileService + ?Sized> ProfileService for std::sync::Arc<T> {
    async fn fetch_profile(
        &self,
        kind: ProfileKind,
        token: &str,
    ) -> Result<Option<ProfileRecord>, ProfileError> {
        (**self).fetch_profile(kind, token).await
    }
}
