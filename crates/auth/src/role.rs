//! Platform roles and the role-to-dashboard route table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Route every unauthenticated visitor is sent to.
pub const LOGIN_ROUTE: &str = "/login";
/// Public landing route, used when a role has no dashboard.
pub const ROOT_ROUTE: &str = "/";

/// User role enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    #[serde(rename = "jobseeker")]
    JobSeeker,
    Employee,
    Employer,
    College,
    Admin,
    #[serde(rename = "superadmin")]
    SuperAdmin,
}

impl Role {
    pub const ALL: [Role; 7] = [
        Role::Student,
        Role::JobSeeker,
        Role::Employee,
        Role::Employer,
        Role::College,
        Role::Admin,
        Role::SuperAdmin,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::JobSeeker => "jobseeker",
            Role::Employee => "employee",
            Role::Employer => "employer",
            Role::College => "college",
            Role::Admin => "admin",
            Role::SuperAdmin => "superadmin",
        }
    }

    /// Default dashboard route for this role.
    pub fn default_route(self) -> &'static str {
        RoleRouteMap::route_for(Some(self))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role `{}`", self.0)
    }
}

impl std::error::Error for UnknownRole {}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == value)
            .ok_or_else(|| UnknownRole(value.to_owned()))
    }
}

/// Static mapping from role to its canonical dashboard route.
pub struct RoleRouteMap;

impl RoleRouteMap {
    const TABLE: [(Role, &'static str); 7] = [
        (Role::Student, "/student"),
        (Role::JobSeeker, "/job-seeker"),
        (Role::Employee, "/employee"),
        (Role::Employer, "/employer"),
        (Role::College, "/college"),
        (Role::Admin, "/admin"),
        (Role::SuperAdmin, "/super-admin"),
    ];

    /// Looks up the dashboard for `role`, falling back to the public root.
    pub fn route_for(role: Option<Role>) -> &'static str {
        role.and_then(|role| {
            Self::TABLE
                .iter()
                .find(|(candidate, _)| *candidate == role)
                .map(|(_, route)| *route)
        })
        .unwrap_or(ROOT_ROUTE)
    }

    pub fn entries() -> impl Iterator<Item = (Role, &'static str)> {
        Self::TABLE.into_iter()
    }
}
