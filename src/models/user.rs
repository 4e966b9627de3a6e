use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{normalize_variant, ParseEnumError};
use crate::events::{Loggable, Severity};

/// Organizational role of a user. Each role has its own rule per action;
/// roles are never compared by rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    TeamLeader,
    GroupManager,
    TeamMember,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::TeamLeader => "TEAM_LEADER",
            Role::GroupManager => "GROUP_MANAGER",
            Role::TeamMember => "TEAM_MEMBER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_variant(s).as_str() {
            "TEAM_LEADER" => Ok(Role::TeamLeader),
            "GROUP_MANAGER" => Ok(Role::GroupManager),
            "TEAM_MEMBER" => Ok(Role::TeamMember),
            _ => Err(ParseEnumError::new("role", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
    /// Only team leaders may be without a department.
    pub department_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Role and department changes reshape every later decision.
impl Loggable for User {
    fn entity_type() -> &'static str { "user" }
    fn subject_id(&self) -> i64 { self.id }
    fn severity(&self) -> Severity { Severity::Critical }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Department {
    pub id: i64,
    pub name: String,
    pub created_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Loggable for Department {
    fn entity_type() -> &'static str { "department" }
    fn subject_id(&self) -> i64 { self.id }
    fn severity(&self) -> Severity { Severity::Critical }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserCreateRequest {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub department_id: Option<i64>,
}

/// Full replacement of a user's profile. The department is required and
/// must exist.
#[derive(Debug, Clone, Deserialize)]
pub struct UserUpdateRequest {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub department_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DepartmentCreateRequest {
    pub name: String,
}
