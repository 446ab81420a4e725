// sandtable-core/src/domain/validation/requests.rs
//
// Request DTOs for the admin operations, plus the closed value sets they are checked against.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::operations::Operation;

pub const MAX_PAGE_SIZE: i64 = 100;
pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_IDENTIFIER_LENGTH: usize = 255;
pub const MAX_REASON_LENGTH: usize = 500;
pub const MAX_KEYWORD_LENGTH: usize = 100;
pub const MAX_BULK_USERS: usize = 100;

pub const USER_SORT_FIELDS: &[&str] = &[
    "createdAt",
    "updatedAt",
    "username",
    "realName",
    "userType",
    "lastLoginAt",
];

pub const TEAM_SORT_FIELDS: &[&str] = &["createdAt", "updatedAt", "name", "memberCount"];

pub const EXPORTABLE_FIELDS: &[&str] = &[
    "id",
    "username",
    "realName",
    "email",
    "userType",
    "activityName",
    "teamName",
    "assignedAt",
    "status",
    "createdAt",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "i64", try_from = "i64")]
pub enum UserType {
    Student,
    Teacher,
    Admin,
}

impl UserType {
    pub fn value(&self) -> i64 {
        match self {
            Self::Student => 1,
            Self::Teacher => 2,
            Self::Admin => 3,
        }
    }
}

impl From<UserType> for i64 {
    fn from(user_type: UserType) -> Self {
        user_type.value()
    }
}

impl TryFrom<i64> for UserType {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Student),
            2 => Ok(Self::Teacher),
            3 => Ok(Self::Admin),
            _ => Err(format!("Unknown user type: {}", value)),
        }
    }
}

// Closed string sets share the same shape: as_str / FromStr / Display.
macro_rules! string_set {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $label)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($label => Ok($name::$variant),)+
                    _ => Err(format!(concat!("Unknown ", stringify!($name), ": {}"), s)),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }
    };
}

string_set! {
    ActivityStatus {
        Draft => "draft",
        Published => "published",
        Ongoing => "ongoing",
        Finished => "finished",
        Cancelled => "cancelled",
    }
}

string_set! {
    TeamStatus {
        Recruiting => "recruiting",
        Full => "full",
        Disbanded => "disbanded",
    }
}

string_set! {
    UserStatus {
        Active => "active",
        Inactive => "inactive",
        Locked => "locked",
    }
}

string_set! {
    SortOrder {
        Asc => "asc",
        Desc => "desc",
    }
}

string_set! {
    ExportFormat {
        Csv => "csv",
        Excel => "excel",
        Json => "json",
    }
}

/// A typed request that validates through the validator registered for its operation.
pub trait AdminRequest: Serialize {
    const OPERATION: Operation;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchUsersParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_type: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<String>,
}

impl AdminRequest for SearchUsersParams {
    const OPERATION: Operation = Operation::SearchUsers;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchTeamsParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<String>,
}

impl AdminRequest for SearchTeamsParams {
    const OPERATION: Operation = Operation::SearchTeams;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignUserRequest {
    pub user_id: String,
    pub activity_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl AdminRequest for AssignUserRequest {
    const OPERATION: Operation = Operation::AssignUser;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferUserRequest {
    pub user_id: String,
    /// Target activity.
    pub activity_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_activity_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl AdminRequest for TransferUserRequest {
    const OPERATION: Operation = Operation::TransferUser;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkAssignRequest {
    pub user_ids: Vec<String>,
    pub activity_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl AdminRequest for BulkAssignRequest {
    const OPERATION: Operation = Operation::BulkAssign;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportParams {
    pub format: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_type: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

impl AdminRequest for ExportParams {
    const OPERATION: Operation = Operation::Export;
}
