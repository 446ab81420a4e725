// sandtable-core/src/domain/error/code.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use thiserror::Error;

use super::kind::ErrorKind;

// Each family is a closed enum whose discriminants live inside the family's range.
// The macro keeps value <-> variant <-> label in one table per family.
macro_rules! code_family {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($variant:ident = $value:literal => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub const fn value(self) -> u16 {
                match self {
                    $($name::$variant => $value),+
                }
            }

            pub const fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            pub fn from_value(value: u16) -> Option<Self> {
                match value {
                    $($value => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.name())
            }
        }
    };
}

code_family! {
    /// Request payload problems (1000-1099).
    ValidationCode {
        InvalidUserId = 1001 => "INVALID_USER_ID",
        InvalidActivityId = 1002 => "INVALID_ACTIVITY_ID",
        InvalidTeamId = 1003 => "INVALID_TEAM_ID",
        InvalidEmail = 1004 => "INVALID_EMAIL",
        InvalidDateRange = 1005 => "INVALID_DATE_RANGE",
        InvalidPagination = 1006 => "INVALID_PAGINATION",
        InvalidUserType = 1007 => "INVALID_USER_TYPE",
        InvalidActivityStatus = 1008 => "INVALID_ACTIVITY_STATUS",
        MissingRequiredField = 1009 => "MISSING_REQUIRED_FIELD",
        FieldTooShort = 1010 => "FIELD_TOO_SHORT",
        FieldTooLong = 1011 => "FIELD_TOO_LONG",
        PatternMismatch = 1012 => "PATTERN_MISMATCH",
        CustomRuleFailed = 1013 => "CUSTOM_RULE_FAILED",
        InvalidSortField = 1014 => "INVALID_SORT_FIELD",
        InvalidSortOrder = 1015 => "INVALID_SORT_ORDER",
        InvalidFilter = 1016 => "INVALID_FILTER",
        InvalidExportFormat = 1017 => "INVALID_EXPORT_FORMAT",
        InvalidExportField = 1018 => "INVALID_EXPORT_FIELD",
        EmptyUserList = 1019 => "EMPTY_USER_LIST",
        TooManyUsers = 1020 => "TOO_MANY_USERS",
        InvalidUuid = 1021 => "INVALID_UUID",
        InvalidRequest = 1022 => "INVALID_REQUEST",
        UnknownOperation = 1023 => "UNKNOWN_OPERATION",
    }
}

code_family! {
    /// Authentication and authorization failures (2000-2099).
    PermissionCode {
        Unauthorized = 2001 => "UNAUTHORIZED",
        InsufficientPermissions = 2002 => "INSUFFICIENT_PERMISSIONS",
        TokenExpired = 2003 => "TOKEN_EXPIRED",
        AccessDenied = 2004 => "ACCESS_DENIED",
    }
}

code_family! {
    /// Backend business rule violations (3000-3099).
    BusinessCode {
        UserAlreadyAssigned = 3001 => "USER_ALREADY_ASSIGNED",
        TeamFull = 3002 => "TEAM_FULL",
        ActivityNotActive = 3003 => "ACTIVITY_NOT_ACTIVE",
        ActivityEnded = 3004 => "ACTIVITY_ENDED",
        TransferNotAllowed = 3005 => "TRANSFER_NOT_ALLOWED",
        UserHasTeam = 3006 => "USER_HAS_TEAM",
        BulkPartialFailure = 3007 => "BULK_PARTIAL_FAILURE",
    }
}

code_family! {
    /// Missing entities (4000-4099).
    NotFoundCode {
        UserNotFound = 4001 => "USER_NOT_FOUND",
        ActivityNotFound = 4002 => "ACTIVITY_NOT_FOUND",
        TeamNotFound = 4003 => "TEAM_NOT_FOUND",
        AssignmentNotFound = 4004 => "ASSIGNMENT_NOT_FOUND",
        ResourceNotFound = 4005 => "RESOURCE_NOT_FOUND",
    }
}

code_family! {
    /// Concurrent or duplicate writes (5000-5099).
    ConflictCode {
        ConcurrentModification = 5001 => "CONCURRENT_MODIFICATION",
        DuplicateAssignment = 5002 => "DUPLICATE_ASSIGNMENT",
        ResourceConflict = 5003 => "RESOURCE_CONFLICT",
    }
}

code_family! {
    /// Transport and server-side failures (6000-6099).
    SystemCode {
        NetworkError = 6001 => "NETWORK_ERROR",
        RequestTimeout = 6002 => "REQUEST_TIMEOUT",
        InternalServerError = 6003 => "INTERNAL_SERVER_ERROR",
        ServiceUnavailable = 6004 => "SERVICE_UNAVAILABLE",
        RateLimited = 6005 => "RATE_LIMITED",
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Unknown error code: {0}")]
pub struct UnknownErrorCode(pub u16);

/// Stable, machine-readable error code. The family fixes the numeric range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
pub enum ErrorCode {
    Validation(ValidationCode),
    Permission(PermissionCode),
    BusinessLogic(BusinessCode),
    NotFound(NotFoundCode),
    Conflict(ConflictCode),
    System(SystemCode),
}

impl ErrorCode {
    pub const VALIDATION_RANGE: RangeInclusive<u16> = 1000..=1099;
    pub const PERMISSION_RANGE: RangeInclusive<u16> = 2000..=2099;
    pub const BUSINESS_RANGE: RangeInclusive<u16> = 3000..=3099;
    pub const NOT_FOUND_RANGE: RangeInclusive<u16> = 4000..=4099;
    pub const CONFLICT_RANGE: RangeInclusive<u16> = 5000..=5099;
    pub const SYSTEM_RANGE: RangeInclusive<u16> = 6000..=6099;

    pub fn value(&self) -> u16 {
        match self {
            Self::Validation(c) => c.value(),
            Self::Permission(c) => c.value(),
            Self::BusinessLogic(c) => c.value(),
            Self::NotFound(c) => c.value(),
            Self::Conflict(c) => c.value(),
            Self::System(c) => c.value(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Validation(c) => c.name(),
            Self::Permission(c) => c.name(),
            Self::BusinessLogic(c) => c.name(),
            Self::NotFound(c) => c.name(),
            Self::Conflict(c) => c.name(),
            Self::System(c) => c.name(),
        }
    }

    /// The numeric range reserved for this code's family.
    pub fn range(&self) -> RangeInclusive<u16> {
        match self {
            Self::Validation(_) => Self::VALIDATION_RANGE,
            Self::Permission(_) => Self::PERMISSION_RANGE,
            Self::BusinessLogic(_) => Self::BUSINESS_RANGE,
            Self::NotFound(_) => Self::NOT_FOUND_RANGE,
            Self::Conflict(_) => Self::CONFLICT_RANGE,
            Self::System(_) => Self::SYSTEM_RANGE,
        }
    }

    /// The ErrorKind a code belongs to when nothing more specific is known.
    pub fn default_kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Permission(_) => ErrorKind::Permission,
            Self::BusinessLogic(_) => ErrorKind::BusinessLogic,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::System(SystemCode::NetworkError) => ErrorKind::Network,
            Self::System(SystemCode::RequestTimeout) => ErrorKind::Timeout,
            Self::System(SystemCode::RateLimited) => ErrorKind::RateLimit,
            Self::System(SystemCode::InternalServerError | SystemCode::ServiceUnavailable) => {
                ErrorKind::ServerError
            }
        }
    }

    /// Every code, ordered by numeric value.
    pub fn all() -> impl Iterator<Item = ErrorCode> {
        ValidationCode::ALL
            .iter()
            .map(|c| Self::Validation(*c))
            .chain(PermissionCode::ALL.iter().map(|c| Self::Permission(*c)))
            .chain(BusinessCode::ALL.iter().map(|c| Self::BusinessLogic(*c)))
            .chain(NotFoundCode::ALL.iter().map(|c| Self::NotFound(*c)))
            .chain(ConflictCode::ALL.iter().map(|c| Self::Conflict(*c)))
            .chain(SystemCode::ALL.iter().map(|c| Self::System(*c)))
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.value())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.value()
    }
}

impl TryFrom<u16> for ErrorCode {
    type Error = UnknownErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let resolved = match value {
            v if Self::VALIDATION_RANGE.contains(&v) => {
                ValidationCode::from_value(v).map(Self::Validation)
            }
            v if Self::PERMISSION_RANGE.contains(&v) => {
                PermissionCode::from_value(v).map(Self::Permission)
            }
            v if Self::BUSINESS_RANGE.contains(&v) => {
                BusinessCode::from_value(v).map(Self::BusinessLogic)
            }
            v if Self::NOT_FOUND_RANGE.contains(&v) => {
                NotFoundCode::from_value(v).map(Self::NotFound)
            }
            v if Self::CONFLICT_RANGE.contains(&v) => {
                ConflictCode::from_value(v).map(Self::Conflict)
            }
            v if Self::SYSTEM_RANGE.contains(&v) => SystemCode::from_value(v).map(Self::System),
            _ => None,
        };
        resolved.ok_or(UnknownErrorCode(value))
    }
}

impl From<ValidationCode> for ErrorCode {
    fn from(code: ValidationCode) -> Self {
        Self::Validation(code)
    }
}

impl From<PermissionCode> for ErrorCode {
    fn from(code: PermissionCode) -> Self {
        Self::Permission(code)
    }
}

impl From<BusinessCode> for ErrorCode {
    fn from(code: BusinessCode) -> Self {
        Self::BusinessLogic(code)
    }
}

impl From<NotFoundCode> for ErrorCode {
    fn from(code: NotFoundCode) -> Self {
        Self::NotFound(code)
    }
}

impl From<ConflictCode> for ErrorCode {
    fn from(code: ConflictCode) -> Self {
        Self::Conflict(code)
    }
}

impl From<SystemCode> for ErrorCode {
    fn from(code: SystemCode) -> Self {
        Self::System(code)
    }
}
