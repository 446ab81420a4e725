// sandtable-core/src/domain/validation/mod.rs

pub mod checks;
pub mod operations;
pub mod requests;
pub mod result;
pub mod rules;

pub use checks::{
    is_identifier, is_uuid, validate_activity_status, validate_date_range, validate_email,
    validate_pagination, validate_user_type, validate_uuid,
};
pub use operations::{Operation, ensure_valid, validate, validate_request};
pub use requests::{
    ActivityStatus, AdminRequest, AssignUserRequest, BulkAssignRequest, ExportFormat,
    ExportParams, SearchTeamsParams, SearchUsersParams, SortOrder, TeamStatus,
    TransferUserRequest, UserStatus, UserType,
};
pub use result::ValidationResult;
pub use rules::{FieldRule, RuleSet, validate_field, validate_fields};
