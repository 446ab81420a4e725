// sandtable-core/src/domain/error/mod.rs
//
// Error taxonomy: kinds, range-namespaced codes, the DomainError entity and its messages.

pub mod code;
pub mod domain_error;
pub mod kind;
pub mod messages;

pub use code::{
    BusinessCode, ConflictCode, ErrorCode, NotFoundCode, PermissionCode, SystemCode,
    UnknownErrorCode, ValidationCode,
};
pub use domain_error::{DomainError, ErrorDetails};
pub use kind::ErrorKind;
pub use messages::{
    GENERIC_USER_MESSAGE, Language, MessageLookup, default_user_message, localized_message,
    lookup_message,
};
