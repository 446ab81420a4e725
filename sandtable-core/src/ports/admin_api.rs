// sandtable-core/src/ports/admin_api.rs

// What the admin service needs from the REST backend, without knowing which HTTP client
// does the work. Payloads stay as JSON: this core only classifies failures.

use async_trait::async_trait;
use serde_json::Value;

use super::transport::HttpFailure;
use crate::domain::validation::{
    AssignUserRequest, BulkAssignRequest, ExportParams, SearchTeamsParams, SearchUsersParams,
    TransferUserRequest,
};

#[async_trait]
pub trait AdminApi: Send + Sync {
    async fn search_users(&self, params: &SearchUsersParams) -> Result<Value, HttpFailure>;

    async fn search_teams(&self, params: &SearchTeamsParams) -> Result<Value, HttpFailure>;

    async fn assign_user(&self, request: &AssignUserRequest) -> Result<Value, HttpFailure>;

    async fn transfer_user(&self, request: &TransferUserRequest) -> Result<Value, HttpFailure>;

    async fn bulk_assign(&self, request: &BulkAssignRequest) -> Result<Value, HttpFailure>;

    async fn export_users(&self, params: &ExportParams) -> Result<Value, HttpFailure>;
}
