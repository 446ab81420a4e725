// sandtable-core/src/application/service.rs

use serde_json::Value;
use tracing::{debug, instrument};

use super::handler::ErrorHandler;
use crate::domain::error::DomainError;
use crate::domain::validation::{
    AdminRequest, AssignUserRequest, BulkAssignRequest, ExportParams, SearchTeamsParams,
    SearchUsersParams, TransferUserRequest, ensure_valid,
};
use crate::ports::admin_api::AdminApi;
use crate::ports::transport::HttpFailure;

pub const USERS_ENDPOINT: &str = "/admin/users";
pub const TEAMS_ENDPOINT: &str = "/admin/teams";
pub const ASSIGN_ENDPOINT: &str = "/admin/users/assign";
pub const TRANSFER_ENDPOINT: &str = "/admin/users/transfer";
pub const BULK_ASSIGN_ENDPOINT: &str = "/admin/users/bulk-assign";
pub const EXPORT_ENDPOINT: &str = "/admin/users/export";

/// Admin operations guarded by validation (first error wins) with every backend failure
/// normalized and logged. Never retries.
pub struct AdminService<A: AdminApi> {
    api: A,
    handler: ErrorHandler,
}

impl<A: AdminApi> AdminService<A> {
    pub fn new(api: A, handler: ErrorHandler) -> Self {
        Self { api, handler }
    }

    pub fn handler(&self) -> &ErrorHandler {
        &self.handler
    }

    #[instrument(skip_all)]
    pub async fn search_users(&self, params: &SearchUsersParams) -> Result<Value, DomainError> {
        self.guard(params, USERS_ENDPOINT)?;
        self.api
            .search_users(params)
            .await
            .map_err(|f| self.fail(f, USERS_ENDPOINT))
    }

    #[instrument(skip_all)]
    pub async fn search_teams(&self, params: &SearchTeamsParams) -> Result<Value, DomainError> {
        self.guard(params, TEAMS_ENDPOINT)?;
        self.api
            .search_teams(params)
            .await
            .map_err(|f| self.fail(f, TEAMS_ENDPOINT))
    }

    #[instrument(skip_all, fields(user_id = %request.user_id, activity_id = %request.activity_id))]
    pub async fn assign_user(&self, request: &AssignUserRequest) -> Result<Value, DomainError> {
        self.guard(request, ASSIGN_ENDPOINT)?;
        self.api
            .assign_user(request)
            .await
            .map_err(|f| self.fail(f, ASSIGN_ENDPOINT))
    }

    #[instrument(skip_all, fields(user_id = %request.user_id, activity_id = %request.activity_id))]
    pub async fn transfer_user(&self, request: &TransferUserRequest) -> Result<Value, DomainError> {
        self.guard(request, TRANSFER_ENDPOINT)?;
        self.api
            .transfer_user(request)
            .await
            .map_err(|f| self.fail(f, TRANSFER_ENDPOINT))
    }

    #[instrument(skip_all, fields(users = request.user_ids.len(), activity_id = %request.activity_id))]
    pub async fn bulk_assign(&self, request: &BulkAssignRequest) -> Result<Value, DomainError> {
        self.guard(request, BULK_ASSIGN_ENDPOINT)?;
        self.api
            .bulk_assign(request)
            .await
            .map_err(|f| self.fail(f, BULK_ASSIGN_ENDPOINT))
    }

    #[instrument(skip_all, fields(format = %params.format))]
    pub async fn export_users(&self, params: &ExportParams) -> Result<Value, DomainError> {
        self.guard(params, EXPORT_ENDPOINT)?;
        self.api
            .export_users(params)
            .await
            .map_err(|f| self.fail(f, EXPORT_ENDPOINT))
    }

    fn guard<R: AdminRequest>(&self, request: &R, endpoint: &str) -> Result<(), DomainError> {
        ensure_valid(request).map_err(|err| {
            debug!(operation = %R::OPERATION, "Request rejected before reaching the backend");
            self.handler.log_error(&err, Some(endpoint));
            err
        })
    }

    fn fail(&self, failure: HttpFailure, endpoint: &str) -> DomainError {
        let err = self.handler.process_error(failure, Some(endpoint), None);
        self.handler.log_error(&err, Some(endpoint));
        err
    }
}
