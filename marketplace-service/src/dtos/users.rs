use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::user::{Role, User};
use crate::services::cascade::DeletionReport;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterUserRequest {
    #[validate(length(min = 2, max = 64))]
    pub user_name: String,
    #[validate(email)]
    pub email: String,
    /// Defaults to `[buyer]` when omitted.
    #[serde(default)]
    pub roles: Option<Vec<Role>>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 2, max = 64))]
    pub user_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRolesRequest {
    pub roles: Vec<Role>,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub user_name: String,
    pub email: String,
    pub roles: Vec<Role>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            user_name: u.user_name,
            email: u.email,
            roles: u.roles,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeletionResponse {
    pub related_data_deleted: bool,
    pub message: &'static str,
}

impl From<DeletionReport> for DeletionResponse {
    fn from(report: DeletionReport) -> Self {
        Self {
            message: if report.related_data_deleted {
                "User and related data deleted successfully"
            } else {
                "User deleted (no related data found)"
            },
            related_data_deleted: report.related_data_deleted,
        }
    }
}
