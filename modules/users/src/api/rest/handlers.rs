use axum::{
    extract::Path,
    http::StatusCode,
    response::Json,
    Extension,
};
use tracing::{error, info};

use crate::api::rest::dto::{CreateUserReq, DeleteUserResponse, UpdateUserReq, UserDto};
use crate::domain::registry::UserRegistry;

/// Get a specific user by id
pub async fn get_user(
    Extension(registry): Extension<std::sync::Arc<UserRegistry>>,
    Path(id): Path<String>,
) -> Result<Json<UserDto>, StatusCode> {
    info!("Getting user with id: {}", id);

    match registry.get_user(&id) {
        Ok(user) => Ok(Json(UserDto::from(user))),
        Err(e) => {
            error!("Failed to get user {}: {}", id, e);
            Err(map_domain_error_to_status_code(&e))
        }
    }
}

/// Create a new user
pub async fn create_user(
    Extension(registry): Extension<std::sync::Arc<UserRegistry>>,
    Json(req): Json<CreateUserReq>,
) -> Result<(StatusCode, Json<UserDto>), StatusCode> {
    info!("Creating user: {:?}", req);

    match registry.create_user(req.into()) {
        Ok(user) => Ok((StatusCode::CREATED, Json(UserDto::from(user)))),
        Err(e) => {
            error!("Failed to create user: {}", e);
            Err(map_domain_error_to_status_code(&e))
        }
    }
}

/// Replace the mutable fields of an existing user
pub async fn update_user(
    Extension(registry): Extension<std::sync::Arc<UserRegistry>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateUserReq>,
) -> Result<Json<UserDto>, StatusCode> {
    info!("Updating user {} with: {:?}", id, req);

    match registry.update_user(&id, req.into()) {
        Ok(user) => Ok(Json(UserDto::from(user))),
        Err(e) => {
            error!("Failed to update user {}: {}", id, e);
            Err(map_domain_error_to_status_code(&e))
        }
    }
}

/// Delete a user by id
pub async fn delete_user(
    Extension(registry): Extension<std::sync::Arc<UserRegistry>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteUserResponse>, StatusCode> {
    info!("Deleting user: {}", id);

    match registry.delete_user(&id) {
        Ok(()) => Ok(Json(DeleteUserResponse {
            success: true,
            message: format!("User {} deleted successfully", id),
        })),
        Err(e) => {
            error!("Failed to delete user {}: {}", id, e);
            Err(map_domain_error_to_status_code(&e))
        }
    }
}

/// Map domain errors to HTTP status codes
fn map_domain_error_to_status_code(error: &crate::domain::error::DomainError) -> StatusCode {
    use crate::domain::error::DomainError;

    match error {
        DomainError::UserNotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::EmptyUsername | DomainError::EmptyEmail => StatusCode::BAD_REQUEST,
    }
}
