use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use model::entities::user;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};
use utoipa::ToSchema;

use crate::auth::AuthBearer;
use crate::schemas::{ApiResponse, AppState, ErrorResponse};

/// User profile as returned by the API. The stored password hash is
/// deliberately not part of this shape.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub role: String,
}

impl From<user::Model> for UserResponse {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            email: model.email,
            role: model.role.as_str().to_string(),
        }
    }
}

/// Get a user profile by email
///
/// Requires a bearer token for the same email, or one carrying the admin
/// role. A missing user is not an error; `data` is simply null.
#[utoipa::path(
    get,
    path = "/api/v1/users/{email}",
    tag = "users",
    params(
        ("email" = String, Path, description = "Email address of the user"),
    ),
    responses(
        (status = 200, description = "User retrieved (null when not found)", body = ApiResponse<UserResponse>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Token does not grant access to this profile", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_user_by_email(
    Path(email): Path<String>,
    AuthBearer(claims): AuthBearer,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Option<UserResponse>>>, (StatusCode, Json<ErrorResponse>)> {
    if claims.sub != email && claims.role != "admin" {
        warn!("Token for {} rejected for profile {}", claims.sub, email);
        return Err((
            StatusCode::FORBIDDEN,
            Json(ErrorResponse {
                error: "Not allowed to view this profile".to_string(),
                code: "FORBIDDEN".to_string(),
                success: false,
            }),
        ));
    }

    match user::Entity::find()
        .filter(user::Column::Email.eq(email.clone()))
        .one(&state.db)
        .await
    {
        Ok(found) => {
            let message = if found.is_some() {
                info!("Retrieved user profile for {}", email);
                "User retrieved successfully"
            } else {
                "User not found"
            };

            Ok(Json(ApiResponse {
                data: found.map(UserResponse::from),
                message: message.to_string(),
                success: true,
            }))
        }
        Err(db_error) => {
            error!("Failed to retrieve user {}: {}", email, db_error);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::database_error()),
            ))
        }
    }
}
