use axum::{extract::State, http::StatusCode, response::Json};
use model::entities::user::{self, Role};
use sea_orm::{ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};
use utoipa::ToSchema;

use crate::auth::{hash_password, verify_password};
use crate::handlers::users::UserResponse;
use crate::schemas::{ApiResponse, AppState, ErrorResponse};

/// Request body for registering a new user.
///
/// No Debug derive: the raw password must never end up in a log line.
#[derive(Deserialize, Serialize, ToSchema)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Request body for logging in
#[derive(Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Issued access token
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenResponse {
    pub access_token: String,
}

/// Register a new user
///
/// Hashes the password and inserts the user with the default `user` role.
#[utoipa::path(
    post,
    path = "/api/v1/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = ApiResponse<UserResponse>),
        (status = 400, description = "Email already registered", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), (StatusCode, Json<ErrorResponse>)> {
    debug!("Registering user with email: {}", request.email);

    let password_hash = hash_password(&request.password).map_err(|e| {
        error!("Password hashing failed: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "Internal server error while registering user".to_string(),
                code: "PASSWORD_HASH_ERROR".to_string(),
                success: false,
            }),
        )
    })?;

    let new_user = user::ActiveModel {
        username: Set(request.username.clone()),
        email: Set(request.email.clone()),
        password_hash: Set(password_hash),
        role: Set(Role::User),
        ..Default::default()
    };

    // Single atomic insert; the unique key on email turns a concurrent
    // duplicate registration into a constraint error instead of a race.
    match new_user.insert(&state.db).await {
        Ok(user_model) => {
            info!(
                "User registered with ID: {}, email: {}",
                user_model.id, user_model.email
            );
            let response = ApiResponse {
                data: UserResponse::from(user_model),
                message: "User registered successfully!".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(db_error) => {
            if is_unique_violation(&db_error) {
                warn!("Registration rejected, email already exists: {}", request.email);
                Err((
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: "User already exists".to_string(),
                        code: "DUPLICATE_USER".to_string(),
                        success: false,
                    }),
                ))
            } else {
                error!("Failed to register user '{}': {}", request.email, db_error);
                Err((
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::database_error()),
                ))
            }
        }
    }
}

/// Log in with email and password
///
/// On success issues a signed, time-limited access token embedding the
/// user's email and role.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<AccessTokenResponse>),
        (status = 401, description = "Invalid email or password", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<ApiResponse<AccessTokenResponse>>, (StatusCode, Json<ErrorResponse>)> {
    debug!("Login attempt for email: {}", request.email);

    let user_model = match user::Entity::find()
        .filter(user::Column::Email.eq(request.email.clone()))
        .one(&state.db)
        .await
    {
        Ok(Some(found)) => found,
        Ok(None) => return Err(invalid_credentials()),
        Err(db_error) => {
            error!("Failed to look up user '{}': {}", request.email, db_error);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::database_error()),
            ));
        }
    };

    if verify_password(&request.password, &user_model.password_hash).is_err() {
        return Err(invalid_credentials());
    }

    let token = state
        .auth
        .issue_token(&user_model.email, user_model.role.as_str())
        .map_err(|e| {
            error!("Failed to issue token for '{}': {}", user_model.email, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error while logging in".to_string(),
                    code: "TOKEN_ERROR".to_string(),
                    success: false,
                }),
            )
        })?;

    info!("User logged in: {}", user_model.email);
    Ok(Json(ApiResponse {
        data: AccessTokenResponse {
            access_token: token,
        },
        message: "User successfully logged in!".to_string(),
        success: true,
    }))
}

// Unknown email and wrong password produce byte-identical responses so the
// caller cannot probe which field was wrong.
fn invalid_credentials() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse {
            error: "Invalid email or password".to_string(),
            code: "INVALID_CREDENTIALS".to_string(),
            success: false,
        }),
    )
}

fn is_unique_violation(db_error: &DbErr) -> bool {
    let error_msg = db_error.to_string().to_lowercase();
    error_msg.contains("unique") || error_msg.contains("constraint")
}
