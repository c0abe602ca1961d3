use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use crate::auth::AuthConfig;
use crate::handlers::auth::{AccessTokenResponse, LoginRequest, RegisterRequest};
use crate::handlers::categories::{CategoryResponse, CategoryWithProductsResponse};
use crate::handlers::orders::{OrderCreatedResponse, OrderResponse};
use crate::handlers::products::ProductResponse;
use crate::handlers::users::UserResponse;

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
    /// Token signing configuration
    pub auth: AuthConfig,
}

/// API response wrapper
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success status
    pub success: bool,
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

impl ErrorResponse {
    /// Opaque envelope for unexpected database failures.
    pub fn database_error() -> Self {
        Self {
            error: "Internal server error".to_string(),
            code: "DATABASE_ERROR".to_string(),
            success: false,
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Static status message
    pub message: String,
    /// Current server time (UTC)
    pub timestamp: DateTime<Utc>,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::auth::register,
        crate::handlers::auth::login,
        crate::handlers::users::get_user_by_email,
        crate::handlers::categories::get_categories,
        crate::handlers::categories::get_category_with_products,
        crate::handlers::products::get_all_products,
        crate::handlers::products::get_flash_products,
        crate::handlers::products::get_product,
        crate::handlers::products::get_top_rated_products,
        crate::handlers::orders::create_order,
        crate::handlers::orders::get_orders,
        crate::handlers::orders::get_orders_by_email,
    ),
    components(
        schemas(
            ApiResponse<UserResponse>,
            ApiResponse<AccessTokenResponse>,
            ApiResponse<Vec<CategoryResponse>>,
            ApiResponse<CategoryWithProductsResponse>,
            ApiResponse<Vec<ProductResponse>>,
            ApiResponse<ProductResponse>,
            ApiResponse<OrderCreatedResponse>,
            ApiResponse<Vec<OrderResponse>>,
            ErrorResponse,
            HealthResponse,
            RegisterRequest,
            LoginRequest,
            AccessTokenResponse,
            UserResponse,
            CategoryResponse,
            CategoryWithProductsResponse,
            ProductResponse,
            OrderCreatedResponse,
            OrderResponse,
        )
    ),
    tags(
        (name = "health", description = "Server status endpoint"),
        (name = "auth", description = "Registration and login endpoints"),
        (name = "users", description = "User profile endpoints"),
        (name = "catalog", description = "Category and product browse endpoints"),
        (name = "orders", description = "Order creation and listing endpoints"),
    ),
    info(
        title = "DressHub API",
        description = "E-commerce backend for user accounts, catalog browsing, and order creation",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
