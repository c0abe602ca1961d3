use crate::handlers::{
    auth::{login, register},
    categories::{get_categories, get_category_with_products},
    health::health_check,
    orders::{create_order, get_orders, get_orders_by_email},
    products::{get_all_products, get_flash_products, get_product, get_top_rated_products},
    users::get_user_by_email,
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    Router,
    routing::{get, post},
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/", get(health_check))
        // Auth routes
        .route("/api/v1/register", post(register))
        .route("/api/v1/login", post(login))
        .route("/api/v1/users/:email", get(get_user_by_email))
        // Category browse routes
        .route("/categories", get(get_categories))
        .route("/dresses/:category", get(get_category_with_products))
        // Product browse routes
        .route("/all-products", get(get_all_products))
        .route("/flash-products", get(get_flash_products))
        .route("/products/:id", get(get_product))
        .route("/top-reviews", get(get_top_rated_products))
        // Order routes
        .route("/create-order", post(create_order))
        .route("/orders", get(get_orders))
        .route("/orders/:email", get(get_orders_by_email))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
