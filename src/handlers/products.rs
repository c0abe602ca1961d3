use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use model::entities::product;
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};
use utoipa::ToSchema;

use crate::schemas::{ApiResponse, AppState, ErrorResponse};

/// Product as returned by the API
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: i32,
    pub name: String,
    /// Slug of the category this product belongs to
    pub category: String,
    pub price: Decimal,
    pub description: Option<String>,
    pub image: Option<String>,
    pub ratings: f64,
    pub flash_sale: bool,
}

impl From<product::Model> for ProductResponse {
    fn from(model: product::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            category: model.category,
            price: model.price,
            description: model.description,
            image: model.image,
            ratings: model.ratings,
            flash_sale: model.flash_sale,
        }
    }
}

/// List every product, unfiltered and unpaginated
#[utoipa::path(
    get,
    path = "/all-products",
    tag = "catalog",
    responses(
        (status = 200, description = "Products retrieved successfully", body = ApiResponse<Vec<ProductResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_all_products(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ProductResponse>>>, (StatusCode, Json<ErrorResponse>)> {
    match product::Entity::find().all(&state.db).await {
        Ok(products) => {
            debug!("Retrieved {} products", products.len());
            Ok(Json(ApiResponse {
                data: products.into_iter().map(ProductResponse::from).collect(),
                message: "Products retrieved successfully".to_string(),
                success: true,
            }))
        }
        Err(db_error) => {
            error!("Failed to retrieve products: {}", db_error);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::database_error()),
            ))
        }
    }
}

/// List products currently in a flash sale
#[utoipa::path(
    get,
    path = "/flash-products",
    tag = "catalog",
    responses(
        (status = 200, description = "Flash-sale products retrieved successfully", body = ApiResponse<Vec<ProductResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_flash_products(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ProductResponse>>>, (StatusCode, Json<ErrorResponse>)> {
    match product::Entity::find()
        .filter(product::Column::FlashSale.eq(true))
        .all(&state.db)
        .await
    {
        Ok(products) => {
            debug!("Retrieved {} flash-sale products", products.len());
            Ok(Json(ApiResponse {
                data: products.into_iter().map(ProductResponse::from).collect(),
                message: "Flash-sale products retrieved successfully".to_string(),
                success: true,
            }))
        }
        Err(db_error) => {
            error!("Failed to retrieve flash-sale products: {}", db_error);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::database_error()),
            ))
        }
    }
}

/// Get a single product by id
///
/// A missing product is not an error; `data` is simply null. A malformed id
/// is rejected by path deserialization before this handler runs.
#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "catalog",
    params(
        ("id" = i32, Path, description = "Product ID"),
    ),
    responses(
        (status = 200, description = "Product retrieved (null when not found)", body = ApiResponse<ProductResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_product(
    Path(product_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Option<ProductResponse>>>, (StatusCode, Json<ErrorResponse>)> {
    match product::Entity::find_by_id(product_id).one(&state.db).await {
        Ok(found) => {
            let message = if found.is_some() {
                "Product retrieved successfully"
            } else {
                "Product not found"
            };

            Ok(Json(ApiResponse {
                data: found.map(ProductResponse::from),
                message: message.to_string(),
                success: true,
            }))
        }
        Err(db_error) => {
            error!("Failed to retrieve product {}: {}", product_id, db_error);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::database_error()),
            ))
        }
    }
}

/// List all products sorted by rating, best first
///
/// Despite the route name there is no limit; the full catalog is returned.
#[utoipa::path(
    get,
    path = "/top-reviews",
    tag = "catalog",
    responses(
        (status = 200, description = "Products retrieved sorted by rating", body = ApiResponse<Vec<ProductResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_top_rated_products(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ProductResponse>>>, (StatusCode, Json<ErrorResponse>)> {
    match product::Entity::find()
        .order_by_desc(product::Column::Ratings)
        .all(&state.db)
        .await
    {
        Ok(products) => {
            debug!("Retrieved {} products by rating", products.len());
            Ok(Json(ApiResponse {
                data: products.into_iter().map(ProductResponse::from).collect(),
                message: "Top-rated products retrieved successfully".to_string(),
                success: true,
            }))
        }
        Err(db_error) => {
            error!("Failed to retrieve top-rated products: {}", db_error);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::database_error()),
            ))
        }
    }
}
