use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use model::entities::{category, product};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};
use utoipa::ToSchema;

use crate::handlers::products::ProductResponse;
use crate::schemas::{ApiResponse, AppState, ErrorResponse};

/// Category as returned by the API
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponse {
    pub id: i32,
    pub name: String,
    pub slug: String,
}

impl From<category::Model> for CategoryResponse {
    fn from(model: category::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            slug: model.slug,
        }
    }
}

/// Category annotated with the products that reference its slug
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategoryWithProductsResponse {
    pub id: i32,
    pub name: String,
    pub slug: String,
    /// Products whose `category` field equals this category's slug
    pub dresses: Vec<ProductResponse>,
}

/// List all categories sorted by name, descending
#[utoipa::path(
    get,
    path = "/categories",
    tag = "catalog",
    responses(
        (status = 200, description = "Categories retrieved successfully", body = ApiResponse<Vec<CategoryResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_categories(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<CategoryResponse>>>, (StatusCode, Json<ErrorResponse>)> {
    match category::Entity::find()
        .order_by_desc(category::Column::Name)
        .all(&state.db)
        .await
    {
        Ok(categories) => {
            debug!("Retrieved {} categories", categories.len());
            Ok(Json(ApiResponse {
                data: categories.into_iter().map(CategoryResponse::from).collect(),
                message: "Categories retrieved successfully".to_string(),
                success: true,
            }))
        }
        Err(db_error) => {
            error!("Failed to retrieve categories: {}", db_error);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::database_error()),
            ))
        }
    }
}

/// Get a category by slug together with its products
///
/// The category's product list is the set of products whose `category`
/// field equals the slug. An unknown slug is not an error; `data` is null.
#[utoipa::path(
    get,
    path = "/dresses/{category}",
    tag = "catalog",
    params(
        ("category" = String, Path, description = "Category slug"),
    ),
    responses(
        (status = 200, description = "Category retrieved (null when not found)", body = ApiResponse<CategoryWithProductsResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_category_with_products(
    Path(category_slug): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Option<CategoryWithProductsResponse>>>, (StatusCode, Json<ErrorResponse>)>
{
    let category_model = match category::Entity::find()
        .filter(category::Column::Slug.eq(category_slug.clone()))
        .one(&state.db)
        .await
    {
        Ok(Some(found)) => found,
        Ok(None) => {
            return Ok(Json(ApiResponse {
                data: None,
                message: "Category not found".to_string(),
                success: true,
            }));
        }
        Err(db_error) => {
            error!("Failed to look up category '{}': {}", category_slug, db_error);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::database_error()),
            ));
        }
    };

    let products = match product::Entity::find()
        .filter(product::Column::Category.eq(category_model.slug.clone()))
        .all(&state.db)
        .await
    {
        Ok(products) => products,
        Err(db_error) => {
            error!(
                "Failed to retrieve products for category '{}': {}",
                category_slug, db_error
            );
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::database_error()),
            ));
        }
    };

    debug!(
        "Category '{}' resolved with {} products",
        category_model.slug,
        products.len()
    );
    Ok(Json(ApiResponse {
        data: Some(CategoryWithProductsResponse {
            id: category_model.id,
            name: category_model.name,
            slug: category_model.slug,
            dresses: products.into_iter().map(ProductResponse::from).collect(),
        }),
        message: "Category retrieved successfully".to_string(),
        success: true,
    }))
}
