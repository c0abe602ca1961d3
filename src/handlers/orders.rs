use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use model::entities::order;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};
use utoipa::ToSchema;

use crate::schemas::{ApiResponse, AppState, ErrorResponse};

/// Insert acknowledgment for a created order
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderCreatedResponse {
    /// Generated identifier of the stored order
    pub id: i32,
}

/// Stored order: the generated id plus the document as submitted
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: i32,
    pub ordered_by: Option<String>,
    /// The order document exactly as the client submitted it
    pub payload: serde_json::Value,
}

impl From<order::Model> for OrderResponse {
    fn from(model: order::Model) -> Self {
        Self {
            id: model.id,
            ordered_by: model.ordered_by,
            payload: model.payload,
        }
    }
}

/// Create an order
///
/// The JSON body is stored verbatim; no referenced user or product is
/// checked. Only `orderedBy` is read, to support the per-email listing.
#[utoipa::path(
    post,
    path = "/create-order",
    tag = "orders",
    request_body = serde_json::Value,
    responses(
        (status = 201, description = "Order created successfully", body = ApiResponse<OrderCreatedResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, payload))]
pub async fn create_order(
    State(state): State<AppState>,
    Json(payload): Json<serde_json::Value>,
) -> Result<(StatusCode, Json<ApiResponse<OrderCreatedResponse>>), (StatusCode, Json<ErrorResponse>)>
{
    let ordered_by = payload
        .get("orderedBy")
        .and_then(|value| value.as_str())
        .map(ToOwned::to_owned);

    let new_order = order::ActiveModel {
        ordered_by: Set(ordered_by),
        payload: Set(payload),
        ..Default::default()
    };

    match new_order.insert(&state.db).await {
        Ok(order_model) => {
            info!("Order created with ID: {}", order_model.id);
            let response = ApiResponse {
                data: OrderCreatedResponse { id: order_model.id },
                message: "Order created successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(db_error) => {
            error!("Failed to create order: {}", db_error);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::database_error()),
            ))
        }
    }
}

/// List every order, unfiltered
#[utoipa::path(
    get,
    path = "/orders",
    tag = "orders",
    responses(
        (status = 200, description = "Orders retrieved successfully", body = ApiResponse<Vec<OrderResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_orders(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<OrderResponse>>>, (StatusCode, Json<ErrorResponse>)> {
    match order::Entity::find().all(&state.db).await {
        Ok(orders) => {
            debug!("Retrieved {} orders", orders.len());
            Ok(Json(ApiResponse {
                data: orders.into_iter().map(OrderResponse::from).collect(),
                message: "Orders retrieved successfully".to_string(),
                success: true,
            }))
        }
        Err(db_error) => {
            error!("Failed to retrieve orders: {}", db_error);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::database_error()),
            ))
        }
    }
}

/// List orders placed by the given email
#[utoipa::path(
    get,
    path = "/orders/{email}",
    tag = "orders",
    params(
        ("email" = String, Path, description = "Email the orders were placed under"),
    ),
    responses(
        (status = 200, description = "Orders retrieved successfully", body = ApiResponse<Vec<OrderResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_orders_by_email(
    Path(email): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<OrderResponse>>>, (StatusCode, Json<ErrorResponse>)> {
    match order::Entity::find()
        .filter(order::Column::OrderedBy.eq(email.clone()))
        .all(&state.db)
        .await
    {
        Ok(orders) => {
            debug!("Retrieved {} orders for {}", orders.len(), email);
            Ok(Json(ApiResponse {
                data: orders.into_iter().map(OrderResponse::from).collect(),
                message: "Orders retrieved successfully".to_string(),
                success: true,
            }))
        }
        Err(db_error) => {
            error!("Failed to retrieve orders for {}: {}", email, db_error);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::database_error()),
            ))
        }
    }
}
