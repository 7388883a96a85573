//! Purchase transaction endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::order::{CreateTransaction, OrderCreated, OrderDetail, TransactionStatistics},
};

use super::{ApiResponse, AppJson, AuthenticatedUser};

/// Create an order for the authenticated user
#[utoipa::path(
    post,
    path = "/transactions",
    tag = "transactions",
    security(("bearer_auth" = [])),
    request_body = CreateTransaction,
    responses(
        (status = 201, description = "Order created", body = OrderCreated),
        (status = 400, description = "Items missing or empty"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "One or more books not found")
    )
)]
pub async fn create_transaction(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    AppJson(request): AppJson<CreateTransaction>,
) -> AppResult<(StatusCode, Json<ApiResponse<OrderCreated>>)> {
    let order = state
        .services
        .transactions
        .create(claims.sub, request)
        .await?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::ok("Order created successfully", order),
    ))
}

/// List all orders, newest first
#[utoipa::path(
    get,
    path = "/transactions",
    tag = "transactions",
    responses(
        (status = 200, description = "List of orders", body = Vec<OrderDetail>)
    )
)]
pub async fn list_transactions(
    State(state): State<crate::AppState>,
) -> AppResult<Json<ApiResponse<Vec<OrderDetail>>>> {
    let orders = state.services.transactions.list().await?;
    Ok(ApiResponse::ok("All orders retrieved successfully", orders))
}

/// Sales statistics over all orders
#[utoipa::path(
    get,
    path = "/transactions/statistics",
    tag = "transactions",
    responses(
        (status = 200, description = "Aggregated statistics", body = TransactionStatistics)
    )
)]
pub async fn transaction_statistics(
    State(state): State<crate::AppState>,
) -> AppResult<Json<ApiResponse<TransactionStatistics>>> {
    let stats = state.services.transactions.statistics().await?;
    Ok(ApiResponse::ok(
        "Order statistics retrieved successfully",
        stats,
    ))
}

/// Get one order by ID
#[utoipa::path(
    get,
    path = "/transactions/{order_id}",
    tag = "transactions",
    params(("order_id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order detail", body = OrderDetail),
        (status = 404, description = "Order not found")
    )
)]
pub async fn get_transaction(
    State(state): State<crate::AppState>,
    Path(order_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<OrderDetail>>> {
    let order = state.services.transactions.get(order_id).await?;
    Ok(ApiResponse::ok("Order detail retrieved successfully", order))
}
