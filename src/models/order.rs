//! Order model and transaction request/response types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::user::UserPublic;

/// A purchase order row
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One requested line of a new order
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct OrderItemInput {
    #[serde(rename = "bookId", alias = "book_id")]
    pub book_id: Uuid,
    pub quantity: i32,
}

/// Create transaction request body
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTransaction {
    pub items: Option<Vec<OrderItemInput>>,
}

/// Book display fields joined onto an order item
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrderItemBook {
    pub title: String,
    #[schema(value_type = f64)]
    pub price: Decimal,
    /// Genre name, if the book still has one
    pub genre: Option<String>,
}

/// A persisted order line with its book joined
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrderItemDetail {
    pub id: Uuid,
    pub book_id: Uuid,
    pub quantity: i32,
    pub book: OrderItemBook,
}

/// Full order graph returned by the transaction endpoints
#[derive(Debug, Serialize, ToSchema)]
pub struct OrderDetail {
    pub id: Uuid,
    pub user: UserPublic,
    pub order_items: Vec<OrderItemDetail>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Created order plus the computed total
#[derive(Debug, Serialize, ToSchema)]
pub struct OrderCreated {
    #[serde(flatten)]
    pub order: OrderDetail,
    #[serde(rename = "totalAmount")]
    #[schema(value_type = f64)]
    pub total_amount: Decimal,
}

/// Units sold for one genre (books without a genre count as "Unknown")
#[derive(Debug, Clone, FromRow)]
pub struct GenreSales {
    pub genre: String,
    pub units: i64,
}

/// Sales aggregation report
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionStatistics {
    pub total_orders: i64,
    pub most_sold_genre: Option<String>,
    pub least_sold_genre: Option<String>,
}
