//! Orders repository for database operations

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        order::{GenreSales, OrderDetail, OrderItemBook, OrderItemDetail, OrderItemInput},
        user::UserPublic,
    },
};

/// Flat row for the order/user join
#[derive(FromRow)]
struct OrderUserRow {
    id: Uuid,
    user_id: Uuid,
    username: Option<String>,
    email: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Flat row for the order_item/book/genre join
#[derive(FromRow)]
struct OrderItemRow {
    id: Uuid,
    order_id: Uuid,
    book_id: Uuid,
    quantity: i32,
    title: String,
    price: Decimal,
    genre_name: Option<String>,
}

impl From<OrderItemRow> for OrderItemDetail {
    fn from(row: OrderItemRow) -> Self {
        OrderItemDetail {
            id: row.id,
            book_id: row.book_id,
            quantity: row.quantity,
            book: OrderItemBook {
                title: row.title,
                price: row.price,
                genre: row.genre_name,
            },
        }
    }
}

const ORDER_SELECT: &str = r#"
    SELECT o.id, o.user_id, u.username, u.email, o.created_at, o.updated_at
    FROM orders o
    JOIN users u ON o.user_id = u.id
"#;

const ITEM_SELECT: &str = r#"
    SELECT oi.id, oi.order_id, oi.book_id, oi.quantity,
           b.title, b.price, g.name AS genre_name
    FROM order_items oi
    JOIN books b ON oi.book_id = b.id
    LEFT JOIN genres g ON b.genre_id = g.id
"#;

#[derive(Clone)]
pub struct OrdersRepository {
    pool: Pool<Postgres>,
}

impl OrdersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Persist an order and all its items as one transaction.
    ///
    /// Either everything commits or nothing is written; a failing item
    /// insert rolls the whole order back.
    pub async fn create(&self, user_id: Uuid, items: &[OrderItemInput]) -> AppResult<Uuid> {
        let now = Utc::now();
        let order_id = Uuid::new_v4();

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO orders (id, user_id, created_at, updated_at) VALUES ($1, $2, $3, $3)",
        )
        .bind(order_id)
        .bind(user_id)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        for item in items {
            sqlx::query(
                "INSERT INTO order_items (id, order_id, book_id, quantity) VALUES ($1, $2, $3, $4)",
            )
            .bind(Uuid::new_v4())
            .bind(order_id)
            .bind(item.book_id)
            .bind(item.quantity)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(order_id)
    }

    /// Get one order with its user and items joined
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Option<OrderDetail>> {
        let order = sqlx::query_as::<_, OrderUserRow>(&format!("{} WHERE o.id = $1", ORDER_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        let Some(order) = order else {
            return Ok(None);
        };

        let items =
            sqlx::query_as::<_, OrderItemRow>(&format!("{} WHERE oi.order_id = $1", ITEM_SELECT))
                .bind(id)
                .fetch_all(&self.pool)
                .await?;

        Ok(Some(assemble(order, items)))
    }

    /// List all orders newest first, with users and items joined
    pub async fn list(&self) -> AppResult<Vec<OrderDetail>> {
        let orders = sqlx::query_as::<_, OrderUserRow>(&format!(
            "{} ORDER BY o.created_at DESC",
            ORDER_SELECT
        ))
        .fetch_all(&self.pool)
        .await?;

        if orders.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = orders.iter().map(|o| o.id).collect();
        let items = sqlx::query_as::<_, OrderItemRow>(&format!(
            "{} WHERE oi.order_id = ANY($1) ORDER BY b.title",
            ITEM_SELECT
        ))
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut by_order: HashMap<Uuid, Vec<OrderItemRow>> = HashMap::new();
        for item in items {
            by_order.entry(item.order_id).or_default().push(item);
        }

        Ok(orders
            .into_iter()
            .map(|order| {
                let items = by_order.remove(&order.id).unwrap_or_default();
                assemble(order, items)
            })
            .collect())
    }

    /// Total number of orders
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Units sold per genre over all order items.
    ///
    /// Items whose book lost its genre fall into the "Unknown" bucket.
    /// Ranking happens in the service, not here.
    pub async fn genre_sales(&self) -> AppResult<Vec<GenreSales>> {
        let sales = sqlx::query_as::<_, GenreSales>(
            r#"
            SELECT COALESCE(g.name, 'Unknown') AS genre, SUM(oi.quantity)::BIGINT AS units
            FROM order_items oi
            JOIN books b ON oi.book_id = b.id
            LEFT JOIN genres g ON b.genre_id = g.id
            GROUP BY COALESCE(g.name, 'Unknown')
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }
}

fn assemble(order: OrderUserRow, items: Vec<OrderItemRow>) -> OrderDetail {
    OrderDetail {
        id: order.id,
        user: UserPublic {
            id: order.user_id,
            username: order.username,
            email: order.email,
        },
        order_items: items.into_iter().map(OrderItemDetail::from).collect(),
        created_at: order.created_at,
        updated_at: order.updated_at,
    }
}
