//! Purchase transaction service: order creation and sales statistics

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::order::{
        CreateTransaction, GenreSales, OrderCreated, OrderDetail, OrderItemInput,
        TransactionStatistics,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct TransactionsService {
    repository: Repository,
}

impl TransactionsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create an order for a user.
    ///
    /// All referenced books are fetched in one batch; any unknown book id
    /// aborts the whole operation before anything is written. The total is
    /// computed from current prices, and the order with its items is
    /// persisted as a single transaction.
    pub async fn create(&self, user_id: Uuid, request: CreateTransaction) -> AppResult<OrderCreated> {
        let items = match request.items {
            Some(items) if !items.is_empty() => items,
            _ => {
                return Err(AppError::BadRequest(
                    "Items must be a non-empty array".to_string(),
                ))
            }
        };

        if items.iter().any(|item| item.quantity < 1) {
            return Err(AppError::Validation(
                "Item quantity must be at least 1".to_string(),
            ));
        }

        let book_ids: Vec<Uuid> = items.iter().map(|item| item.book_id).collect();
        let books = self.repository.books.fetch_by_ids(&book_ids).await?;

        if books.len() != items.len() {
            return Err(AppError::NotFound(
                "One or more books not found".to_string(),
            ));
        }

        let total_amount = order_total(&items, |book_id| {
            books
                .iter()
                .find(|b| b.id == book_id)
                .map(|b| b.price)
                .unwrap_or(Decimal::ZERO)
        });

        let order_id = self.repository.orders.create(user_id, &items).await?;

        let order = self
            .repository
            .orders
            .get_by_id(order_id)
            .await?
            .ok_or_else(|| AppError::Internal("Created order not found".to_string()))?;

        Ok(OrderCreated {
            order,
            total_amount,
        })
    }

    /// List all orders, newest first
    pub async fn list(&self) -> AppResult<Vec<OrderDetail>> {
        self.repository.orders.list().await
    }

    /// Get one order with its full graph
    pub async fn get(&self, id: Uuid) -> AppResult<OrderDetail> {
        self.repository
            .orders
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Order not found".to_string()))
    }

    /// Sales aggregation over all order items
    pub async fn statistics(&self) -> AppResult<TransactionStatistics> {
        let total_orders = self.repository.orders.count().await?;
        let sales = self.repository.orders.genre_sales().await?;
        let (most_sold_genre, least_sold_genre) = rank_genre_sales(sales);

        Ok(TransactionStatistics {
            total_orders,
            most_sold_genre,
            least_sold_genre,
        })
    }
}

/// Sum of price × quantity over the order lines at current prices
fn order_total(items: &[OrderItemInput], price_of: impl Fn(Uuid) -> Decimal) -> Decimal {
    items
        .iter()
        .map(|item| price_of(item.book_id) * Decimal::from(item.quantity))
        .sum()
}

/// Rank genres by units sold and pick the top and bottom.
///
/// Ties are broken by genre name ascending so the report is deterministic.
/// Both sides are None when there are no sales at all.
fn rank_genre_sales(mut sales: Vec<GenreSales>) -> (Option<String>, Option<String>) {
    sales.sort_by(|a, b| b.units.cmp(&a.units).then_with(|| a.genre.cmp(&b.genre)));

    let most = sales.first().map(|s| s.genre.clone());
    let least = sales.last().map(|s| s.genre.clone());
    (most, least)
}
