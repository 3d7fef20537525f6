//! Games In Order Repository

use gamerental::{cart::LineItem, ids::OrderId};
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::orders::records::OrderItemRecord;

const CREATE_ORDER_ITEMS_SQL: &str = include_str!("../sql/create_order_items.sql");
const GET_ORDER_ITEMS_SQL: &str = include_str!("../sql/get_order_items.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrderItemsRepository;

impl PgOrderItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert every line item of an order with a single statement.
    pub(crate) async fn create_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order_id: OrderId,
        items: &[LineItem],
    ) -> Result<u64, sqlx::Error> {
        if items.is_empty() {
            return Ok(0);
        }

        let game_ids: Vec<&str> = items.iter().map(LineItem::game_id).collect();

        let units = items
            .iter()
            .map(|item| i32::try_from(item.units()))
            .collect::<Result<Vec<i32>, _>>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "unitsordered".to_string(),
                source: Box::new(e),
            })?;

        let rows_affected = query(CREATE_ORDER_ITEMS_SQL)
            .bind(order_id.to_string())
            .bind(game_ids)
            .bind(units)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn get_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        key: &str,
    ) -> Result<Vec<OrderItemRecord>, sqlx::Error> {
        query_as::<Postgres, OrderItemRecord>(GET_ORDER_ITEMS_SQL)
            .bind(key)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let units_i32: i32 = row.try_get("unitsordered")?;

        let units = u32::try_from(units_i32).map_err(|e| sqlx::Error::ColumnDecode {
            index: "unitsordered".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            game_id: row.try_get("gameid")?,
            units,
        })
    }
}
