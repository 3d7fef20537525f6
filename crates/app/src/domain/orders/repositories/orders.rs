//! Rental Orders Repository

use gamerental::{
    ids::{OrderId, TrackingId},
    orders::due_date,
};
use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use tracing::warn;

use crate::{
    database::decode_id,
    domain::orders::{data::NewOrder, records::OrderRecord},
};

const CREATE_ORDER_SQL: &str = include_str!("../sql/create_order.sql");
const LIST_ORDER_IDS_SQL: &str = include_str!("../sql/list_order_ids.sql");
const FIND_ORDER_KEY_SQL: &str = include_str!("../sql/find_order_key.sql");
const GET_ORDER_SQL: &str = include_str!("../sql/get_order.sql");
const GET_ORDER_TRACKING_ID_SQL: &str = include_str!("../sql/get_order_tracking_id.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order_id: OrderId,
        order: &NewOrder,
    ) -> Result<OrderRecord, sqlx::Error> {
        let game_count = order.cart.game_count();

        let game_count_i32 = i32::try_from(game_count).map_err(|e| sqlx::Error::ColumnDecode {
            index: "noofgames".to_string(),
            source: Box::new(e),
        })?;

        let record = OrderRecord {
            order_id,
            login: order.login.clone(),
            game_count,
            total_price: order.cart.total_price(),
            ordered_at: order.placed_at,
            due_at: due_date(order.placed_at),
        };

        query(CREATE_ORDER_SQL)
            .bind(record.order_id.to_string())
            .bind(&record.login)
            .bind(game_count_i32)
            .bind(record.total_price)
            .bind(SqlxTimestamp::from(record.ordered_at))
            .bind(SqlxTimestamp::from(record.due_at))
            .execute(&mut **tx)
            .await?;

        Ok(record)
    }

    pub(crate) async fn list_order_ids(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        login: &str,
        limit: Option<u32>,
    ) -> Result<Vec<OrderId>, sqlx::Error> {
        let ids: Vec<String> = query_scalar(LIST_ORDER_IDS_SQL)
            .bind(login)
            .bind(limit.map(i64::from))
            .fetch_all(&mut **tx)
            .await?;

        Ok(ids
            .iter()
            .filter_map(|id| match decode_id(id, "rentalorderid") {
                Ok(order_id) => Some(order_id),
                Err(error) => {
                    warn!(rentalorderid = %id, %error, "skipping unreadable order id");

                    None
                }
            })
            .collect())
    }

    /// Resolve the stored key of the user's order numbered like `order_id`.
    ///
    /// Older rows may pad the number with zeros, so rows are matched by their
    /// digits and an exact key wins.
    pub(crate) async fn find_order_key(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        login: &str,
        order_id: OrderId,
    ) -> Result<Option<String>, sqlx::Error> {
        query_scalar(FIND_ORDER_KEY_SQL)
            .bind(login)
            .bind(Decimal::from(order_id.number()))
            .bind(order_id.to_string())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        login: &str,
        key: &str,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(GET_ORDER_SQL)
            .bind(login)
            .bind(key)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_tracking_id(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        key: &str,
    ) -> Result<Option<TrackingId>, sqlx::Error> {
        let tracking_id: Option<String> = query_scalar(GET_ORDER_TRACKING_ID_SQL)
            .bind(key)
            .fetch_optional(&mut **tx)
            .await?;

        tracking_id
            .map(|id| decode_id(&id, "trackingid"))
            .transpose()
    }
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let game_count_i32: i32 = row.try_get("noofgames")?;

        let game_count = u32::try_from(game_count_i32).map_err(|e| sqlx::Error::ColumnDecode {
            index: "noofgames".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            order_id: decode_id(row.try_get("rentalorderid")?, "rentalorderid")?,
            login: row.try_get("login")?,
            game_count,
            total_price: row.try_get("totalprice")?,
            ordered_at: row
                .try_get::<SqlxTimestamp, _>("ordertimestamp")?
                .to_jiff(),
            due_at: row.try_get::<SqlxTimestamp, _>("duedate")?.to_jiff(),
        })
    }
}
