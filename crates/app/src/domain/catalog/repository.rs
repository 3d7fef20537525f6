//! Catalog Repository

use rust_decimal::Decimal;
use sqlx::{
    FromRow, Postgres, Row, Transaction,
    postgres::{PgArguments, PgRow},
    query::QueryAs,
    query_as,
};

use crate::domain::catalog::{
    data::{CatalogFilter, CatalogQuery, CatalogUpdate, PriceOrder},
    records::CatalogEntry,
};

const LIST_GAMES_SQL: &str = include_str!("sql/list_games.sql");
const GET_GAME_SQL: &str = include_str!("sql/get_game.sql");
const UPDATE_NAME_SQL: &str = include_str!("sql/update_name.sql");
const UPDATE_GENRE_SQL: &str = include_str!("sql/update_genre.sql");
const UPDATE_PRICE_SQL: &str = include_str!("sql/update_price.sql");
const UPDATE_DESCRIPTION_SQL: &str = include_str!("sql/update_description.sql");
const UPDATE_IMAGE_URL_SQL: &str = include_str!("sql/update_image_url.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCatalogRepository;

impl PgCatalogRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_games(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        listing: &CatalogQuery,
    ) -> Result<Vec<CatalogEntry>, sqlx::Error> {
        let (genre, max_price): (Option<&str>, Option<Decimal>) = match &listing.filter {
            CatalogFilter::All => (None, None),
            CatalogFilter::Genre(genre) => (Some(genre.as_str()), None),
            CatalogFilter::MaxPrice(price) => (None, Some(*price)),
        };

        query_as::<Postgres, CatalogEntry>(LIST_GAMES_SQL)
            .bind(genre)
            .bind(max_price)
            .bind(listing.order == PriceOrder::Ascending)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_game(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        game_id: &str,
    ) -> Result<CatalogEntry, sqlx::Error> {
        query_as::<Postgres, CatalogEntry>(GET_GAME_SQL)
            .bind(game_id)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_game(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        game_id: &str,
        update: CatalogUpdate,
    ) -> Result<CatalogEntry, sqlx::Error> {
        let query: QueryAs<'_, Postgres, CatalogEntry, PgArguments> = match update {
            CatalogUpdate::Name(value) => query_as(UPDATE_NAME_SQL).bind(game_id).bind(value),
            CatalogUpdate::Genre(value) => query_as(UPDATE_GENRE_SQL).bind(game_id).bind(value),
            CatalogUpdate::Price(value) => query_as(UPDATE_PRICE_SQL).bind(game_id).bind(value),
            CatalogUpdate::Description(value) => query_as(UPDATE_DESCRIPTION_SQL)
                .bind(game_id)
                .bind(value),
            CatalogUpdate::ImageUrl(value) => query_as(UPDATE_IMAGE_URL_SQL)
                .bind(game_id)
                .bind(value),
        };

        query.fetch_one(&mut **tx).await
    }
}

impl<'r> FromRow<'r, PgRow> for CatalogEntry {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            game_id: row.try_get("gameid")?,
            name: row.try_get("gamename")?,
            genre: row.try_get("genre")?,
            price: row.try_get("price")?,
            description: row
                .try_get::<Option<String>, _>("description")?
                .unwrap_or_default(),
            image_url: row
                .try_get::<Option<String>, _>("imageurl")?
                .unwrap_or_default(),
        })
    }
}
