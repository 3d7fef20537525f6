//! Catalog service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::catalog::{
        data::{CatalogQuery, CatalogUpdate},
        errors::CatalogServiceError,
        records::CatalogEntry,
        repository::PgCatalogRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCatalogService {
    db: Db,
    repository: PgCatalogRepository,
}

impl PgCatalogService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCatalogRepository::new(),
        }
    }
}

#[async_trait]
impl CatalogService for PgCatalogService {
    async fn list_games(
        &self,
        listing: CatalogQuery,
    ) -> Result<Vec<CatalogEntry>, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let games = self.repository.list_games(&mut tx, &listing).await?;

        tx.commit().await?;

        Ok(games)
    }

    async fn get_game(&self, game_id: &str) -> Result<CatalogEntry, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let game = self.repository.get_game(&mut tx, game_id).await?;

        tx.commit().await?;

        Ok(game)
    }

    async fn update_game(
        &self,
        game_id: &str,
        update: CatalogUpdate,
    ) -> Result<CatalogEntry, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self.repository.update_game(&mut tx, game_id, update).await?;

        tx.commit().await?;

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Lists catalog entries matching the filter, ordered by price.
    async fn list_games(
        &self,
        listing: CatalogQuery,
    ) -> Result<Vec<CatalogEntry>, CatalogServiceError>;

    /// Retrieve a single game.
    async fn get_game(&self, game_id: &str) -> Result<CatalogEntry, CatalogServiceError>;

    /// Changes one field of a game and returns the updated entry.
    async fn update_game(
        &self,
        game_id: &str,
        update: CatalogUpdate,
    ) -> Result<CatalogEntry, CatalogServiceError>;
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use testresult::TestResult;

    use crate::{
        domain::catalog::data::{CatalogFilter, PriceOrder},
        test::{TestContext, helpers::create_game},
    };

    use super::*;

    async fn seed(ctx: &TestContext) -> TestResult {
        create_game(ctx, "game1", "Chess", "Strategy", dec!(4.99)).await?;
        create_game(ctx, "game2", "Racer", "Racing", dec!(19.99)).await?;
        create_game(ctx, "game3", "Go", "Strategy", dec!(9.50)).await?;

        Ok(())
    }

    fn ids(games: &[CatalogEntry]) -> Vec<&str> {
        games.iter().map(|game| game.game_id.as_str()).collect()
    }

    #[tokio::test]
    async fn list_games_sorts_by_price() -> TestResult {
        let ctx = TestContext::new().await;
        seed(&ctx).await?;

        let ascending = ctx.catalog.list_games(CatalogQuery::default()).await?;
        let descending = ctx
            .catalog
            .list_games(CatalogQuery {
                filter: CatalogFilter::All,
                order: PriceOrder::Descending,
            })
            .await?;

        assert_eq!(ids(&ascending), vec!["game1", "game3", "game2"]);
        assert_eq!(ids(&descending), vec!["game2", "game3", "game1"]);

        Ok(())
    }

    #[tokio::test]
    async fn list_games_filters_by_genre() -> TestResult {
        let ctx = TestContext::new().await;
        seed(&ctx).await?;

        let games = ctx
            .catalog
            .list_games(CatalogQuery {
                filter: CatalogFilter::Genre("Strategy".to_string()),
                order: PriceOrder::Ascending,
            })
            .await?;

        assert_eq!(ids(&games), vec!["game1", "game3"]);

        Ok(())
    }

    #[tokio::test]
    async fn list_games_filters_by_maximum_price() -> TestResult {
        let ctx = TestContext::new().await;
        seed(&ctx).await?;

        let games = ctx
            .catalog
            .list_games(CatalogQuery {
                filter: CatalogFilter::MaxPrice(dec!(9.50)),
                order: PriceOrder::Descending,
            })
            .await?;

        assert_eq!(ids(&games), vec!["game3", "game1"]);

        Ok(())
    }

    #[tokio::test]
    async fn get_game_returns_price_as_decimal() -> TestResult {
        let ctx = TestContext::new().await;
        seed(&ctx).await?;

        let game = ctx.catalog.get_game("game3").await?;

        assert_eq!(game.name, "Go");
        assert_eq!(game.price, dec!(9.50));

        Ok(())
    }

    #[tokio::test]
    async fn get_game_unknown_id_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.catalog.get_game("missing").await;

        assert!(
            matches!(result, Err(CatalogServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn update_game_changes_price() -> TestResult {
        let ctx = TestContext::new().await;
        seed(&ctx).await?;

        let updated = ctx
            .catalog
            .update_game("game2", CatalogUpdate::Price(dec!(14.25)))
            .await?;

        assert_eq!(updated.price, dec!(14.25));
        assert_eq!(ctx.catalog.get_game("game2").await?.price, dec!(14.25));

        Ok(())
    }

    #[tokio::test]
    async fn update_game_negative_price_is_invalid() -> TestResult {
        let ctx = TestContext::new().await;
        seed(&ctx).await?;

        let result = ctx
            .catalog
            .update_game("game2", CatalogUpdate::Price(dec!(-1)))
            .await;

        assert!(
            matches!(result, Err(CatalogServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn update_unknown_game_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .catalog
            .update_game("missing", CatalogUpdate::Name("New".to_string()))
            .await;

        assert!(
            matches!(result, Err(CatalogServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}
