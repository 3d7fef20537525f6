//! Test context for service-level integration tests.

use crate::{
    database::Db,
    domain::{
        catalog::PgCatalogService, orders::PgOrdersService, tracking::PgTrackingService,
        users::PgUsersService,
    },
};

use super::db::TestDb;

pub struct TestContext {
    pub db: TestDb,
    pub users: PgUsersService,
    pub catalog: PgCatalogService,
    pub orders: PgOrdersService,
    pub tracking: PgTrackingService,
}

impl TestContext {
    pub async fn new() -> Self {
        let test_db = TestDb::new().await;
        let db = Db::new(test_db.pool().clone());

        Self {
            users: PgUsersService::new(db.clone()),
            catalog: PgCatalogService::new(db.clone()),
            orders: PgOrdersService::new(db.clone()),
            tracking: PgTrackingService::new(db),
            db: test_db,
        }
    }
}
