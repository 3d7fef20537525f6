//! Users Repository

use gamerental::roles::Role;
use sqlx::{
    FromRow, Postgres, Row, Transaction,
    postgres::{PgArguments, PgRow},
    query::QueryAs,
    query_as,
};

use crate::domain::users::{
    data::{NewUser, UserUpdate},
    records::UserRecord,
};

const GET_USER_SQL: &str = include_str!("sql/get_user.sql");
const AUTHENTICATE_SQL: &str = include_str!("sql/authenticate.sql");
const CREATE_USER_SQL: &str = include_str!("sql/create_user.sql");
const UPDATE_LOGIN_SQL: &str = include_str!("sql/update_login.sql");
const UPDATE_PASSWORD_SQL: &str = include_str!("sql/update_password.sql");
const UPDATE_ROLE_SQL: &str = include_str!("sql/update_role.sql");
const UPDATE_FAVORITE_GAMES_SQL: &str = include_str!("sql/update_favorite_games.sql");
const UPDATE_PHONE_NUMBER_SQL: &str = include_str!("sql/update_phone_number.sql");
const UPDATE_OVERDUE_GAMES_SQL: &str = include_str!("sql/update_overdue_games.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgUsersRepository;

impl PgUsersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        login: &str,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(GET_USER_SQL)
            .bind(login)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn authenticate(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        login: &str,
        password: &str,
    ) -> Result<Option<UserRecord>, sqlx::Error> {
        query_as::<Postgres, UserRecord>(AUTHENTICATE_SQL)
            .bind(login)
            .bind(password)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: &NewUser,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(CREATE_USER_SQL)
            .bind(&user.login)
            .bind(&user.password)
            .bind(Role::Customer.as_str())
            .bind(&user.phone_number)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        login: &str,
        update: UserUpdate,
    ) -> Result<UserRecord, sqlx::Error> {
        let query: QueryAs<'_, Postgres, UserRecord, PgArguments> = match update {
            UserUpdate::Login(value) => query_as(UPDATE_LOGIN_SQL).bind(login).bind(value),
            UserUpdate::Password(value) => query_as(UPDATE_PASSWORD_SQL).bind(login).bind(value),
            UserUpdate::Role(role) => query_as(UPDATE_ROLE_SQL).bind(login).bind(role.as_str()),
            UserUpdate::FavoriteGames(value) => query_as(UPDATE_FAVORITE_GAMES_SQL)
                .bind(login)
                .bind(value),
            UserUpdate::PhoneNumber(value) => query_as(UPDATE_PHONE_NUMBER_SQL)
                .bind(login)
                .bind(value),
            UserUpdate::OverdueGames(count) => {
                let count = i32::try_from(count).map_err(|e| sqlx::Error::ColumnDecode {
                    index: "numoverduegames".to_string(),
                    source: Box::new(e),
                })?;

                query_as(UPDATE_OVERDUE_GAMES_SQL).bind(login).bind(count)
            }
        };

        query.fetch_one(&mut **tx).await
    }
}

impl<'r> FromRow<'r, PgRow> for UserRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let role = row
            .try_get::<String, _>("role")?
            .parse::<Role>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "role".to_string(),
                source: Box::new(e),
            })?;

        let overdue_games_i32: i32 = row.try_get("numoverduegames")?;

        let overdue_games =
            u32::try_from(overdue_games_i32).map_err(|e| sqlx::Error::ColumnDecode {
                index: "numoverduegames".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            login: row.try_get("login")?,
            password: row.try_get("password")?,
            role,
            favorite_games: row
                .try_get::<Option<String>, _>("favgames")?
                .unwrap_or_default(),
            phone_number: row
                .try_get::<Option<String>, _>("phonenum")?
                .unwrap_or_default(),
            overdue_games,
        })
    }
}
