//! Users service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::users::{
        data::{NewUser, UserUpdate},
        errors::UsersServiceError,
        records::UserRecord,
        repository::PgUsersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgUsersService {
    db: Db,
    repository: PgUsersRepository,
}

impl PgUsersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgUsersRepository::new(),
        }
    }
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_user(&mut tx, &user).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn log_in(&self, login: &str, password: &str) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self
            .repository
            .authenticate(&mut tx, login, password)
            .await?
            .ok_or(UsersServiceError::InvalidCredentials)?;

        tx.commit().await?;

        Ok(user)
    }

    async fn get_user(&self, login: &str) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self.repository.get_user(&mut tx, login).await?;

        tx.commit().await?;

        Ok(user)
    }

    async fn update_user(
        &self,
        login: &str,
        update: UserUpdate,
    ) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self.repository.update_user(&mut tx, login, update).await?;

        tx.commit().await?;

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Creates a customer account.
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError>;

    /// Returns the account matching both login and password.
    async fn log_in(&self, login: &str, password: &str) -> Result<UserRecord, UsersServiceError>;

    /// Retrieve a single user.
    async fn get_user(&self, login: &str) -> Result<UserRecord, UsersServiceError>;

    /// Changes one field of a user and returns the updated record.
    async fn update_user(
        &self,
        login: &str,
        update: UserUpdate,
    ) -> Result<UserRecord, UsersServiceError>;
}
