//! Driving port for read-only user lookups.
//!
//! Users are provisioned outside this service; inbound adapters can only list
//! them and fetch one by id.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Every known user, ordered by email.
    async fn list_users(&self) -> Result<Vec<User>, Error>;

    /// Fetch one user, failing with `not_found` when absent.
    async fn get_user(&self, id: UserId) -> Result<User, Error>;
}

/// Fixture users query with no users.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUsersQuery;

#[async_trait]
impl UsersQuery for FixtureUsersQuery {
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        Ok(Vec::new())
    }

    async fn get_user(&self, id: UserId) -> Result<User, Error> {
        Err(Error::not_found(format!("user {id} not found")))
    }
}
