//! Read-only user service backing [`UsersQuery`].

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository, UsersQuery};
use crate::domain::{Error, User, UserId};

fn map_repository_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

#[derive(Clone)]
pub struct UsersService<R> {
    user_repo: Arc<R>,
}

impl<R> UsersService<R> {
    pub fn new(user_repo: Arc<R>) -> Self {
        Self { user_repo }
    }
}

#[async_trait]
impl<R> UsersQuery for UsersService<R>
where
    R: UserRepository,
{
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.user_repo.list().await.map_err(map_repository_error)
    }

    async fn get_user(&self, id: UserId) -> Result<User, Error> {
        self.user_repo
            .find_by_id(&id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("user {id} not found")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockUserRepository;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().times(1).return_once(|_| Ok(None));

        let err = UsersService::new(Arc::new(repo))
            .get_user(UserId::random())
            .await
            .expect_err("missing");

        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn connection_failures_are_unavailable() {
        let mut repo = MockUserRepository::new();
        repo.expect_list()
            .times(1)
            .return_once(|| Err(UserPersistenceError::connection("refused")));

        let err = UsersService::new(Arc::new(repo))
            .list_users()
            .await
            .expect_err("unavailable");

        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }
}
