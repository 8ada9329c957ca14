use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::users::{
    repo::UserRepository,
    repo_types::{RepoError, User},
};

/// Width of the `email` and `password` columns.
const MAX_FIELD_LEN: usize = 30;

fn check_width(email: &str, password: &str) -> Result<(), RepoError> {
    for (field, value) in [("email", email), ("password", password)] {
        if value.chars().count() > MAX_FIELD_LEN {
            return Err(RepoError::ValueTooLong { field });
        }
    }
    Ok(())
}

/// Vec-backed repository with the same semantics as the PostgreSQL table:
/// ids may repeat and column width is enforced.
#[derive(Default)]
pub struct InMemoryUserRepository {
    rows: RwLock<Vec<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn bootstrap_schema(&self) -> Result<(), RepoError> {
        self.rows.write().await.clear();
        Ok(())
    }

    async fn create(&self, user: &User) -> Result<u64, RepoError> {
        check_width(&user.email, &user.password)?;
        self.rows.write().await.push(user.clone());
        Ok(1)
    }

    async fn get_by_id(&self, id: i64) -> Result<User, RepoError> {
        let rows = self.rows.read().await;
        let mut matches = rows.iter().filter(|u| u.id == id);
        match (matches.next(), matches.count()) {
            (None, _) => Err(RepoError::NotFound { id }),
            (Some(user), 0) => Ok(user.clone()),
            (Some(_), rest) => Err(RepoError::Ambiguous {
                id,
                count: rest + 1,
            }),
        }
    }

    async fn update_by_id(&self, id: i64, email: &str, password: &str) -> Result<u64, RepoError> {
        let mut rows = self.rows.write().await;
        // Postgres only checks the width when a row is actually assigned.
        if rows.iter().any(|u| u.id == id) {
            check_width(email, password)?;
        }
        let mut affected = 0;
        for user in rows.iter_mut().filter(|u| u.id == id) {
            user.email = email.to_string();
            user.password = password.to_string();
            affected += 1;
        }
        Ok(affected)
    }

    async fn delete_by_id(&self, id: i64) -> Result<u64, RepoError> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|u| u.id != id);
        Ok((before - rows.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64, email: &str, password: &str) -> User {
        User {
            id,
            email: email.into(),
            password: password.into(),
        }
    }

    #[tokio::test]
    async fn create_then_get_returns_same_fields() {
        let repo = InMemoryUserRepository::default();
        assert_eq!(repo.create(&user(1, "a@x.com", "p1")).await.unwrap(), 1);
        assert_eq!(repo.get_by_id(1).await.unwrap(), user(1, "a@x.com", "p1"));
    }

    #[tokio::test]
    async fn get_unknown_id_is_not_found() {
        let repo = InMemoryUserRepository::default();
        let err = repo.get_by_id(42).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound { id: 42 }));
    }

    #[tokio::test]
    async fn duplicate_ids_are_ambiguous() {
        let repo = InMemoryUserRepository::default();
        for email in ["a@x.com", "b@x.com", "c@x.com"] {
            repo.create(&user(5, email, "p")).await.unwrap();
        }
        let err = repo.get_by_id(5).await.unwrap_err();
        assert!(matches!(err, RepoError::Ambiguous { id: 5, count: 3 }));
        assert_eq!(repo.update_by_id(5, "z@x.com", "q").await.unwrap(), 3);
        assert_eq!(repo.delete_by_id(5).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn update_touches_only_matching_rows_and_keeps_id() {
        let repo = InMemoryUserRepository::default();
        repo.create(&user(1, "a@x.com", "p1")).await.unwrap();
        repo.create(&user(2, "other@x.com", "p9")).await.unwrap();

        assert_eq!(repo.update_by_id(1, "b@x.com", "p2").await.unwrap(), 1);
        assert_eq!(repo.get_by_id(1).await.unwrap(), user(1, "b@x.com", "p2"));
        assert_eq!(repo.get_by_id(2).await.unwrap(), user(2, "other@x.com", "p9"));
        assert_eq!(repo.update_by_id(3, "c@x.com", "p3").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn delete_counts_and_then_not_found() {
        let repo = InMemoryUserRepository::default();
        assert_eq!(repo.delete_by_id(1).await.unwrap(), 0);
        repo.create(&user(1, "a@x.com", "p1")).await.unwrap();
        assert_eq!(repo.delete_by_id(1).await.unwrap(), 1);
        assert!(matches!(
            repo.get_by_id(1).await,
            Err(RepoError::NotFound { id: 1 })
        ));
    }

    #[tokio::test]
    async fn overlong_values_are_rejected() {
        let repo = InMemoryUserRepository::default();
        let long = "a".repeat(31);
        assert!(matches!(
            repo.create(&user(1, &long, "p")).await,
            Err(RepoError::ValueTooLong { field: "email" })
        ));
        repo.create(&user(1, "a@x.com", "p")).await.unwrap();
        assert!(matches!(
            repo.update_by_id(1, "a@x.com", &long).await,
            Err(RepoError::ValueTooLong { field: "password" })
        ));
    }

    #[tokio::test]
    async fn overlong_update_of_missing_id_matches_nothing() {
        let repo = InMemoryUserRepository::default();
        repo.create(&user(1, "a@x.com", "p")).await.unwrap();
        let long = "a".repeat(31);
        assert_eq!(repo.update_by_id(2, &long, &long).await.unwrap(), 0);
        assert_eq!(repo.get_by_id(1).await.unwrap(), user(1, "a@x.com", "p"));
    }

    #[test]
    fn width_counts_characters_not_bytes() {
        assert!(check_width(&"é".repeat(30), "").is_ok());
        assert!(matches!(
            check_width("a@x.com", &"a".repeat(31)),
            Err(RepoError::ValueTooLong { field: "password" })
        ));
    }

    #[tokio::test]
    async fn bootstrap_drops_all_rows() {
        let repo = InMemoryUserRepository::default();
        repo.create(&user(1, "a@x.com", "p1")).await.unwrap();
        repo.bootstrap_schema().await.unwrap();
        assert!(matches!(
            repo.get_by_id(1).await,
            Err(RepoError::NotFound { .. })
        ));
    }
}
