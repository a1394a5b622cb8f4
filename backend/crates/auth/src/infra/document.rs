//! Document Store Repository Implementation

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use platform::store::{
    Document, DocumentStore, Filter, MemoryDocumentStore, StoreError, from_document, to_document,
};
use serde_json::Value;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_lookup::UserLookup;
use crate::error::{AuthError, AuthResult};

/// Collection holding user records
pub const USERS_COLLECTION: &str = "users";

/// User repository backed by any document store
#[derive(Debug, Clone)]
pub struct DocumentUserRepository<S> {
    store: S,
}

impl<S> DocumentUserRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl DocumentUserRepository<MemoryDocumentStore> {
    /// Memory store with the `users.email` unique index declared
    pub fn memory_store() -> MemoryDocumentStore {
        MemoryDocumentStore::new().with_unique_index(USERS_COLLECTION, "email")
    }

    pub fn in_memory() -> Self {
        Self::new(Self::memory_store())
    }
}

fn lookup_filter(lookup: &UserLookup) -> Filter {
    match lookup {
        UserLookup::Id(id) => Filter::by_id(id.to_string()),
        UserLookup::Email(email) => Filter::new().eq("email", email.as_str()),
        UserLookup::Phone(phone) => Filter::new().eq("phone", phone.as_str()),
    }
}

impl<S> UserRepository for DocumentUserRepository<S>
where
    S: DocumentStore + Sync,
{
    async fn create(&self, user: &User) -> AuthResult<()> {
        let document = to_document(user)?;

        match self.store.insert_one(USERS_COLLECTION, document).await {
            Ok(_) => Ok(()),
            Err(StoreError::DuplicateKey { key, .. }) if key.contains("email") => {
                Err(AuthError::EmailTaken)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_one(&self, lookup: &UserLookup) -> AuthResult<Option<User>> {
        let filter = lookup_filter(lookup);
        let document = self.store.find_one(USERS_COLLECTION, &filter).await?;

        document
            .map(|doc| from_document::<User>(doc).map_err(AuthError::from))
            .transpose()
    }

    async fn record_login(&self, user_id: &UserId, at: DateTime<Utc>) -> AuthResult<()> {
        let millis = Value::from(at.timestamp_millis());
        let mut patch = Document::new();
        patch.insert("lastLoginAt".to_string(), millis.clone());
        patch.insert("updatedAt".to_string(), millis);

        let updated = self
            .store
            .update_one(USERS_COLLECTION, &Filter::by_id(user_id.to_string()), patch)
            .await?;

        if updated.is_none() {
            tracing::warn!(user_id = %user_id, "Login recorded for a missing user");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::email::Email;

    fn user(email: &str, phone: Option<&str>) -> User {
        User::new(
            None,
            Email::new(email).unwrap(),
            "hash".to_string(),
            phone.map(str::to_string),
        )
    }

    #[tokio::test]
    async fn test_find_by_each_lookup_key() {
        let repo = DocumentUserRepository::in_memory();
        let jane = user("jane@example.com", Some("5550100"));
        repo.create(&jane).await.unwrap();

        for lookup in [
            UserLookup::Id(jane.id),
            UserLookup::Email("jane@example.com".to_string()),
            UserLookup::Phone("5550100".to_string()),
        ] {
            let found = repo.find_one(&lookup).await.unwrap();
            assert_eq!(found.map(|u| u.id), Some(jane.id), "{lookup:?}");
        }

        let missing = repo
            .find_one(&UserLookup::Email("john@example.com".to_string()))
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_maps_to_email_taken() {
        let repo = DocumentUserRepository::in_memory();
        repo.create(&user("jane@example.com", None)).await.unwrap();

        let err = repo
            .create(&user("jane@example.com", None))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::EmailTaken));
    }

    #[tokio::test]
    async fn test_record_login() {
        let repo = DocumentUserRepository::in_memory();
        let jane = user("jane@example.com", None);
        repo.create(&jane).await.unwrap();

        let at = Utc::now();
        repo.record_login(&jane.id, at).await.unwrap();

        let stored = repo.find_one(&UserLookup::Id(jane.id)).await.unwrap().unwrap();
        assert_eq!(
            stored.last_login_at.map(|t| t.timestamp_millis()),
            Some(at.timestamp_millis())
        );

        // Missing users are ignored
        repo.record_login(&UserId::new(), at).await.unwrap();
    }
}
