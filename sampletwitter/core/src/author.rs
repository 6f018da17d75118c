use crate::TweetRecord;
use crate::store::{Store, StoreError};
use crate::validation::{self, ValidationError};
use std::fmt;
use std::sync::OnceLock;

/// Identity of a stored [`Author`], assigned by the [`Store`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AuthorId(pub i32);

impl fmt::Display for AuthorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A person who writes tweets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub first_name: String,
    pub last_name: String,
    id: OnceLock<AuthorId>,
}

impl Author {
    /// Builds an in-memory author. Nothing is validated or stored.
    pub fn create(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Author {
            first_name: first_name.into(),
            last_name: last_name.into(),
            id: OnceLock::new(),
        }
    }

    /// Rebuilds an author read back from a store.
    pub fn with_id(
        id: AuthorId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Author {
            first_name: first_name.into(),
            last_name: last_name.into(),
            id: OnceLock::from(id),
        }
    }

    /// Returns the identity assigned by the store, if the author was stored.
    pub fn id(&self) -> Option<AuthorId> {
        self.id.get().copied()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::validate_author(&self.first_name, &self.last_name)
    }

    /// Hands the author to the store.
    ///
    /// The first call inserts it and records the assigned identity; later calls
    /// update the stored row under that identity. When overlapping first calls
    /// both insert, every caller gets the identity recorded first and the extra
    /// row is deleted again.
    pub async fn save<S: Store + ?Sized>(&self, store: &S) -> Result<AuthorId, StoreError> {
        match self.id() {
            Some(id) => {
                store
                    .update_author(id, &self.first_name, &self.last_name)
                    .await?;
                Ok(id)
            }
            None => {
                let id = store
                    .insert_author(&self.first_name, &self.last_name)
                    .await?;
                let recorded = *self.id.get_or_init(|| id);
                if recorded != id {
                    store.delete_author(id).await?;
                }
                Ok(recorded)
            }
        }
    }

    /// Looks up a stored author by identity.
    pub async fn find<S: Store + ?Sized>(store: &S, id: AuthorId) -> Result<Author, StoreError> {
        store
            .fetch_author(id)
            .await?
            .ok_or(StoreError::AuthorNotFound(id))
    }

    /// Returns the stored tweets written by this author.
    pub async fn tweets<S: Store + ?Sized>(
        &self,
        store: &S,
    ) -> Result<Vec<TweetRecord>, StoreError> {
        let id = self.id().ok_or(StoreError::UnsavedAuthor)?;
        store.tweets_by_author(id).await
    }

    /// Deletes the stored author along with all of its tweets.
    ///
    /// The in-memory value keeps its identity afterwards.
    pub async fn delete<S: Store + ?Sized>(&self, store: &S) -> Result<bool, StoreError> {
        let id = self.id().ok_or(StoreError::UnsavedAuthor)?;
        store.delete_author(id).await
    }
}
