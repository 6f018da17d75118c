//! The persistence collaborator contract.
//!
//! Record types never talk to a database directly. They hand their fields to a
//! [`Store`], which owns identity assignment, write-time validation and
//! referential integrity between tweets and authors.
use crate::{Author, AuthorId, TweetId, TweetRecord, ValidationError};
use async_trait::async_trait;
use thiserror::Error;

pub mod memory;

/// Error type for [`Store`] operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A field exceeded its length bound at write time.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),
    /// The tweet references an author that has no identity yet.
    #[error("Cannot store a tweet whose author has not been stored")]
    UnsavedAuthor,
    /// The operation needs a tweet identity but the tweet was never stored.
    #[error("Tweet has not been stored")]
    UnsavedTweet,
    /// The tweet references an author id the store does not know.
    #[error("Author with ID {0} does not exist")]
    MissingAuthor(AuthorId),
    #[error("Author with ID {0} not found")]
    AuthorNotFound(AuthorId),
    #[error("Tweet with ID {0} not found")]
    TweetNotFound(TweetId),
    #[error("Storage backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Wraps a backend specific error.
    pub fn backend<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        StoreError::Backend(Box::new(err))
    }
}

/// Storage capability the record types are handed to.
///
/// Implementations must:
/// - assign identities on insert,
/// - reject fields over their length bounds with [`StoreError::Validation`],
/// - reject tweets pointing at unknown authors with [`StoreError::MissingAuthor`],
/// - delete an author's tweets together with the author.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Store: Send + Sync {
    /// Stores a new author and returns its identity.
    async fn insert_author(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<AuthorId, StoreError>;

    /// Overwrites the fields of a stored author.
    async fn update_author(
        &self,
        id: AuthorId,
        first_name: &str,
        last_name: &str,
    ) -> Result<(), StoreError>;

    async fn fetch_author(&self, id: AuthorId) -> Result<Option<Author>, StoreError>;

    /// Deletes an author and every tweet referencing it.
    ///
    /// Returns `false` when no author with this identity exists.
    async fn delete_author(&self, id: AuthorId) -> Result<bool, StoreError>;

    /// Stores a new tweet and returns its identity.
    async fn insert_tweet(&self, tweet: &str, author: AuthorId) -> Result<TweetId, StoreError>;

    /// Overwrites the fields of a stored tweet.
    async fn update_tweet(
        &self,
        id: TweetId,
        tweet: &str,
        author: AuthorId,
    ) -> Result<(), StoreError>;

    async fn fetch_tweet(&self, id: TweetId) -> Result<Option<TweetRecord>, StoreError>;

    /// Returns every stored tweet of an author, oldest first.
    async fn tweets_by_author(&self, author: AuthorId) -> Result<Vec<TweetRecord>, StoreError>;

    /// Returns `false` when no tweet with this identity exists.
    async fn delete_tweet(&self, id: TweetId) -> Result<bool, StoreError>;
}
