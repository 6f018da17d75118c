use crate::store::{Store, StoreError};
use crate::validation::{self, ValidationError};
use crate::{Author, AuthorId};
use std::fmt;
use std::sync::OnceLock;

/// Identity of a stored tweet, assigned by the [`Store`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TweetId(pub i32);

impl fmt::Display for TweetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A short message written by exactly one [`Author`].
///
/// The tweet borrows its author: it never owns the author's lifetime and many
/// tweets can point at the same author value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tweet<'a> {
    pub tweet: String,
    author: &'a Author,
    id: OnceLock<TweetId>,
}

impl<'a> Tweet<'a> {
    /// Builds an in-memory tweet. Nothing is validated or stored.
    pub fn create(tweet: impl Into<String>, author: &'a Author) -> Self {
        Tweet {
            tweet: tweet.into(),
            author,
            id: OnceLock::new(),
        }
    }

    pub fn author(&self) -> &'a Author {
        self.author
    }

    /// Returns the identity assigned by the store, if the tweet was stored.
    pub fn id(&self) -> Option<TweetId> {
        self.id.get().copied()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::validate_tweet(&self.tweet)
    }

    /// Hands the tweet to the store.
    ///
    /// The author has to be stored first, otherwise this fails with
    /// [`StoreError::UnsavedAuthor`] without reaching the store. Overlapping
    /// first calls resolve like [`Author::save`].
    pub async fn save<S: Store + ?Sized>(&self, store: &S) -> Result<TweetId, StoreError> {
        let author_id = self.author.id().ok_or(StoreError::UnsavedAuthor)?;
        match self.id() {
            Some(id) => {
                store.update_tweet(id, &self.tweet, author_id).await?;
                Ok(id)
            }
            None => {
                let id = store.insert_tweet(&self.tweet, author_id).await?;
                let recorded = *self.id.get_or_init(|| id);
                if recorded != id {
                    store.delete_tweet(id).await?;
                }
                Ok(recorded)
            }
        }
    }

    pub async fn delete<S: Store + ?Sized>(&self, store: &S) -> Result<bool, StoreError> {
        let id = self.id().ok_or(StoreError::UnsavedTweet)?;
        store.delete_tweet(id).await
    }

    /// Looks up a stored tweet by identity.
    pub async fn find<S: Store + ?Sized>(
        store: &S,
        id: TweetId,
    ) -> Result<TweetRecord, StoreError> {
        store
            .fetch_tweet(id)
            .await?
            .ok_or(StoreError::TweetNotFound(id))
    }
}

/// A tweet as it is kept by a store.
///
/// The author is held by identity only and resolved through the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TweetRecord {
    pub id: TweetId,
    pub tweet: String,
    pub author_id: AuthorId,
}

impl TweetRecord {
    /// Resolves the author this tweet points at.
    pub async fn author<S: Store + ?Sized>(&self, store: &S) -> Result<Author, StoreError> {
        Author::find(store, self.author_id).await
    }
}
