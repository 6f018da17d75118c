use crate::store::{Store, StoreError};
use crate::validation::{validate_author, validate_tweet};
use crate::{Author, AuthorId, TweetId, TweetRecord};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Clone)]
struct AuthorRow {
    first_name: String,
    last_name: String,
}

#[derive(Debug, Clone)]
struct TweetRow {
    tweet: String,
    author_id: AuthorId,
}

#[derive(Debug, Default)]
struct Tables {
    authors: BTreeMap<AuthorId, AuthorRow>,
    tweets: BTreeMap<TweetId, TweetRow>,
    last_author_id: i32,
    last_tweet_id: i32,
}

/// A [`Store`] that keeps every record in process memory.
///
/// Identities start at 1 and are never reused, even after deletion.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> Result<MutexGuard<'_, Tables>, StoreError> {
        self.tables
            .lock()
            .map_err(|_| StoreError::Backend("memory store lock poisoned".into()))
    }
}

fn to_record(id: TweetId, row: &TweetRow) -> TweetRecord {
    TweetRecord {
        id,
        tweet: row.tweet.clone(),
        author_id: row.author_id,
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_author(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<AuthorId, StoreError> {
        validate_author(first_name, last_name)?;
        let mut tables = self.tables()?;
        tables.last_author_id += 1;
        let id = AuthorId(tables.last_author_id);
        tables.authors.insert(
            id,
            AuthorRow {
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
            },
        );
        Ok(id)
    }

    async fn update_author(
        &self,
        id: AuthorId,
        first_name: &str,
        last_name: &str,
    ) -> Result<(), StoreError> {
        validate_author(first_name, last_name)?;
        let mut tables = self.tables()?;
        let row = tables
            .authors
            .get_mut(&id)
            .ok_or(StoreError::AuthorNotFound(id))?;
        row.first_name = first_name.to_string();
        row.last_name = last_name.to_string();
        Ok(())
    }

    async fn fetch_author(&self, id: AuthorId) -> Result<Option<Author>, StoreError> {
        let tables = self.tables()?;
        Ok(tables
            .authors
            .get(&id)
            .map(|row| Author::with_id(id, row.first_name.clone(), row.last_name.clone())))
    }

    async fn delete_author(&self, id: AuthorId) -> Result<bool, StoreError> {
        let mut tables = self.tables()?;
        if tables.authors.remove(&id).is_none() {
            return Ok(false);
        }
        tables.tweets.retain(|_, row| row.author_id != id);
        Ok(true)
    }

    async fn insert_tweet(&self, tweet: &str, author: AuthorId) -> Result<TweetId, StoreError> {
        validate_tweet(tweet)?;
        let mut tables = self.tables()?;
        if !tables.authors.contains_key(&author) {
            return Err(StoreError::MissingAuthor(author));
        }
        tables.last_tweet_id += 1;
        let id = TweetId(tables.last_tweet_id);
        tables.tweets.insert(
            id,
            TweetRow {
                tweet: tweet.to_string(),
                author_id: author,
            },
        );
        Ok(id)
    }

    async fn update_tweet(
        &self,
        id: TweetId,
        tweet: &str,
        author: AuthorId,
    ) -> Result<(), StoreError> {
        validate_tweet(tweet)?;
        let mut tables = self.tables()?;
        if !tables.tweets.contains_key(&id) {
            return Err(StoreError::TweetNotFound(id));
        }
        if !tables.authors.contains_key(&author) {
            return Err(StoreError::MissingAuthor(author));
        }
        let row = tables
            .tweets
            .get_mut(&id)
            .ok_or(StoreError::TweetNotFound(id))?;
        row.tweet = tweet.to_string();
        row.author_id = author;
        Ok(())
    }

    async fn fetch_tweet(&self, id: TweetId) -> Result<Option<TweetRecord>, StoreError> {
        let tables = self.tables()?;
        Ok(tables.tweets.get(&id).map(|row| to_record(id, row)))
    }

    async fn tweets_by_author(&self, author: AuthorId) -> Result<Vec<TweetRecord>, StoreError> {
        let tables = self.tables()?;
        Ok(tables
            .tweets
            .iter()
            .filter(|(_, row)| row.author_id == author)
            .map(|(id, row)| to_record(*id, row))
            .collect())
    }

    async fn delete_tweet(&self, id: TweetId) -> Result<bool, StoreError> {
        let mut tables = self.tables()?;
        Ok(tables.tweets.remove(&id).is_some())
    }
}
