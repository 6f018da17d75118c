use crate::config::StoreConfig;
use crate::entities::*;
use async_trait::async_trait;
use migration::{Migrator, MigratorTrait};
use sampletwitter_core::validation::{validate_author, validate_tweet};
use sampletwitter_core::{Author, AuthorId, Store, StoreError, TweetId, TweetRecord};
use sea_orm::*;

/// A [`Store`] backed by a relational database through sea-orm.
///
/// Length bounds are checked before every write; the foreign key from `tweets`
/// to `authors` enforces referential integrity and cascades author deletion.
#[derive(Debug, Clone)]
pub struct SeaOrmStore {
    db: DatabaseConnection,
}

impl From<author::Model> for Author {
    fn from(model: author::Model) -> Self {
        Author::with_id(AuthorId(model.id), model.first_name, model.last_name)
    }
}

impl From<tweet::Model> for TweetRecord {
    fn from(model: tweet::Model) -> Self {
        TweetRecord {
            id: TweetId(model.id),
            tweet: model.tweet,
            author_id: AuthorId(model.author_id),
        }
    }
}

impl SeaOrmStore {
    pub fn new(db: DatabaseConnection) -> Self {
        SeaOrmStore { db }
    }

    /// Connects to the configured database, applying pending migrations unless
    /// disabled.
    #[tracing::instrument(skip(config))]
    pub async fn connect(config: &StoreConfig) -> anyhow::Result<Self> {
        let db = Database::connect(&config.database_url).await?;
        if config.run_migrations {
            Migrator::up(&db, None).await?;
            tracing::info!("Applied pending migrations");
        }
        Ok(SeaOrmStore::new(db))
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

/// Maps a rejected foreign key to [`StoreError::MissingAuthor`].
fn tweet_write_error(err: DbErr, author: AuthorId) -> StoreError {
    match err.sql_err() {
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
            tracing::warn!("Rejected tweet for unknown author {}", author);
            StoreError::MissingAuthor(author)
        }
        _ => StoreError::backend(err),
    }
}

/// Maps an update that matched no row, because the row was deleted after it
/// was read, to `not_found`.
fn update_error(err: DbErr, not_found: StoreError) -> StoreError {
    match err {
        DbErr::RecordNotUpdated => not_found,
        err => StoreError::backend(err),
    }
}

/// Like [`update_error`], but also maps a rejected foreign key.
fn tweet_update_error(err: DbErr, id: TweetId, author: AuthorId) -> StoreError {
    match err {
        DbErr::RecordNotUpdated => StoreError::TweetNotFound(id),
        err => tweet_write_error(err, author),
    }
}

#[async_trait]
impl Store for SeaOrmStore {
    #[tracing::instrument(skip(self))]
    async fn insert_author(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<AuthorId, StoreError> {
        validate_author(first_name, last_name)?;
        let active_model = author::ActiveModel {
            first_name: ActiveValue::Set(first_name.to_string()),
            last_name: ActiveValue::Set(last_name.to_string()),
            ..Default::default()
        };
        let created_model = active_model
            .insert(&self.db)
            .await
            .map_err(StoreError::backend)?;
        Ok(AuthorId(created_model.id))
    }

    #[tracing::instrument(skip(self))]
    async fn update_author(
        &self,
        id: AuthorId,
        first_name: &str,
        last_name: &str,
    ) -> Result<(), StoreError> {
        validate_author(first_name, last_name)?;
        let author_to_update = author::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(StoreError::backend)?
            .ok_or(StoreError::AuthorNotFound(id))?;

        let mut active_model: author::ActiveModel = author_to_update.into();
        active_model.first_name = ActiveValue::Set(first_name.to_string());
        active_model.last_name = ActiveValue::Set(last_name.to_string());
        active_model
            .update(&self.db)
            .await
            .map_err(|err| update_error(err, StoreError::AuthorNotFound(id)))?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_author(&self, id: AuthorId) -> Result<Option<Author>, StoreError> {
        let author_model = author::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(StoreError::backend)?;
        Ok(author_model.map(Author::from))
    }

    #[tracing::instrument(skip(self))]
    async fn delete_author(&self, id: AuthorId) -> Result<bool, StoreError> {
        let result = author::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .map_err(StoreError::backend)?;
        Ok(result.rows_affected > 0)
    }

    #[tracing::instrument(skip(self))]
    async fn insert_tweet(&self, tweet: &str, author: AuthorId) -> Result<TweetId, StoreError> {
        validate_tweet(tweet)?;
        let active_model = tweet::ActiveModel {
            tweet: ActiveValue::Set(tweet.to_string()),
            author_id: ActiveValue::Set(author.0),
            ..Default::default()
        };
        let created_model = active_model
            .insert(&self.db)
            .await
            .map_err(|err| tweet_write_error(err, author))?;
        Ok(TweetId(created_model.id))
    }

    #[tracing::instrument(skip(self))]
    async fn update_tweet(
        &self,
        id: TweetId,
        tweet: &str,
        author: AuthorId,
    ) -> Result<(), StoreError> {
        validate_tweet(tweet)?;
        let tweet_to_update = tweet::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(StoreError::backend)?
            .ok_or(StoreError::TweetNotFound(id))?;

        let mut active_model: tweet::ActiveModel = tweet_to_update.into();
        active_model.tweet = ActiveValue::Set(tweet.to_string());
        active_model.author_id = ActiveValue::Set(author.0);
        active_model
            .update(&self.db)
            .await
            .map_err(|err| tweet_update_error(err, id, author))?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_tweet(&self, id: TweetId) -> Result<Option<TweetRecord>, StoreError> {
        let tweet_model = tweet::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(StoreError::backend)?;
        Ok(tweet_model.map(TweetRecord::from))
    }

    #[tracing::instrument(skip(self))]
    async fn tweets_by_author(&self, author: AuthorId) -> Result<Vec<TweetRecord>, StoreError> {
        let tweets = tweet::Entity::find()
            .filter(tweet::Column::AuthorId.eq(author.0))
            .order_by_asc(tweet::Column::Id)
            .all(&self.db)
            .await
            .map_err(StoreError::backend)?
            .into_iter()
            .map(TweetRecord::from)
            .collect();
        Ok(tweets)
    }

    #[tracing::instrument(skip(self))]
    async fn delete_tweet(&self, id: TweetId) -> Result<bool, StoreError> {
        let result = tweet::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .map_err(StoreError::backend)?;
        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vanished_author_row_is_reported_as_not_found() {
        let err = update_error(DbErr::RecordNotUpdated, StoreError::AuthorNotFound(AuthorId(3)));

        assert!(matches!(err, StoreError::AuthorNotFound(AuthorId(3))));
    }

    #[test]
    fn vanished_tweet_row_is_reported_as_not_found() {
        let err = tweet_update_error(DbErr::RecordNotUpdated, TweetId(8), AuthorId(3));

        assert!(matches!(err, StoreError::TweetNotFound(TweetId(8))));
    }

    #[test]
    fn other_update_failures_stay_backend_errors() {
        let err = update_error(
            DbErr::Custom("connection reset".to_string()),
            StoreError::AuthorNotFound(AuthorId(3)),
        );
        let tweet_err = tweet_update_error(
            DbErr::Custom("connection reset".to_string()),
            TweetId(8),
            AuthorId(3),
        );

        assert!(matches!(err, StoreError::Backend(_)));
        assert!(matches!(tweet_err, StoreError::Backend(_)));
    }
}
