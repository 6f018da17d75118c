use sea_orm_migration::prelude::*;
use sea_orm_migration::schema::*;

use crate::m20251017_000001_create_authors_table::Authors;

const FK_TWEETS_TO_AUTHORS: &str = "fk-tweets-author_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tweets::Table)
                    .if_not_exists()
                    .col(pk_auto(Tweets::Id))
                    .col(string_len(Tweets::Tweet, 140))
                    .col(integer(Tweets::AuthorId))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_TWEETS_TO_AUTHORS)
                            .from(Tweets::Table, Tweets::AuthorId)
                            .to(Authors::Table, Authors::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tweets::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Tweets {
    Table,
    Id,
    Tweet,
    AuthorId,
}
