use sampletwitter_store::{SeaOrmStore, StoreConfig};
use testcontainers_modules::testcontainers::runners::AsyncRunner;
use testcontainers_modules::{postgres, testcontainers};

pub struct TestContext {
    #[allow(dead_code)] // container is kept to ensure it's not dropped
    pub container: testcontainers::ContainerAsync<postgres::Postgres>,
    pub store: SeaOrmStore,
}

/// Starts a throwaway PostgreSQL and returns it with its connection settings.
pub async fn start_database(
    run_migrations: bool,
) -> anyhow::Result<(testcontainers::ContainerAsync<postgres::Postgres>, StoreConfig)> {
    // Allow multiple calls to init for tests.
    let _ = tracing_subscriber::fmt().try_init();
    let container = postgres::Postgres::default().start().await?;
    let host = container.get_host().await?;
    let port = container.get_host_port_ipv4(5432).await?;
    let config = StoreConfig {
        database_url: format!("postgres://postgres:postgres@{}:{}/postgres", host, port),
        run_migrations,
    };
    Ok((container, config))
}

/// Connects a migrated [`SeaOrmStore`] to a fresh database.
pub async fn setup() -> anyhow::Result<TestContext> {
    let (container, config) = start_database(true).await?;
    let store = SeaOrmStore::connect(&config).await?;
    Ok(TestContext { container, store })
}
