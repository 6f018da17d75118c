use serde::Deserialize;

/// Store configuration loaded from environment variables.
#[derive(Debug, Deserialize)]
pub struct StoreConfig {
    /// Database connection URL
    pub database_url: String,
    /// Whether pending migrations are applied on connect
    #[serde(default = "default_run_migrations")]
    pub run_migrations: bool,
}

impl StoreConfig {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::load(config::Environment::default())
    }

    fn load<S>(source: S) -> anyhow::Result<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let settings = config::Config::builder().add_source(source).build()?;

        let config: StoreConfig = settings.try_deserialize()?;
        Ok(config)
    }
}

fn default_run_migrations() -> bool {
    true
}
