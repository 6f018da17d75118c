//! PostgreSQL persistence for the sample twitter records, built on sea-orm.
pub mod config;
pub mod entities;
pub mod sea_orm_store;

pub use self::config::StoreConfig;
pub use self::sea_orm_store::SeaOrmStore;
