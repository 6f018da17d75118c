//! Record types for the sample twitter application.
//!
//! Records are built in memory with their `create` constructors and only become
//! durable when handed to a [`Store`].
pub mod author;
pub mod store;
pub mod tweet;
pub mod validation;

pub use author::{Author, AuthorId};
pub use store::memory::MemoryStore;
pub use store::{Store, StoreError};
pub use tweet::{Tweet, TweetId, TweetRecord};
pub use validation::ValidationError;
