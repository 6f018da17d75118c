pub use super::author::Entity as Author;
pub use super::tweet::Entity as Tweet;
