pub mod prelude;

pub mod author;
pub mod tweet;
