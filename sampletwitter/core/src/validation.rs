use thiserror::Error;

/// Maximum length of [`Author::first_name`](crate::Author), in characters.
pub const FIRST_NAME_MAX_LEN: usize = 30;
/// Maximum length of [`Author::last_name`](crate::Author), in characters.
pub const LAST_NAME_MAX_LEN: usize = 40;
/// Maximum length of a tweet's text, in characters.
pub const TWEET_MAX_LEN: usize = 140;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is {actual} characters long, at most {max} are allowed")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
}

/// Fails when `value` holds more than `max` characters.
pub(crate) fn check_len(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    let actual = value.chars().count();
    if actual > max {
        return Err(ValidationError::TooLong { field, max, actual });
    }
    Ok(())
}

/// Checks the bounds of both author name fields.
pub fn validate_author(first_name: &str, last_name: &str) -> Result<(), ValidationError> {
    check_len("first_name", first_name, FIRST_NAME_MAX_LEN)?;
    check_len("last_name", last_name, LAST_NAME_MAX_LEN)
}

/// Checks the bound of a tweet's text.
pub fn validate_tweet(tweet: &str) -> Result<(), ValidationError> {
    check_len("tweet", tweet, TWEET_MAX_LEN)
}
