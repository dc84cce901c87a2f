//! Field rules checked against the raw request body before it is typed, so
//! that a value of the wrong JSON type fails the rule instead of the parser.

use serde_json::{Map, Value};
use thiserror::Error;

pub type Body = Map<String, Value>;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Band name must be at least 2 characters")]
    BandName,
    #[error("Genre is required")]
    Genre,
    #[error("Description must be at least 10 characters")]
    Description,
    #[error("Formation year must be a valid year after 1900")]
    FormedYear,

    #[error("Rating must be an integer between 1 and 5")]
    Rating,
    #[error("Comment must be at least 10 characters")]
    Comment,
    #[error("Valid user_id is required")]
    UserId,
    #[error("Valid show_id is required")]
    ShowId,
}

const MIN_BAND_NAME: usize = 2;
const MIN_TEXT: usize = 10;
const MIN_FORMED_YEAR: i64 = 1900;

fn long_enough(value: Option<&Value>, min: usize) -> bool {
    value
        .and_then(Value::as_str)
        .map_or(false, |s| s.trim().chars().count() >= min)
}

fn rating(value: &Value) -> bool {
    value.as_i64().map_or(false, |r| (1..=5).contains(&r))
}

fn reference(value: Option<&Value>) -> bool {
    value.and_then(Value::as_i64).map_or(false, |id| id != 0)
}

pub fn new_band(body: &Body) -> Result<(), ValidationError> {
    if !long_enough(body.get("name"), MIN_BAND_NAME) {
        return Err(ValidationError::BandName);
    }
    if !body
        .get("genre")
        .and_then(Value::as_str)
        .map_or(false, |g| !g.is_empty())
    {
        return Err(ValidationError::Genre);
    }
    if !long_enough(body.get("description"), MIN_TEXT) {
        return Err(ValidationError::Description);
    }
    if !body
        .get("formed_year")
        .and_then(Value::as_i64)
        .map_or(false, |y| y >= MIN_FORMED_YEAR)
    {
        return Err(ValidationError::FormedYear);
    }
    Ok(())
}

pub fn new_review(body: &Body) -> Result<(), ValidationError> {
    if !body.get("rating").map_or(false, rating) {
        return Err(ValidationError::Rating);
    }
    if !long_enough(body.get("comment"), MIN_TEXT) {
        return Err(ValidationError::Comment);
    }
    if !reference(body.get("user_id")) {
        return Err(ValidationError::UserId);
    }
    if !reference(body.get("show_id")) {
        return Err(ValidationError::ShowId);
    }
    Ok(())
}

/// Only the fields present in the patch are checked.
pub fn review_patch(body: &Body) -> Result<(), ValidationError> {
    if let Some(value) = body.get("rating") {
        if !rating(value) {
            return Err(ValidationError::Rating);
        }
    }
    if body.contains_key("comment") && !long_enough(body.get("comment"), MIN_TEXT) {
        return Err(ValidationError::Comment);
    }
    Ok(())
}
