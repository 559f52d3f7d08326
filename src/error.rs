use std::num::ParseIntError;

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("out of range: {0}")]
    InvalidRange(String),

    #[error("invalid duration: {0}")]
    InvalidDuration(String),

    #[error("combinator needs at least one child")]
    EmptyCombinator,

    #[error("unknown name: {0}")]
    UnknownName(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    IntParse(#[from] ParseIntError),
}
