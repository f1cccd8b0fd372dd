use crate::parse::ParseError;
use crate::roll::RollError;

/// Anything that can go wrong between reading an expression and rolling it.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Roll(#[from] RollError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
