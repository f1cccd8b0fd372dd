use crate::common::Int;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RollError {
    #[error("too many dice rolled")]
    TooManyRolls,
    #[error("cannot divide by zero")]
    DivideByZero,
    #[error("integer overflow")]
    Overflow,
    #[error("a die cannot have {0} sides")]
    InvalidSides(Int),
}
