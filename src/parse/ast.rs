use crate::common::*;
use std::fmt;

/// A parsed dice expression. Children are owned exclusively by their parent.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Node {
    Constant(Int),
    Negative(Box<Node>),
    Binary(Box<Node>, BinaryOperator, Box<Node>),
}

impl Node {
    pub fn new_constant(x: Int) -> Self {
        Self::Constant(x)
    }

    pub fn new_negative(x: Node) -> Self {
        Self::Negative(Box::new(x))
    }

    pub fn new_binary(op: BinaryOperator, l: Node, r: Node) -> Self {
        Self::Binary(Box::new(l), op, Box::new(r))
    }
}

/// Writes the tree back as expression text, parenthesising every compound
/// node so the grouping is explicit: `2d6 + 1d4+1` becomes `((2d6) + ((1d4)+1))`.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(x) => write!(f, "{}", x),
            Self::Negative(x) => write!(f, "(-{})", x),
            Self::Binary(l, op, r) => write!(f, "({}{}{})", l, op, r),
        }
    }
}
