use std::fmt;
use std::num::NonZeroU32;
pub use vec1::vec1;

pub type Int = i64;
pub type UInt = u32;
pub type NonZeroUInt = NonZeroU32;

pub type NonEmpty<T> = vec1::Vec1<T>;

/// Every infix form of the expression grammar.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BinaryOperator {
    Dice,
    Add,
    Subtract,
    Multiply,
    Divide,
    BonusAdd,
    BonusSubtract,
    BonusMultiply,
    BonusDivide,
    ExplodeAbove,
    ExplodeUnder,
    KeepHigh,
    KeepLow,
    AgainAbove,
    AgainUnder,
    ThresholdHigh,
    ThresholdLow,
    Repeat,
}

impl BinaryOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dice => "d",
            Self::Add => " + ",
            Self::Subtract => " - ",
            Self::Multiply => " * ",
            Self::Divide => " / ",
            Self::BonusAdd => "+",
            Self::BonusSubtract => "-",
            Self::BonusMultiply => "*",
            Self::BonusDivide => "/",
            Self::ExplodeAbove => "E",
            Self::ExplodeUnder => "e",
            Self::KeepHigh => "K",
            Self::KeepLow => "k",
            Self::AgainAbove => "A",
            Self::AgainUnder => "a",
            Self::ThresholdHigh => "T",
            Self::ThresholdLow => "t",
            Self::Repeat => " x ",
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a drawn value is tested against a cutoff.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Comparison {
    /// `value >= cutoff`
    Above,
    /// `value <= cutoff`
    Under,
}

impl Comparison {
    pub fn holds(self, value: Int, cutoff: Int) -> bool {
        match self {
            Self::Above => value >= cutoff,
            Self::Under => value <= cutoff,
        }
    }
}

/// Which end of a sorted pool a keep operation retains.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Selection {
    Highest,
    Lowest,
}

/// Integer arithmetic applied to slot values and totals.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ArithmeticOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

/// Integer division rounding toward negative infinity.
///
/// Returns `None` when `rhs` is zero or the quotient overflows.
pub(crate) fn floor_div(lhs: Int, rhs: Int) -> Option<Int> {
    let quotient = lhs.checked_div(rhs)?;
    if lhs % rhs != 0 && (lhs < 0) != (rhs < 0) {
        Some(quotient - 1)
    } else {
        Some(quotient)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_div() {
        assert_eq!(floor_div(7, 2), Some(3));
        assert_eq!(floor_div(-7, 2), Some(-4));
        assert_eq!(floor_div(7, -2), Some(-4));
        assert_eq!(floor_div(-7, -2), Some(3));
        assert_eq!(floor_div(6, 3), Some(2));
        assert_eq!(floor_div(-6, 3), Some(-2));
        assert_eq!(floor_div(1, 0), None);
        assert_eq!(floor_div(Int::MIN, -1), None);
    }

    #[test]
    fn test_comparison() {
        assert!(Comparison::Above.holds(6, 6));
        assert!(!Comparison::Above.holds(5, 6));
        assert!(Comparison::Under.holds(1, 1));
        assert!(!Comparison::Under.holds(2, 1));
    }
}
