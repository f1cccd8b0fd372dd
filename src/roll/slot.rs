use super::{ctx::RollContext, die::Die, error::RollError, roller::Roller, RResult};
use crate::common::*;
use std::mem;

/// The result of one roll of a die: its slots, in order.
pub type Pool<'a> = Vec<Slot<'a>>;

/// A value drawn ahead of time by `keep` or `again`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Memo {
    Resolved(Int),
    Spent,
}

/// A lazily evaluated value inside a [`Pool`].
///
/// Forcing a slot performs whatever draws it needs. Forcing it again draws
/// again, except for a [`Slot::Drawn`] slot, whose first force hands back the
/// value drawn when the pool was built.
#[derive(Debug, Clone)]
pub enum Slot<'a> {
    Fixed(Int),
    Face(Int),
    Negative(Box<Slot<'a>>),
    Bonus {
        slot: Box<Slot<'a>>,
        op: ArithmeticOperator,
        bonus: &'a Die,
    },
    Explode {
        slot: Box<Slot<'a>>,
        cmp: Comparison,
        cutoff: Int,
    },
    Threshold {
        slot: Box<Slot<'a>>,
        cmp: Comparison,
        cutoff: Int,
    },
    Drawn {
        memo: Memo,
        slot: Box<Slot<'a>>,
    },
}

impl<'a> Slot<'a> {
    pub fn negative(slot: Slot<'a>) -> Self {
        Self::Negative(Box::new(slot))
    }

    pub fn drawn(value: Int, slot: Slot<'a>) -> Self {
        Self::Drawn {
            memo: Memo::Resolved(value),
            slot: Box::new(slot),
        }
    }

    pub fn force<R: Roller>(&mut self, ctx: &mut RollContext<R>) -> RResult<Int> {
        match self {
            Self::Fixed(value) => Ok(*value),
            Self::Face(sides) => ctx.roll_face(*sides),
            Self::Negative(slot) => slot.force(ctx)?.checked_neg().ok_or(RollError::Overflow),
            Self::Bonus { slot, op, bonus } => {
                let value = slot.force(ctx)?;
                let bonus = ctx.total(*bonus)?;
                apply(*op, value, bonus)
            }
            Self::Explode { slot, cmp, cutoff } => {
                let mut last = slot.force(ctx)?;
                let mut total = last;
                while cmp.holds(last, *cutoff) {
                    ctx.count_rolls(1)?;
                    last = slot.force(ctx)?;
                    total = total.checked_add(last).ok_or(RollError::Overflow)?;
                }
                Ok(total)
            }
            Self::Threshold { slot, cmp, cutoff } => {
                let value = slot.force(ctx)?;
                Ok(Int::from(cmp.holds(value, *cutoff)))
            }
            Self::Drawn { memo, slot } => match mem::replace(memo, Memo::Spent) {
                Memo::Resolved(value) => Ok(value),
                Memo::Spent => slot.force(ctx),
            },
        }
    }
}

pub(crate) fn apply(op: ArithmeticOperator, lhs: Int, rhs: Int) -> RResult<Int> {
    let result = match op {
        ArithmeticOperator::Add => lhs.checked_add(rhs),
        ArithmeticOperator::Subtract => lhs.checked_sub(rhs),
        ArithmeticOperator::Multiply => lhs.checked_mul(rhs),
        ArithmeticOperator::Divide if rhs == 0 => return Err(RollError::DivideByZero),
        ArithmeticOperator::Divide => floor_div(lhs, rhs),
    };
    result.ok_or(RollError::Overflow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roll::SequenceRoller;

    fn ctx() -> RollContext<SequenceRoller> {
        RollContext::new_bounded(100, SequenceRoller::new(vec1![2, 6, 6, 3, 1]))
    }

    #[test]
    fn test_face_draws_on_every_force() {
        let mut ctx = ctx();
        let mut slot = Slot::Face(6);
        assert_eq!(slot.force(&mut ctx), Ok(2));
        assert_eq!(slot.force(&mut ctx), Ok(6));
        assert_eq!(ctx.rolls(), 2);
    }

    #[test]
    fn test_drawn_returns_memo_once() {
        let mut ctx = ctx();
        let mut slot = Slot::drawn(5, Slot::Face(6));
        assert_eq!(slot.force(&mut ctx), Ok(5));
        assert_eq!(ctx.rolls(), 0);
        assert_eq!(slot.force(&mut ctx), Ok(2));
        assert_eq!(slot.force(&mut ctx), Ok(6));
    }

    #[test]
    fn test_explode_accumulates() {
        let mut ctx = ctx();
        // 2, then 6 + 6 + 3
        let mut slot = Slot::Explode {
            slot: Box::new(Slot::Face(6)),
            cmp: Comparison::Above,
            cutoff: 6,
        };
        assert_eq!(slot.force(&mut ctx), Ok(2));
        assert_eq!(slot.force(&mut ctx), Ok(15));
    }

    #[test]
    fn test_explode_under() {
        let mut ctx = ctx();
        // 2 + 6
        let mut slot = Slot::Explode {
            slot: Box::new(Slot::Face(6)),
            cmp: Comparison::Under,
            cutoff: 2,
        };
        assert_eq!(slot.force(&mut ctx), Ok(8));
    }

    #[test]
    fn test_threshold() {
        let mut ctx = ctx();
        let mut slot = Slot::Threshold {
            slot: Box::new(Slot::Face(6)),
            cmp: Comparison::Above,
            cutoff: 5,
        };
        assert_eq!(slot.force(&mut ctx), Ok(0));
        assert_eq!(slot.force(&mut ctx), Ok(1));

        let mut slot = Slot::Threshold {
            slot: Box::new(Slot::Fixed(3)),
            cmp: Comparison::Under,
            cutoff: 3,
        };
        assert_eq!(slot.force(&mut ctx), Ok(1));
    }

    #[test]
    fn test_negative_overflow() {
        let mut ctx = ctx();
        let mut slot = Slot::negative(Slot::Fixed(Int::MIN));
        assert_eq!(slot.force(&mut ctx), Err(RollError::Overflow));
    }

    #[test]
    fn test_apply() {
        assert_eq!(apply(ArithmeticOperator::Add, 2, 3), Ok(5));
        assert_eq!(apply(ArithmeticOperator::Subtract, 2, 3), Ok(-1));
        assert_eq!(apply(ArithmeticOperator::Multiply, 2, 3), Ok(6));
        assert_eq!(apply(ArithmeticOperator::Divide, -3, 2), Ok(-2));
        assert_eq!(apply(ArithmeticOperator::Divide, 3, 0), Err(RollError::DivideByZero));
        assert_eq!(apply(ArithmeticOperator::Add, Int::MAX, 1), Err(RollError::Overflow));
    }
}
