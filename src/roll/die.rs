use super::{
    ctx::RollContext,
    roller::Roller,
    slot::{apply, Pool, Slot},
    RResult,
};
use crate::common::*;

/// Builds a fresh [`Pool`] for one roll.
///
/// Generating a die draws only what is needed to decide the shape of the
/// pool (dice counts, sides, cutoffs); the slots themselves draw when forced.
#[enum_dispatch::enum_dispatch]
pub trait Generate {
    fn generate<'a, R: Roller>(&'a self, ctx: &mut RollContext<R>) -> RResult<Pool<'a>>;
}

/// A compiled dice expression.
#[derive(Debug, Clone, Eq, PartialEq)]
#[enum_dispatch::enum_dispatch(Generate)]
pub enum Die {
    Constant(Constant),
    Dice(Dice),
    Add(Add),
    Subtract(Subtract),
    Multiply(Multiply),
    Divide(Divide),
    Negative(Negative),
    Bonus(Bonus),
    Explode(Explode),
    Keep(Keep),
    Again(Again),
    Threshold(Threshold),
    Repeat(Repeat),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Constant(pub Int);

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Dice {
    pub count: Box<Die>,
    pub sides: Box<Die>,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Add {
    pub left: Box<Die>,
    pub right: Box<Die>,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Subtract {
    pub left: Box<Die>,
    pub right: Box<Die>,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Multiply {
    pub left: Box<Die>,
    pub right: Box<Die>,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Divide {
    pub left: Box<Die>,
    pub right: Box<Die>,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Negative(pub Box<Die>);

/// Applies a fresh total of `bonus` to every slot of `body`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Bonus {
    pub op: ArithmeticOperator,
    pub body: Box<Die>,
    pub bonus: Box<Die>,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Explode {
    pub cmp: Comparison,
    pub cutoff: Box<Die>,
    pub body: Box<Die>,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Keep {
    pub selection: Selection,
    pub count: Box<Die>,
    pub body: Box<Die>,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Again {
    pub cmp: Comparison,
    pub cutoff: Box<Die>,
    pub body: Box<Die>,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Threshold {
    pub cmp: Comparison,
    pub cutoff: Box<Die>,
    pub body: Box<Die>,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Repeat {
    pub body: Box<Die>,
    pub count: Box<Die>,
}

/// Reads a rolled total as a number of things, where anything below one is none.
fn count(n: Int) -> usize {
    if n <= 0 {
        0
    } else {
        usize::try_from(n).unwrap_or(usize::MAX)
    }
}

impl Generate for Constant {
    fn generate<'a, R: Roller>(&'a self, _: &mut RollContext<R>) -> RResult<Pool<'a>> {
        Ok(vec![Slot::Fixed(self.0)])
    }
}

impl Generate for Dice {
    fn generate<'a, R: Roller>(&'a self, ctx: &mut RollContext<R>) -> RResult<Pool<'a>> {
        let n = count(ctx.total(&self.count)?);
        let sides = ctx.total(&self.sides)?;
        ctx.reserve(n)?;
        Ok(vec![Slot::Face(sides); n])
    }
}

impl Generate for Add {
    fn generate<'a, R: Roller>(&'a self, ctx: &mut RollContext<R>) -> RResult<Pool<'a>> {
        let mut pool = self.left.generate(ctx)?;
        pool.extend(self.right.generate(ctx)?);
        Ok(pool)
    }
}

impl Generate for Subtract {
    fn generate<'a, R: Roller>(&'a self, ctx: &mut RollContext<R>) -> RResult<Pool<'a>> {
        let mut pool = self.left.generate(ctx)?;
        pool.extend(self.right.generate(ctx)?.into_iter().map(Slot::negative));
        Ok(pool)
    }
}

impl Generate for Multiply {
    fn generate<'a, R: Roller>(&'a self, ctx: &mut RollContext<R>) -> RResult<Pool<'a>> {
        let left = ctx.total(&self.left)?;
        let right = ctx.total(&self.right)?;
        Ok(vec![Slot::Fixed(apply(ArithmeticOperator::Multiply, left, right)?)])
    }
}

impl Generate for Divide {
    fn generate<'a, R: Roller>(&'a self, ctx: &mut RollContext<R>) -> RResult<Pool<'a>> {
        let left = ctx.total(&self.left)?;
        let right = ctx.total(&self.right)?;
        Ok(vec![Slot::Fixed(apply(ArithmeticOperator::Divide, left, right)?)])
    }
}

impl Generate for Negative {
    fn generate<'a, R: Roller>(&'a self, ctx: &mut RollContext<R>) -> RResult<Pool<'a>> {
        Ok(self.0.generate(ctx)?.into_iter().map(Slot::negative).collect())
    }
}

impl Generate for Bonus {
    fn generate<'a, R: Roller>(&'a self, ctx: &mut RollContext<R>) -> RResult<Pool<'a>> {
        let pool = self.body.generate(ctx)?;
        Ok(pool
            .into_iter()
            .map(|slot| Slot::Bonus {
                slot: Box::new(slot),
                op: self.op,
                bonus: self.bonus.as_ref(),
            })
            .collect())
    }
}

impl Generate for Explode {
    fn generate<'a, R: Roller>(&'a self, ctx: &mut RollContext<R>) -> RResult<Pool<'a>> {
        let cutoff = ctx.total(&self.cutoff)?;
        let pool = self.body.generate(ctx)?;
        Ok(pool
            .into_iter()
            .map(|slot| Slot::Explode {
                slot: Box::new(slot),
                cmp: self.cmp,
                cutoff,
            })
            .collect())
    }
}

impl Generate for Keep {
    fn generate<'a, R: Roller>(&'a self, ctx: &mut RollContext<R>) -> RResult<Pool<'a>> {
        let n = count(ctx.total(&self.count)?);
        let mut drawn = Vec::new();
        for mut slot in self.body.generate(ctx)? {
            let value = slot.force(ctx)?;
            drawn.push((value, slot));
        }

        // stable, so equal draws keep their pool order
        match self.selection {
            Selection::Highest => drawn.sort_by(|(a, _), (b, _)| b.cmp(a)),
            Selection::Lowest => drawn.sort_by(|(a, _), (b, _)| a.cmp(b)),
        }
        drawn.truncate(n);

        Ok(drawn
            .into_iter()
            .map(|(value, slot)| Slot::drawn(value, slot))
            .collect())
    }
}

impl Generate for Again {
    fn generate<'a, R: Roller>(&'a self, ctx: &mut RollContext<R>) -> RResult<Pool<'a>> {
        let cutoff = ctx.total(&self.cutoff)?;
        let mut pool = Vec::new();
        let mut generation = self.body.generate(ctx)?;

        while !generation.is_empty() {
            let mut next = Vec::new();
            for mut slot in generation {
                let value = slot.force(ctx)?;
                if self.cmp.holds(value, cutoff) {
                    // A forced slot has no memo left, so the copy draws afresh.
                    ctx.count_rolls(1)?;
                    next.push(slot.clone());
                }
                pool.push(Slot::drawn(value, slot));
            }
            generation = next;
        }

        Ok(pool)
    }
}

impl Generate for Threshold {
    fn generate<'a, R: Roller>(&'a self, ctx: &mut RollContext<R>) -> RResult<Pool<'a>> {
        let cutoff = ctx.total(&self.cutoff)?;
        let pool = self.body.generate(ctx)?;
        Ok(pool
            .into_iter()
            .map(|slot| Slot::Threshold {
                slot: Box::new(slot),
                cmp: self.cmp,
                cutoff,
            })
            .collect())
    }
}

impl Generate for Repeat {
    fn generate<'a, R: Roller>(&'a self, ctx: &mut RollContext<R>) -> RResult<Pool<'a>> {
        let n = count(ctx.total(&self.count)?);
        ctx.reserve(n)?;
        let mut pool = Vec::new();
        for _ in 0..n {
            pool.extend(self.body.generate(ctx)?);
        }
        Ok(pool)
    }
}

impl Die {
    pub fn constant(n: Int) -> Self {
        Constant(n).into()
    }

    pub fn dice(count: Die, sides: Die) -> Self {
        Dice {
            count: Box::new(count),
            sides: Box::new(sides),
        }
        .into()
    }

    pub fn add(left: Die, right: Die) -> Self {
        Add {
            left: Box::new(left),
            right: Box::new(right),
        }
        .into()
    }

    pub fn subtract(left: Die, right: Die) -> Self {
        Subtract {
            left: Box::new(left),
            right: Box::new(right),
        }
        .into()
    }

    pub fn multiply(left: Die, right: Die) -> Self {
        Multiply {
            left: Box::new(left),
            right: Box::new(right),
        }
        .into()
    }

    pub fn divide(left: Die, right: Die) -> Self {
        Divide {
            left: Box::new(left),
            right: Box::new(right),
        }
        .into()
    }

    pub fn negative(die: Die) -> Self {
        Negative(Box::new(die)).into()
    }

    pub fn bonus(op: ArithmeticOperator, body: Die, bonus: Die) -> Self {
        Bonus {
            op,
            body: Box::new(body),
            bonus: Box::new(bonus),
        }
        .into()
    }

    pub fn bonus_add(body: Die, bonus: Die) -> Self {
        Self::bonus(ArithmeticOperator::Add, body, bonus)
    }

    pub fn bonus_subtract(body: Die, bonus: Die) -> Self {
        Self::bonus(ArithmeticOperator::Subtract, body, bonus)
    }

    pub fn bonus_multiply(body: Die, bonus: Die) -> Self {
        Self::bonus(ArithmeticOperator::Multiply, body, bonus)
    }

    pub fn bonus_divide(body: Die, bonus: Die) -> Self {
        Self::bonus(ArithmeticOperator::Divide, body, bonus)
    }

    pub fn explode(cmp: Comparison, cutoff: Die, body: Die) -> Self {
        Explode {
            cmp,
            cutoff: Box::new(cutoff),
            body: Box::new(body),
        }
        .into()
    }

    pub fn explode_above(cutoff: Die, body: Die) -> Self {
        Self::explode(Comparison::Above, cutoff, body)
    }

    pub fn explode_under(cutoff: Die, body: Die) -> Self {
        Self::explode(Comparison::Under, cutoff, body)
    }

    pub fn keep(selection: Selection, count: Die, body: Die) -> Self {
        Keep {
            selection,
            count: Box::new(count),
            body: Box::new(body),
        }
        .into()
    }

    pub fn keep_high(count: Die, body: Die) -> Self {
        Self::keep(Selection::Highest, count, body)
    }

    pub fn keep_low(count: Die, body: Die) -> Self {
        Self::keep(Selection::Lowest, count, body)
    }

    pub fn again(cmp: Comparison, cutoff: Die, body: Die) -> Self {
        Again {
            cmp,
            cutoff: Box::new(cutoff),
            body: Box::new(body),
        }
        .into()
    }

    pub fn again_above(cutoff: Die, body: Die) -> Self {
        Self::again(Comparison::Above, cutoff, body)
    }

    pub fn again_under(cutoff: Die, body: Die) -> Self {
        Self::again(Comparison::Under, cutoff, body)
    }

    pub fn threshold(cmp: Comparison, cutoff: Die, body: Die) -> Self {
        Threshold {
            cmp,
            cutoff: Box::new(cutoff),
            body: Box::new(body),
        }
        .into()
    }

    pub fn threshold_high(cutoff: Die, body: Die) -> Self {
        Self::threshold(Comparison::Above, cutoff, body)
    }

    pub fn threshold_low(cutoff: Die, body: Die) -> Self {
        Self::threshold(Comparison::Under, cutoff, body)
    }

    pub fn repeat(body: Die, count: Die) -> Self {
        Repeat {
            body: Box::new(body),
            count: Box::new(count),
        }
        .into()
    }
}
