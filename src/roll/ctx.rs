use super::{die::Die, die::Generate, error::RollError, roller::Roller, slot::Slot, RResult};
use crate::common::*;

pub type DefaultRoller = rand::rngs::ThreadRng;

/// Roll budget used by [`RollContext::default`].
pub const DEFAULT_MAX_ROLLS: usize = 10_000;

/// Evaluates dice against a random source.
///
/// Each call to [`roll`](Self::roll) or [`pool`](Self::pool) is one
/// independent evaluation. With a budget, an evaluation that draws more than
/// `max_rolls` faces (counting explode and again re-rolls) fails with
/// [`RollError::TooManyRolls`] instead of running on; an unbounded context
/// keeps rolling for as long as the expression asks it to.
pub struct RollContext<R = DefaultRoller> {
    max_rolls: Option<usize>,
    rolls: usize,
    roller: R,
}

impl<R: Roller> RollContext<R> {
    pub fn new(max_rolls: Option<usize>, roller: R) -> Self {
        Self {
            max_rolls,
            rolls: 0,
            roller,
        }
    }

    pub fn new_bounded(max_rolls: usize, roller: R) -> Self {
        Self::new(Some(max_rolls), roller)
    }

    pub fn new_unbounded(roller: R) -> Self {
        Self::new(None, roller)
    }

    /// Rolls counted by the most recent evaluation.
    pub fn rolls(&self) -> usize {
        self.rolls
    }

    /// Rolls `die` once and totals its pool.
    pub fn roll(&mut self, die: &Die) -> RResult<Int> {
        self.rolls = 0;
        self.total(die)
    }

    /// Rolls `die` once and reads every slot of its pool, in pool order.
    pub fn pool(&mut self, die: &Die) -> RResult<Vec<Int>> {
        self.rolls = 0;
        let mut slots = die.generate(self)?;
        self.force_all(&mut slots)
    }

    pub(crate) fn total(&mut self, die: &Die) -> RResult<Int> {
        let mut slots = die.generate(self)?;
        sum(self.force_all(&mut slots)?)
    }

    fn force_all(&mut self, slots: &mut [Slot<'_>]) -> RResult<Vec<Int>> {
        slots.iter_mut().map(|slot| slot.force(self)).collect()
    }

    fn exceeds_budget(&self, rolls: usize) -> bool {
        self.max_rolls.map_or(false, |max| rolls > max)
    }

    pub(crate) fn count_rolls(&mut self, n: usize) -> RResult<()> {
        self.rolls = self.rolls.saturating_add(n);
        if self.exceeds_budget(self.rolls) {
            Err(RollError::TooManyRolls)
        } else {
            Ok(())
        }
    }

    /// Fails if `n` more rolls would exceed the budget, without counting them.
    pub(crate) fn reserve(&self, n: usize) -> RResult<()> {
        if self.exceeds_budget(self.rolls.saturating_add(n)) {
            Err(RollError::TooManyRolls)
        } else {
            Ok(())
        }
    }

    pub(crate) fn roll_face(&mut self, sides: Int) -> RResult<Int> {
        let sides = UInt::try_from(sides)
            .ok()
            .and_then(NonZeroUInt::new)
            .ok_or(RollError::InvalidSides(sides))?;
        self.count_rolls(1)?;
        Ok(Int::from(self.roller.roll(sides)))
    }
}

impl Default for RollContext {
    fn default() -> Self {
        Self::new(Some(DEFAULT_MAX_ROLLS), rand::thread_rng())
    }
}

pub(crate) fn sum(values: impl IntoIterator<Item = Int>) -> RResult<Int> {
    values
        .into_iter()
        .try_fold(0, |a: Int, b| a.checked_add(b).ok_or(RollError::Overflow))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roll::SequenceRoller;

    fn mock_roller() -> SequenceRoller {
        SequenceRoller::new(vec1![4, 5, 6, 1, 2, 3])
    }

    fn check(s: &str, expected: Int) {
        let die = crate::parse_expression(s).unwrap();
        let mut ctx = RollContext::new_bounded(1000, mock_roller());
        assert_eq!(ctx.roll(&die), Ok(expected), "rolling {s:?}");
    }

    fn check_pool(s: &str, expected: &[Int]) {
        let die = crate::parse_expression(s).unwrap();
        let mut ctx = RollContext::new_bounded(1000, mock_roller());
        assert_eq!(ctx.pool(&die).as_deref(), Ok(expected), "pooling {s:?}");
    }

    fn check_err(s: &str, expected: RollError) {
        let die = crate::parse_expression(s).unwrap();
        let mut ctx = RollContext::new_bounded(1000, mock_roller());
        assert_eq!(ctx.roll(&die), Err(expected), "rolling {s:?}");
    }

    #[test]
    fn test_eval_constants() {
        check("2", 2);
        check("-2", -2);
        check("--2", 2);
        check("2 + 3", 5);
        check("2 - 3", -1);
        check("2 * 3 + 1", 7);
        check("7 / 2", 3);
        check("-7 / 2", -4);
    }

    #[test]
    fn test_eval_dice() {
        check("1d6", 4);
        check("d6", 4);
        check("3d6", 4 + 5 + 6);
        check("8d6", 4 + 5 + 6 + 1 + 2 + 3 + 4 + 5);
        check("0d6", 0);
        check("2d6 - 1d6", 4 + 5 - 6);
        check_pool("2d6 + 2d6", &[4, 5, 6, 1]);
        check_pool("2d6 - 1d6", &[4, 5, -6]);
    }

    #[test]
    fn test_eval_nested_count() {
        // (1d6)d6 rolls 4 dice: 5 + 6 + 1 + 2
        check_pool("(1d6)d6", &[5, 6, 1, 2]);
    }

    #[test]
    fn test_eval_bonus() {
        check_pool("3d6+1", &[5, 6, 7]);
        check_pool("3d6-1", &[3, 4, 5]);
        check_pool("2d6*2", &[8, 10]);
        check_pool("2d6/2", &[2, 2]);
        // each slot draws its own bonus: 4+5, 6+1
        check_pool("2d6+1d6", &[9, 7]);
    }

    #[test]
    fn test_eval_multiply_divide_collapse_pool() {
        check_pool("2d6 * 2", &[18]);
        check_pool("2d6 / 2", &[4]);
    }

    #[test]
    fn test_eval_pool_matches_roll() {
        for s in ["3d6", "2K4d6", "6E2d6", "5A3d6", "4T6d6", "1d6 x 3", "2d6+1 - 1d4"] {
            let die = crate::parse_expression(s).unwrap();
            let total = RollContext::new_bounded(1000, mock_roller()).roll(&die);
            let pool = RollContext::new_bounded(1000, mock_roller()).pool(&die);
            assert_eq!(pool.and_then(sum), total, "{s:?}");
        }
    }

    #[test]
    fn test_eval_reuse_context() {
        let die = crate::parse_expression("2d6").unwrap();
        let mut ctx = RollContext::new_bounded(2, mock_roller());
        assert_eq!(ctx.pool(&die), Ok(vec![4, 5]));
        assert_eq!(ctx.rolls(), 2);
        assert_eq!(ctx.pool(&die), Ok(vec![6, 1]));
        assert_eq!(ctx.pool(&die), Ok(vec![2, 3]));
    }

    #[test]
    fn test_err_divide_by_zero() {
        check_err("1 / 0", RollError::DivideByZero);
        check_err("3d6/0", RollError::DivideByZero);
        check_err("1d6 / (1 - 1)", RollError::DivideByZero);
    }

    #[test]
    fn test_err_invalid_sides() {
        check_err("1d0", RollError::InvalidSides(0));
        check_err("1d(0 - 3)", RollError::InvalidSides(-3));
        check("0d0", 0);
    }

    #[test]
    fn test_err_too_many_rolls() {
        check_err("1001d6", RollError::TooManyRolls);
        check_err("1E1d6", RollError::TooManyRolls);
        check_err("1A1d6", RollError::TooManyRolls);
        check_err("1E5", RollError::TooManyRolls);
    }

    #[test]
    fn test_err_overflow() {
        check_err("9223372036854775807 + 1", RollError::Overflow);
        check_err("9223372036854775807 * 2", RollError::Overflow);
    }

    #[test]
    fn test_unbounded_context() {
        let die = crate::parse_expression("5000d1").unwrap();
        let mut ctx = RollContext::new_unbounded(mock_roller());
        assert_eq!(ctx.roll(&die), Ok(5000));
        assert_eq!(ctx.rolls(), 5000);
    }
}
