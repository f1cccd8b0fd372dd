use crate::common::*;
use crate::parse::{ast::Node, visit::AstVisitor};
use crate::roll::Die;

/// Lowers a parsed expression into the die it describes.
pub fn compile(node: &Node) -> Die {
    Compiler.visit(node)
}

pub struct Compiler;

impl AstVisitor for Compiler {
    type Output = Die;

    fn visit_constant(&mut self, x: Int) -> Die {
        Die::constant(x)
    }

    fn visit_negative(&mut self, x: &Node) -> Die {
        Die::negative(self.visit(x))
    }

    fn visit_binary(&mut self, l: &Node, op: BinaryOperator, r: &Node) -> Die {
        use BinaryOperator::*;

        let l = self.visit(l);
        let r = self.visit(r);
        match op {
            Dice => Die::dice(l, r),
            Add => Die::add(l, r),
            Subtract => Die::subtract(l, r),
            Multiply => Die::multiply(l, r),
            Divide => Die::divide(l, r),
            BonusAdd => Die::bonus_add(l, r),
            BonusSubtract => Die::bonus_subtract(l, r),
            BonusMultiply => Die::bonus_multiply(l, r),
            BonusDivide => Die::bonus_divide(l, r),
            ExplodeAbove => Die::explode_above(l, r),
            ExplodeUnder => Die::explode_under(l, r),
            KeepHigh => Die::keep_high(l, r),
            KeepLow => Die::keep_low(l, r),
            AgainAbove => Die::again_above(l, r),
            AgainUnder => Die::again_under(l, r),
            ThresholdHigh => Die::threshold_high(l, r),
            ThresholdLow => Die::threshold_low(l, r),
            Repeat => Die::repeat(l, r),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse;

    fn c(n: Int) -> Die {
        Die::constant(n)
    }

    fn d(count: Int, sides: Int) -> Die {
        Die::dice(c(count), c(sides))
    }

    fn check(s: &str, expected: Die) {
        let node = parse(s).unwrap();
        assert_eq!(compile(&node), expected, "compiling {s:?}");
    }

    #[test]
    fn test_compile_primaries() {
        check("4", c(4));
        check("-4", Die::negative(c(4)));
        check("1d6", d(1, 6));
        check("d6", d(1, 6));
    }

    #[test]
    fn test_compile_arithmetic() {
        check("1d6 + 2", Die::add(d(1, 6), c(2)));
        check("1d6 - 2", Die::subtract(d(1, 6), c(2)));
        check("1d6 * 2", Die::multiply(d(1, 6), c(2)));
        check("1d6 / 2", Die::divide(d(1, 6), c(2)));
        check("1d6+2", Die::bonus_add(d(1, 6), c(2)));
        check("1d6-2", Die::bonus_subtract(d(1, 6), c(2)));
        check("1d6*2", Die::bonus_multiply(d(1, 6), c(2)));
        check("1d6/2", Die::bonus_divide(d(1, 6), c(2)));
    }

    #[test]
    fn test_compile_dice_operators() {
        check("6E1d6", Die::explode_above(c(6), d(1, 6)));
        check("1e1d6", Die::explode_under(c(1), d(1, 6)));
        check("3K4d6", Die::keep_high(c(3), d(4, 6)));
        check("1k2d20", Die::keep_low(c(1), d(2, 20)));
        check("10A3d10", Die::again_above(c(10), d(3, 10)));
        check("1a3d10", Die::again_under(c(1), d(3, 10)));
        check("5T4d10", Die::threshold_high(c(5), d(4, 10)));
        check("2t4d10", Die::threshold_low(c(2), d(4, 10)));
        check("1d6 x 3", Die::repeat(d(1, 6), c(3)));
    }

    #[test]
    fn test_compile_nested() {
        check(
            "(1d4)d6 + 2d8+1",
            Die::add(
                Die::dice(d(1, 4), c(6)),
                Die::bonus_add(d(2, 8), c(1)),
            ),
        );
        check("1d2d3", Die::dice(c(1), d(2, 3)));
    }
}
