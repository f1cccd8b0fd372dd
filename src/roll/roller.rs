use crate::common::{NonEmpty, NonZeroUInt, UInt};
use rand::Rng;

/// A source of die faces.
pub trait Roller {
    /// Returns a face in `1..=sides`.
    fn roll(&mut self, sides: NonZeroUInt) -> UInt;
}

impl<R: Rng> Roller for R {
    fn roll(&mut self, sides: NonZeroUInt) -> UInt {
        self.gen_range(1..=sides.get())
    }
}

/// Replays a fixed list of faces in order, starting over when it runs out.
///
/// A face larger than the die being rolled wraps around, so `7` on a d6 is
/// a `1`; zero is read as `1`.
#[derive(Debug, Clone)]
pub struct SequenceRoller {
    faces: NonEmpty<UInt>,
    next: usize,
}

impl SequenceRoller {
    pub fn new(faces: NonEmpty<UInt>) -> Self {
        Self { faces, next: 0 }
    }
}

impl Roller for SequenceRoller {
    fn roll(&mut self, sides: NonZeroUInt) -> UInt {
        let face = self.faces[self.next % self.faces.len()];
        self.next += 1;
        (face.max(1) - 1) % sides.get() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::vec1;
    use rand::{rngs::StdRng, SeedableRng};

    fn sides(n: UInt) -> NonZeroUInt {
        NonZeroUInt::new(n).unwrap()
    }

    #[test]
    fn test_sequence_roller_cycles() {
        let mut roller = SequenceRoller::new(vec1![3, 6, 1]);
        let rolled: Vec<_> = (0..5).map(|_| roller.roll(sides(6))).collect();
        assert_eq!(rolled, vec![3, 6, 1, 3, 6]);
    }

    #[test]
    fn test_sequence_roller_wraps_faces() {
        let mut roller = SequenceRoller::new(vec1![7, 0, 4]);
        assert_eq!(roller.roll(sides(6)), 1);
        assert_eq!(roller.roll(sides(6)), 1);
        assert_eq!(roller.roll(sides(2)), 2);
    }

    #[test]
    fn test_rng_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let face = rng.roll(sides(4));
            assert!((1..=4).contains(&face));
        }
        assert_eq!(rng.roll(sides(1)), 1);
    }
}
