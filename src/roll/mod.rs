mod ctx;
mod die;
mod error;
mod roller;
mod slot;

type RResult<T> = Result<T, RollError>;

pub use ctx::{DefaultRoller, RollContext, DEFAULT_MAX_ROLLS};
pub use die::{
    Again, Bonus, Constant, Dice, Die, Divide, Explode, Generate, Keep, Multiply, Negative,
    Repeat, Subtract, Threshold,
};
pub use error::RollError;
pub use roller::{Roller, SequenceRoller};
pub use slot::{Memo, Pool, Slot};
