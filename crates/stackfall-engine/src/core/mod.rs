pub use self::{board::*, piece::*, preview::*};

pub(crate) mod board;
pub(crate) mod piece;
pub(crate) mod preview;
