pub use self::{board::*, catalog::*, piece::*, shape::*};

pub(crate) mod board;
pub(crate) mod catalog;
pub(crate) mod piece;
pub(crate) mod shape;
