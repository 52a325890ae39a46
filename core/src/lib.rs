#![no_std]

extern crate alloc;

use core::ops::BitOr;

pub use board::*;
pub use cell::*;
pub use config::*;
pub use error::*;
pub use game_id::*;
pub use generator::*;
pub use highlight::*;
pub use neighbors::*;
pub use session::*;
pub use types::*;

mod board;
mod cell;
mod config;
mod error;
mod game_id;
mod generator;
mod highlight;
mod neighbors;
mod session;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    Detonated,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            Detonated => true,
        }
    }
}

impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            (Detonated, _) => Detonated,
            (_, Detonated) => Detonated,
            (Revealed, _) => Revealed,
            (_, Revealed) => Revealed,
            (NoChange, NoChange) => NoChange,
        }
    }
}
