use core::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::{Builder, Uuid};

/// Random per-game identifier, a version 4 UUID.
///
/// Carries no gameplay meaning; a new id tells the presentation layer to drop
/// everything it holds for the previous game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(Uuid);

impl GameId {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut bytes = [0u8; 16];
        rng.fill_bytes(&mut bytes);
        Self(Builder::from_random_bytes(bytes).into_uuid())
    }

    #[cfg(feature = "std")]
    pub fn new_random() -> Self {
        Self::generate(&mut rand::rng())
    }

    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}
