use alloc::string::String;
use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::GameError;

/// Single coordinate axis used for board rows, columns, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional size or position as `(rows, cols)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Identity of one grid position.
///
/// The canonical textual key is `"row,col"`, which is also how the id is
/// serialized.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct CellId {
    pub row: Coord,
    pub col: Coord,
}

impl CellId {
    pub const fn new(row: Coord, col: Coord) -> Self {
        Self { row, col }
    }

    pub const fn coords(self) -> Coord2 {
        (self.row, self.col)
    }

    /// Whether this id names a position inside a board of `size`.
    pub const fn is_within(self, (rows, cols): Coord2) -> bool {
        self.row < rows && self.col < cols
    }
}

impl From<Coord2> for CellId {
    fn from((row, col): Coord2) -> Self {
        Self::new(row, col)
    }
}

impl ToNdIndex for CellId {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        self.coords().to_nd_index()
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

impl FromStr for CellId {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (row, col) = s.split_once(',').ok_or(GameError::InvalidCellId)?;
        let row = row.trim().parse().map_err(|_| GameError::InvalidCellId)?;
        let col = col.trim().parse().map_err(|_| GameError::InvalidCellId)?;
        Ok(Self::new(row, col))
    }
}

impl From<CellId> for String {
    fn from(id: CellId) -> Self {
        use alloc::string::ToString;
        id.to_string()
    }
}

impl TryFrom<String> for CellId {
    type Error = GameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_uses_row_comma_col_form() {
        let id = CellId::new(3, 14);

        assert_eq!(alloc::format!("{id}"), "3,14");
        assert_eq!("3,14".parse::<CellId>(), Ok(id));
        assert_eq!(" 3 , 14 ".parse::<CellId>(), Ok(id));
    }

    #[test]
    fn malformed_ids_are_rejected() {
        for bad in ["", "3", "3;4", "a,1", "1,", "-1,2", "256,0", "1,2,3"] {
            assert_eq!(bad.parse::<CellId>(), Err(GameError::InvalidCellId), "{bad}");
        }
    }

    #[test]
    fn id_serializes_as_string() {
        let id = CellId::new(0, 7);

        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"0,7\"");
        assert_eq!(serde_json::from_str::<CellId>(&json).unwrap(), id);
    }

    #[test]
    fn bounds_check() {
        assert!(CellId::new(2, 2).is_within((3, 3)));
        assert!(!CellId::new(3, 0).is_within((3, 3)));
        assert!(!CellId::new(0, 0).is_within((0, 5)));
    }
}
