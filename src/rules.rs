//! Cell states, the B3/S23 transition rule and position classification.

pub mod patterns;

use crate::error::{Error, Result};
use bytemuck::{CheckedBitPattern, NoUninit};

/// State of a single cell.
///
/// `Empty` is the untouched state every cell starts in. `Alive` and `Dead` are only reached
/// through simulation or an explicit edit. Empty and Dead behave the same under the rules but
/// stay distinct tags: a cell that was never alive is not reported as one that died.
///
/// The discriminants are the byte values exposed by [`crate::Grid::state_bytes`].
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, NoUninit, CheckedBitPattern)]
pub enum CellState {
    #[default]
    Empty = 0,
    Alive = 1,
    Dead = 2,
}

impl CellState {
    pub fn is_alive(self) -> bool {
        self == CellState::Alive
    }
}

/// Birth and survival thresholds over the three cell states.
///
/// An Alive cell stays Alive while its live-neighbor count is within
/// `survival_min..=survival_max` and turns Dead otherwise. Empty and Dead cells turn Alive on
/// exactly `birth_count` live neighbors and keep their tag otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameRules {
    pub survival_min: u32,
    pub survival_max: u32,
    pub birth_count: u32,
}

impl GameRules {
    /// Conway's classic Game of Life (B3/S23)
    pub const CONWAY: GameRules = GameRules {
        survival_min: 2,
        survival_max: 3,
        birth_count: 3,
    };

    /// Compute the state a cell moves to given how many of its neighbors are alive.
    pub fn next_state(&self, current: CellState, alive_neighbors: u32) -> CellState {
        match current {
            CellState::Alive => {
                if (self.survival_min..=self.survival_max).contains(&alive_neighbors) {
                    CellState::Alive
                } else {
                    CellState::Dead
                }
            }
            // A non-live cell that is not born keeps its own tag, Empty stays Empty.
            CellState::Dead | CellState::Empty => {
                if alive_neighbors == self.birth_count {
                    CellState::Alive
                } else {
                    current
                }
            }
        }
    }
}

impl Default for GameRules {
    fn default() -> Self {
        Self::CONWAY
    }
}

/// Transition rule used by the engine (classic B3/S23).
pub fn next_state(current: CellState, alive_neighbors: u32) -> CellState {
    GameRules::CONWAY.next_state(current, alive_neighbors)
}

/// Where a cell sits on the field, used to tell corners and edges from the interior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PositionClass {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    TopEdge,
    BottomEdge,
    LeftEdge,
    RightEdge,
    Interior,
}

impl PositionClass {
    pub fn is_corner(self) -> bool {
        matches!(
            self,
            PositionClass::TopLeft
                | PositionClass::TopRight
                | PositionClass::BottomLeft
                | PositionClass::BottomRight
        )
    }

    pub fn is_edge(self) -> bool {
        matches!(
            self,
            PositionClass::TopEdge
                | PositionClass::BottomEdge
                | PositionClass::LeftEdge
                | PositionClass::RightEdge
        )
    }
}

/// Classify a row-major index on a `width` x `height` field.
///
/// Corners are checked before edges, so on degenerate fields (a single row or column) every
/// index still lands in exactly one class.
pub fn classify_position(index: usize, width: usize, height: usize) -> Result<PositionClass> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimensions { width, height });
    }
    let cell_count = width
        .checked_mul(height)
        .ok_or(Error::InvalidDimensions { width, height })?;
    if index >= cell_count {
        return Err(Error::OutOfRange { index, cell_count });
    }

    let class = if index == 0 {
        PositionClass::TopLeft
    } else if index == width - 1 {
        PositionClass::TopRight
    } else if index == cell_count - 1 {
        PositionClass::BottomRight
    } else if index == cell_count - width {
        PositionClass::BottomLeft
    } else if index % width == 0 {
        PositionClass::LeftEdge
    } else if (index + 1) % width == 0 {
        PositionClass::RightEdge
    } else if index < width - 1 {
        PositionClass::TopEdge
    } else if index > cell_count - width {
        PositionClass::BottomEdge
    } else {
        PositionClass::Interior
    };

    Ok(class)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alive_survives_on_two_or_three() {
        assert_eq!(next_state(CellState::Alive, 2), CellState::Alive);
        assert_eq!(next_state(CellState::Alive, 3), CellState::Alive);
    }

    #[test]
    fn test_alive_dies_otherwise() {
        for count in [0, 1, 4, 5, 8] {
            assert_eq!(next_state(CellState::Alive, count), CellState::Dead, "count {}", count);
        }
    }

    #[test]
    fn test_birth_on_three() {
        assert_eq!(next_state(CellState::Empty, 3), CellState::Alive);
        assert_eq!(next_state(CellState::Dead, 3), CellState::Alive);
    }

    #[test]
    fn test_non_live_keeps_its_tag() {
        for count in [0, 1, 2, 4, 8] {
            assert_eq!(next_state(CellState::Empty, count), CellState::Empty);
            assert_eq!(next_state(CellState::Dead, count), CellState::Dead);
        }
    }

    #[test]
    fn test_state_byte_encoding() {
        assert_eq!(CellState::Empty as u8, 0);
        assert_eq!(CellState::Alive as u8, 1);
        assert_eq!(CellState::Dead as u8, 2);
    }

    #[test]
    fn test_classify_3x3() {
        use PositionClass::*;
        let expected = [
            TopLeft, TopEdge, TopRight,
            LeftEdge, Interior, RightEdge,
            BottomLeft, BottomEdge, BottomRight,
        ];
        for (index, class) in expected.iter().enumerate() {
            assert_eq!(classify_position(index, 3, 3).unwrap(), *class, "index {}", index);
        }
    }

    #[test]
    fn test_classify_overflowing_dimensions() {
        assert_eq!(
            classify_position(0, usize::MAX, 2),
            Err(Error::InvalidDimensions { width: usize::MAX, height: 2 })
        );
    }

    #[test]
    fn test_classify_single_cell() {
        assert_eq!(classify_position(0, 1, 1).unwrap(), PositionClass::TopLeft);
    }

    #[test]
    fn test_classify_single_row() {
        // 4x1: both ends are corners, the middle is top edge
        assert_eq!(classify_position(0, 4, 1).unwrap(), PositionClass::TopLeft);
        assert_eq!(classify_position(1, 4, 1).unwrap(), PositionClass::TopEdge);
        assert_eq!(classify_position(2, 4, 1).unwrap(), PositionClass::TopEdge);
        assert_eq!(classify_position(3, 4, 1).unwrap(), PositionClass::TopRight);
    }

    #[test]
    fn test_classify_single_column() {
        // 1x4: the first index is caught by TopLeft before TopRight, the last by BottomRight
        assert_eq!(classify_position(0, 1, 4).unwrap(), PositionClass::TopLeft);
        assert_eq!(classify_position(1, 1, 4).unwrap(), PositionClass::LeftEdge);
        assert_eq!(classify_position(2, 1, 4).unwrap(), PositionClass::LeftEdge);
        assert_eq!(classify_position(3, 1, 4).unwrap(), PositionClass::BottomRight);
    }

    #[test]
    fn test_classify_rejects_bad_input() {
        assert_eq!(
            classify_position(9, 3, 3),
            Err(Error::OutOfRange { index: 9, cell_count: 9 })
        );
        assert_eq!(
            classify_position(0, 0, 3),
            Err(Error::InvalidDimensions { width: 0, height: 3 })
        );
    }

    #[test]
    fn test_classify_counts_on_larger_field() {
        let (width, height) = (7, 5);
        let classes: Vec<_> = (0..width * height)
            .map(|i| classify_position(i, width, height).unwrap())
            .collect();
        assert_eq!(classes.iter().filter(|c| c.is_corner()).count(), 4);
        assert_eq!(
            classes.iter().filter(|c| c.is_edge()).count(),
            2 * (width - 2) + 2 * (height - 2)
        );
        assert_eq!(
            classes.iter().filter(|c| **c == PositionClass::Interior).count(),
            (width - 2) * (height - 2)
        );
    }
}
