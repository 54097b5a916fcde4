use crate::engine::Engine;
use crate::error::{Error, Result};
use crate::neighbors::Topology;
use crate::rules::CellState;
use std::fmt;
use std::str::FromStr;

/// Predefined patterns for seeding a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// A period 2 oscillator
    Blinker,
    /// A period 2 oscillator
    Toad,
    /// A small stationary pattern
    Block,
    /// A diagonal spaceship
    Glider,
    /// A horizontal spaceship
    LightweightSpaceship,
    /// A pattern that grows indefinitely
    GosperGliderGun,
}

impl Pattern {
    pub const ALL: [Pattern; 6] = [
        Pattern::Blinker,
        Pattern::Toad,
        Pattern::Block,
        Pattern::Glider,
        Pattern::LightweightSpaceship,
        Pattern::GosperGliderGun,
    ];

    /// Live cells as (column, row) offsets from the pattern's top-left corner
    pub fn cells(&self) -> &'static [(usize, usize)] {
        match self {
            Pattern::Blinker => &[(0, 0), (1, 0), (2, 0)],
            Pattern::Toad => &[
                (1, 0), (2, 0), (3, 0),
                (0, 1), (1, 1), (2, 1),
            ],
            Pattern::Block => &[
                (0, 0), (1, 0),
                (0, 1), (1, 1),
            ],
            Pattern::Glider => &[
                (1, 0),
                (2, 1),
                (0, 2), (1, 2), (2, 2),
            ],
            Pattern::LightweightSpaceship => &[
                (1, 0), (4, 0),
                (0, 1),
                (0, 2), (4, 2),
                (0, 3), (1, 3), (2, 3), (3, 3),
            ],
            Pattern::GosperGliderGun => &[
                // Left block
                (0, 4), (1, 4), (0, 5), (1, 5),

                // Left ship
                (10, 4), (10, 5), (10, 6),
                (11, 3), (11, 7),
                (12, 2), (12, 8),
                (13, 2), (13, 8),
                (14, 5),
                (15, 3), (15, 7),
                (16, 4), (16, 5), (16, 6),
                (17, 5),

                // Right ship
                (20, 2), (20, 3), (20, 4),
                (21, 2), (21, 3), (21, 4),
                (22, 1), (22, 5),
                (24, 0), (24, 1), (24, 5), (24, 6),

                // Right block
                (34, 2), (34, 3), (35, 2), (35, 3),
            ],
        }
    }

    /// Width and height of the pattern's bounding box
    pub fn size(&self) -> (usize, usize) {
        self.cells()
            .iter()
            .fold((0, 0), |(w, h), &(c, r)| (w.max(c + 1), h.max(r + 1)))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Pattern::Blinker => "blinker",
            Pattern::Toad => "toad",
            Pattern::Block => "block",
            Pattern::Glider => "glider",
            Pattern::LightweightSpaceship => "lwss",
            Pattern::GosperGliderGun => "gosper-gun",
        }
    }

    /// Set the pattern's cells Alive with its top-left corner at (`column`, `row`).
    ///
    /// On a bounded field cells past the border are dropped; on a toroidal one they wrap.
    /// Returns how many cells changed state.
    pub fn place(&self, engine: &mut Engine, column: usize, row: usize) -> Result<usize> {
        let (width, height) = (engine.width_cells(), engine.height_cells());
        let mut changed = 0;

        for &(dc, dr) in self.cells() {
            let index = match engine.topology() {
                Topology::Bounded => match (column.checked_add(dc), row.checked_add(dr)) {
                    (Some(c), Some(r)) => engine.grid().index_of(c, r),
                    _ => None,
                },
                // Reduce first so the offset cannot overflow
                Topology::Toroidal => engine
                    .grid()
                    .index_of((column % width + dc) % width, (row % height + dr) % height),
            };
            let Some(index) = index else {
                continue;
            };
            if engine.set_cell(index, CellState::Alive)? {
                changed += 1;
            }
        }

        log::debug!("Placed {} at ({}, {}): {} cells set", self, column, row, changed);
        Ok(changed)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Pattern {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "blinker" => Ok(Pattern::Blinker),
            "toad" => Ok(Pattern::Toad),
            "block" => Ok(Pattern::Block),
            "glider" => Ok(Pattern::Glider),
            "lwss" | "lightweight-spaceship" => Ok(Pattern::LightweightSpaceship),
            "gosper-gun" | "gosper" | "glider-gun" => Ok(Pattern::GosperGliderGun),
            _ => Err(Error::UnknownPattern(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Dimensions;

    fn engine(width: usize, height: usize, topology: Topology) -> Engine {
        Engine::from_dimensions(Dimensions::new(width, height).unwrap(), topology).unwrap()
    }

    #[test]
    fn test_pattern_sizes() {
        assert_eq!(Pattern::Blinker.size(), (3, 1));
        assert_eq!(Pattern::Block.size(), (2, 2));
        assert_eq!(Pattern::Glider.size(), (3, 3));
        assert_eq!(Pattern::LightweightSpaceship.size(), (5, 4));
        assert_eq!(Pattern::GosperGliderGun.size(), (36, 9));
        assert_eq!(Pattern::GosperGliderGun.cells().len(), 36);
    }

    #[test]
    fn test_place_counts_changes() {
        let mut engine = engine(10, 10, Topology::Bounded);
        assert_eq!(Pattern::Glider.place(&mut engine, 2, 2), Ok(5));
        assert_eq!(engine.grid().alive_count(), 5);
        // Placing again is a no-op
        assert_eq!(Pattern::Glider.place(&mut engine, 2, 2), Ok(0));
    }

    #[test]
    fn test_place_clips_on_bounded_field() {
        let mut engine = engine(4, 4, Topology::Bounded);
        assert_eq!(Pattern::Blinker.place(&mut engine, 2, 3), Ok(2));
        assert_eq!(engine.grid().alive_count(), 2);
    }

    #[test]
    fn test_place_wraps_on_torus() {
        let mut engine = engine(4, 4, Topology::Toroidal);
        assert_eq!(Pattern::Blinker.place(&mut engine, 2, 3), Ok(3));
        let wrapped = engine.grid().index_of(0, 3).unwrap();
        assert_eq!(engine.state_at(wrapped), Ok(CellState::Alive));
    }

    #[test]
    fn test_place_far_off_bounded_field() {
        let mut engine = engine(10, 10, Topology::Bounded);
        assert_eq!(Pattern::Glider.place(&mut engine, usize::MAX, 0), Ok(0));
        assert_eq!(Pattern::Glider.place(&mut engine, 0, usize::MAX), Ok(0));
        assert_eq!(engine.grid().alive_count(), 0);
    }

    #[test]
    fn test_place_far_coordinates_wrap_on_torus() {
        let mut engine = engine(10, 10, Topology::Toroidal);
        assert_eq!(Pattern::Glider.place(&mut engine, usize::MAX, usize::MAX), Ok(5));
        // usize::MAX reduces to 5 on a 10-cell axis
        let (column, row) = (usize::MAX % 10, usize::MAX % 10);
        for &(dc, dr) in Pattern::Glider.cells() {
            let index = engine
                .grid()
                .index_of((column + dc) % 10, (row + dr) % 10)
                .unwrap();
            assert_eq!(engine.state_at(index), Ok(CellState::Alive));
        }
    }

    #[test]
    fn test_pattern_names_roundtrip() {
        for pattern in Pattern::ALL {
            assert_eq!(pattern.name().parse::<Pattern>(), Ok(pattern));
        }
        assert_eq!("Gosper".parse::<Pattern>(), Ok(Pattern::GosperGliderGun));
        assert_eq!(
            "pulsar".parse::<Pattern>(),
            Err(Error::UnknownPattern("pulsar".to_string()))
        );
    }
}
