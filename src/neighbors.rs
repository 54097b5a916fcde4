//! Neighbor geometry for bounded and toroidal fields.
//!
//! Neighbor lists depend only on the topology and the field size, never on cell states, so
//! they are computed once per field and stored as index lists into the grid.

use crate::error::{Error, Result};
use crate::grid::Dimensions;
use std::fmt;
use std::str::FromStr;

/// How the edges of the field behave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Topology {
    /// Cells past the border do not exist: corners see 3 neighbors, edges 5.
    #[default]
    Bounded,
    /// Rows and columns wrap around, every cell sees a full neighborhood.
    Toroidal,
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Topology::Bounded => write!(f, "bounded"),
            Topology::Toroidal => write!(f, "toroidal"),
        }
    }
}

impl FromStr for Topology {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bounded" | "borders" | "1" => Ok(Topology::Bounded),
            "toroidal" | "torus" | "tor" | "2" => Ok(Topology::Toroidal),
            _ => Err(Error::InvalidTopology(s.to_string())),
        }
    }
}

/// Numeric field type tags: 1 = bordered field, 2 = torus.
impl TryFrom<u8> for Topology {
    type Error = Error;

    fn try_from(tag: u8) -> Result<Self> {
        match tag {
            1 => Ok(Topology::Bounded),
            2 => Ok(Topology::Toroidal),
            other => Err(Error::InvalidTopology(other.to_string())),
        }
    }
}

/// Precomputed neighbor indices for every cell of one field.
///
/// Stored flat: the neighbors of cell `i` are `indices[starts[i]..starts[i + 1]]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighborSet {
    topology: Topology,
    dims: Dimensions,
    starts: Vec<usize>,
    indices: Vec<usize>,
}

// Moore neighborhood, row by row.
const OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

impl NeighborSet {
    pub fn build(topology: Topology, dims: Dimensions) -> Self {
        let cell_count = dims.cell_count();
        let width = dims.width_cells as isize;
        let height = dims.height_cells as isize;

        let mut starts = Vec::with_capacity(cell_count + 1);
        let mut indices = Vec::with_capacity(cell_count * OFFSETS.len());

        for index in 0..cell_count {
            starts.push(indices.len());
            let row = (index / dims.width_cells) as isize;
            let column = (index % dims.width_cells) as isize;
            let first = indices.len();

            for (dr, dc) in OFFSETS {
                let neighbor = match topology {
                    Topology::Bounded => {
                        let (r, c) = (row + dr, column + dc);
                        if r < 0 || r >= height || c < 0 || c >= width {
                            continue;
                        }
                        (r * width + c) as usize
                    }
                    Topology::Toroidal => {
                        let r = (row + dr).rem_euclid(height);
                        let c = (column + dc).rem_euclid(width);
                        (r * width + c) as usize
                    }
                };
                // On a torus narrower than 3 cells several offsets wrap onto the same cell, or
                // onto the cell itself; each neighbor is counted once and a cell is never its
                // own neighbor.
                if neighbor == index || indices[first..].contains(&neighbor) {
                    continue;
                }
                indices.push(neighbor);
            }
        }
        starts.push(indices.len());

        log::debug!(
            "Built {} neighbor set for {}x{} field ({} links)",
            topology,
            dims.width_cells,
            dims.height_cells,
            indices.len()
        );

        Self {
            topology,
            dims,
            starts,
            indices,
        }
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    pub fn cell_count(&self) -> usize {
        self.starts.len() - 1
    }

    pub fn neighbors_of(&self, index: usize) -> Result<&[usize]> {
        if index >= self.cell_count() {
            return Err(Error::OutOfRange {
                index,
                cell_count: self.cell_count(),
            });
        }
        Ok(&self.indices[self.starts[index]..self.starts[index + 1]])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{classify_position, PositionClass};

    fn dims(width: usize, height: usize) -> Dimensions {
        Dimensions::new(width, height).unwrap()
    }

    fn sorted(list: &[usize]) -> Vec<usize> {
        let mut v = list.to_vec();
        v.sort_unstable();
        v
    }

    #[test]
    fn test_bounded_3x3_counts() {
        let set = NeighborSet::build(Topology::Bounded, dims(3, 3));
        let counts: Vec<usize> = (0..9).map(|i| set.neighbors_of(i).unwrap().len()).collect();
        assert_eq!(counts, vec![3, 5, 3, 5, 8, 5, 3, 5, 3]);
        assert_eq!(sorted(set.neighbors_of(0).unwrap()), vec![1, 3, 4]);
        assert_eq!(sorted(set.neighbors_of(4).unwrap()), vec![0, 1, 2, 3, 5, 6, 7, 8]);
        assert_eq!(sorted(set.neighbors_of(5).unwrap()), vec![1, 2, 4, 7, 8]);
    }

    #[test]
    fn test_bounded_counts_follow_position_class() {
        let (width, height) = (6, 4);
        let set = NeighborSet::build(Topology::Bounded, dims(width, height));
        for index in 0..width * height {
            let expected = match classify_position(index, width, height).unwrap() {
                c if c.is_corner() => 3,
                c if c.is_edge() => 5,
                PositionClass::Interior => 8,
                _ => unreachable!(),
            };
            assert_eq!(set.neighbors_of(index).unwrap().len(), expected, "index {}", index);
        }
    }

    #[test]
    fn test_toroidal_corner_wraps() {
        let set = NeighborSet::build(Topology::Toroidal, dims(4, 3));
        // Top-left corner of a 4x3 torus
        assert_eq!(
            sorted(set.neighbors_of(0).unwrap()),
            vec![1, 3, 4, 5, 7, 8, 9, 11]
        );
        // Bottom-right corner
        assert_eq!(
            sorted(set.neighbors_of(11).unwrap()),
            vec![0, 2, 3, 4, 6, 7, 8, 10]
        );
    }

    #[test]
    fn test_toroidal_full_and_symmetric() {
        for (width, height) in [(3, 3), (4, 7), (10, 5)] {
            let set = NeighborSet::build(Topology::Toroidal, dims(width, height));
            for i in 0..width * height {
                let list = set.neighbors_of(i).unwrap();
                assert_eq!(list.len(), 8);
                assert_eq!(sorted(list).windows(2).filter(|w| w[0] == w[1]).count(), 0);
                for &j in list {
                    assert!(set.neighbors_of(j).unwrap().contains(&i), "{} -> {}", i, j);
                }
            }
        }
    }

    #[test]
    fn test_bounded_symmetric() {
        let set = NeighborSet::build(Topology::Bounded, dims(5, 4));
        for i in 0..20 {
            for &j in set.neighbors_of(i).unwrap() {
                assert!(set.neighbors_of(j).unwrap().contains(&i));
            }
        }
    }

    #[test]
    fn test_degenerate_fields() {
        let single = NeighborSet::build(Topology::Toroidal, dims(1, 1));
        assert!(single.neighbors_of(0).unwrap().is_empty());

        let bounded_row = NeighborSet::build(Topology::Bounded, dims(4, 1));
        assert_eq!(sorted(bounded_row.neighbors_of(0).unwrap()), vec![1]);
        assert_eq!(sorted(bounded_row.neighbors_of(2).unwrap()), vec![1, 3]);

        // A 2 wide torus sees its other column once, never twice
        let narrow = NeighborSet::build(Topology::Toroidal, dims(2, 3));
        assert_eq!(sorted(narrow.neighbors_of(0).unwrap()), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_neighbors_out_of_range() {
        let set = NeighborSet::build(Topology::Bounded, dims(2, 2));
        assert_eq!(
            set.neighbors_of(4),
            Err(Error::OutOfRange { index: 4, cell_count: 4 })
        );
    }

    #[test]
    fn test_topology_parsing() {
        assert_eq!("bounded".parse::<Topology>(), Ok(Topology::Bounded));
        assert_eq!("Toroidal".parse::<Topology>(), Ok(Topology::Toroidal));
        assert_eq!(" torus ".parse::<Topology>(), Ok(Topology::Toroidal));
        assert_eq!(
            "klein".parse::<Topology>(),
            Err(Error::InvalidTopology("klein".to_string()))
        );
        assert_eq!(Topology::try_from(1u8), Ok(Topology::Bounded));
        assert_eq!(Topology::try_from(2u8), Ok(Topology::Toroidal));
        assert_eq!(Topology::try_from(3u8), Err(Error::InvalidTopology("3".to_string())));
        assert_eq!(Topology::Toroidal.to_string(), "toroidal");
    }
}
