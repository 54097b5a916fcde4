//! Generation engine: applies the rules to every cell at once.

use crate::error::{Error, Result};
use crate::grid::{Dimensions, Grid};
use crate::neighbors::{NeighborSet, Topology};
use crate::rules::{next_state, CellState};

/// Outcome of one generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationResult {
    /// Whether any cell differs from the previous generation.
    pub changed: bool,
    /// Cells not Alive after the update.
    pub dead_or_empty_count: usize,
    pub cell_count: usize,
}

impl GenerationResult {
    pub fn alive_count(&self) -> usize {
        self.cell_count - self.dead_or_empty_count
    }

    /// The run is over: the field reached a fixed point or nothing is alive.
    pub fn is_terminal(&self) -> bool {
        !self.changed || self.dead_or_empty_count >= self.cell_count
    }
}

/// Count how many neighbors of `index` are currently Alive.
pub fn count_alive_neighbors(grid: &Grid, neighbors: &NeighborSet, index: usize) -> Result<u32> {
    if grid.dimensions() != neighbors.dimensions() {
        return Err(Error::NeighborSetMismatch);
    }
    grid.state_at(index)?;
    let states = grid.states();
    Ok(neighbors
        .neighbors_of(index)?
        .iter()
        .filter(|&&n| states[n].is_alive())
        .count() as u32)
}

/// Advance `grid` by one generation.
///
/// Every next state is computed from the current generation into a staging buffer; the grid is
/// only written once all cells have been evaluated, so no cell sees a neighbor's new state.
pub fn advance_generation(grid: &mut Grid, neighbors: &NeighborSet) -> Result<GenerationResult> {
    if grid.dimensions() != neighbors.dimensions() {
        return Err(Error::NeighborSetMismatch);
    }

    let cell_count = grid.cell_count();
    let mut staged = Vec::with_capacity(cell_count);
    let mut changed = false;
    let mut dead_or_empty_count = 0;

    {
        let states = grid.states();
        for (index, &current) in states.iter().enumerate() {
            let alive = neighbors
                .neighbors_of(index)?
                .iter()
                .filter(|&&n| states[n].is_alive())
                .count() as u32;
            let next = next_state(current, alive);
            changed |= next != current;
            if !next.is_alive() {
                dead_or_empty_count += 1;
            }
            staged.push(next);
        }
    }

    if changed {
        grid.commit(&staged);
    }

    Ok(GenerationResult {
        changed,
        dead_or_empty_count,
        cell_count,
    })
}

/// Edit a single cell outside of a generation step. Returns whether the state changed.
pub fn set_cell(grid: &mut Grid, index: usize, state: CellState) -> Result<bool> {
    grid.set_state(index, state)
}

/// A grid together with the neighbor geometry it was built with.
#[derive(Debug, Clone)]
pub struct Engine {
    grid: Grid,
    neighbors: NeighborSet,
    generation: u64,
}

impl Engine {
    /// Build a field covering `logical_width` x `logical_height` screen units at the origin.
    pub fn new(
        logical_width: u32,
        logical_height: u32,
        tile_size: u32,
        topology: Topology,
    ) -> Result<Self> {
        Self::with_origin(logical_width, logical_height, tile_size, topology, [0, 0])
    }

    /// Same as [`Engine::new`] with the field drawn from `origin` on screen.
    pub fn with_origin(
        logical_width: u32,
        logical_height: u32,
        tile_size: u32,
        topology: Topology,
        origin: [i32; 2],
    ) -> Result<Self> {
        let grid = Grid::from_logical(logical_width, logical_height, tile_size, origin)?;
        Ok(Self::from_grid(grid, topology))
    }

    /// Build a field of exactly `dims` cells with a 1-unit tile.
    pub fn from_dimensions(dims: Dimensions, topology: Topology) -> Result<Self> {
        let grid = Grid::with_layout(dims, 1, [0, 0])?;
        Ok(Self::from_grid(grid, topology))
    }

    fn from_grid(grid: Grid, topology: Topology) -> Self {
        let neighbors = NeighborSet::build(topology, grid.dimensions());
        log::info!(
            "Created {} field: {} cells ({} x {}), tile size {}",
            topology,
            grid.cell_count(),
            grid.width_cells(),
            grid.height_cells(),
            grid.tile_size()
        );
        Self {
            grid,
            neighbors,
            generation: 0,
        }
    }

    /// A new all-Empty engine with the same geometry and topology.
    pub fn rebuilt(&self) -> Result<Self> {
        let grid = Grid::with_layout(
            self.grid.dimensions(),
            self.grid.tile_size(),
            self.grid.origin(),
        )?;
        Ok(Self::from_grid(grid, self.neighbors.topology()))
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn neighbors(&self) -> &NeighborSet {
        &self.neighbors
    }

    pub fn topology(&self) -> Topology {
        self.neighbors.topology()
    }

    /// Number of generations advanced since construction.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn width_cells(&self) -> usize {
        self.grid.width_cells()
    }

    pub fn height_cells(&self) -> usize {
        self.grid.height_cells()
    }

    pub fn cell_count(&self) -> usize {
        self.grid.cell_count()
    }

    pub fn state_at(&self, index: usize) -> Result<CellState> {
        self.grid.state_at(index)
    }

    pub fn index_for_point(&self, x: i32, y: i32) -> Option<usize> {
        self.grid.index_for_point(x, y)
    }

    pub fn count_alive_neighbors(&self, index: usize) -> Result<u32> {
        count_alive_neighbors(&self.grid, &self.neighbors, index)
    }

    pub fn set_cell(&mut self, index: usize, state: CellState) -> Result<bool> {
        set_cell(&mut self.grid, index, state)
    }

    pub fn advance_generation(&mut self) -> Result<GenerationResult> {
        let result = advance_generation(&mut self.grid, &self.neighbors)?;
        self.generation += 1;
        log::debug!(
            "Generation {}: changed = {}, alive = {}, dead or empty = {}",
            self.generation,
            result.changed,
            result.alive_count(),
            result.dead_or_empty_count
        );
        Ok(result)
    }
}
