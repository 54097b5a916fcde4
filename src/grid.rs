//! The cell field: a fixed-size, row-major array of cell states.

use crate::error::{Error, Result};
use crate::rules::CellState;

/// Size of the field in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    pub width_cells: usize,
    pub height_cells: usize,
}

impl Dimensions {
    pub fn new(width_cells: usize, height_cells: usize) -> Result<Self> {
        if width_cells == 0
            || height_cells == 0
            || width_cells.checked_mul(height_cells).is_none()
        {
            return Err(Error::InvalidDimensions {
                width: width_cells,
                height: height_cells,
            });
        }
        Ok(Self {
            width_cells,
            height_cells,
        })
    }

    /// Derive cell counts from a logical (screen) size and a tile size.
    ///
    /// Sizes that are not a multiple of `tile_size` are rounded up, so the last row or column
    /// may overhang the logical area by less than one tile.
    pub fn from_logical(logical_width: u32, logical_height: u32, tile_size: u32) -> Result<Self> {
        if tile_size == 0 {
            return Err(Error::InvalidTileSize(tile_size));
        }
        Self::new(
            logical_width.div_ceil(tile_size) as usize,
            logical_height.div_ceil(tile_size) as usize,
        )
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.width_cells * self.height_cells
    }
}

/// Screen rectangle covered by one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl CellRect {
    pub fn contains(&self, x: i32, y: i32) -> bool {
        let (x, y) = (x as i64, y as i64);
        x >= self.x as i64
            && x < self.x as i64 + self.w as i64
            && y >= self.y as i64
            && y < self.y as i64 + self.h as i64
    }
}

/// Dense row-major storage of cell states.
///
/// The cell count never changes after construction and the backing vector is never
/// reallocated: every update overwrites slots in place.
#[derive(Debug, Clone)]
pub struct Grid {
    dims: Dimensions,
    tile_size: u32,
    origin: [i32; 2],
    cells: Vec<CellState>,
    revision: u64,
}

impl Grid {
    /// Create a grid of `width_cells` x `height_cells` Empty cells with a 1-unit tile at the
    /// screen origin.
    pub fn new(width_cells: usize, height_cells: usize) -> Result<Self> {
        Self::with_layout(Dimensions::new(width_cells, height_cells)?, 1, [0, 0])
    }

    /// Create a grid whose cells are `tile_size` squares laid out from `origin`.
    pub fn with_layout(dims: Dimensions, tile_size: u32, origin: [i32; 2]) -> Result<Self> {
        if tile_size == 0 {
            return Err(Error::InvalidTileSize(tile_size));
        }
        let dims = Dimensions::new(dims.width_cells, dims.height_cells)?;
        Ok(Self {
            dims,
            tile_size,
            origin,
            cells: vec![CellState::Empty; dims.cell_count()],
            revision: 0,
        })
    }

    /// Create a grid covering a logical area of `logical_width` x `logical_height` units.
    pub fn from_logical(
        logical_width: u32,
        logical_height: u32,
        tile_size: u32,
        origin: [i32; 2],
    ) -> Result<Self> {
        let dims = Dimensions::from_logical(logical_width, logical_height, tile_size)?;
        Self::with_layout(dims, tile_size, origin)
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    pub fn width_cells(&self) -> usize {
        self.dims.width_cells
    }

    pub fn height_cells(&self) -> usize {
        self.dims.height_cells
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    pub fn origin(&self) -> [i32; 2] {
        self.origin
    }

    /// Number of effective mutations applied so far. Idempotent edits do not bump it.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn states(&self) -> &[CellState] {
        &self.cells
    }

    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|s| s.is_alive()).count()
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.cells.len() {
            return Err(Error::OutOfRange {
                index,
                cell_count: self.cells.len(),
            });
        }
        Ok(())
    }

    pub fn state_at(&self, index: usize) -> Result<CellState> {
        self.check_index(index)?;
        Ok(self.cells[index])
    }

    /// Overwrite one cell. Returns whether the state actually changed; writing the state a cell
    /// already holds is a no-op.
    pub fn set_state(&mut self, index: usize, state: CellState) -> Result<bool> {
        self.check_index(index)?;
        if self.cells[index] == state {
            return Ok(false);
        }
        self.cells[index] = state;
        self.revision += 1;
        Ok(true)
    }

    /// Replace every state at once with a fully evaluated next generation.
    pub(crate) fn commit(&mut self, staged: &[CellState]) {
        debug_assert_eq!(staged.len(), self.cells.len());
        self.cells.copy_from_slice(staged);
        self.revision += 1;
    }

    /// Row-major index of a cell, if the coordinates are on the field.
    #[inline]
    pub fn index_of(&self, column: usize, row: usize) -> Option<usize> {
        if column < self.dims.width_cells && row < self.dims.height_cells {
            Some(row * self.dims.width_cells + column)
        } else {
            None
        }
    }

    /// (column, row) of an index, if it is on the field.
    #[inline]
    pub fn coords_of(&self, index: usize) -> Option<(usize, usize)> {
        if index < self.cells.len() {
            Some((index % self.dims.width_cells, index / self.dims.width_cells))
        } else {
            None
        }
    }

    pub fn cell_rect(&self, index: usize) -> Result<CellRect> {
        self.check_index(index)?;
        let column = (index % self.dims.width_cells) as i64;
        let row = (index / self.dims.width_cells) as i64;
        let tile = self.tile_size as i64;
        Ok(CellRect {
            x: (self.origin[0] as i64 + column * tile) as i32,
            y: (self.origin[1] as i64 + row * tile) as i32,
            w: self.tile_size,
            h: self.tile_size,
        })
    }

    /// Map a screen point to the index of the cell whose rectangle contains it.
    pub fn index_for_point(&self, x: i32, y: i32) -> Option<usize> {
        let dx = x as i64 - self.origin[0] as i64;
        let dy = y as i64 - self.origin[1] as i64;
        if dx < 0 || dy < 0 {
            return None;
        }
        let tile = self.tile_size as i64;
        self.index_of((dx / tile) as usize, (dy / tile) as usize)
    }

    /// The states as raw tags (Empty = 0, Alive = 1, Dead = 2), one byte per cell, ready to be
    /// uploaded by a renderer.
    pub fn state_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.cells)
    }

    /// Load a snapshot produced by [`Grid::state_bytes`] in place.
    ///
    /// The whole snapshot is validated before anything is written. Returns whether any cell
    /// changed.
    pub fn restore_state_bytes(&mut self, bytes: &[u8]) -> Result<bool> {
        if bytes.len() != self.cells.len() {
            return Err(Error::InvalidSnapshot(format!(
                "expected {} bytes, got {}",
                self.cells.len(),
                bytes.len()
            )));
        }
        let states: &[CellState] = bytemuck::checked::try_cast_slice(bytes)
            .map_err(|e| Error::InvalidSnapshot(format!("{:?}", e)))?;
        if states == self.cells.as_slice() {
            return Ok(false);
        }
        self.commit(states);
        Ok(true)
    }
}
