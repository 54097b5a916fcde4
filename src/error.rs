use thiserror::Error;

/// All the ways the engine, its configuration and the session can refuse a request.
///
/// Every failure is local and deterministic: nothing is mutated before an error is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An indexed access past the end of the grid.
    #[error("cell index {index} is out of range (grid has {cell_count} cells)")]
    OutOfRange { index: usize, cell_count: usize },
    /// Width or height resolves to zero cells.
    #[error("invalid grid dimensions {width}x{height}: both sides need at least one cell")]
    InvalidDimensions { width: usize, height: usize },
    #[error("invalid tile size {0}: must be at least 1")]
    InvalidTileSize(u32),
    #[error("unrecognized topology {0:?} (expected \"bounded\" or \"toroidal\")")]
    InvalidTopology(String),
    /// The neighbor set was built for a different geometry than the grid it is applied to.
    #[error("neighbor set does not match the grid dimensions")]
    NeighborSetMismatch,
    #[error("{name} = {value} is invalid, valid values are in range [{min} - {max}]")]
    Config {
        name: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
    #[error("cannot {action} while the session is {phase}")]
    InvalidPhase {
        action: &'static str,
        phase: &'static str,
    },
    #[error("invalid state snapshot: {0}")]
    InvalidSnapshot(String),
    #[error("unknown pattern {0:?}")]
    UnknownPattern(String),
}

pub type Result<T> = std::result::Result<T, Error>;
