use crate::engine::{Engine, GenerationResult};
use crate::error::{Error, Result};
use crate::rules::patterns::Pattern;
use crate::rules::CellState;
use std::fmt;

/// Where a run currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Paused: cells can be edited, generations are not advanced.
    Editing,
    /// Generations are advanced on every tick.
    Running,
    /// The field stopped changing or died out. Only a restart leaves this phase.
    Finished,
}

impl Phase {
    fn name(self) -> &'static str {
        match self {
            Phase::Editing => "editing",
            Phase::Running => "running",
            Phase::Finished => "finished",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A simulation run: the engine plus the editing/running/finished state machine that a
/// front end drives.
pub struct Session {
    engine: Engine,
    phase: Phase,
    last_result: Option<GenerationResult>,
}

impl Session {
    pub fn new(engine: Engine) -> Self {
        Self {
            engine,
            phase: Phase::Editing,
            last_result: None,
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn generation(&self) -> u64 {
        self.engine.generation()
    }

    /// Result of the most recent tick, if any.
    pub fn last_result(&self) -> Option<GenerationResult> {
        self.last_result
    }

    fn require(&self, phase: Phase, action: &'static str) -> Result<()> {
        if self.phase != phase {
            return Err(Error::InvalidPhase {
                action,
                phase: self.phase.name(),
            });
        }
        Ok(())
    }

    pub fn start(&mut self) -> Result<()> {
        self.require(Phase::Editing, "start")?;
        self.phase = Phase::Running;
        log::info!("The simulation has been started!");
        Ok(())
    }

    pub fn pause(&mut self) -> Result<()> {
        self.require(Phase::Running, "pause")?;
        self.phase = Phase::Editing;
        log::info!("The simulation has been paused.");
        Ok(())
    }

    /// Edit one cell while paused. Returns whether its state changed.
    pub fn edit(&mut self, index: usize, state: CellState) -> Result<bool> {
        self.require(Phase::Editing, "edit cells")?;
        self.engine.set_cell(index, state)
    }

    /// Edit the cell under a screen point while paused. Points off the field are ignored.
    pub fn edit_at_point(&mut self, x: i32, y: i32, state: CellState) -> Result<bool> {
        self.require(Phase::Editing, "edit cells")?;
        match self.engine.index_for_point(x, y) {
            Some(index) => self.engine.set_cell(index, state),
            None => Ok(false),
        }
    }

    /// Seed a pattern while paused. Returns how many cells changed.
    pub fn place(&mut self, pattern: Pattern, column: usize, row: usize) -> Result<usize> {
        self.require(Phase::Editing, "place patterns")?;
        pattern.place(&mut self.engine, column, row)
    }

    /// Advance one generation while running, finishing the run on a fixed point or extinction.
    pub fn tick(&mut self) -> Result<GenerationResult> {
        self.require(Phase::Running, "advance")?;
        let result = self.engine.advance_generation()?;
        self.last_result = Some(result);
        if result.is_terminal() {
            self.phase = Phase::Finished;
            log::info!(
                "The simulation has been finished after {} generations ({} cells alive).",
                self.engine.generation(),
                result.alive_count()
            );
        }
        Ok(result)
    }

    /// Throw the field away and start over with an empty one of the same shape.
    pub fn restart(&mut self) -> Result<()> {
        self.engine = self.engine.rebuilt()?;
        self.phase = Phase::Editing;
        self.last_result = None;
        Ok(())
    }
}
